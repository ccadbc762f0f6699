use crate::cli_args::InitArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use mdbundle_core::{BundleConfig, DEFAULT_CONFIG_FILENAME};

pub fn handle_init_command(args: &InitArgs, quiet: bool) -> Result<()> {
    let path = args.dir.join(DEFAULT_CONFIG_FILENAME);
    BundleConfig::save_default(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    if !quiet {
        println!(
            "{} Created {}",
            "✅".green(),
            path.display().to_string().blue()
        );
    }
    Ok(())
}

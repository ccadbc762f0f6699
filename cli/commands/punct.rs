use crate::cli_args::PunctArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use mdbundle_core::{to_chinese, to_english};
use std::fs;
use std::io::Read;

pub fn handle_punct_command(args: &PunctArgs, quiet: bool) -> Result<()> {
    let convert: fn(&str) -> String = match args.to.as_str() {
        "en" => to_english,
        _ => to_chinese,
    };

    match &args.file {
        Some(file) => {
            let input = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let target = args.output.as_ref().unwrap_or(file);
            fs::write(target, convert(&input))
                .with_context(|| format!("Failed to write {}", target.display()))?;
            if !quiet {
                println!(
                    "{} Converted punctuation into {}",
                    "✅".green(),
                    target.display().to_string().blue()
                );
            }
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            print!("{}", convert(&input));
        }
    }
    Ok(())
}

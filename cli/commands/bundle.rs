use crate::cli_args::BundleArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use mdbundle_core::{self as core, AppError, BundleConfig, BundleOptions};
use std::env;
use std::path::{Path, PathBuf};

pub fn handle_bundle_command(args: &BundleArgs, quiet: bool) -> Result<()> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;

    let (mut roots, output, mut options) = match &args.config {
        Some(config_path) => {
            let config_path = absolute(config_path, &cwd);
            let config = BundleConfig::load_from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            let base = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (
                config.resolve_paths(&base),
                config.resolve_output(&base),
                config.options,
            )
        }
        None => {
            // clap enforces --output here; double-checked for direct callers.
            let output = args.output.clone().ok_or_else(|| {
                AppError::InvalidArgument("--output is required without --config".to_string())
            })?;
            (Vec::new(), absolute(&output, &cwd), BundleOptions::default())
        }
    };

    roots.extend(args.paths.iter().map(|p| absolute(p, &cwd)));
    if roots.is_empty() {
        anyhow::bail!(AppError::InvalidArgument(
            "No input paths given; pass paths or a --config with paths".to_string()
        ));
    }

    // CLI flags layer on top of the config document.
    if args.ignore_git {
        options.ignore_git = true;
    }
    if args.include_hidden {
        options.include_hidden = true;
    }
    options.ignores.extend(args.ignores.iter().cloned());
    options.prefix.extend(args.prefix.iter().cloned());
    if let Some(base_dir) = &args.base_dir {
        options.output_base_dir = Some(absolute(base_dir, &cwd));
    }

    log::info!("Collecting files from {} root(s)...", roots.len());
    let files = core::collect_files(&roots, &options);
    log::info!("Found {} file(s) to bundle.", files.len());

    core::concatenate(&files, &output, &roots, &options)
        .with_context(|| format!("Failed to write bundle to {}", output.display()))?;

    if !quiet {
        println!(
            "{} Bundled {} file(s) into {}",
            "✅".green(),
            files.len(),
            output.display().to_string().blue()
        );
    }
    Ok(())
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

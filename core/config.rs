use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "mdbundle.json";
pub const CONFIG_TYPE_TAG: &str = "bundle";

/// Options threaded through one collect + concatenate call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleOptions {
    /// Lines prepended to the output file, joined by newlines.
    pub prefix: Vec<String>,
    /// Bypass on-disk ignore files. Caller-supplied `ignores` still apply.
    pub ignore_git: bool,
    /// Visit entries whose name starts with a dot.
    pub include_hidden: bool,
    /// Extra gitignore-syntax patterns, always layered into the ruleset.
    pub ignores: Vec<String>,
    /// Overrides the root used to compute relative display titles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_base_dir: Option<PathBuf>,
}

/// On-disk bundle description, the JSON document the `bundle --config`
/// flow is driven by.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub paths: Vec<String>,
    pub output: String,
    #[serde(flatten)]
    pub options: BundleOptions,
}

impl Default for BundleConfig {
    fn default() -> Self {
        BundleConfig {
            type_tag: CONFIG_TYPE_TAG.to_string(),
            paths: Vec::new(),
            output: String::new(),
            options: BundleOptions::default(),
        }
    }
}

impl BundleConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        log::debug!("Loading bundle config from: {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: BundleConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.type_tag != CONFIG_TYPE_TAG {
            return Err(AppError::Config(format!(
                "Unexpected config type '{}', expected '{}'",
                self.type_tag, CONFIG_TYPE_TAG
            )));
        }
        if self.output.trim().is_empty() {
            return Err(AppError::Config(
                "Bundle config is missing an output path".to_string(),
            ));
        }
        Ok(())
    }

    /// Writes a default config skeleton. Refuses to clobber an existing file.
    pub fn save_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(AppError::Config(format!(
                "Config file already exists: {}",
                path.display()
            )));
        }
        let content = serde_json::to_string_pretty(&BundleConfig::default())?;
        fs::write(path, content).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Wrote default bundle config to: {}", path.display());
        Ok(())
    }

    /// Resolves the configured input paths against `base` (normally the
    /// directory holding the config file). Absolute entries pass through.
    pub fn resolve_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|p| {
                let path = PathBuf::from(p);
                if path.is_absolute() {
                    path
                } else {
                    base.join(path)
                }
            })
            .collect()
    }

    /// Resolves the configured output path against `base`.
    pub fn resolve_output(&self, base: &Path) -> PathBuf {
        let output = PathBuf::from(&self.output);
        if output.is_absolute() {
            output
        } else {
            base.join(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_minimal_config() {
        let raw = r#"{ "type": "bundle", "paths": ["src", "README.md"], "output": "bundle.md" }"#;
        let config: BundleConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.type_tag, CONFIG_TYPE_TAG);
        assert_eq!(config.paths, vec!["src", "README.md"]);
        assert_eq!(config.output, "bundle.md");
        assert_eq!(config.options, BundleOptions::default());
    }

    #[test]
    fn parses_flattened_options() {
        let raw = r##"{
            "type": "bundle",
            "paths": [],
            "output": "out.md",
            "ignoreGit": true,
            "includeHidden": true,
            "ignores": ["*.log"],
            "prefix": ["# Bundle"],
            "outputBaseDir": "/tmp/base"
        }"##;
        let config: BundleConfig = serde_json::from_str(raw).unwrap();
        assert!(config.options.ignore_git);
        assert!(config.options.include_hidden);
        assert_eq!(config.options.ignores, vec!["*.log"]);
        assert_eq!(config.options.prefix, vec!["# Bundle"]);
        assert_eq!(config.options.output_base_dir, Some(PathBuf::from("/tmp/base")));
    }

    #[test]
    fn rejects_wrong_type_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, r#"{ "type": "mergeFile", "paths": [], "output": "o.md" }"#).unwrap();
        assert!(matches!(
            BundleConfig::load_from_path(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn save_default_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        BundleConfig::save_default(&path).unwrap();
        assert!(path.is_file());
        assert!(matches!(
            BundleConfig::save_default(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn resolves_relative_paths_against_base() {
        let config = BundleConfig {
            paths: vec!["src".to_string(), "/abs/file.txt".to_string()],
            output: "out/bundle.md".to_string(),
            ..BundleConfig::default()
        };
        let base = Path::new("/work");
        assert_eq!(
            config.resolve_paths(base),
            vec![PathBuf::from("/work/src"), PathBuf::from("/abs/file.txt")]
        );
        assert_eq!(config.resolve_output(base), PathBuf::from("/work/out/bundle.md"));
    }
}

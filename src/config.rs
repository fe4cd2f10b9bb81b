//! Configuration file schema for structscan.
//!
//! All fields are optional; command-line flags take precedence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::discover::{build_exclude_set, ScanOptions};

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["structscan.yaml", ".structscan.yaml"];

/// Config written by `structscan init`.
pub const DEFAULT_CONFIG: &str = r#"# structscan configuration

# Select every top-level struct that is not marked `easyjson:skip`.
# Without this only types marked `easyjson:json` are selected.
all_structs: false

# Glob patterns for files to leave out of directory scans, matched against
# both the file name and the full path.
exclude: []

# Output format: pretty or json
format: pretty
"#;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub all_structs: Option<bool>,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// "pretty" (default) or "json"
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a config file in `dir`, if any.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Returns whether every struct is selected (defaults to false).
    pub fn should_select_all_structs(&self) -> bool {
        self.all_structs.unwrap_or(false)
    }

    /// Returns the output format (defaults to "pretty").
    pub fn get_format(&self) -> &str {
        self.format.as_deref().unwrap_or("pretty")
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::default().all_structs(self.should_select_all_structs())
    }
}

/// Validate a config.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    let format = config.get_format();
    if format != "pretty" && format != "json" {
        anyhow::bail!("invalid format {:?}, must be 'pretty' or 'json'", format);
    }

    build_exclude_set(&config.exclude)
        .map_err(|e| anyhow::anyhow!("invalid exclude pattern: {}", e))?;

    Ok(())
}

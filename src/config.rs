use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Shell settings read from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellConfig {
    /// Archive backing the virtual filesystem
    pub vfs_path: PathBuf,
    /// Shown in the prompt
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Action journal location
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("actions.jsonl")
}

impl ShellConfig {
    /// Load and validate a config file.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.vfs_path = anchor(base, &config.vfs_path);
            config.log_path = anchor(base, &config.log_path);
        }
        Ok(config)
    }

    /// Parse config JSON without touching the filesystem
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("Invalid config JSON")?;
        if config.vfs_path.as_os_str().is_empty() {
            anyhow::bail!("vfs_path must not be empty");
        }
        Ok(config)
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

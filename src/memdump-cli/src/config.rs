//! Configuration management for memdump CLI

use anyhow::{Context, Result};
use memdump::{check_memory_size, MEMORY_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Files compared when neither the command line nor the config names any
pub const DEFAULT_INPUTS: [&str; 2] = ["reference.txt", "memory_00.txt"];

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Ordered compare inputs; the first one is the reference
    pub inputs: Option<Vec<PathBuf>>,
    pub memory_size: Option<usize>,
    pub flush_trailing: Option<bool>,
    pub headers: Option<bool>,
}

/// Fully resolved settings for one `compare` run
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub inputs: Vec<PathBuf>,
    pub memory_size: usize,
    pub flush_trailing: bool,
    pub headers: bool,
}

/// Command-line values for `compare`; flags only ever switch options on
#[derive(Debug, Default)]
pub struct CompareArgs {
    pub files: Vec<PathBuf>,
    pub memory_size: Option<usize>,
    pub flush_trailing: bool,
    pub headers: bool,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("memdump");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path`, or the default if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Merge command-line overrides over the stored values.
    ///
    /// Explicit files beat the configured list, which beats [`DEFAULT_INPUTS`].
    /// Fails if the resulting memory size is out of bounds.
    pub fn compare_config(&self, args: CompareArgs) -> Result<CompareConfig> {
        let inputs = if !args.files.is_empty() {
            args.files
        } else if let Some(inputs) = &self.inputs {
            inputs.clone()
        } else {
            DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
        };

        let memory_size = args.memory_size.or(self.memory_size).unwrap_or(MEMORY_SIZE);
        let memory_size = check_memory_size(memory_size).context("Bad memory_size setting")?;

        Ok(CompareConfig {
            inputs,
            memory_size,
            flush_trailing: args.flush_trailing || self.flush_trailing.unwrap_or(false),
            headers: args.headers || self.headers.unwrap_or(false),
        })
    }
}

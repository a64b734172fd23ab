//! `pagesmith.toml` configuration.

use anyhow::{Context, Result};
use pagesmith_lock::LockGranularity;
use pagesmith_post::PostProcessOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pagesmith.toml";

pub const DEFAULT_LOG_FILTER: &str = "pagesmith=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Title for imported designs when the export has none.
    pub title: Option<String>,
    pub lang: String,
    pub mobile_nav: bool,
    pub lock_granularity: LockGranularity,
}

impl Default for CliConfig {
    fn default() -> Self {
        let post = PostProcessOptions::default();
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            title: None,
            lang: post.lang,
            mobile_nav: post.mobile_nav,
            lock_granularity: LockGranularity::default(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn post_options(&self) -> PostProcessOptions {
        PostProcessOptions {
            lang: self.lang.clone(),
            mobile_nav: self.mobile_nav,
            ..Default::default()
        }
    }
}

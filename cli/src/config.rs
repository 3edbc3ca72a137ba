//! `--config` file: logging settings.
//!
//! ```yaml
//! log:
//!   level: info
//!   components:
//!     argcodec-abi: trace
//!   json: false
//! ```

use anyhow::{Context, Result};
use argcodec_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogConfig,
}

impl CliConfig {
    /// Defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parse config file '{}'", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

//! Session configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::TREE_NAMES;
use crate::error::{PewenError, Result};
use crate::wallet::DEFAULT_ADDRESS_PREFIX;

/// Configuration for a Pewen session.
///
/// Every field has a default, so an empty TOML document is valid.
///
/// ```
/// use pewen::PewenConfig;
///
/// let config = PewenConfig::from_toml_str("tick_interval_ms = 250").unwrap();
/// assert_eq!(config.tick_interval().as_millis(), 250);
/// assert_eq!(config.names.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PewenConfig {
    /// Milliseconds between decay ticks
    pub tick_interval_ms: u64,

    /// Names a tree can be given on adoption
    pub names: Vec<String>,

    /// Prefix for mock wallet addresses
    pub address_prefix: String,

    /// Seed for name picks and mock addresses. Random when unset.
    pub seed: Option<u64>,
}

impl Default for PewenConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            names: TREE_NAMES.iter().map(|n| n.to_string()).collect(),
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            seed: None,
        }
    }
}

impl PewenConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PewenConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Check the values make a usable session.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PewenError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        validate_names(&self.names)
    }

    /// Decay period as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Check a tree name set: at least one name, none blank.
pub fn validate_names(names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(PewenError::Config("names must not be empty".to_string()));
    }
    if let Some(blank) = names.iter().position(|n| n.trim().is_empty()) {
        return Err(PewenError::Config(format!("names[{}] is blank", blank)));
    }
    Ok(())
}

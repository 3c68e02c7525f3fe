use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::Policy;

/// Top-level configuration from `.confaudit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// Extra content patterns merged into the built-in sweep sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Additional whole-word keywords flagged as cleartext secrets.
    #[serde(default)]
    pub extra_keywords: Vec<String>,
    /// Additional literal fragments flagged as insecure commands.
    #[serde(default)]
    pub extra_commands: Vec<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# confaudit configuration

[policy]
# Minimum score/total ratio required to pass (1.0 requires full compliance).
min_ratio = 1.0

# Directives to skip entirely; they drop out of both score and total.
# ignore_directives = ["AllowUsers"]

[scanner]
# Extra whole-word keywords flagged as cleartext secrets during sweeps.
# extra_keywords = ["passphrase"]

# Extra literal command fragments flagged as insecure during sweeps.
# extra_commands = ["--no-verify-peer"]
"#
    }
}

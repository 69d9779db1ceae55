// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read once at startup from a TOML file and is immutable
//! afterwards. A handful of environment variables override file values.
//!
//! ## File layout
//!
//! ```toml
//! [network]
//! name = "Arbitrum One"
//! rpc_url = "https://arb1.arbitrum.io/rpc"
//! chain_id = 42161
//! explorer_url = "https://arbiscan.io"
//!
//! [transactions]
//! native_gas_limit = 30000
//! token_gas_limit = 200000
//!
//! [account]
//! test_address = "0x..."
//! test_private_key = "0x..."
//! receiver_address = "0x..."
//! erc20_contract_address = "0x..."
//!
//! [logging]
//! file = "arb_log.txt"
//! format = "pretty"
//! level = "info"
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ARB_CONFIG` | Path of the configuration file | `arb-client.toml` |
//! | `ARB_RPC_URL` | Overrides `network.rpc_url` | - |
//! | `ARB_CHAIN_ID` | Overrides `network.chain_id` | - |
//! | `ARB_PRIVATE_KEY` | Overrides `account.test_private_key` | - |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::blockchain::{parse_address, GasLimits, NetworkConfig, MIN_GAS_LIMIT};

/// Environment variable name for the configuration file path.
pub const CONFIG_PATH_ENV: &str = "ARB_CONFIG";

/// Configuration file used when neither `--config` nor `ARB_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "arb-client.toml";

/// Environment variable overriding the RPC endpoint.
pub const RPC_URL_ENV: &str = "ARB_RPC_URL";

/// Environment variable overriding the chain id.
pub const CHAIN_ID_ENV: &str = "ARB_CHAIN_ID";

/// Environment variable overriding the sender private key.
///
/// Keeps the secret out of the config file and shell history.
pub const PRIVATE_KEY_ENV: &str = "ARB_PRIVATE_KEY";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// RPC endpoint and chain identity.
    pub network: NetworkConfig,

    /// Gas limits for transfers.
    pub transactions: GasLimits,

    /// Test account and default counterparties.
    pub account: AccountConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Addresses and key used as CLI defaults when testing.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub test_address: Option<String>,
    pub test_private_key: Option<String>,
    pub receiver_address: Option<String>,
    pub erc20_contract_address: Option<String>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("test_address", &self.test_address)
            .field(
                "test_private_key",
                &self.test_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("receiver_address", &self.receiver_address)
            .field("erc20_contract_address", &self.erc20_contract_address)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be `pretty` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path; lines are appended.
    pub file: PathBuf,
    /// Output format of the file layer.
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("arb_log.txt"),
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(RPC_URL_ENV) {
            self.network.rpc_url = url;
        }
        if let Some(raw) = lookup(CHAIN_ID_ENV) {
            self.network.chain_id = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{CHAIN_ID_ENV} must be an integer, got `{raw}`"))
            })?;
        }
        if let Some(key) = lookup(PRIVATE_KEY_ENV) {
            self.account.test_private_key = Some(key);
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }

    /// Check values that would otherwise only fail at first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url: url::Url = self.network.rpc_url.parse().map_err(|e| {
            ConfigError::Invalid(format!("network.rpc_url `{}`: {e}", self.network.rpc_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "network.rpc_url must use http or https, got `{}`",
                url.scheme()
            )));
        }

        if self.network.chain_id == 0 {
            return Err(ConfigError::Invalid("network.chain_id must be > 0".to_string()));
        }

        for (name, limit) in [
            ("transactions.native_gas_limit", self.transactions.native_gas_limit),
            ("transactions.token_gas_limit", self.transactions.token_gas_limit),
        ] {
            if limit < MIN_GAS_LIMIT {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at least {MIN_GAS_LIMIT}, got {limit}"
                )));
            }
        }

        for (name, value) in [
            ("account.test_address", &self.account.test_address),
            ("account.receiver_address", &self.account.receiver_address),
            ("account.erc20_contract_address", &self.account.erc20_contract_address),
        ] {
            if let Some(address) = value {
                parse_address(address)
                    .map_err(|e| ConfigError::Invalid(format!("{name}: {e}")))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const FULL: &str = r#"
[network]
name = "Arbitrum One"
rpc_url = "https://arb1.arbitrum.io/rpc"
chain_id = 42161
explorer_url = "https://arbiscan.io"

[transactions]
native_gas_limit = 35000

[account]
test_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
receiver_address = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
erc20_contract_address = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"

[logging]
file = "logs/arb.log"
format = "json"
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parses_full_file() {
        let file = write_config(FULL);
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.network.chain_id, 42161);
        assert_eq!(config.transactions.native_gas_limit, 35_000);
        // Missing keys fall back to defaults
        assert_eq!(config.transactions.token_gas_limit, 200_000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.file, PathBuf::from("logs/arb.log"));
        assert_eq!(config.logging.level, "info");
        assert!(config.account.test_private_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_yields_arbitrum_one_defaults() {
        let file = write_config("");
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.network, NetworkConfig::arbitrum_one());
        assert_eq!(config.logging.file, PathBuf::from("arb_log.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let file = write_config("[network\nchain_id = ");
        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn overrides_replace_file_values() {
        let file = write_config(FULL);
        let mut config = AppConfig::from_file(file.path()).unwrap();
        config
            .apply_overrides(env(&[
                (RPC_URL_ENV, "http://localhost:8547"),
                (CHAIN_ID_ENV, "412346"),
                (PRIVATE_KEY_ENV, "0xabc"),
                (LOG_FORMAT_ENV, "pretty"),
            ]))
            .unwrap();

        assert_eq!(config.network.rpc_url, "http://localhost:8547");
        assert_eq!(config.network.chain_id, 412346);
        assert_eq!(config.account.test_private_key.as_deref(), Some("0xabc"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(env(&[(CHAIN_ID_ENV, "arb")])).is_err());
        assert!(config.apply_overrides(env(&[(LOG_FORMAT_ENV, "xml")])).is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.network.rpc_url = "ws://127.0.0.1:8546".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.network.chain_id = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.transactions.native_gas_limit = 20_999;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.account.receiver_address = Some("0x1234".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_private_key() {
        let account = AccountConfig {
            test_private_key: Some("0xsecret".to_string()),
            ..Default::default()
        };
        let debug = format!("{account:?}");
        assert!(!debug.contains("secret"));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::ClientError;
use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level error of the command-line client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Missing {what}: pass {flag} or set `{key}` in the config file")]
    MissingArgument {
        what: &'static str,
        flag: &'static str,
        key: &'static str,
    },

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// `2` for usage and configuration problems, `3` when the node cannot be
    /// reached, `4` when funds are insufficient, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::MissingArgument { .. } => 2,
            Self::Client(ClientError::InvalidAddress(_))
            | Self::Client(ClientError::InvalidHash(_))
            | Self::Client(ClientError::InvalidAmount(_))
            | Self::Client(ClientError::InvalidPrivateKey(_))
            | Self::Client(ClientError::InvalidRpcUrl(_)) => 2,
            Self::Client(ClientError::Unreachable { .. })
            | Self::Client(ClientError::ChainIdMismatch { .. }) => 3,
            Self::Client(ClientError::InsufficientFunds { .. }) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn exit_codes_by_category() {
        let missing = AppError::MissingArgument {
            what: "receiver address",
            flag: "--to",
            key: "account.receiver_address",
        };
        assert_eq!(missing.exit_code(), 2);

        let config: AppError = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(config.exit_code(), 2);

        let amount: AppError = ClientError::InvalidAmount("x".to_string()).into();
        assert_eq!(amount.exit_code(), 2);

        let unreachable: AppError = ClientError::Unreachable {
            url: "http://127.0.0.1:1".to_string(),
            reason: "refused".to_string(),
        }
        .into();
        assert_eq!(unreachable.exit_code(), 3);

        let broke: AppError = ClientError::InsufficientFunds {
            asset: "ETH".to_string(),
            required: U256::from(2u64),
            available: U256::from(1u64),
        }
        .into();
        assert_eq!(broke.exit_code(), 4);

        let rpc: AppError = ClientError::Rpc("boom".to_string()).into();
        assert_eq!(rpc.exit_code(), 1);
    }

    #[test]
    fn messages_pass_through() {
        let err: AppError = ClientError::InvalidAddress("0x12".to_string()).into();
        assert_eq!(err.to_string(), "Invalid address: 0x12");

        let missing = AppError::MissingArgument {
            what: "private key",
            flag: "--private-key",
            key: "account.test_private_key",
        };
        assert_eq!(
            missing.to_string(),
            "Missing private key: pass --private-key or set `account.test_private_key` in the config file"
        );
    }
}

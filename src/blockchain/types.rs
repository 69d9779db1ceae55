// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use serde::{Deserialize, Serialize};

/// Arbitrum One chain ID.
pub const ARBITRUM_ONE_CHAIN_ID: u64 = 42161;

/// Decimals of the native coin (ETH on Arbitrum).
pub const NATIVE_DECIMALS: u8 = 18;

/// Native coin symbol.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Default gas limit for a plain ETH transfer.
pub const DEFAULT_NATIVE_GAS_LIMIT: u64 = 30_000;

/// Default gas limit for an ERC-20 `transfer` call.
pub const DEFAULT_TOKEN_GAS_LIMIT: u64 = 200_000;

/// Intrinsic gas of any transaction; lower limits can never be mined.
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// Network connection configuration.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: String,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
    /// Block explorer URL
    pub explorer_url: String,
}

impl NetworkConfig {
    /// Arbitrum One mainnet configuration.
    pub fn arbitrum_one() -> Self {
        Self {
            name: "Arbitrum One".to_string(),
            chain_id: ARBITRUM_ONE_CHAIN_ID,
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            explorer_url: "https://arbiscan.io".to_string(),
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::arbitrum_one()
    }
}

/// Gas limits applied to outgoing transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasLimits {
    /// Limit for a plain ETH transfer
    pub native_gas_limit: u64,
    /// Limit for an ERC-20 `transfer` call
    pub token_gas_limit: u64,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            native_gas_limit: DEFAULT_NATIVE_GAS_LIMIT,
            token_gas_limit: DEFAULT_TOKEN_GAS_LIMIT,
        }
    }
}

/// A freshly generated account. The caller owns the secret.
#[derive(Clone, Serialize)]
pub struct GeneratedAccount {
    /// EIP-55 checksummed address
    pub address: String,
    /// Hex-encoded private key with `0x` prefix
    pub private_key: String,
}

impl std::fmt::Debug for GeneratedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedAccount")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Native ETH balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBalance {
    /// Checksummed address that was queried
    pub address: String,
    /// Balance in wei
    pub balance_raw: String,
    /// Balance in ETH, full precision
    pub balance_formatted: String,
}

/// ERC-20 token balance information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Checksummed address that was queried
    pub address: String,
    /// Token contract address
    pub contract_address: String,
    /// Number of decimals reported by the contract
    pub decimals: u8,
    /// Balance in the token's smallest unit
    pub balance_raw: String,
    /// Balance scaled by `10^-decimals`
    pub balance_formatted: String,
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
    /// Price paid per unit of gas, in wei
    pub effective_gas_price: u128,
    /// Whether the transaction was successful
    pub success: bool,
    /// Explorer URL for the transaction
    pub explorer_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_network_is_arbitrum_one() {
        let network = NetworkConfig::default();
        assert_eq!(network.chain_id, 42161);
        assert_eq!(network.rpc_url, "https://arb1.arbitrum.io/rpc");
    }

    #[test]
    fn tx_url_joins_without_double_slash() {
        let mut network = NetworkConfig::arbitrum_one();
        assert_eq!(network.tx_url("0xabc"), "https://arbiscan.io/tx/0xabc");

        network.explorer_url = "https://arbiscan.io/".to_string();
        assert_eq!(network.tx_url("0xabc"), "https://arbiscan.io/tx/0xabc");
    }

    #[test]
    fn generated_account_debug_hides_key() {
        let account = GeneratedAccount {
            address: "0x0000000000000000000000000000000000000001".to_string(),
            private_key: "0xdeadbeef".to_string(),
        };
        let debug = format!("{account:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("<redacted>"));
    }
}

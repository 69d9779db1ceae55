// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key generation and signer construction.
//!
//! Keys are generated locally and never persisted here; the caller is
//! responsible for storing the returned secret.

use alloy::{network::EthereumWallet, primitives::Address, signers::local::PrivateKeySigner};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::rand_core::OsRng;

use super::client::ClientError;
use super::types::GeneratedAccount;

/// Account creation.
pub struct AccountManager;

impl AccountManager {
    /// Generate a new secp256k1 key pair.
    ///
    /// # Returns
    /// A [`GeneratedAccount`] holding the EIP-55 checksummed address and the
    /// `0x`-prefixed hex private key.
    pub fn create_address() -> GeneratedAccount {
        let signing_key = SigningKey::random(&mut OsRng);
        let private_key = format!("0x{}", alloy::hex::encode(signing_key.to_bytes()));
        let signer = PrivateKeySigner::from_signing_key(signing_key);
        let address = signer.address().to_checksum(None);

        tracing::info!(%address, "Generated new address");
        tracing::debug!(%address, %private_key, "Generated private key");

        GeneratedAccount {
            address,
            private_key,
        }
    }
}

/// Create a signer from a hex private key, with or without `0x` prefix.
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, ClientError> {
    let trimmed = private_key_hex.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let key_bytes = alloy::hex::decode(stripped)
        .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))?;

    if key_bytes.len() != 32 {
        return Err(ClientError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            key_bytes.len()
        )));
    }

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))
}

/// Derive the address controlled by a hex private key.
pub fn address_from_key(private_key_hex: &str) -> Result<Address, ClientError> {
    Ok(signer_from_hex(private_key_hex)?.address())
}

/// Create an Ethereum wallet from a hex private key.
pub fn wallet_from_hex(private_key_hex: &str) -> Result<EthereumWallet, ClientError> {
    let signer = signer_from_hex(private_key_hex)?;
    Ok(EthereumWallet::from(signer))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known first Hardhat/Anvil development key.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn create_address_produces_checksummed_address() {
        let account = AccountManager::create_address();

        assert!(account.address.starts_with("0x"));
        assert_eq!(account.address.len(), 42, "Address must be 42 characters");

        let parsed = Address::parse_checksummed(&account.address, None);
        assert!(parsed.is_ok(), "Address must carry a valid checksum");

        assert!(account.private_key.starts_with("0x"));
        assert_eq!(account.private_key.len(), 66);
        assert!(account.private_key[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn create_address_key_rederives_same_address() {
        for _ in 0..5 {
            let account = AccountManager::create_address();
            let derived = address_from_key(&account.private_key).unwrap();
            assert_eq!(derived.to_checksum(None), account.address);
        }
    }

    #[test]
    fn create_address_produces_unique_addresses() {
        let mut addresses = std::collections::HashSet::new();
        for _ in 0..10 {
            let account = AccountManager::create_address();
            assert!(addresses.insert(account.address), "Generated duplicate address");
        }
    }

    #[test]
    fn known_key_derives_known_address() {
        let address = address_from_key(DEV_KEY).unwrap();
        assert_eq!(address.to_checksum(None), DEV_ADDRESS);

        // Prefix is optional
        let address = address_from_key(&DEV_KEY[2..]).unwrap();
        assert_eq!(address.to_checksum(None), DEV_ADDRESS);
    }

    #[test]
    fn invalid_keys_are_rejected() {
        for bad in ["", "0x", "0xzz", "0x1234", &format!("0x{}", "00".repeat(32))] {
            assert!(
                matches!(signer_from_hex(bad), Err(ClientError::InvalidPrivateKey(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn test_wallet_from_hex() {
        let result = wallet_from_hex(DEV_KEY);
        assert!(result.is_ok(), "Failed to create wallet: {:?}", result.err());
    }
}

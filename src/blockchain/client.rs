// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Arbitrum One client for blockchain interactions.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::erc20::{encode_transfer, Erc20Contract};
use super::signing::signer_from_hex;
use super::transactions::{self, ensure_affordable, LegacyTx};
use super::types::*;
use super::units::{format_units, from_wei, parse_units, to_wei};

/// HTTP provider type for Arbitrum (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Arbitrum One client.
///
/// Every method performs its RPC round trips sequentially and returns once
/// the result (or, for transfers, the receipt) is available. Nothing is
/// retried; failures are logged and handed back to the caller.
pub struct ArbClient {
    /// Network configuration
    network: NetworkConfig,
    /// Gas limits for outgoing transfers
    gas_limits: GasLimits,
    /// Alloy HTTP provider
    provider: HttpProvider,
}

impl ArbClient {
    /// Create a client without contacting the node.
    pub fn new(network: NetworkConfig) -> Result<Self, ClientError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ClientError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            network,
            gas_limits: GasLimits::default(),
            provider,
        })
    }

    /// Connect to the configured endpoint and verify it serves the expected chain.
    pub async fn connect(network: NetworkConfig) -> Result<Self, ClientError> {
        let client = Self::new(network)
            .inspect_err(|e| tracing::error!(error = %e, "Connect failed"))?;

        let chain_id = client.provider.get_chain_id().await.map_err(|e| {
            let err = ClientError::Unreachable {
                url: client.network.rpc_url.clone(),
                reason: e.to_string(),
            };
            tracing::error!(error = %err, "Unable to reach {}", client.network.name);
            err
        })?;

        if chain_id != client.network.chain_id {
            let err = ClientError::ChainIdMismatch {
                expected: client.network.chain_id,
                actual: chain_id,
            };
            tracing::error!(error = %err, "Connected to the wrong network");
            return Err(err);
        }

        tracing::info!(
            network = %client.network.name,
            chain_id,
            "Connected to {}",
            client.network.rpc_url
        );
        Ok(client)
    }

    /// Create a client for Arbitrum One mainnet.
    pub async fn arbitrum_one() -> Result<Self, ClientError> {
        Self::connect(NetworkConfig::arbitrum_one()).await
    }

    /// Override the gas limits used for transfers.
    pub fn with_gas_limits(mut self, gas_limits: GasLimits) -> Self {
        self.gas_limits = gas_limits;
        self
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Get the gas limits used for transfers.
    pub fn gas_limits(&self) -> GasLimits {
        self.gas_limits
    }

    /// Get the current block number.
    pub async fn get_block_number(&self) -> Result<u64, ClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Block number query failed"))
    }

    /// Get the native ETH balance for an address.
    pub async fn get_native_balance(&self, address: &str) -> Result<NativeBalance, ClientError> {
        self.native_balance(address)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %address, "ETH balance query failed"))
    }

    async fn native_balance(&self, address: &str) -> Result<NativeBalance, ClientError> {
        let addr = parse_address(address)?;
        let balance = self.wei_balance(addr).await?;
        let balance_formatted = from_wei(balance);

        tracing::info!(
            address = %addr,
            wei = %balance,
            "ETH balance of {}: {} {}",
            addr,
            balance_formatted,
            NATIVE_SYMBOL
        );

        Ok(NativeBalance {
            address: addr.to_checksum(None),
            balance_raw: balance.to_string(),
            balance_formatted,
        })
    }

    /// Get the ERC-20 token balance for an address.
    pub async fn get_token_balance(
        &self,
        contract_address: &str,
        address: &str,
    ) -> Result<TokenBalance, ClientError> {
        self.token_balance(contract_address, address)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    contract = %contract_address,
                    %address,
                    "Token balance query failed"
                )
            })
    }

    async fn token_balance(
        &self,
        contract_address: &str,
        address: &str,
    ) -> Result<TokenBalance, ClientError> {
        let owner = parse_address(address)?;
        let contract = Erc20Contract::new(&self.provider, parse_address(contract_address)?);
        let balance = contract.balance_of(owner).await?;

        tracing::info!(
            address = %balance.address,
            contract = %balance.contract_address,
            "Token balance of {}: {} (raw)",
            balance.address,
            balance.balance_raw
        );
        tracing::info!(
            address = %balance.address,
            contract = %balance.contract_address,
            "Token balance of {}: {} (scaled, {} decimals)",
            balance.address,
            balance.balance_formatted,
            balance.decimals
        );

        Ok(balance)
    }

    /// Send ETH and wait for the receipt.
    ///
    /// # Arguments
    /// * `sender_key` - Hex private key of the sender
    /// * `receiver_address` - Recipient address (any casing)
    /// * `amount` - Amount in ETH as a decimal string (e.g., "0.00001")
    pub async fn send_native(
        &self,
        sender_key: &str,
        receiver_address: &str,
        amount: &str,
    ) -> Result<TxReceipt, ClientError> {
        self.native_transfer(sender_key, receiver_address, amount)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, to = %receiver_address, %amount, "ETH transfer failed")
            })
    }

    async fn native_transfer(
        &self,
        sender_key: &str,
        receiver_address: &str,
        amount: &str,
    ) -> Result<TxReceipt, ClientError> {
        let value = to_wei(amount)?;
        let signer = signer_from_hex(sender_key)?;
        let from = signer.address();
        let to = parse_address(receiver_address)?;
        tracing::debug!(%from, %to, %value, "Preparing ETH transfer");

        let gas_price = self.gas_price().await?;
        let nonce = self.nonce(from).await?;

        let tx = LegacyTx {
            from,
            to,
            value,
            input: Default::default(),
            gas_limit: self.gas_limits.native_gas_limit,
            gas_price,
            nonce,
            chain_id: self.network.chain_id,
        };

        let available = self.wei_balance(from).await?;
        ensure_affordable(NATIVE_SYMBOL, available, value, tx.max_fee())?;

        let wallet = EthereumWallet::from(signer);
        let raw = transactions::sign(tx, &wallet).await?;
        let receipt = transactions::broadcast_and_wait(&self.provider, &raw, &self.network).await?;

        tracing::info!(
            tx_hash = %receipt.tx_hash,
            %to,
            "ETH transfer of {} {} mined in block {}",
            amount,
            NATIVE_SYMBOL,
            receipt.block_number
        );
        warn_if_reverted(&receipt);

        Ok(receipt)
    }

    /// Send an ERC-20 token and wait for the receipt.
    ///
    /// # Arguments
    /// * `sender_key` - Hex private key of the sender
    /// * `receiver_address` - Recipient address (any casing)
    /// * `contract_address` - ERC-20 contract address
    /// * `amount` - Human-readable amount; scaled by the contract's decimals
    pub async fn send_token(
        &self,
        sender_key: &str,
        receiver_address: &str,
        contract_address: &str,
        amount: &str,
    ) -> Result<TxReceipt, ClientError> {
        self.token_transfer(sender_key, receiver_address, contract_address, amount)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    to = %receiver_address,
                    contract = %contract_address,
                    %amount,
                    "Token transfer failed"
                )
            })
    }

    async fn token_transfer(
        &self,
        sender_key: &str,
        receiver_address: &str,
        contract_address: &str,
        amount: &str,
    ) -> Result<TxReceipt, ClientError> {
        let signer = signer_from_hex(sender_key)?;
        let from = signer.address();
        let to = parse_address(receiver_address)?;
        let contract = Erc20Contract::new(&self.provider, parse_address(contract_address)?);

        let decimals = contract.decimals().await?;
        let amount_raw = parse_units(amount, decimals)?;
        tracing::info!("Transfer amount: {} (human-readable)", amount);
        tracing::info!("Transfer amount: {} (contract units)", amount_raw);

        let token_balance = contract.raw_balance_of(from).await?;
        ensure_affordable("token", token_balance, amount_raw, U256::ZERO)?;

        let gas_price = self.gas_price().await?;
        let nonce = self.nonce(from).await?;

        let tx = LegacyTx {
            from,
            to: contract.address(),
            value: U256::ZERO,
            input: encode_transfer(to, amount_raw),
            gas_limit: self.gas_limits.token_gas_limit,
            gas_price,
            nonce,
            chain_id: self.network.chain_id,
        };

        let available = self.wei_balance(from).await?;
        ensure_affordable(NATIVE_SYMBOL, available, U256::ZERO, tx.max_fee())?;

        let wallet = EthereumWallet::from(signer);
        let raw = transactions::sign(tx, &wallet).await?;
        let receipt = transactions::broadcast_and_wait(&self.provider, &raw, &self.network).await?;

        tracing::info!(
            tx_hash = %receipt.tx_hash,
            %to,
            contract = %contract.address(),
            "Token transfer of {} mined in block {}",
            format_units(amount_raw, decimals),
            receipt.block_number
        );
        warn_if_reverted(&receipt);

        Ok(receipt)
    }

    /// Look up the receipt of a previously sent transaction.
    ///
    /// Returns `Ok(None)` while the transaction is still pending or unknown.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, ClientError> {
        transactions::get_transaction_status(&self.provider, tx_hash, &self.network)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %tx_hash, "Receipt lookup failed"))
    }

    async fn wei_balance(&self, address: Address) -> Result<U256, ClientError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ClientError::Rpc(format!("eth_getBalance failed: {e}")))
    }

    async fn gas_price(&self) -> Result<u128, ClientError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ClientError::Rpc(format!("eth_gasPrice failed: {e}")))
    }

    async fn nonce(&self, address: Address) -> Result<u64, ClientError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| ClientError::Rpc(format!("eth_getTransactionCount failed: {e}")))
    }
}

/// Parse an address in any casing.
pub fn parse_address(address: &str) -> Result<Address, ClientError> {
    Address::from_str(address.trim())
        .map_err(|e| ClientError::InvalidAddress(format!("{address}: {e}")))
}

/// Convert an address to its EIP-55 checksummed form.
pub fn to_checksum_address(address: &str) -> Result<String, ClientError> {
    Ok(parse_address(address)?.to_checksum(None))
}

fn warn_if_reverted(receipt: &TxReceipt) {
    if !receipt.success {
        tracing::warn!(
            tx_hash = %receipt.tx_hash,
            "Transaction was mined but reverted"
        );
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC endpoint {url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Chain ID mismatch: expected {expected}, node reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient {asset} balance: required {required}, available {available}")]
    InsufficientFunds {
        asset: String,
        required: U256,
        available: U256,
    },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

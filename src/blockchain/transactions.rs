// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction building, signing and broadcasting.
//!
//! Transfers are sent as legacy (EIP-155) transactions with an explicit gas
//! price, gas limit, nonce and chain id. Signing happens locally; only the
//! raw signed bytes are handed to the node.

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::client::ClientError;
use super::types::{NetworkConfig, TxReceipt};

/// Every field of a legacy transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTx {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub nonce: u64,
    pub chain_id: u64,
}

impl LegacyTx {
    /// Worst-case fee in wei: `gas_limit * gas_price`.
    pub fn max_fee(&self) -> U256 {
        U256::from(self.gas_limit).saturating_mul(U256::from(self.gas_price))
    }

    /// Convert into an RPC transaction request.
    pub fn into_request(self) -> TransactionRequest {
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_value(self.value)
            .with_gas_limit(self.gas_limit)
            .with_gas_price(self.gas_price)
            .with_nonce(self.nonce)
            .with_chain_id(self.chain_id);

        if self.input.is_empty() {
            request
        } else {
            request.with_input(self.input)
        }
    }
}

/// Reject a transfer whose value plus worst-case fee exceeds `available`.
///
/// Called before anything is broadcast.
pub fn ensure_affordable(
    asset: &str,
    available: U256,
    value: U256,
    fee: U256,
) -> Result<(), ClientError> {
    match value.checked_add(fee) {
        Some(required) if available >= required => Ok(()),
        required => Err(ClientError::InsufficientFunds {
            asset: asset.to_string(),
            required: required.unwrap_or(U256::MAX),
            available,
        }),
    }
}

/// Sign a transaction locally and return its EIP-2718 encoding.
pub async fn sign(tx: LegacyTx, wallet: &EthereumWallet) -> Result<Bytes, ClientError> {
    let envelope = tx
        .into_request()
        .build(wallet)
        .await
        .map_err(|e| ClientError::Signing(e.to_string()))?;

    Ok(envelope.encoded_2718().into())
}

/// Broadcast raw signed bytes and block until the receipt is available.
pub async fn broadcast_and_wait<P: Provider>(
    provider: &P,
    raw: &[u8],
    network: &NetworkConfig,
) -> Result<TxReceipt, ClientError> {
    let pending = provider.send_raw_transaction(raw).await.map_err(|e| {
        let msg = e.to_string();
        if msg.contains("insufficient funds") {
            ClientError::TransactionFailed(format!("Rejected by node: {msg}"))
        } else {
            ClientError::Rpc(format!("eth_sendRawTransaction failed: {msg}"))
        }
    })?;

    let tx_hash = format!("{:?}", pending.tx_hash());
    tracing::debug!(%tx_hash, "Transaction broadcast, waiting for receipt");

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ClientError::TransactionFailed(format!("Waiting for {tx_hash}: {e}")))?;

    Ok(to_tx_receipt(&receipt, network))
}

/// Get the transaction status by checking for a receipt.
pub async fn get_transaction_status<P: Provider>(
    provider: &P,
    tx_hash: &str,
    network: &NetworkConfig,
) -> Result<Option<TxReceipt>, ClientError> {
    let hash = tx_hash
        .parse()
        .map_err(|e| ClientError::InvalidHash(format!("{tx_hash}: {e}")))?;

    let receipt = provider
        .get_transaction_receipt(hash)
        .await
        .map_err(|e| ClientError::Rpc(format!("Failed to get receipt: {e}")))?;

    Ok(receipt.map(|r| to_tx_receipt(&r, network)))
}

fn to_tx_receipt(receipt: &TransactionReceipt, network: &NetworkConfig) -> TxReceipt {
    let tx_hash = format!("{:?}", receipt.transaction_hash);
    TxReceipt {
        explorer_url: network.tx_url(&tx_hash),
        tx_hash,
        block_number: receipt.block_number.unwrap_or(0),
        gas_used: receipt.gas_used as u64,
        effective_gas_price: receipt.effective_gas_price,
        success: receipt.status(),
    }
}

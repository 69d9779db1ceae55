// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions.

use alloy::{
    primitives::{Address, Bytes, U256},
    providers::Provider,
    sol,
    sol_types::SolCall,
};

use super::client::ClientError;
use super::types::TokenBalance;
use super::units::format_units;

// Minimal ERC-20 interface: the three functions this client calls.
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
    address: Address,
}

impl<P: Provider + Clone> Erc20Contract<P> {
    /// Create a new ERC-20 contract instance.
    pub fn new(provider: &P, address: Address) -> Self {
        let contract = IERC20::new(address, provider.clone());
        Self { contract, address }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the token decimals.
    pub async fn decimals(&self) -> Result<u8, ClientError> {
        self.contract
            .decimals()
            .call()
            .await
            .map_err(|e| ClientError::Contract(format!("decimals() failed: {e}")))
    }

    /// Get the raw balance of an address in the token's smallest unit.
    pub async fn raw_balance_of(&self, owner: Address) -> Result<U256, ClientError> {
        self.contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| ClientError::Contract(format!("balanceOf() failed: {e}")))
    }

    /// Get the balance of an address, both raw and scaled by decimals.
    pub async fn balance_of(&self, owner: Address) -> Result<TokenBalance, ClientError> {
        let decimals = self.decimals().await?;
        let balance = self.raw_balance_of(owner).await?;

        Ok(TokenBalance {
            address: owner.to_checksum(None),
            contract_address: self.address.to_checksum(None),
            decimals,
            balance_raw: balance.to_string(),
            balance_formatted: format_units(balance, decimals),
        })
    }
}

/// ABI-encode a `transfer(to, amount)` call.
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    IERC20::transferCall { to, amount }.abi_encode().into()
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Arbitrum One.
//!
//! This module provides functionality for:
//! - Generating key pairs
//! - Querying native ETH balances
//! - Querying ERC-20 token balances
//! - Transaction signing and broadcasting

pub mod client;
pub mod erc20;
pub mod signing;
pub mod transactions;
pub mod types;
pub mod units;

pub use client::{parse_address, to_checksum_address, ArbClient, ClientError};
pub use signing::{address_from_key, signer_from_hex, AccountManager};
pub use types::*;
pub use units::{format_units, from_wei, parse_units, to_wei};

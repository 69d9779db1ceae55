// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! arb-client - Arbitrum One account and transfer client
//!
//! Creates key pairs, reads ETH and ERC-20 balances, and submits signed
//! transfers through a JSON-RPC endpoint. Each operation runs to completion
//! before returning; nothing is cached or retried.
//!
//! ## Modules
//!
//! - `blockchain` - RPC client, ERC-20 interface, signing and unit conversion
//! - `cli` - Command-line interface
//! - `config` - TOML configuration with environment overrides
//! - `logging` - Timestamped file logging

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

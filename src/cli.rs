// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::blockchain::{AccountManager, ArbClient, GasLimits};
use crate::config::{AppConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::error::AppError;

#[derive(Debug, Parser)]
#[command(name = "arb-client")]
#[command(about = "Arbitrum One account, balance and transfer client", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new key pair
    NewAddress,
    /// Print the current block number
    BlockNumber,
    /// Show the ETH balance of an address
    Balance {
        /// Address to query [default: account.test_address]
        #[arg(long)]
        address: Option<String>,
    },
    /// Show the ERC-20 balance of an address
    TokenBalance {
        /// Token contract [default: account.erc20_contract_address]
        #[arg(long)]
        contract: Option<String>,
        /// Address to query [default: account.test_address]
        #[arg(long)]
        address: Option<String>,
    },
    /// Send ETH and wait for the receipt
    Send {
        /// Amount in ETH, e.g. 0.00001
        #[arg(long)]
        amount: String,
        /// Recipient [default: account.receiver_address]
        #[arg(long)]
        to: Option<String>,
        /// Sender key [default: account.test_private_key / ARB_PRIVATE_KEY]
        #[arg(long)]
        private_key: Option<String>,
        /// Gas limit override
        #[arg(long)]
        gas_limit: Option<u64>,
    },
    /// Send an ERC-20 token and wait for the receipt
    SendToken {
        /// Human-readable amount, scaled by the token's decimals
        #[arg(long)]
        amount: String,
        /// Recipient [default: account.receiver_address]
        #[arg(long)]
        to: Option<String>,
        /// Token contract [default: account.erc20_contract_address]
        #[arg(long)]
        contract: Option<String>,
        /// Sender key [default: account.test_private_key / ARB_PRIVATE_KEY]
        #[arg(long)]
        private_key: Option<String>,
        /// Gas limit override
        #[arg(long)]
        gas_limit: Option<u64>,
    },
    /// Look up the receipt of a transaction
    Receipt {
        /// Transaction hash
        #[arg(long)]
        hash: String,
    },
}

/// Run a command against the loaded configuration.
pub async fn run(command: Commands, config: &AppConfig, json: bool) -> Result<(), AppError> {
    let account = &config.account;

    match command {
        Commands::NewAddress => {
            let generated = AccountManager::create_address();
            if json {
                print_json(&generated)?;
            } else {
                println!("New address: {}", generated.address);
                println!("Private key: {}", generated.private_key);
                println!("Store the private key now; it is not saved anywhere.");
            }
        }
        Commands::BlockNumber => {
            let client = connect(config, None).await?;
            let block = client.get_block_number().await?;
            if json {
                print_json(&serde_json::json!({ "block_number": block }))?;
            } else {
                println!("{} block number: {}", client.network().name, block);
            }
        }
        Commands::Balance { address } => {
            let address = require(address, &account.test_address, ADDRESS)?;
            let client = connect(config, None).await?;
            let balance = client.get_native_balance(&address).await?;
            if json {
                print_json(&balance)?;
            } else {
                println!("{}: {} ETH", balance.address, balance.balance_formatted);
            }
        }
        Commands::TokenBalance { contract, address } => {
            let contract = require(contract, &account.erc20_contract_address, CONTRACT)?;
            let address = require(address, &account.test_address, ADDRESS)?;
            let client = connect(config, None).await?;
            let balance = client.get_token_balance(&contract, &address).await?;
            if json {
                print_json(&balance)?;
            } else {
                println!("{}: {} (raw)", balance.address, balance.balance_raw);
                println!(
                    "{}: {} ({} decimals)",
                    balance.address, balance.balance_formatted, balance.decimals
                );
            }
        }
        Commands::Send {
            amount,
            to,
            private_key,
            gas_limit,
        } => {
            let to = require(to, &account.receiver_address, RECEIVER)?;
            let key = require(private_key, &account.test_private_key, PRIVATE_KEY)?;
            let limits = GasLimits {
                native_gas_limit: gas_limit.unwrap_or(config.transactions.native_gas_limit),
                ..config.transactions
            };
            let client = connect(config, Some(limits)).await?;
            let receipt = client.send_native(&key, &to, &amount).await?;
            print_receipt(&receipt, json)?;
        }
        Commands::SendToken {
            amount,
            to,
            contract,
            private_key,
            gas_limit,
        } => {
            let to = require(to, &account.receiver_address, RECEIVER)?;
            let contract = require(contract, &account.erc20_contract_address, CONTRACT)?;
            let key = require(private_key, &account.test_private_key, PRIVATE_KEY)?;
            let limits = GasLimits {
                token_gas_limit: gas_limit.unwrap_or(config.transactions.token_gas_limit),
                ..config.transactions
            };
            let client = connect(config, Some(limits)).await?;
            let receipt = client.send_token(&key, &to, &contract, &amount).await?;
            print_receipt(&receipt, json)?;
        }
        Commands::Receipt { hash } => {
            let client = connect(config, None).await?;
            match client.get_transaction_receipt(&hash).await? {
                Some(receipt) => print_receipt(&receipt, json)?,
                None if json => print_json(&serde_json::Value::Null)?,
                None => println!("{hash}: pending or unknown"),
            }
        }
    }

    Ok(())
}

/// Which CLI flag and config key supply a value.
struct Source {
    what: &'static str,
    flag: &'static str,
    key: &'static str,
}

const ADDRESS: Source = Source {
    what: "address",
    flag: "--address",
    key: "account.test_address",
};

const CONTRACT: Source = Source {
    what: "token contract",
    flag: "--contract",
    key: "account.erc20_contract_address",
};

const RECEIVER: Source = Source {
    what: "receiver address",
    flag: "--to",
    key: "account.receiver_address",
};

const PRIVATE_KEY: Source = Source {
    what: "private key",
    flag: "--private-key",
    key: "account.test_private_key",
};

/// Command-line value first, then the config file.
fn require(
    arg: Option<String>,
    fallback: &Option<String>,
    source: Source,
) -> Result<String, AppError> {
    arg.or_else(|| fallback.clone())
        .ok_or(AppError::MissingArgument {
            what: source.what,
            flag: source.flag,
            key: source.key,
        })
}

async fn connect(config: &AppConfig, limits: Option<GasLimits>) -> Result<ArbClient, AppError> {
    let client = ArbClient::connect(config.network.clone()).await?;
    Ok(client.with_gas_limits(limits.unwrap_or(config.transactions)))
}

fn print_receipt(receipt: &crate::blockchain::TxReceipt, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(receipt);
    }
    let status = if receipt.success { "success" } else { "reverted" };
    println!("Transaction hash: {}", receipt.tx_hash);
    println!("Status: {status}");
    println!("Block: {}", receipt.block_number);
    println!("Gas used: {}", receipt.gas_used);
    println!("Explorer: {}", receipt.explorer_url);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

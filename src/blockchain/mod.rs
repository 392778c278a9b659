// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for EVM chains.
//!
//! This module provides functionality for:
//! - Requesting wallet accounts and native balances
//! - Binding the healthcare records contract
//! - Loading local signing keys

pub mod client;
pub mod healthcare;
pub mod signing;
pub mod types;

pub use client::{format_balance, parse_address, ChainError, RpcWallet, WalletProvider};
pub use healthcare::{HealthcareContract, RecordsContract};
pub use types::*;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Healthcare Records - wallet-connected client for the patient records contract
//!
//! This crate connects an EVM wallet, shows its balance and drives an
//! externally deployed healthcare records contract. All record storage and
//! access control live in the contract; this crate only marshals user input
//! into contract calls and renders what comes back.
//!
//! ## Modules
//!
//! - `blockchain` - Wallet provider, contract binding and signing keys (alloy)
//! - `dashboard` - Session state and user actions
//! - `render` - Text and JSON views
//! - `command` - Interactive command parsing
//! - `config` - Environment configuration

pub mod blockchain;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;

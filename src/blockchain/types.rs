// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// EVM network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Default RPC endpoint URL
    pub rpc_url: &'static str,
    /// Native currency symbol
    pub currency_symbol: &'static str,
    /// Block explorer URL (empty for local chains)
    pub explorer_url: &'static str,
}

/// Local development node (anvil, hardhat). Ganache defaults to 1337.
pub const LOCALHOST: NetworkConfig = NetworkConfig {
    name: "Localhost 8545",
    chain_id: 31337,
    rpc_url: "http://127.0.0.1:8545",
    currency_symbol: "ETH",
    explorer_url: "",
};

/// Ethereum Sepolia testnet.
pub const SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Sepolia",
    chain_id: 11155111,
    rpc_url: "https://ethereum-sepolia-rpc.publicnode.com",
    currency_symbol: "SepoliaETH",
    explorer_url: "https://sepolia.etherscan.io",
};

/// Ethereum mainnet.
pub const MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum Mainnet",
    chain_id: 1,
    rpc_url: "https://ethereum-rpc.publicnode.com",
    currency_symbol: "ETH",
    explorer_url: "https://etherscan.io",
};

/// Default network identifier.
pub const NETWORK_LOCALHOST: &str = "localhost";

/// Resolve a network preset by name (case-insensitive).
pub fn network_by_name(raw: &str) -> Result<NetworkConfig, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "localhost" | "local" => Ok(LOCALHOST),
        "sepolia" => Ok(SEPOLIA),
        "mainnet" => Ok(MAINNET),
        other => Err(format!(
            "Unknown network `{other}` (expected one of: localhost, sepolia, mainnet)"
        )),
    }
}

/// A patient record as returned by `getPatientRecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub record_id: U256,
    pub patient_name: String,
    pub diagnosis: String,
    pub treatment: String,
    /// Creation time, seconds since epoch
    pub timestamp: U256,
}

impl PatientRecord {
    /// Creation time as a UTC date-time, if the value is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.timestamp.try_into().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// Result of a confirmed state-changing contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where the transaction was included
    pub block_number: Option<u64>,
    /// Explorer URL for the transaction, if the network has one
    pub explorer_url: Option<String>,
}

impl TxOutcome {
    pub fn new(network: &NetworkConfig, tx_hash: String, block_number: Option<u64>) -> Self {
        let explorer_url = (!network.explorer_url.is_empty())
            .then(|| format!("{}/tx/{}", network.explorer_url, tx_hash));
        Self {
            tx_hash,
            block_number,
            explorer_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_lookup_is_case_insensitive() {
        assert_eq!(network_by_name("Sepolia").unwrap(), SEPOLIA);
        assert_eq!(network_by_name(" local ").unwrap(), LOCALHOST);
        assert_eq!(network_by_name(NETWORK_LOCALHOST).unwrap().chain_id, 31337);
        assert!(network_by_name("fuji").is_err());
    }

    #[test]
    fn created_at_formats_epoch_seconds() {
        let record = PatientRecord {
            record_id: U256::from(1u64),
            patient_name: "Alice".into(),
            diagnosis: "Flu".into(),
            treatment: "Rest".into(),
            timestamp: U256::from(1_700_000_000u64),
        };
        let at = record.created_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2023-11-14T22:13:20+00:00");

        let overflow = PatientRecord {
            timestamp: U256::MAX,
            ..record
        };
        assert!(overflow.created_at().is_none());
    }

    #[test]
    fn tx_outcome_links_to_explorer_when_available() {
        let outcome = TxOutcome::new(&SEPOLIA, "0xabc".into(), Some(7));
        assert_eq!(
            outcome.explorer_url.as_deref(),
            Some("https://sepolia.etherscan.io/tx/0xabc")
        );

        let local = TxOutcome::new(&LOCALHOST, "0xabc".into(), None);
        assert!(local.explorer_url.is_none());
    }
}

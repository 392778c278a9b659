// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! resolved client configuration. Configuration is loaded from the
//! environment (and a `.env` file, if present) at startup; command-line
//! flags take precedence over the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NETWORK` | Network preset (`localhost`, `sepolia`, `mainnet`) | `localhost` |
//! | `RPC_URL` | JSON-RPC endpoint, overrides the preset URL | preset URL |
//! | `CONTRACT_ADDRESS` | Deployed healthcare records contract | `0x5a93…9837` |
//! | `OWNER_ADDRESS` | Known owner address; skips the `getOwner` call | Optional |
//! | `WALLET_PRIVATE_KEY` | Hex private key for local signing | Optional |
//! | `WALLET_KEY_FILE` | PEM private key file for local signing | Optional |
//! | `NO_WALLET` | Start without any wallet provider (`1`/`true`) | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `healthcare_records=info` |
//!
//! Without a local key, accounts and signing are delegated to the node.

use std::path::PathBuf;

use alloy::primitives::Address;

use crate::blockchain::{
    network_by_name, parse_address, signing, NetworkConfig, RpcWallet, NETWORK_LOCALHOST,
};
use crate::error::ConfigError;

/// Environment variable name for the network preset.
pub const NETWORK_ENV: &str = "NETWORK";

/// Environment variable name for the JSON-RPC endpoint.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Environment variable name for the records contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

/// Environment variable name for the owner address override.
///
/// When set, owner detection compares the connected account against this
/// address instead of calling `getOwner()` on the contract.
pub const OWNER_ADDRESS_ENV: &str = "OWNER_ADDRESS";

/// Environment variable name for a hex-encoded signing key.
pub const WALLET_PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

/// Environment variable name for a PEM signing key file.
pub const WALLET_KEY_FILE_ENV: &str = "WALLET_KEY_FILE";

/// Environment variable name that disables the wallet provider entirely.
pub const NO_WALLET_ENV: &str = "NO_WALLET";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Address the records contract is deployed at.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5a93Ce1278bAA8f6853E0e35ABB63fd438129837";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            None => Ok(Self::Pretty),
            Some(v) if v.is_empty() || v == "pretty" => Ok(Self::Pretty),
            Some(v) if v == "json" => Ok(Self::Json),
            Some(v) => Err(ConfigError::InvalidLogFormat(v)),
        }
    }
}

/// Where transactions get signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerSource {
    /// Node-managed accounts (`eth_requestAccounts` on the node).
    Node,
    /// Hex private key.
    PrivateKey(String),
    /// PEM key file.
    KeyFile(PathBuf),
}

/// Values supplied on the command line; each wins over its env variable.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub contract_address: Option<String>,
    pub owner_address: Option<String>,
    pub key_file: Option<PathBuf>,
    pub no_wallet: bool,
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub network: NetworkConfig,
    pub rpc_url: String,
    pub contract_address: Address,
    pub owner_override: Option<Address>,
    pub signer: SignerSource,
    /// `false` when the client runs without a wallet provider.
    pub wallet_enabled: bool,
}

impl ClientConfig {
    /// Resolve configuration from the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from `lookup`, applying `overrides` first.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network_name = overrides
            .network
            .or_else(|| non_empty(NETWORK_ENV))
            .unwrap_or_else(|| NETWORK_LOCALHOST.to_string());
        let network = network_by_name(&network_name).map_err(ConfigError::InvalidNetwork)?;

        let rpc_url = overrides
            .rpc_url
            .or_else(|| non_empty(RPC_URL_ENV))
            .unwrap_or_else(|| network.rpc_url.to_string());

        let contract_raw = overrides
            .contract_address
            .or_else(|| non_empty(CONTRACT_ADDRESS_ENV))
            .unwrap_or_else(|| DEFAULT_CONTRACT_ADDRESS.to_string());
        let contract_address = parse_address(&contract_raw)
            .map_err(|_| ConfigError::InvalidContractAddress(contract_raw))?;

        let owner_override = match overrides.owner_address.or_else(|| non_empty(OWNER_ADDRESS_ENV))
        {
            Some(raw) => {
                Some(parse_address(&raw).map_err(|_| ConfigError::InvalidOwnerAddress(raw))?)
            }
            None => None,
        };

        let private_key = non_empty(WALLET_PRIVATE_KEY_ENV);
        let key_file = overrides
            .key_file
            .or_else(|| non_empty(WALLET_KEY_FILE_ENV).map(PathBuf::from));
        let signer = match (private_key, key_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingKeySources(
                    WALLET_PRIVATE_KEY_ENV,
                    WALLET_KEY_FILE_ENV,
                ))
            }
            (Some(key), None) => SignerSource::PrivateKey(key),
            (None, Some(path)) => SignerSource::KeyFile(path),
            (None, None) => SignerSource::Node,
        };

        let wallet_enabled = !(overrides.no_wallet || is_truthy(lookup(NO_WALLET_ENV).as_deref()));

        Ok(Self {
            network,
            rpc_url,
            contract_address,
            owner_override,
            signer,
            wallet_enabled,
        })
    }

    /// Build the wallet provider, or `None` when the wallet is disabled.
    pub fn build_wallet(&self) -> Result<Option<RpcWallet>, ConfigError> {
        if !self.wallet_enabled {
            return Ok(None);
        }

        let signer = match &self.signer {
            SignerSource::Node => None,
            SignerSource::PrivateKey(key) => Some(RpcWallet::create_signer(key)?),
            SignerSource::KeyFile(path) => Some(signing::signer_from_pem_file(path)?),
        };

        let wallet = RpcWallet::connect(self.network.clone(), &self.rpc_url, signer)?;
        Ok(Some(wallet))
    }
}

fn is_truthy(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::blockchain::{LOCALHOST, SEPOLIA};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_localhost_and_known_contract() {
        let config = ClientConfig::resolve(ConfigOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.network, LOCALHOST);
        assert_eq!(config.rpc_url, LOCALHOST.rpc_url);
        assert_eq!(
            config.contract_address,
            parse_address(DEFAULT_CONTRACT_ADDRESS).unwrap()
        );
        assert!(config.owner_override.is_none());
        assert_eq!(config.signer, SignerSource::Node);
        assert!(config.wallet_enabled);
    }

    #[test]
    fn environment_selects_network_and_rpc() {
        let config = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[(NETWORK_ENV, "sepolia"), (RPC_URL_ENV, "https://rpc.example")]),
        )
        .unwrap();
        assert_eq!(config.network, SEPOLIA);
        assert_eq!(config.rpc_url, "https://rpc.example");
    }

    #[test]
    fn overrides_win_over_environment() {
        let overrides = ConfigOverrides {
            network: Some("mainnet".into()),
            owner_address: Some("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".into()),
            no_wallet: true,
            ..Default::default()
        };
        let config = ClientConfig::resolve(
            overrides,
            env_of(&[(NETWORK_ENV, "sepolia"), (OWNER_ADDRESS_ENV, "garbage")]),
        )
        .unwrap();
        assert_eq!(config.network.chain_id, 1);
        assert!(config.owner_override.is_some());
        assert!(!config.wallet_enabled);
        assert!(config.build_wallet().unwrap().is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_contract = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[(CONTRACT_ADDRESS_ENV, "0xYourContract")]),
        );
        assert!(matches!(
            bad_contract,
            Err(ConfigError::InvalidContractAddress(_))
        ));

        let bad_owner = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[(OWNER_ADDRESS_ENV, "0xYourOwnerAddressHere")]),
        );
        assert!(matches!(bad_owner, Err(ConfigError::InvalidOwnerAddress(_))));

        let bad_network =
            ClientConfig::resolve(ConfigOverrides::default(), env_of(&[(NETWORK_ENV, "fuji")]));
        assert!(matches!(bad_network, Err(ConfigError::InvalidNetwork(_))));
    }

    #[test]
    fn key_sources_are_exclusive() {
        let result = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[
                (WALLET_PRIVATE_KEY_ENV, "ab"),
                (WALLET_KEY_FILE_ENV, "/keys/k.pem"),
            ]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::ConflictingKeySources(_, _))
        ));

        let config = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[(WALLET_KEY_FILE_ENV, "/keys/k.pem")]),
        )
        .unwrap();
        assert_eq!(
            config.signer,
            SignerSource::KeyFile(PathBuf::from("/keys/k.pem"))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ClientConfig::resolve(
            ConfigOverrides::default(),
            env_of(&[(NETWORK_ENV, "  "), (OWNER_ADDRESS_ENV, "")]),
        )
        .unwrap();
        assert_eq!(config.network, LOCALHOST);
        assert!(config.owner_override.is_none());
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse(None).unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("JSON")).unwrap(), LogFormat::Json);
        assert!(LogFormat::parse(Some("xml")).is_err());
    }

    #[test]
    fn no_wallet_flag_from_environment() {
        let config =
            ClientConfig::resolve(ConfigOverrides::default(), env_of(&[(NO_WALLET_ENV, "true")]))
                .unwrap();
        assert!(!config.wallet_enabled);
    }
}

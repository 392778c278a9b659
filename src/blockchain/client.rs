// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider: account access, balances and contract handles.
//!
//! [`WalletProvider`] is the seam the dashboard talks to. It mirrors the
//! request-based wallet convention (`eth_requestAccounts`, `eth_getBalance`)
//! and hands out contract handles bound to the connected account.

use std::str::FromStr;

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use super::healthcare::{HealthcareContract, RecordsContract};
use super::types::NetworkConfig;

/// Access to a user's wallet.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Contract handle type produced by [`WalletProvider::contract_at`].
    type Contract: RecordsContract;

    /// Ask the wallet for its accounts (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<Address>, ChainError>;

    /// Native balance in wei at the latest block (`eth_getBalance`).
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError>;

    /// Bind a contract instance at `address`, sending from `from`.
    fn contract_at(&self, address: Address, from: Address) -> Self::Contract;

    /// Network this wallet is connected to.
    fn network(&self) -> &NetworkConfig;
}

/// Wallet backed by a JSON-RPC node.
///
/// With a local signer, transactions are signed in-process and the signer's
/// address is the only account. Without one, account access and signing are
/// delegated to the node (unlocked accounts on a dev chain).
pub struct RpcWallet {
    network: NetworkConfig,
    provider: DynProvider,
    signer_address: Option<Address>,
}

impl RpcWallet {
    /// Connect to `rpc_url`, optionally signing with `signer`.
    pub fn connect(
        network: NetworkConfig,
        rpc_url: &str,
        signer: Option<PrivateKeySigner>,
    ) -> Result<Self, ChainError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let signer_address = signer.as_ref().map(|s| s.address());
        let provider = match signer {
            Some(signer) => ProviderBuilder::new()
                .wallet(Self::create_wallet(signer))
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        tracing::debug!(
            network = network.name,
            rpc_url = %rpc_url,
            local_signer = signer_address.is_some(),
            "Wallet provider configured"
        );

        Ok(Self {
            network,
            provider,
            signer_address,
        })
    }

    /// Create a signer from a hex private key (with or without `0x`).
    pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, ChainError> {
        let key_bytes = alloy::hex::decode(private_key_hex.trim())
            .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))
    }

    /// Create an Ethereum wallet from a signer.
    pub fn create_wallet(signer: PrivateKeySigner) -> EthereumWallet {
        EthereumWallet::from(signer)
    }

    /// Current chain ID reported by the node.
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }
}

impl WalletProvider for RpcWallet {
    type Contract = HealthcareContract<DynProvider>;

    async fn request_accounts(&self) -> Result<Vec<Address>, ChainError> {
        if let Some(address) = self.signer_address {
            return Ok(vec![address]);
        }

        self.provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), [(); 0])
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    fn contract_at(&self, address: Address, from: Address) -> Self::Contract {
        HealthcareContract::new(self.provider.clone(), address, from, self.network.clone())
    }

    fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

/// Parse a hex address, accepting any letter case.
pub fn parse_address(raw: &str) -> Result<Address, ChainError> {
    Address::from_str(raw.trim()).map_err(|e| ChainError::InvalidAddress(e.to_string()))
}

/// Format a balance with the specified number of decimals.
///
/// At most 6 fractional digits are shown. A non-zero balance below that
/// precision renders as `<0.000001` rather than `0`.
pub fn format_balance(balance: U256, decimals: u8) -> String {
    if balance.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        // Format with up to 6 decimal places
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        let shown = &trimmed[..trimmed.len().min(6)];
        if shown.trim_end_matches('0').is_empty() {
            if whole.is_zero() {
                let places = (decimals as usize).min(6);
                format!("<0.{}1", "0".repeat(places - 1))
            } else {
                whole.to_string()
            }
        } else {
            format!("{}.{}", whole, shown.trim_end_matches('0'))
        }
    }
}

/// Errors that can occur during wallet and contract operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known dev chain key (anvil/hardhat account #0).
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_format_balance() {
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_balance(one_eth, 18), "1");

        let half_eth = U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_balance(half_eth, 18), "0.5");

        // Truncated to 6 decimals
        let complex = U256::from(1_234_567_890_000_000_000u64);
        assert_eq!(format_balance(complex, 18), "1.234567");

        // Dust below the shown precision
        let dust = U256::from(1_000_000_000_000_000_001u64);
        assert_eq!(format_balance(dust, 18), "1");

        assert_eq!(format_balance(U256::ZERO, 18), "0");
    }

    #[test]
    fn test_format_balance_marks_tiny_nonzero_amounts() {
        assert_eq!(format_balance(U256::from(123u64), 18), "<0.000001");
        assert_eq!(format_balance(U256::from(1u64), 18), "<0.000001");

        // Exactly the smallest shown unit is printed as-is
        let micro = U256::from(1_000_000_000_000u64);
        assert_eq!(format_balance(micro, 18), "0.000001");
    }

    #[test]
    fn test_create_signer_accepts_prefixed_and_bare_hex() {
        let bare = RpcWallet::create_signer(DEV_KEY).unwrap();
        let prefixed = RpcWallet::create_signer(&format!("0x{DEV_KEY}")).unwrap();
        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(bare.address(), parse_address(DEV_ADDRESS).unwrap());
    }

    #[test]
    fn test_create_signer_rejects_garbage() {
        assert!(matches!(
            RpcWallet::create_signer("not-a-key"),
            Err(ChainError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_parse_address_ignores_case() {
        let lower = parse_address(&DEV_ADDRESS.to_lowercase()).unwrap();
        let mixed = parse_address(DEV_ADDRESS).unwrap();
        assert_eq!(lower, mixed);
        assert!(matches!(
            parse_address("0x1234"),
            Err(ChainError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_local_signer_is_the_only_account() {
        let signer = RpcWallet::create_signer(DEV_KEY).unwrap();
        let wallet = RpcWallet::connect(
            crate::blockchain::LOCALHOST,
            "http://127.0.0.1:8545",
            Some(signer),
        )
        .unwrap();

        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![parse_address(DEV_ADDRESS).unwrap()]);
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let result = RpcWallet::connect(crate::blockchain::LOCALHOST, "not a url", None);
        assert!(matches!(result, Err(ChainError::InvalidRpcUrl(_))));
    }
}

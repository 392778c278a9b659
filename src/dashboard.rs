// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Records Dashboard
//!
//! Session state and user actions for the healthcare records client.
//!
//! Flow: connect wallet → account and balance → bind contract and resolve the
//! owner → user-triggered reads and writes → render. Every wallet or contract
//! failure is caught here, logged, and reported through the [`Notifier`]; no
//! action retries.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::blockchain::{
    format_balance, parse_address, PatientRecord, RecordsContract, TxOutcome, WalletProvider,
};

pub const MSG_NO_WALLET: &str = "Please install a wallet provider.";
pub const MSG_CONNECT_FAILED: &str = "Error connecting to wallet.";
pub const MSG_OWNER_FAILED: &str =
    "Error calling getOwner: The contract may be misconfigured or inaccessible.";
pub const MSG_FETCH_INVALID: &str = "Please connect to the contract and enter a valid patient ID.";
pub const MSG_FETCH_FAILED: &str = "Error fetching patient records.";
pub const MSG_ADD_INVALID: &str = "Please fill in all the fields.";
pub const MSG_ADD_OK: &str = "Record added successfully!";
pub const MSG_ADD_FAILED: &str = "Error adding record.";
pub const MSG_AUTHORIZE_INVALID: &str = "Please provide a valid provider address.";
pub const MSG_AUTHORIZE_OK: &str = "Provider authorized successfully!";
pub const MSG_AUTHORIZE_FAILED: &str = "Error authorizing provider.";

/// Delivers user-facing notices.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Prints notices to stdout, ringing the terminal bell.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("\x07[!] {message}");
    }
}

/// Editable form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub patient_id: String,
    pub patient_name: String,
    pub diagnosis: String,
    pub treatment: String,
    pub provider_address: String,
}

/// Render-ready snapshot of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub account: Option<String>,
    pub balance: Option<String>,
    pub currency_symbol: String,
    pub network: String,
    pub is_owner: Option<bool>,
    pub form: FormFields,
    pub records: Vec<PatientRecord>,
}

/// Session state and actions over a wallet provider.
pub struct Dashboard<W: WalletProvider, N: Notifier> {
    wallet: Option<W>,
    notifier: N,
    contract_address: Address,
    owner_override: Option<Address>,
    account: Option<Address>,
    balance: Option<String>,
    is_owner: Option<bool>,
    contract: Option<W::Contract>,
    form: FormFields,
    records: Vec<PatientRecord>,
}

impl<W: WalletProvider, N: Notifier> Dashboard<W, N> {
    /// `wallet` is `None` when no wallet provider is available.
    pub fn new(
        wallet: Option<W>,
        notifier: N,
        contract_address: Address,
        owner_override: Option<Address>,
    ) -> Self {
        Self {
            wallet,
            notifier,
            contract_address,
            owner_override,
            account: None,
            balance: None,
            is_owner: None,
            contract: None,
            form: FormFields::default(),
            records: Vec::new(),
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Request wallet accounts and adopt the first one.
    pub async fn connect(&mut self) {
        let Some(wallet) = self.wallet.as_ref() else {
            self.notifier.notify(MSG_NO_WALLET);
            return;
        };

        match wallet.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => self.account_changed(account).await,
                None => {
                    warn!("Wallet returned no accounts");
                    self.notifier.notify(MSG_CONNECT_FAILED);
                }
            },
            Err(e) => {
                error!(error = %e, "Error connecting to wallet");
                self.notifier.notify(MSG_CONNECT_FAILED);
            }
        }
    }

    /// Switch the session to `account`: balance, contract and owner flag.
    pub async fn account_changed(&mut self, account: Address) {
        info!(account = %account, "Wallet account connected");
        self.account = Some(account);
        self.records.clear();
        self.refresh_balance().await;
        self.fetch_contract_details(account).await;
    }

    /// Re-read the native balance of the connected account.
    pub async fn refresh_balance(&mut self) {
        let (Some(wallet), Some(account)) = (self.wallet.as_ref(), self.account) else {
            return;
        };

        match wallet.get_balance(account).await {
            Ok(wei) => self.balance = Some(format_balance(wei, 18)),
            Err(e) => {
                error!(account = %account, error = %e, "Error fetching balance");
                self.balance = None;
            }
        }
    }

    async fn fetch_contract_details(&mut self, account: Address) {
        let Some(wallet) = self.wallet.as_ref() else {
            return;
        };

        let contract = wallet.contract_at(self.contract_address, account);
        let owner = match self.owner_override {
            Some(owner) => Ok(owner),
            None => contract.get_owner().await,
        };
        self.contract = Some(contract);

        match owner {
            Ok(owner) => {
                let is_owner = owner == account;
                info!(owner = %owner, is_owner, "Contract owner resolved");
                self.is_owner = Some(is_owner);
            }
            Err(e) => {
                error!(
                    contract = %self.contract_address,
                    error = %e,
                    "Error fetching contract details"
                );
                self.is_owner = None;
                self.notifier.notify(MSG_OWNER_FAILED);
            }
        }
    }

    /// Load all records for the patient ID in the form.
    pub async fn fetch_patient_records(&mut self) {
        let (Some(contract), Some(patient_id)) =
            (self.contract.as_ref(), parse_patient_id(&self.form.patient_id))
        else {
            self.notifier.notify(MSG_FETCH_INVALID);
            return;
        };

        match contract.get_patient_records(patient_id).await {
            Ok(records) => {
                info!(patient_id = %patient_id, count = records.len(), "Patient records fetched");
                self.records = records;
            }
            Err(e) => {
                error!(patient_id = %patient_id, error = %e, "Error fetching patient records");
                self.notifier.notify(MSG_FETCH_FAILED);
            }
        }
    }

    /// Submit the record in the form. A blank patient name defaults to the
    /// connected account address.
    pub async fn add_record(&mut self) -> Option<TxOutcome> {
        let form = &self.form;
        let patient_id = parse_patient_id(&form.patient_id);
        let ready = self.contract.is_some()
            && patient_id.is_some()
            && !form.diagnosis.trim().is_empty()
            && !form.treatment.trim().is_empty();
        let (Some(contract), Some(patient_id), true) = (self.contract.as_ref(), patient_id, ready)
        else {
            self.notifier.notify(MSG_ADD_INVALID);
            return None;
        };

        let patient_name = match form.patient_name.trim() {
            "" => self.account.map(|a| a.to_string()).unwrap_or_default(),
            name => name.to_string(),
        };

        match contract
            .add_record(
                patient_id,
                &patient_name,
                form.diagnosis.trim(),
                form.treatment.trim(),
            )
            .await
        {
            Ok(outcome) => {
                self.notifier.notify(&with_link(MSG_ADD_OK, &outcome));
                Some(outcome)
            }
            Err(e) => {
                error!(patient_id = %patient_id, error = %e, "Error adding record");
                self.notifier.notify(MSG_ADD_FAILED);
                None
            }
        }
    }

    /// Authorize the provider address in the form.
    pub async fn authorize_provider(&mut self) -> Option<TxOutcome> {
        let provider = parse_address(&self.form.provider_address).ok();
        let (Some(contract), Some(provider)) = (self.contract.as_ref(), provider) else {
            self.notifier.notify(MSG_AUTHORIZE_INVALID);
            return None;
        };

        match contract.authorize_provider(provider).await {
            Ok(outcome) => {
                self.notifier.notify(&with_link(MSG_AUTHORIZE_OK, &outcome));
                Some(outcome)
            }
            Err(e) => {
                error!(provider = %provider, error = %e, "Error authorizing provider");
                self.notifier.notify(MSG_AUTHORIZE_FAILED);
                None
            }
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> DashboardView {
        let (currency_symbol, network) = self
            .wallet
            .as_ref()
            .map(|w| (w.network().currency_symbol, w.network().name))
            .unwrap_or(("ETH", "none"));

        DashboardView {
            account: self.account.map(|a| a.to_string()),
            balance: self.balance.clone(),
            currency_symbol: currency_symbol.to_string(),
            network: network.to_string(),
            is_owner: self.is_owner,
            form: self.form.clone(),
            records: self.records.clone(),
        }
    }
}

/// Parse a decimal patient ID; blank or malformed input yields `None`.
///
/// Only ASCII digits are accepted: no sign, separators or radix prefix.
pub fn parse_patient_id(raw: &str) -> Option<U256> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(trimmed, 10).ok()
}

fn with_link(message: &str, outcome: &TxOutcome) -> String {
    match &outcome.explorer_url {
        Some(url) => format!("{message} ({url})"),
        None => format!("{message} (tx {})", outcome.tx_hash),
    }
}

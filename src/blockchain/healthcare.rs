// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Healthcare records contract interactions.
//!
//! The contract is deployed externally and owns all record storage and access
//! control. This module only binds its published interface.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};

use super::client::ChainError;
use super::types::{NetworkConfig, PatientRecord, TxOutcome};

// Published interface of the deployed records contract
sol! {
    #[sol(rpc)]
    contract Healthcare {
        struct Record {
            uint256 recordID;
            string patientName;
            string diagnosis;
            string treatment;
            uint256 timestamp;
        }

        function addRecord(uint256 patientID, string memory patientName, string memory diagnosis, string memory treatment) external;
        function authorizeProvider(address provider) external;
        function getOwner() external view returns (address);
        function getPatientRecords(uint256 patientID) external view returns (Record[] memory);
    }
}

impl From<Healthcare::Record> for PatientRecord {
    fn from(record: Healthcare::Record) -> Self {
        Self {
            record_id: record.recordID,
            patient_name: record.patientName,
            diagnosis: record.diagnosis,
            treatment: record.treatment,
            timestamp: record.timestamp,
        }
    }
}

/// Calls exposed by the records contract.
#[allow(async_fn_in_trait)]
pub trait RecordsContract {
    /// Append a record for `patient_id`. Only authorized providers succeed.
    async fn add_record(
        &self,
        patient_id: U256,
        patient_name: &str,
        diagnosis: &str,
        treatment: &str,
    ) -> Result<TxOutcome, ChainError>;

    /// Grant `provider` permission to add records. Owner only.
    async fn authorize_provider(&self, provider: Address) -> Result<TxOutcome, ChainError>;

    /// Contract owner address.
    async fn get_owner(&self) -> Result<Address, ChainError>;

    /// All records stored for `patient_id`.
    async fn get_patient_records(&self, patient_id: U256)
        -> Result<Vec<PatientRecord>, ChainError>;
}

/// Records contract wrapper bound to a sending account.
pub struct HealthcareContract<P> {
    contract: Healthcare::HealthcareInstance<P>,
    from: Address,
    network: NetworkConfig,
}

impl<P: Provider + Clone> HealthcareContract<P> {
    /// Create a new contract instance sending from `from`.
    pub fn new(provider: P, address: Address, from: Address, network: NetworkConfig) -> Self {
        let contract = Healthcare::new(address, provider);
        Self {
            contract,
            from,
            network,
        }
    }
}

impl<P: Provider + Clone> RecordsContract for HealthcareContract<P> {
    async fn add_record(
        &self,
        patient_id: U256,
        patient_name: &str,
        diagnosis: &str,
        treatment: &str,
    ) -> Result<TxOutcome, ChainError> {
        let receipt = self
            .contract
            .addRecord(
                patient_id,
                patient_name.to_string(),
                diagnosis.to_string(),
                treatment.to_string(),
            )
            .from(self.from)
            .send()
            .await
            .map_err(|e| ChainError::ContractError(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))?;

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        if !receipt.status() {
            return Err(ChainError::TransactionReverted(tx_hash));
        }

        tracing::info!(
            tx_hash = %tx_hash,
            patient_id = %patient_id,
            block_number = ?receipt.block_number,
            "Patient record added"
        );

        Ok(TxOutcome::new(&self.network, tx_hash, receipt.block_number))
    }

    async fn authorize_provider(&self, provider: Address) -> Result<TxOutcome, ChainError> {
        let receipt = self
            .contract
            .authorizeProvider(provider)
            .from(self.from)
            .send()
            .await
            .map_err(|e| ChainError::ContractError(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))?;

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        if !receipt.status() {
            return Err(ChainError::TransactionReverted(tx_hash));
        }

        tracing::info!(
            tx_hash = %tx_hash,
            provider = %provider,
            "Provider authorized"
        );

        Ok(TxOutcome::new(&self.network, tx_hash, receipt.block_number))
    }

    async fn get_owner(&self) -> Result<Address, ChainError> {
        self.contract
            .getOwner()
            .from(self.from)
            .call()
            .await
            .map_err(|e| ChainError::ContractError(e.to_string()))
    }

    async fn get_patient_records(
        &self,
        patient_id: U256,
    ) -> Result<Vec<PatientRecord>, ChainError> {
        let records = self
            .contract
            .getPatientRecords(patient_id)
            .from(self.from)
            .call()
            .await
            .map_err(|e| ChainError::ContractError(e.to_string()))?;

        Ok(records.into_iter().map(PatientRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::{SolCall, SolValue};

    #[test]
    fn test_function_selectors_match_published_abi() {
        assert_eq!(
            Healthcare::addRecordCall::SIGNATURE,
            "addRecord(uint256,string,string,string)"
        );
        assert_eq!(
            Healthcare::authorizeProviderCall::SIGNATURE,
            "authorizeProvider(address)"
        );
        assert_eq!(Healthcare::getOwnerCall::SIGNATURE, "getOwner()");
        assert_eq!(
            Healthcare::getPatientRecordsCall::SIGNATURE,
            "getPatientRecords(uint256)"
        );
    }

    #[test]
    fn test_records_decode_into_patient_records() {
        let records = vec![Healthcare::Record {
            recordID: U256::from(3u64),
            patientName: "Bob".to_string(),
            diagnosis: "Fracture".to_string(),
            treatment: "Cast".to_string(),
            timestamp: U256::from(1_700_000_000u64),
        }];
        let encoded = (records,).abi_encode_params();

        let decoded = Healthcare::getPatientRecordsCall::abi_decode_returns(&encoded).unwrap();
        let records: Vec<PatientRecord> = decoded.into_iter().map(PatientRecord::from).collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_id, U256::from(3u64));
        assert_eq!(records[0].patient_name, "Bob");
        assert_eq!(records[0].diagnosis, "Fracture");
        assert_eq!(records[0].treatment, "Cast");
    }

    #[test]
    fn test_add_record_call_encodes_arguments() {
        let call = Healthcare::addRecordCall {
            patientID: U256::from(42u64),
            patientName: "Alice".to_string(),
            diagnosis: "Flu".to_string(),
            treatment: "Rest".to_string(),
        };
        let data = call.abi_encode();
        assert_eq!(&data[..4], &Healthcare::addRecordCall::SELECTOR);

        let back = Healthcare::addRecordCall::abi_decode(&data).unwrap();
        assert_eq!(back.patientID, U256::from(42u64));
        assert_eq!(back.diagnosis, "Flu");
    }
}

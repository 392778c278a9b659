// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::ChainError;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidNetwork(String),

    #[error("Invalid contract address `{0}`")]
    InvalidContractAddress(String),

    #[error("Invalid owner address `{0}`")]
    InvalidOwnerAddress(String),

    #[error("Invalid log format `{0}` (expected `json` or `pretty`)")]
    InvalidLogFormat(String),

    #[error("Both {0} and {1} are set; choose one signing key source")]
    ConflictingKeySources(&'static str, &'static str),

    #[error(transparent)]
    Wallet(#[from] ChainError),
}

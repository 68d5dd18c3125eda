// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejected user input. Nothing is mutated when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount (got '{0}')")]
    InvalidAmount(String),
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("Unknown transaction type '{0}' (use income|expense)")]
    UnknownType(String),
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
    #[error("Unknown theme '{0}' (use light|dark)")]
    UnknownTheme(String),
    #[error("Unknown EMI policy '{0}' (use always|until-end-date)")]
    UnknownPolicy(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Stored value under '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the store, the row editor and the dashboard.
//!
//! Every error is local and recoverable: the command that raised it had no
//! effect and the previous state is still in place.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    /// A new transaction was refused (non-positive amount).
    #[error("Transaction rejected: {0}")]
    ValidationRejected(String),
    #[error("Transaction '{0}' not found")]
    NotFound(String),
    #[error("Transaction '{0}' is not being edited")]
    NotEditing(String),
    #[error("Invalid field value: {0}")]
    InvalidField(String),
    #[error("Corrupt stored row: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub type SpendResult<T> = Result<T, SpendError>;

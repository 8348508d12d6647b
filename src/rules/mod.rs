// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure business rules: classification, code validation, double-entry
//! previews, PPN settlement, and financial health scoring. Nothing in
//! here touches the database or does I/O; every function is
//! deterministic over its inputs.

pub mod classify;
pub mod code;
pub mod currency;
pub mod entry;
pub mod health;
pub mod ppn;

use thiserror::Error;

/// Recoverable precondition failures. These are values, not panics; the
/// caller re-prompts or rejects the submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("payment of {amount} exceeds payable amount of {payable}")]
    ExceedsPayable { amount: i64, payable: i64 },
    #[error("nothing to pay (PPN terutang is {terutang})")]
    NothingPayable { terutang: i64 },
    #[error("{0} account is required")]
    MissingAccount(&'static str),
    #[error("debit and credit must use distinct accounts")]
    SameAccount,
    #[error("account {0} is a header account and cannot receive transactions")]
    HeaderAccount(String),
    #[error("account {0} is inactive")]
    InactiveAccount(String),
    #[error("invalid account code '{code}': {reason}")]
    BadCode { code: String, reason: String },
    #[error("health weights must be non-negative and sum to 1.0")]
    BadWeights,
}

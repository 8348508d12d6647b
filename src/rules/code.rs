// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, AccountType};
use crate::rules::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}(-\d{3})?$").unwrap());

/// Validate an account code against the `XXXX` / `XXXX-XXX` shape and,
/// when a parent is selected, the dashed-prefix relation.
///
/// The relation check only applies to the dashed form: a plain 4-digit
/// child code is accepted without checking its relation to the parent.
/// That looseness is observed behavior in the source system and kept
/// as-is.
pub fn validate_code(code: &str, parent: Option<&Account>) -> Result<(), ValidationError> {
    if !CODE_RE.is_match(code) {
        return Err(ValidationError::BadCode {
            code: code.to_string(),
            reason: "expected 4 digits or 4 digits, dash, 3 digits (e.g. 1101 or 1101-004)"
                .to_string(),
        });
    }
    let Some(parent) = parent else {
        return Ok(());
    };
    if code.contains('-') {
        let want = format!("{}-", parent.code);
        if !code.starts_with(&want) {
            return Err(ValidationError::BadCode {
                code: code.to_string(),
                reason: format!("dashed code must start with parent prefix '{}'", want),
            });
        }
    }
    Ok(())
}

/// Check that a 4-digit code sits in the block reserved for the account
/// type (1xxx assets, 2xxx liabilities, ...).
pub fn validate_code_range(code: &str, r#type: AccountType) -> Result<(), ValidationError> {
    let stem = code.split('-').next().unwrap_or(code);
    let value: u32 = stem.parse().map_err(|_| ValidationError::BadCode {
        code: code.to_string(),
        reason: "expected a numeric 4-digit stem".to_string(),
    })?;
    if !r#type.code_range_ok(value) {
        return Err(ValidationError::BadCode {
            code: code.to_string(),
            reason: format!("code block does not match account type {}", r#type),
        });
    }
    Ok(())
}

/// Next free sequential code for a new account: children count up from
/// the parent stem (1100 -> 1101), top-level accounts advance in steps
/// of 100 inside the type block.
pub fn suggest_next_code(
    r#type: AccountType,
    parent: Option<&Account>,
    existing: &[String],
) -> Option<String> {
    match parent {
        Some(p) => {
            let stem: u32 = p.code.split('-').next()?.parse().ok()?;
            (stem + 1..stem + 100)
                .map(|v| format!("{:04}", v))
                .find(|c| !existing.contains(c))
        }
        None => {
            let start = match r#type {
                AccountType::Asset => 1000,
                AccountType::Liability => 2000,
                AccountType::Equity => 3000,
                AccountType::Revenue => 4000,
                AccountType::Expense => 5000,
            };
            (0..10)
                .map(|i| format!("{}", start + i * 100))
                .find(|c| !existing.contains(c))
        }
    }
}

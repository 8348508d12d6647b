// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Account;
use crate::rules::ValidationError;
use serde::Serialize;

/// A balanced two-leg entry preview: one amount applied to the debit
/// side and the same amount to the credit side. Split entries are not
/// supported; balance holds by construction.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPreview {
    pub amount: i64,
    pub debit_code: String,
    pub debit_name: String,
    pub credit_code: String,
    pub credit_name: String,
    /// Insufficient funds on the paying leg. A warning, not a block;
    /// the PPN remittance flow escalates this to a hard error itself.
    pub funding_warning: Option<String>,
}

impl EntryPreview {
    pub fn build(
        amount: i64,
        debit: Option<&Account>,
        credit: Option<&Account>,
    ) -> Result<EntryPreview, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        let debit = debit.ok_or(ValidationError::MissingAccount("debit"))?;
        let credit = credit.ok_or(ValidationError::MissingAccount("credit"))?;
        if debit.id == credit.id {
            return Err(ValidationError::SameAccount);
        }
        for acct in [debit, credit] {
            if acct.is_header {
                return Err(ValidationError::HeaderAccount(acct.code.clone()));
            }
            if !acct.is_active {
                return Err(ValidationError::InactiveAccount(acct.code.clone()));
            }
        }
        // The credit leg is the outflow side when it carries a balance
        // (paying out of cash/bank).
        let funding_warning = funding_check(credit, amount);
        Ok(EntryPreview {
            amount,
            debit_code: debit.code.clone(),
            debit_name: debit.name.clone(),
            credit_code: credit.code.clone(),
            credit_name: credit.name.clone(),
            funding_warning,
        })
    }

    /// True for every constructible preview; kept as an explicit check so
    /// callers can assert the invariant instead of assuming it.
    pub fn balanced(&self) -> bool {
        self.debit_amount() == self.credit_amount()
    }

    pub fn debit_amount(&self) -> i64 {
        self.amount
    }

    pub fn credit_amount(&self) -> i64 {
        self.amount
    }
}

/// Non-blocking balance check for the account an outflow is paid from.
pub fn funding_check(source: &Account, amount: i64) -> Option<String> {
    if source.r#type.debit_positive() && source.balance < amount {
        Some(format!(
            "insufficient balance on {} ({}): available {}, required {}",
            source.code,
            source.name,
            super::currency::format_currency(source.balance),
            super::currency::format_currency(amount)
        ))
    } else {
        None
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rules::ValidationError;
use serde::Serialize;

/// Accumulated PPN balances: Masukan is input VAT paid on purchases
/// (asset side), Keluaran is output VAT collected on sales (liability
/// side). Terutang is the net amount owed to the tax office.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PpnPosition {
    pub masukan: i64,
    pub keluaran: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PpnStatus {
    /// Nothing owed, nothing to carry forward.
    Settled,
    /// Keluaran exceeds Masukan; the difference must be remitted.
    Payable,
    /// Masukan exceeds Keluaran; the credit carries forward, no payment
    /// is permitted.
    CarryForward,
}

/// The three-leg remittance journal for a PPN payment. Keluaran is
/// debited for the full amount being cleared, Masukan is credited for
/// the compensated input VAT, cash pays the net.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PpnSettlement {
    pub keluaran_debit: i64,
    pub masukan_credit: i64,
    pub cash_credit: i64,
}

impl PpnPosition {
    pub fn new(masukan: i64, keluaran: i64) -> PpnPosition {
        PpnPosition { masukan, keluaran }
    }

    /// PPN Terutang = PPN Keluaran - PPN Masukan.
    pub fn terutang(&self) -> i64 {
        self.keluaran - self.masukan
    }

    pub fn status(&self) -> PpnStatus {
        match self.terutang() {
            0 => PpnStatus::Settled,
            t if t > 0 => PpnStatus::Payable,
            _ => PpnStatus::CarryForward,
        }
    }

    /// Validate a remittance amount. `None` defaults to the full
    /// terutang. Settled and carry-forward positions both reject any
    /// payment.
    pub fn validate_payment(&self, amount: Option<i64>) -> Result<i64, ValidationError> {
        let terutang = self.terutang();
        if terutang <= 0 {
            return Err(ValidationError::NothingPayable { terutang });
        }
        let amount = amount.unwrap_or(terutang);
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if amount > terutang {
            return Err(ValidationError::ExceedsPayable {
                amount,
                payable: terutang,
            });
        }
        Ok(amount)
    }

    /// Journal breakdown for a validated payment. Compensation clears as
    /// much Masukan as the Keluaran balance covers; the cash leg pays
    /// the net. Legs always balance: keluaran_debit = masukan_credit +
    /// cash_credit when the full terutang is paid, and partial payments
    /// scale the keluaran leg down with the cash leg.
    pub fn settlement(&self, amount: i64) -> PpnSettlement {
        let kompensasi = self.masukan.min(self.keluaran);
        PpnSettlement {
            keluaran_debit: amount + kompensasi,
            masukan_credit: kompensasi,
            cash_credit: amount,
        }
    }
}

impl PpnSettlement {
    pub fn balanced(&self) -> bool {
        self.keluaran_debit == self.masukan_credit + self.cash_credit
    }
}

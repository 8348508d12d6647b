// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukubesar::rules::ValidationError;
use bukubesar::rules::ppn::{PpnPosition, PpnStatus};

#[test]
fn terutang_is_keluaran_minus_masukan() {
    assert_eq!(PpnPosition::new(100, 300).terutang(), 200);
    assert_eq!(PpnPosition::new(300, 100).terutang(), -200);
    assert_eq!(PpnPosition::new(100, 100).terutang(), 0);
}

#[test]
fn status_buckets() {
    assert_eq!(PpnPosition::new(100, 100).status(), PpnStatus::Settled);
    assert_eq!(PpnPosition::new(100, 300).status(), PpnStatus::Payable);
    assert_eq!(PpnPosition::new(300, 100).status(), PpnStatus::CarryForward);
}

#[test]
fn payment_boundary_cases() {
    let pos = PpnPosition::new(100, 300);
    assert_eq!(pos.validate_payment(Some(200)).unwrap(), 200);
    assert_eq!(
        pos.validate_payment(Some(201)).unwrap_err(),
        ValidationError::ExceedsPayable {
            amount: 201,
            payable: 200
        }
    );
    assert_eq!(
        pos.validate_payment(Some(0)).unwrap_err(),
        ValidationError::NonPositiveAmount
    );
    assert_eq!(
        pos.validate_payment(Some(-5)).unwrap_err(),
        ValidationError::NonPositiveAmount
    );
}

#[test]
fn missing_amount_defaults_to_full_terutang() {
    let pos = PpnPosition::new(100, 300);
    assert_eq!(pos.validate_payment(None).unwrap(), 200);
}

#[test]
fn settled_and_carry_forward_block_any_payment() {
    for (masukan, keluaran) in [(100, 100), (300, 100), (0, 0), (1, 0)] {
        let pos = PpnPosition::new(masukan, keluaran);
        let err = pos.validate_payment(Some(1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NothingPayable {
                terutang: keluaran - masukan
            }
        );
        // Defaulted amounts are blocked the same way.
        assert!(pos.validate_payment(None).is_err());
    }
}

#[test]
fn error_messages_name_the_boundary() {
    let pos = PpnPosition::new(100, 300);
    let msg = pos.validate_payment(Some(201)).unwrap_err().to_string();
    assert!(msg.contains("201"));
    assert!(msg.contains("200"));
}

#[test]
fn settlement_clears_keluaran_and_compensates_masukan() {
    // Keluaran 50jt, Masukan 30jt, Terutang 20jt: paying in full debits
    // Keluaran 50jt, credits Masukan 30jt and cash 20jt.
    let pos = PpnPosition::new(30_000_000, 50_000_000);
    let amount = pos.validate_payment(None).unwrap();
    let s = pos.settlement(amount);
    assert_eq!(s.keluaran_debit, 50_000_000);
    assert_eq!(s.masukan_credit, 30_000_000);
    assert_eq!(s.cash_credit, 20_000_000);
    assert!(s.balanced());
}

#[test]
fn partial_settlement_stays_balanced() {
    let pos = PpnPosition::new(30_000_000, 50_000_000);
    let s = pos.settlement(pos.validate_payment(Some(5_000_000)).unwrap());
    assert_eq!(s.cash_credit, 5_000_000);
    assert_eq!(s.masukan_credit, 30_000_000);
    assert_eq!(s.keluaran_debit, 35_000_000);
    assert!(s.balanced());
}

#[test]
fn settlement_without_masukan_is_two_legs() {
    let pos = PpnPosition::new(0, 1_000_000);
    let s = pos.settlement(pos.validate_payment(None).unwrap());
    assert_eq!(s.masukan_credit, 0);
    assert_eq!(s.keluaran_debit, 1_000_000);
    assert_eq!(s.cash_credit, 1_000_000);
    assert!(s.balanced());
}

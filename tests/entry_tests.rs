// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukubesar::models::{Account, AccountType};
use bukubesar::rules::ValidationError;
use bukubesar::rules::entry::{EntryPreview, funding_check};

fn acct(id: i64, code: &str, name: &str, r#type: AccountType, balance: i64) -> Account {
    Account {
        id,
        code: code.to_string(),
        name: name.to_string(),
        r#type,
        category: None,
        parent_id: None,
        is_header: false,
        balance,
        is_active: true,
    }
}

fn cash() -> Account {
    acct(1, "1101", "KAS PROYEK", AccountType::Asset, 5_000_000)
}

fn expense() -> Account {
    acct(2, "5101", "MATERIAL BANGUNAN", AccountType::Expense, 0)
}

#[test]
fn preview_is_always_balanced() {
    for amount in [1i64, 500, 1_000_000, 25_500_000] {
        let p = EntryPreview::build(amount, Some(&expense()), Some(&cash())).unwrap();
        assert!(p.balanced());
        assert_eq!(p.debit_amount(), p.credit_amount());
        assert_eq!(p.debit_amount(), amount);
    }
}

#[test]
fn zero_and_negative_amounts_rejected() {
    for amount in [0i64, -1, -1_000] {
        let err = EntryPreview::build(amount, Some(&expense()), Some(&cash())).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount);
    }
}

#[test]
fn both_accounts_required() {
    assert_eq!(
        EntryPreview::build(100, None, Some(&cash())).unwrap_err(),
        ValidationError::MissingAccount("debit")
    );
    assert_eq!(
        EntryPreview::build(100, Some(&expense()), None).unwrap_err(),
        ValidationError::MissingAccount("credit")
    );
}

#[test]
fn same_account_on_both_legs_rejected() {
    let c = cash();
    assert_eq!(
        EntryPreview::build(100, Some(&c), Some(&c)).unwrap_err(),
        ValidationError::SameAccount
    );
}

#[test]
fn header_and_inactive_accounts_rejected() {
    let mut h = cash();
    h.is_header = true;
    assert_eq!(
        EntryPreview::build(100, Some(&h), Some(&expense())).unwrap_err(),
        ValidationError::HeaderAccount("1101".to_string())
    );

    let mut dead = expense();
    dead.is_active = false;
    assert_eq!(
        EntryPreview::build(100, Some(&dead), Some(&cash())).unwrap_err(),
        ValidationError::InactiveAccount("5101".to_string())
    );
}

#[test]
fn underfunded_credit_leg_warns_but_builds() {
    let p = EntryPreview::build(10_000_000, Some(&expense()), Some(&cash())).unwrap();
    let warning = p.funding_warning.expect("expected a funding warning");
    assert!(warning.contains("1101"));
    assert!(warning.contains("5.000.000"));
    assert!(warning.contains("10.000.000"));
}

#[test]
fn funding_check_only_applies_to_balance_carrying_outflows() {
    // Crediting a revenue account is not an outflow of held funds.
    let revenue = acct(3, "4101", "PENDAPATAN TERMIN 1", AccountType::Revenue, 0);
    assert!(funding_check(&revenue, 1_000_000).is_none());
    assert!(funding_check(&cash(), 1_000_000).is_none());
    assert!(funding_check(&cash(), 6_000_000).is_some());
}

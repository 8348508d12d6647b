// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukubesar::commands::reports::build_balance_sheet;
use bukubesar::db::{self, LineSpec};
use bukubesar::models::{Account, AccountCategory, AccountType};
use bukubesar::rules::ppn::PpnPosition;
use bukubesar::{cli, commands};
use chrono::NaiveDate;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::seed_chart(&conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn id(conn: &Connection, code: &str) -> i64 {
    db::account_by_code(conn, code).unwrap().unwrap().id
}

fn balance(conn: &Connection, code: &str) -> i64 {
    db::account_by_code(conn, code).unwrap().unwrap().balance
}

fn two_legs(debit_id: i64, credit_id: i64, amount: i64) -> Vec<LineSpec> {
    vec![
        LineSpec {
            account_id: debit_id,
            description: None,
            debit: amount,
            credit: 0,
        },
        LineSpec {
            account_id: credit_id,
            description: None,
            debit: 0,
            credit: amount,
        },
    ]
}

#[test]
fn seed_is_idempotent() {
    let conn = setup();
    assert_eq!(db::seed_chart(&conn).unwrap(), 0);
    let ppn = db::account_by_code(&conn, "1240").unwrap().unwrap();
    assert_eq!(ppn.name, "PPN MASUKAN");
    assert!(!ppn.is_header);
    let root = db::account_by_code(&conn, "1000").unwrap().unwrap();
    assert!(root.is_header);
    assert_eq!(root.balance, 0);
}

#[test]
fn seeded_chart_passes_integrity_checks() {
    let conn = setup();
    let accounts = db::list_accounts(&conn, true).unwrap();
    for a in &accounts {
        let parent = a
            .parent_id
            .and_then(|pid| accounts.iter().find(|p| p.id == pid));
        bukubesar::rules::code::validate_code(&a.code, parent).unwrap();
    }
    assert!(build_balance_sheet(&accounts).balanced);
}

#[test]
fn posting_applies_normal_balance_convention() {
    let mut conn = setup();
    let bank = id(&conn, "1102");
    let capital = id(&conn, "3101");
    // Owner funds the project: Dr BANK / Cr MODAL PEMILIK.
    db::post_entry(
        &mut conn,
        date("2026-01-05"),
        "Setoran modal",
        &two_legs(bank, capital, 100_000_000),
    )
    .unwrap();
    assert_eq!(balance(&conn, "1102"), 100_000_000);
    assert_eq!(balance(&conn, "3101"), 100_000_000);

    // Buy material with bank money: Dr MATERIAL / Cr BANK.
    let material = id(&conn, "5101");
    db::post_entry(
        &mut conn,
        date("2026-01-10"),
        "Beli semen",
        &two_legs(material, bank, 30_000_000),
    )
    .unwrap();
    assert_eq!(balance(&conn, "1102"), 70_000_000);
    assert_eq!(balance(&conn, "5101"), 30_000_000);
}

#[test]
fn unbalanced_lines_rejected_atomically() {
    let mut conn = setup();
    let bank = id(&conn, "1102");
    let capital = id(&conn, "3101");
    let lines = vec![
        LineSpec {
            account_id: bank,
            description: None,
            debit: 100,
            credit: 0,
        },
        LineSpec {
            account_id: capital,
            description: None,
            debit: 0,
            credit: 99,
        },
    ];
    assert!(db::post_entry(&mut conn, date("2026-01-05"), "bad", &lines).is_err());
    assert_eq!(balance(&conn, "1102"), 0);
    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM journal_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 0);
}

#[test]
fn header_accounts_cannot_receive_transactions() {
    let mut conn = setup();
    let root = id(&conn, "1000");
    let capital = id(&conn, "3101");
    let err = db::post_entry(
        &mut conn,
        date("2026-01-05"),
        "bad",
        &two_legs(root, capital, 100),
    )
    .unwrap_err();
    assert!(err.to_string().contains("header"));
    // The failed transaction must not leave partial state behind.
    assert_eq!(balance(&conn, "3101"), 0);
}

#[test]
fn balance_sheet_closes_with_current_earnings() {
    let mut conn = setup();
    let bank = id(&conn, "1102");
    let capital = id(&conn, "3101");
    let revenue = id(&conn, "4101");
    let material = id(&conn, "5101");

    db::post_entry(
        &mut conn,
        date("2026-02-01"),
        "Setoran modal",
        &two_legs(bank, capital, 200_000_000),
    )
    .unwrap();
    db::post_entry(
        &mut conn,
        date("2026-02-10"),
        "Termin 1",
        &two_legs(bank, revenue, 50_000_000),
    )
    .unwrap();
    db::post_entry(
        &mut conn,
        date("2026-02-12"),
        "Material",
        &two_legs(material, bank, 20_000_000),
    )
    .unwrap();

    let accounts = db::list_accounts(&conn, true).unwrap();
    let bs = build_balance_sheet(&accounts);
    assert_eq!(bs.total_assets, 230_000_000);
    assert_eq!(bs.equity, 200_000_000);
    assert_eq!(bs.current_earnings, 30_000_000);
    assert!(bs.balanced);
}

#[test]
fn ppn_pay_settles_the_configured_vat_accounts() {
    let mut conn = setup();
    for (code, name, r#type, category) in [
        (
            "1241",
            "PPN MASUKAN PROYEK",
            AccountType::Asset,
            AccountCategory::CurrentAsset,
        ),
        (
            "2104",
            "PPN KELUARAN PROYEK",
            AccountType::Liability,
            AccountCategory::CurrentLiability,
        ),
    ] {
        db::insert_account(
            &conn,
            &Account {
                id: 0,
                code: code.to_string(),
                name: name.to_string(),
                r#type,
                category: Some(category),
                parent_id: None,
                is_header: false,
                balance: 0,
                is_active: true,
            },
        )
        .unwrap();
    }
    db::set_setting(&conn, "ppn_masukan_account", "1241").unwrap();
    db::set_setting(&conn, "ppn_keluaran_account", "2104").unwrap();

    let bank = id(&conn, "1102");
    let capital = id(&conn, "3101");
    let masukan = id(&conn, "1241");
    let keluaran = id(&conn, "2104");
    db::post_entry(
        &mut conn,
        date("2026-04-01"),
        "Setoran modal",
        &two_legs(bank, capital, 50_000_000),
    )
    .unwrap();
    db::post_entry(
        &mut conn,
        date("2026-04-05"),
        "PPN Masukan pembelian",
        &two_legs(masukan, bank, 10_000_000),
    )
    .unwrap();
    db::post_entry(
        &mut conn,
        date("2026-04-08"),
        "PPN Keluaran penjualan",
        &two_legs(bank, keluaran, 30_000_000),
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from([
        "bukubesar",
        "ppn",
        "pay",
        "--date",
        "2026-04-30",
        "--from",
        "1102",
    ]);
    let Some(("ppn", ppn_m)) = matches.subcommand() else {
        panic!("no ppn subcommand");
    };
    commands::ppn::handle(&mut conn, ppn_m).unwrap();

    // The configured accounts are cleared, the defaults stay untouched.
    assert_eq!(balance(&conn, "1241"), 0);
    assert_eq!(balance(&conn, "2104"), 0);
    assert_eq!(balance(&conn, "1240"), 0);
    assert_eq!(balance(&conn, "2103"), 0);
    assert_eq!(balance(&conn, "1102"), 50_000_000);

    let (amount, terutang): (i64, i64) = conn
        .query_row(
            "SELECT amount, terutang FROM tax_payments ORDER BY id DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(amount, 20_000_000);
    assert_eq!(terutang, 20_000_000);
}

#[test]
fn ppn_settlement_posts_three_balanced_legs() {
    let mut conn = setup();
    let bank = id(&conn, "1102");
    let capital = id(&conn, "3101");
    let masukan = id(&conn, "1240");
    let keluaran = id(&conn, "2103");

    db::post_entry(
        &mut conn,
        date("2026-03-01"),
        "Setoran modal",
        &two_legs(bank, capital, 100_000_000),
    )
    .unwrap();
    // Accumulate input VAT (paid on purchases) and output VAT (collected).
    db::post_entry(
        &mut conn,
        date("2026-03-05"),
        "PPN Masukan pembelian",
        &two_legs(masukan, bank, 30_000_000),
    )
    .unwrap();
    db::post_entry(
        &mut conn,
        date("2026-03-08"),
        "PPN Keluaran penjualan",
        &two_legs(bank, keluaran, 50_000_000),
    )
    .unwrap();

    let pos = PpnPosition::new(balance(&conn, "1240"), balance(&conn, "2103"));
    assert_eq!(pos.terutang(), 20_000_000);
    let amount = pos.validate_payment(None).unwrap();
    let s = pos.settlement(amount);
    db::post_entry(
        &mut conn,
        date("2026-03-31"),
        "Setor PPN",
        &[
            LineSpec {
                account_id: keluaran,
                description: None,
                debit: s.keluaran_debit,
                credit: 0,
            },
            LineSpec {
                account_id: masukan,
                description: None,
                debit: 0,
                credit: s.masukan_credit,
            },
            LineSpec {
                account_id: bank,
                description: None,
                debit: 0,
                credit: s.cash_credit,
            },
        ],
    )
    .unwrap();

    // Both VAT accounts cleared; cash paid the net 20jt.
    assert_eq!(balance(&conn, "1240"), 0);
    assert_eq!(balance(&conn, "2103"), 0);
    assert_eq!(balance(&conn, "1102"), 100_000_000);

    let accounts = db::list_accounts(&conn, true).unwrap();
    assert!(build_balance_sheet(&accounts).balanced);
}

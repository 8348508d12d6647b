// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukubesar::db::{self, LineSpec};
use bukubesar::{cli, commands::exporter};
use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::seed_chart(&conn).unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_accounts_writes_the_seeded_chart() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("accounts.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &conn,
        &["bukubesar", "export", "accounts", "--out", &out_str],
    );

    let mut r = csv::Reader::from_path(&out_path).unwrap();
    assert_eq!(
        r.headers().unwrap(),
        &csv::StringRecord::from(vec![
            "code", "name", "type", "category", "is_header", "balance", "is_active",
        ])
    );
    let rows: Vec<csv::StringRecord> = r.records().map(|x| x.unwrap()).collect();
    assert_eq!(rows.len(), 20);
    let ppn = rows.iter().find(|rec| &rec[0] == "1240").unwrap();
    assert_eq!(&ppn[1], "PPN MASUKAN");
    assert_eq!(&ppn[2], "ASSET");
    assert_eq!(&ppn[3], "CURRENT_ASSET");
    assert_eq!(&ppn[4], "0");
    assert_eq!(&ppn[5], "0");
    assert_eq!(&ppn[6], "1");
}

#[test]
fn export_journal_preserves_leg_amounts() {
    let mut conn = setup();
    let bank = db::account_by_code(&conn, "1102").unwrap().unwrap().id;
    let capital = db::account_by_code(&conn, "3101").unwrap().unwrap().id;
    db::post_entry(
        &mut conn,
        NaiveDate::parse_from_str("2026-01-05", "%Y-%m-%d").unwrap(),
        "Setoran modal",
        &[
            LineSpec {
                account_id: bank,
                description: Some("modal masuk".into()),
                debit: 75_000_000,
                credit: 0,
            },
            LineSpec {
                account_id: capital,
                description: None,
                debit: 0,
                credit: 75_000_000,
            },
        ],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("journal.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(
        &conn,
        &["bukubesar", "export", "journal", "--out", &out_str],
    );

    let mut r = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = r.records().map(|x| x.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "2026-01-05");
    assert_eq!(&rows[0][2], "Setoran modal");
    assert_eq!(&rows[0][3], "1102");
    assert_eq!(&rows[0][4], "modal masuk");
    assert_eq!(&rows[0][5], "75000000");
    assert_eq!(&rows[0][6], "0");
    assert_eq!(&rows[1][3], "3101");
    assert_eq!(&rows[1][4], "");
    assert_eq!(&rows[1][6], "75000000");
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, LineSpec};
use crate::models::{Account, TaxPayment};
use crate::rules::currency::{format_currency, format_rupiah};
use crate::rules::ppn::PpnPosition;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-accounts", sub)) => set_accounts(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn vat_accounts(conn: &Connection) -> Result<(Account, Account)> {
    let masukan_code = db::setting(conn, "ppn_masukan_account", db::DEFAULT_PPN_MASUKAN)?;
    let keluaran_code = db::setting(conn, "ppn_keluaran_account", db::DEFAULT_PPN_KELUARAN)?;
    let masukan = db::require_account(conn, &masukan_code)?;
    let keluaran = db::require_account(conn, &keluaran_code)?;
    Ok((masukan, keluaran))
}

fn position(conn: &Connection) -> Result<PpnPosition> {
    let (masukan, keluaran) = vat_accounts(conn)?;
    Ok(PpnPosition::new(masukan.balance, keluaran.balance))
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let pos = position(conn)?;
    #[derive(serde::Serialize)]
    struct Status {
        masukan: i64,
        keluaran: i64,
        terutang: i64,
        status: crate::rules::ppn::PpnStatus,
    }
    let s = Status {
        masukan: pos.masukan,
        keluaran: pos.keluaran,
        terutang: pos.terutang(),
        status: pos.status(),
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["PPN Masukan".to_string(), format_rupiah(pos.masukan)],
        vec!["PPN Keluaran".to_string(), format_rupiah(pos.keluaran)],
        vec!["PPN Terutang".to_string(), format_rupiah(pos.terutang())],
        vec!["Position".to_string(), format!("{:?}", pos.status())],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let requested = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;
    let cash = db::require_account(conn, sub.get_one::<String>("from").unwrap().trim())?;

    let (masukan, keluaran) = vat_accounts(conn)?;
    let pos = PpnPosition::new(masukan.balance, keluaran.balance);
    let amount = pos.validate_payment(requested)?;

    // Unlike deposit-style flows, an underfunded cash account blocks the
    // remittance outright.
    if cash.balance < amount {
        bail!(
            "Insufficient balance on {}: available {}, required {}",
            cash.code,
            format_currency(cash.balance),
            format_currency(amount)
        );
    }

    let settlement = pos.settlement(amount);
    debug_assert!(settlement.balanced());

    let mut lines = Vec::new();
    if settlement.keluaran_debit > 0 {
        lines.push(LineSpec {
            account_id: keluaran.id,
            description: Some("Setor PPN".to_string()),
            debit: settlement.keluaran_debit,
            credit: 0,
        });
    }
    if settlement.masukan_credit > 0 {
        lines.push(LineSpec {
            account_id: masukan.id,
            description: Some("Setor PPN - kompensasi Masukan".to_string()),
            debit: 0,
            credit: settlement.masukan_credit,
        });
    }
    lines.push(LineSpec {
        account_id: cash.id,
        description: Some("Setor PPN - pembayaran neto".to_string()),
        debit: 0,
        credit: settlement.cash_credit,
    });

    let entry_id = db::post_entry(conn, date, "Setor PPN", &lines)?;

    conn.execute(
        "INSERT INTO tax_payments(date, amount, terutang, reference, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            date.to_string(),
            amount,
            pos.terutang(),
            sub.get_one::<String>("reference"),
            sub.get_one::<String>("notes"),
        ],
    )?;

    println!(
        "Remitted PPN {} from {} (entry #{}): Dr {} {} / Cr {} {} / Cr {} {}",
        format_currency(amount),
        cash.code,
        entry_id,
        keluaran.code,
        format_currency(settlement.keluaran_debit),
        masukan.code,
        format_currency(settlement.masukan_credit),
        cash.code,
        format_currency(settlement.cash_credit),
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount, terutang, reference, notes FROM tax_payments ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        let date: String = r.get(1)?;
        Ok((
            TaxPayment {
                id: r.get(0)?,
                date: chrono::NaiveDate::default(),
                amount: r.get(2)?,
                terutang: r.get(3)?,
                reference: r.get(4)?,
                notes: r.get(5)?,
            },
            date,
        ))
    })?;
    let mut payments: Vec<TaxPayment> = Vec::new();
    for row in rows {
        let (mut p, date) = row?;
        p.date = parse_date(&date)?;
        payments.push(p);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payments)? {
        return Ok(());
    }
    let data = payments
        .into_iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.date.to_string(),
                format_currency(p.amount),
                format_currency(p.terutang),
                p.reference.unwrap_or_default(),
                p.notes.unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["#", "Date", "Amount", "Terutang", "Reference", "Notes"],
            data
        )
    );
    Ok(())
}

fn set_accounts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(code) = sub.get_one::<String>("masukan") {
        db::require_account(conn, code.trim())?;
        db::set_setting(conn, "ppn_masukan_account", code.trim())?;
        println!("PPN Masukan account set to {}", code.trim());
    }
    if let Some(code) = sub.get_one::<String>("keluaran") {
        db::require_account(conn, code.trim())?;
        db::set_setting(conn, "ppn_keluaran_account", code.trim())?;
        println!("PPN Keluaran account set to {}", code.trim());
    }
    Ok(())
}

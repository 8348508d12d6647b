// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, LineSpec};
use crate::models::{JournalEntry, JournalLine};
use crate::rules::currency::format_currency;
use crate::rules::entry::EntryPreview;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("preview", sub)) => preview(conn, sub)?,
        Some(("post", sub)) => post(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn build_preview(conn: &Connection, sub: &clap::ArgMatches) -> Result<EntryPreview> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let debit = db::require_account(conn, sub.get_one::<String>("debit").unwrap().trim())?;
    let credit = db::require_account(conn, sub.get_one::<String>("credit").unwrap().trim())?;
    Ok(EntryPreview::build(amount, Some(&debit), Some(&credit))?)
}

fn preview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let p = build_preview(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        return Ok(());
    }
    let rows = vec![
        vec![
            p.debit_code.clone(),
            p.debit_name.clone(),
            format_currency(p.debit_amount()),
            String::new(),
        ],
        vec![
            p.credit_code.clone(),
            p.credit_name.clone(),
            String::new(),
            format_currency(p.credit_amount()),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["Code", "Account", "Debit", "Credit"], rows)
    );
    println!("Balanced: {}", p.balanced());
    if let Some(w) = &p.funding_warning {
        println!("Warning: {}", w);
    }
    Ok(())
}

fn post(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let memo = sub.get_one::<String>("memo").unwrap().clone();
    let p = build_preview(conn, sub)?;
    if let Some(w) = &p.funding_warning {
        println!("Warning: {}", w);
    }
    let debit = db::require_account(conn, &p.debit_code)?;
    let credit = db::require_account(conn, &p.credit_code)?;
    let entry_id = db::post_entry(
        conn,
        date,
        &memo,
        &[
            LineSpec {
                account_id: debit.id,
                description: None,
                debit: p.amount,
                credit: 0,
            },
            LineSpec {
                account_id: credit.id,
                description: None,
                debit: 0,
                credit: p.amount,
            },
        ],
    )?;
    println!(
        "Posted entry #{}: Dr {} / Cr {} {}",
        entry_id,
        p.debit_code,
        p.credit_code,
        format_currency(p.amount)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&20);
    let mut stmt = conn.prepare(
        "SELECT e.id, e.date, e.memo, l.account_id, a.code, l.description, l.debit, l.credit
         FROM journal_entries e
         JOIN journal_lines l ON l.entry_id = e.id
         JOIN accounts a ON a.id = l.account_id
         WHERE e.id IN (SELECT id FROM journal_entries ORDER BY id DESC LIMIT ?1)
         ORDER BY e.id DESC, l.id",
    )?;
    let rows = stmt.query_map(params![limit as i64], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            JournalLine {
                account_id: r.get(3)?,
                account_code: r.get(4)?,
                description: r.get(5)?,
                debit: r.get(6)?,
                credit: r.get(7)?,
            },
        ))
    })?;
    let mut entries: Vec<JournalEntry> = Vec::new();
    for row in rows {
        let (id, date, memo, line) = row?;
        match entries.last_mut() {
            Some(e) if e.id == id => e.lines.push(line),
            _ => entries.push(JournalEntry {
                id,
                date: parse_date(&date)?,
                memo,
                lines: vec![line],
            }),
        }
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        return Ok(());
    }
    let mut data = Vec::new();
    for e in &entries {
        for l in &e.lines {
            data.push(vec![
                e.id.to_string(),
                e.date.to_string(),
                e.memo.clone(),
                l.account_code.clone(),
                if l.debit > 0 {
                    format_currency(l.debit)
                } else {
                    String::new()
                },
                if l.credit > 0 {
                    format_currency(l.credit)
                } else {
                    String::new()
                },
            ]);
        }
    }
    println!(
        "{}",
        pretty_table(&["#", "Date", "Memo", "Account", "Debit", "Credit"], data)
    );
    Ok(())
}

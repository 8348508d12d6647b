// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("accounts", sub)) => accounts(conn, sub)?,
        Some(("journal", sub)) => journal(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn accounts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let mut w = csv::Writer::from_path(out).with_context(|| format!("Create '{}'", out))?;
    w.write_record(["code", "name", "type", "category", "is_header", "balance", "is_active"])?;
    for a in db::list_accounts(conn, true)? {
        w.write_record([
            a.code.clone(),
            a.name.clone(),
            a.r#type.to_string(),
            a.category.map_or_else(String::new, |c| c.to_string()),
            (a.is_header as u8).to_string(),
            a.balance.to_string(),
            (a.is_active as u8).to_string(),
        ])?;
    }
    w.flush()?;
    println!("Exported accounts to {}", out);
    Ok(())
}

fn journal(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let mut w = csv::Writer::from_path(out).with_context(|| format!("Create '{}'", out))?;
    w.write_record(["entry_id", "date", "memo", "account_code", "description", "debit", "credit"])?;
    let mut stmt = conn.prepare(
        "SELECT e.id, e.date, e.memo, a.code, IFNULL(l.description,''), l.debit, l.credit
         FROM journal_entries e
         JOIN journal_lines l ON l.entry_id = e.id
         JOIN accounts a ON a.id = l.account_id
         ORDER BY e.id, l.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, i64>(5)?,
            r.get::<_, i64>(6)?,
        ))
    })?;
    for row in rows {
        let (id, date, memo, code, desc, debit, credit) = row?;
        w.write_record([
            id.to_string(),
            date,
            memo,
            code,
            desc,
            debit.to_string(),
            credit.to_string(),
        ])?;
    }
    w.flush()?;
    println!("Exported journal to {}", out);
    Ok(())
}

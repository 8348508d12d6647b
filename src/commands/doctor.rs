// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::build_balance_sheet;
use crate::db;
use crate::rules::code::validate_code;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    let accounts = db::list_accounts(conn, true)?;

    // 1) Header accounts must not carry balances or journal lines
    for a in accounts.iter().filter(|a| a.is_header) {
        if a.balance != 0 {
            rows.push(vec![
                "header_with_balance".into(),
                format!("{} balance {}", a.code, a.balance),
            ]);
        }
        let lines: i64 = conn.query_row(
            "SELECT COUNT(*) FROM journal_lines WHERE account_id=?1",
            [a.id],
            |r| r.get(0),
        )?;
        if lines > 0 {
            rows.push(vec![
                "header_with_lines".into(),
                format!("{} has {} journal lines", a.code, lines),
            ]);
        }
    }

    // 2) Code shape and dashed parent prefixes
    for a in &accounts {
        let parent = a
            .parent_id
            .and_then(|pid| accounts.iter().find(|p| p.id == pid));
        if let Err(e) = validate_code(&a.code, parent) {
            rows.push(vec!["bad_code".into(), e.to_string()]);
        }
    }

    // 3) Ledger-wide debits must equal credits
    let (debits, credits): (i64, i64) = conn.query_row(
        "SELECT IFNULL(SUM(debit),0), IFNULL(SUM(credit),0) FROM journal_lines",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    if debits != credits {
        rows.push(vec![
            "unbalanced_ledger".into(),
            format!("debits {} != credits {}", debits, credits),
        ]);
    }

    // 4) Accounting equation
    let bs = build_balance_sheet(&accounts);
    if !bs.balanced {
        rows.push(vec![
            "accounting_equation".into(),
            format!(
                "assets {} != liabilities {} + equity {} + earnings {}",
                bs.total_assets, bs.total_liabilities, bs.equity, bs.current_earnings
            ),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

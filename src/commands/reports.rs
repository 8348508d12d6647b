// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Account, AccountCategory, AccountType};
use crate::rules::currency::format_currency;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance-sheet", sub)) => balance_sheet(conn, sub)?,
        Some(("trial-balance", sub)) => trial_balance(conn, sub)?,
        Some(("ratios", sub)) => ratios(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Default, Serialize)]
pub struct BalanceSheet {
    pub current_assets: i64,
    pub fixed_assets: i64,
    pub total_assets: i64,
    pub current_liabilities: i64,
    pub long_term_liabilities: i64,
    pub total_liabilities: i64,
    pub equity: i64,
    pub current_earnings: i64,
    pub balanced: bool,
}

/// Aggregate non-header balances by category. Revenue minus expense
/// flows in as current earnings so the accounting equation closes
/// without a period-end closing entry.
pub fn build_balance_sheet(accounts: &[Account]) -> BalanceSheet {
    let mut bs = BalanceSheet::default();
    let mut revenue = 0i64;
    let mut expense = 0i64;
    for a in accounts.iter().filter(|a| !a.is_header) {
        match a.r#type {
            AccountType::Revenue => revenue += a.balance,
            AccountType::Expense => expense += a.balance,
            _ => {}
        }
        match a.category {
            Some(AccountCategory::CurrentAsset) => bs.current_assets += a.balance,
            Some(AccountCategory::FixedAsset) => bs.fixed_assets += a.balance,
            Some(AccountCategory::CurrentLiability) => bs.current_liabilities += a.balance,
            Some(AccountCategory::LongTermLiability) => bs.long_term_liabilities += a.balance,
            Some(AccountCategory::Equity) => bs.equity += a.balance,
            _ => {
                // Unclassified assets/liabilities still count toward the
                // type totals below via the fallback.
                match a.r#type {
                    AccountType::Asset => bs.current_assets += a.balance,
                    AccountType::Liability => bs.current_liabilities += a.balance,
                    AccountType::Equity => bs.equity += a.balance,
                    _ => {}
                }
            }
        }
    }
    bs.total_assets = bs.current_assets + bs.fixed_assets;
    bs.total_liabilities = bs.current_liabilities + bs.long_term_liabilities;
    bs.current_earnings = revenue - expense;
    bs.balanced = bs.total_assets == bs.total_liabilities + bs.equity + bs.current_earnings;
    bs
}

fn balance_sheet(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = db::list_accounts(conn, true)?;
    let bs = build_balance_sheet(&accounts);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bs)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Current assets".to_string(), format_currency(bs.current_assets)],
        vec!["Fixed assets".to_string(), format_currency(bs.fixed_assets)],
        vec!["Total assets".to_string(), format_currency(bs.total_assets)],
        vec![
            "Current liabilities".to_string(),
            format_currency(bs.current_liabilities),
        ],
        vec![
            "Long-term liabilities".to_string(),
            format_currency(bs.long_term_liabilities),
        ],
        vec![
            "Total liabilities".to_string(),
            format_currency(bs.total_liabilities),
        ],
        vec!["Equity".to_string(), format_currency(bs.equity)],
        vec![
            "Current earnings".to_string(),
            format_currency(bs.current_earnings),
        ],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    println!(
        "Accounting equation {}",
        if bs.balanced { "holds" } else { "DOES NOT HOLD" }
    );
    Ok(())
}

fn trial_balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT a.code, a.name, IFNULL(SUM(l.debit),0), IFNULL(SUM(l.credit),0)
         FROM accounts a
         JOIN journal_lines l ON l.account_id = a.id
         GROUP BY a.id ORDER BY a.code",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, i64>(2)?,
            r.get::<_, i64>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    let (mut td, mut tc) = (0i64, 0i64);
    for row in rows {
        let (code, name, debit, credit) = row?;
        td += debit;
        tc += credit;
        data.push(vec![
            code,
            name,
            format_currency(debit),
            format_currency(credit),
        ]);
    }
    data.push(vec![
        String::new(),
        "TOTAL".to_string(),
        format_currency(td),
        format_currency(tc),
    ]);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Code", "Account", "Debit", "Credit"], data)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Ratios {
    pub current_ratio: Option<Decimal>,
    pub net_margin: Option<Decimal>,
    pub debt_to_equity: Option<Decimal>,
    pub opex_ratio: Option<Decimal>,
}

fn div(num: i64, den: i64) -> Option<Decimal> {
    if den == 0 {
        None
    } else {
        Some((Decimal::from(num) / Decimal::from(den)).round_dp(4))
    }
}

pub fn build_ratios(conn: &Connection) -> Result<Ratios> {
    let accounts = db::list_accounts(conn, true)?;
    let bs = build_balance_sheet(&accounts);
    let revenue: i64 = accounts
        .iter()
        .filter(|a| !a.is_header && a.r#type == AccountType::Revenue)
        .map(|a| a.balance)
        .sum();
    let expense: i64 = accounts
        .iter()
        .filter(|a| !a.is_header && a.r#type == AccountType::Expense)
        .map(|a| a.balance)
        .sum();
    Ok(Ratios {
        current_ratio: div(bs.current_assets, bs.current_liabilities),
        net_margin: div(revenue - expense, revenue),
        debt_to_equity: div(bs.total_liabilities, bs.equity + bs.current_earnings),
        opex_ratio: div(expense, revenue),
    })
}

fn ratios(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let r = build_ratios(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    let show = |v: Option<Decimal>| v.map_or_else(|| "n/a".to_string(), |d| d.to_string());
    let rows = vec![
        vec!["Current ratio".to_string(), show(r.current_ratio)],
        vec!["Net margin".to_string(), show(r.net_margin)],
        vec!["Debt to equity".to_string(), show(r.debt_to_equity)],
        vec!["Opex ratio".to_string(), show(r.opex_ratio)],
    ];
    println!("{}", pretty_table(&["Ratio", "Value"], rows));
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Account, AccountCategory, AccountType};
use crate::rules::classify::{DEFAULT_KEYWORDS, classify};
use crate::rules::code::{suggest_next_code, validate_code, validate_code_range};
use crate::rules::currency::format_currency;
use crate::utils::pretty_table;
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("classify", sub)) => classify_preview(conn, sub)?,
        Some(("next-code", sub)) => next_code(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<AccountType> {
    AccountType::from_str(s).map_err(|e| anyhow::anyhow!(e))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_uppercase();
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let is_header = sub.get_flag("header");

    let parent = match sub.get_one::<String>("parent") {
        Some(pc) => Some(db::require_account(conn, pc.trim())?),
        None => None,
    };

    validate_code(&code, parent.as_ref())?;
    validate_code_range(&code, r#type)?;
    if db::account_by_code(conn, &code)?.is_some() {
        bail!("Account code '{}' already exists", code);
    }

    let category = match sub.get_one::<String>("category") {
        Some(c) => Some(AccountCategory::from_str(c).map_err(|e| anyhow::anyhow!(e))?),
        None => {
            let parents = db::list_accounts(conn, true)?;
            classify(
                r#type,
                &parents,
                parent.as_ref().map(|p| p.id),
                Some(&code),
                Some(&name),
                &DEFAULT_KEYWORDS,
            )
        }
    };

    db::insert_account(
        conn,
        &Account {
            id: 0,
            code: code.clone(),
            name: name.clone(),
            r#type,
            category,
            parent_id: parent.as_ref().map(|p| p.id),
            is_header,
            balance: 0,
            is_active: true,
        },
    )?;
    let cat_s = category.map_or_else(|| "UNCLASSIFIED".to_string(), |c| c.to_string());
    println!("Added account {} '{}' ({}, {})", code, name, r#type, cat_s);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = db::list_accounts(conn, sub.get_flag("all"))?;
    if crate::utils::maybe_print_json(json_flag, jsonl_flag, &accounts)? {
        return Ok(());
    }
    let rows = accounts
        .into_iter()
        .map(|a| {
            vec![
                a.code,
                a.name,
                a.r#type.to_string(),
                a.category
                    .map_or_else(|| "UNCLASSIFIED".to_string(), |c| c.to_string()),
                if a.is_header {
                    "-".to_string()
                } else {
                    format_currency(a.balance)
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Code", "Name", "Type", "Category", "Balance"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().trim();
    let account = db::require_account(conn, code)?;
    if account.balance != 0 {
        bail!(
            "Account {} still carries balance {}; post a clearing entry first",
            code,
            format_currency(account.balance)
        );
    }
    conn.execute(
        "UPDATE accounts SET is_active=0 WHERE code=?1",
        params![code],
    )?;
    println!("Deactivated account {}", code);
    Ok(())
}

fn classify_preview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let parent_id = match sub.get_one::<String>("parent") {
        Some(pc) => Some(
            db::account_by_code(conn, pc.trim())?
                .with_context(|| format!("Parent account '{}' not found", pc))?
                .id,
        ),
        None => None,
    };
    let parents = db::list_accounts(conn, true)?;
    let cat = classify(
        r#type,
        &parents,
        parent_id,
        sub.get_one::<String>("code").map(|s| s.as_str()),
        sub.get_one::<String>("name").map(|s| s.as_str()),
        &DEFAULT_KEYWORDS,
    );
    match cat {
        Some(c) => println!("{}", c),
        None => println!("UNCLASSIFIED (parent not resolvable)"),
    }
    Ok(())
}

fn next_code(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let parent = match sub.get_one::<String>("parent") {
        Some(pc) => Some(db::require_account(conn, pc.trim())?),
        None => None,
    };
    let existing: Vec<String> = db::list_accounts(conn, true)?
        .into_iter()
        .map(|a| a.code)
        .collect();
    match suggest_next_code(r#type, parent.as_ref(), &existing) {
        Some(code) => println!("{}", code),
        None => bail!("No free code available in that block"),
    }
    Ok(())
}

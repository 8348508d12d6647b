// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::{Account, AccountCategory, AccountType};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Bukubesar", "bukubesar"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bukubesar.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('ASSET','LIABILITY','EQUITY','REVENUE','EXPENSE')),
        category TEXT,
        parent_id INTEGER,
        is_header INTEGER NOT NULL DEFAULT 0,
        balance INTEGER NOT NULL DEFAULT 0, -- whole Rupiah, normal-balance sign
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(parent_id) REFERENCES accounts(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_code ON accounts(code);

    CREATE TABLE IF NOT EXISTS journal_entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        memo TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_journal_entries_date ON journal_entries(date);

    CREATE TABLE IF NOT EXISTS journal_lines(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        entry_id INTEGER NOT NULL,
        account_id INTEGER NOT NULL,
        description TEXT,
        debit INTEGER NOT NULL DEFAULT 0,
        credit INTEGER NOT NULL DEFAULT 0,
        CHECK(debit >= 0 AND credit >= 0),
        FOREIGN KEY(entry_id) REFERENCES journal_entries(id) ON DELETE CASCADE,
        FOREIGN KEY(account_id) REFERENCES accounts(id)
    );

    CREATE TABLE IF NOT EXISTS tax_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount INTEGER NOT NULL,
        terutang INTEGER NOT NULL,
        reference TEXT,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

// Well-known codes from the seeded chart; configurable via settings.
pub const DEFAULT_PPN_MASUKAN: &str = "1240";
pub const DEFAULT_PPN_KELUARAN: &str = "2103";

pub fn setting(conn: &Connection, key: &str, default: &str) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| default.to_string()))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn row_to_account(r: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let type_s: String = r.get(3)?;
    let cat_s: Option<String> = r.get(4)?;
    Ok(Account {
        id: r.get(0)?,
        code: r.get(1)?,
        name: r.get(2)?,
        r#type: AccountType::from_str(&type_s).unwrap_or(AccountType::Asset),
        category: cat_s.and_then(|s| AccountCategory::from_str(&s).ok()),
        parent_id: r.get(5)?,
        is_header: r.get::<_, i64>(6)? != 0,
        balance: r.get(7)?,
        is_active: r.get::<_, i64>(8)? != 0,
    })
}

const ACCOUNT_COLS: &str =
    "id, code, name, type, category, parent_id, is_header, balance, is_active";

pub fn account_by_code(conn: &Connection, code: &str) -> Result<Option<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM accounts WHERE code=?1",
        ACCOUNT_COLS
    ))?;
    Ok(stmt
        .query_row(params![code], row_to_account)
        .optional()?)
}

pub fn require_account(conn: &Connection, code: &str) -> Result<Account> {
    account_by_code(conn, code)?
        .with_context(|| format!("Account '{}' not found", code))
}

pub fn list_accounts(conn: &Connection, include_inactive: bool) -> Result<Vec<Account>> {
    let sql = if include_inactive {
        format!("SELECT {} FROM accounts ORDER BY code", ACCOUNT_COLS)
    } else {
        format!(
            "SELECT {} FROM accounts WHERE is_active=1 ORDER BY code",
            ACCOUNT_COLS
        )
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_account)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_account(conn: &Connection, a: &Account) -> Result<i64> {
    conn.execute(
        "INSERT INTO accounts(code, name, type, category, parent_id, is_header, balance, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            a.code,
            a.name,
            a.r#type.to_string(),
            a.category.map(|c| c.to_string()),
            a.parent_id,
            a.is_header as i64,
            a.balance,
            a.is_active as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub struct LineSpec {
    pub account_id: i64,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
}

/// Post a journal entry atomically: insert the entry and its lines and
/// apply each leg to the account balances in one sqlite transaction.
/// Rejects unbalanced line sets, header accounts, and inactive accounts.
pub fn post_entry(
    conn: &mut Connection,
    date: NaiveDate,
    memo: &str,
    lines: &[LineSpec],
) -> Result<i64> {
    if lines.is_empty() {
        bail!("Journal entry needs at least one line");
    }
    let debits: i64 = lines.iter().map(|l| l.debit).sum();
    let credits: i64 = lines.iter().map(|l| l.credit).sum();
    if debits != credits {
        bail!(
            "Journal entry is unbalanced: debits {} != credits {}",
            debits,
            credits
        );
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO journal_entries(date, memo) VALUES (?1, ?2)",
        params![date.to_string(), memo],
    )?;
    let entry_id = tx.last_insert_rowid();

    for line in lines {
        let (code, type_s, is_header, is_active): (String, String, i64, i64) = tx.query_row(
            "SELECT code, type, is_header, is_active FROM accounts WHERE id=?1",
            params![line.account_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )?;
        if is_header != 0 {
            bail!("Account {} is a header account and cannot receive transactions", code);
        }
        if is_active == 0 {
            bail!("Account {} is inactive", code);
        }
        tx.execute(
            "INSERT INTO journal_lines(entry_id, account_id, description, debit, credit)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entry_id, line.account_id, line.description, line.debit, line.credit],
        )?;
        let r#type = AccountType::from_str(&type_s)
            .map_err(|e| anyhow::anyhow!("Corrupt account type: {}", e))?;
        // Normal-balance convention: debit grows assets/expenses, credit
        // grows liabilities/equity/revenue.
        let delta = if r#type.debit_positive() {
            line.debit - line.credit
        } else {
            line.credit - line.debit
        };
        tx.execute(
            "UPDATE accounts SET balance = balance + ?1 WHERE id=?2",
            params![delta, line.account_id],
        )?;
    }
    tx.commit()?;
    Ok(entry_id)
}

/// Trimmed standard chart for Indonesian project cost control. Existing
/// codes are left untouched so re-seeding never resets balances.
pub fn seed_chart(conn: &Connection) -> Result<usize> {
    // (code, name, type, category, parent_code, is_header)
    let rows: &[(&str, &str, AccountType, AccountCategory, Option<&str>, bool)] = &[
        ("1000", "ASET LANCAR", AccountType::Asset, AccountCategory::CurrentAsset, None, true),
        ("1101", "KAS PROYEK", AccountType::Asset, AccountCategory::CurrentAsset, Some("1000"), false),
        ("1102", "BANK", AccountType::Asset, AccountCategory::CurrentAsset, Some("1000"), false),
        ("1201", "DEPOSIT", AccountType::Asset, AccountCategory::CurrentAsset, Some("1000"), false),
        ("1240", "PPN MASUKAN", AccountType::Asset, AccountCategory::CurrentAsset, Some("1000"), false),
        ("1500", "ASET TETAP", AccountType::Asset, AccountCategory::FixedAsset, None, true),
        ("1510", "PERALATAN PROYEK", AccountType::Asset, AccountCategory::FixedAsset, Some("1500"), false),
        ("2000", "KEWAJIBAN", AccountType::Liability, AccountCategory::CurrentLiability, None, true),
        ("2101", "UTANG USAHA", AccountType::Liability, AccountCategory::CurrentLiability, Some("2000"), false),
        ("2103", "PPN KELUARAN", AccountType::Liability, AccountCategory::CurrentLiability, Some("2000"), false),
        ("3000", "EKUITAS", AccountType::Equity, AccountCategory::Equity, None, true),
        ("3101", "MODAL PEMILIK", AccountType::Equity, AccountCategory::Equity, Some("3000"), false),
        ("4000", "PENDAPATAN PROYEK", AccountType::Revenue, AccountCategory::OperatingRevenue, None, true),
        ("4101", "PENDAPATAN TERMIN 1", AccountType::Revenue, AccountCategory::OperatingRevenue, Some("4000"), false),
        ("4201", "RETENSI", AccountType::Revenue, AccountCategory::OperatingRevenue, Some("4000"), false),
        ("5000", "BEBAN LANGSUNG PROYEK", AccountType::Expense, AccountCategory::OperatingExpense, None, true),
        ("5101", "MATERIAL BANGUNAN", AccountType::Expense, AccountCategory::OperatingExpense, Some("5000"), false),
        ("5301", "TENAGA KERJA", AccountType::Expense, AccountCategory::OperatingExpense, Some("5000"), false),
        ("6000", "OVERHEAD KANTOR", AccountType::Expense, AccountCategory::OperatingExpense, None, true),
        ("6101", "ADMIN FEE", AccountType::Expense, AccountCategory::OperatingExpense, Some("6000"), false),
    ];

    let mut created = 0;
    for (code, name, r#type, category, parent_code, is_header) in rows {
        if account_by_code(conn, code)?.is_some() {
            continue;
        }
        let parent_id = match parent_code {
            Some(pc) => account_by_code(conn, pc)?.map(|p| p.id),
            None => None,
        };
        insert_account(
            conn,
            &Account {
                id: 0,
                code: code.to_string(),
                name: name.to_string(),
                r#type: *r#type,
                category: Some(*category),
                parent_id,
                is_header: *is_header,
                balance: 0,
                is_active: true,
            },
        )?;
        created += 1;
    }
    Ok(created)
}

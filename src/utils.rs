// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};

use crate::rules::currency::parse_currency;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse a Rupiah amount as typed by the user: `1500000`, `1.500.000`,
/// and `Rp 1.500.000` all read the same. Rejects input with no digits.
pub fn parse_amount(s: &str) -> Result<i64> {
    if !s.chars().any(|c| c.is_ascii_digit()) {
        anyhow::bail!("Invalid amount '{}', expected digits", s);
    }
    Ok(parse_currency(s))
}

fn numeric_header(h: &str) -> bool {
    matches!(
        h,
        "Amount" | "Balance" | "Debit" | "Credit" | "Terutang" | "Score" | "Value"
    )
}

/// Ledger tables right-align amount columns, keyed off the header name.
pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    let align_right: Vec<bool> = headers.iter().map(|h| numeric_header(h)).collect();
    for r in rows {
        t.add_row(r.into_iter().zip(&align_right).map(|(v, right)| {
            let cell = Cell::new(v);
            if *right {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

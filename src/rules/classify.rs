// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, AccountCategory, AccountType};
use once_cell::sync::Lazy;

/// Keyword heuristics for step 5 of the asset chain. Kept out of the
/// decision-order algorithm so a different locale can swap the table
/// without touching `classify`.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    pub current_asset: Vec<String>,
    pub fixed_asset: Vec<String>,
}

impl KeywordTable {
    pub fn new<S: Into<String>>(
        current: impl IntoIterator<Item = S>,
        fixed: impl IntoIterator<Item = S>,
    ) -> Self {
        let up = |it: Vec<String>| it.into_iter().map(|s| s.to_uppercase()).collect();
        KeywordTable {
            current_asset: up(current.into_iter().map(Into::into).collect()),
            fixed_asset: up(fixed.into_iter().map(Into::into).collect()),
        }
    }

    fn matches_current(&self, name: &str) -> bool {
        self.current_asset.iter().any(|k| name.contains(k.as_str()))
    }

    fn matches_fixed(&self, name: &str) -> bool {
        self.fixed_asset.iter().any(|k| name.contains(k.as_str()))
    }
}

/// Indonesian chart-of-accounts terms plus their English counterparts.
pub static DEFAULT_KEYWORDS: Lazy<KeywordTable> = Lazy::new(|| {
    KeywordTable::new(
        [
            "KAS", "BANK", "PIUTANG", "PERSEDIAAN", "DEPOSIT", "CASH", "RECEIVABLE", "INVENTORY",
        ],
        [
            "TANAH",
            "GEDUNG",
            "BANGUNAN",
            "KENDARAAN",
            "MESIN",
            "PERALATAN",
            "LAND",
            "BUILDING",
            "EQUIPMENT",
            "VEHICLE",
            "MACHINE",
        ],
    )
});

/// Derive the sub-category for an account. First matching rule wins; a
/// selected parent that cannot be resolved yields `None` (unclassified,
/// caller decides the fallback).
pub fn classify(
    r#type: AccountType,
    parents: &[Account],
    parent_id: Option<i64>,
    code: Option<&str>,
    name: Option<&str>,
    keywords: &KeywordTable,
) -> Option<AccountCategory> {
    match r#type {
        AccountType::Equity => Some(AccountCategory::Equity),
        AccountType::Asset => classify_asset(parents, parent_id, code, name, keywords),
        AccountType::Liability => Some(two_branch(
            parents,
            parent_id,
            &["CURRENT"],
            &["LONG", "TERM"],
            AccountCategory::CurrentLiability,
            AccountCategory::LongTermLiability,
        )),
        AccountType::Revenue => Some(two_branch(
            parents,
            parent_id,
            &[],
            &["OTHER", "NON"],
            AccountCategory::OperatingRevenue,
            AccountCategory::OtherRevenue,
        )),
        AccountType::Expense => Some(two_branch(
            parents,
            parent_id,
            &[],
            &["OTHER", "NON"],
            AccountCategory::OperatingExpense,
            AccountCategory::OtherExpense,
        )),
    }
}

fn classify_asset(
    parents: &[Account],
    parent_id: Option<i64>,
    code: Option<&str>,
    name: Option<&str>,
    keywords: &KeywordTable,
) -> Option<AccountCategory> {
    // 1. Top-level asset accounts default to fixed.
    let Some(pid) = parent_id else {
        return Some(AccountCategory::FixedAsset);
    };
    // 2. Unknown parent: unclassified, caller must handle.
    let parent = parents.iter().find(|p| p.id == pid)?;

    // 3. Numeric code ranges trump everything below.
    if let Some(v) = code.and_then(numeric_code) {
        if (1100..1500).contains(&v) {
            return Some(AccountCategory::CurrentAsset);
        }
        if v >= 1500 {
            return Some(AccountCategory::FixedAsset);
        }
    }

    // 4. Parent code/name hints.
    let parent_name = parent.name.to_uppercase();
    if parent.code == "1100" || parent_name.contains("CURRENT") {
        return Some(AccountCategory::CurrentAsset);
    }
    if parent.code == "1500" || parent_name.contains("FIXED") {
        return Some(AccountCategory::FixedAsset);
    }

    // 5. Domain keywords in the account name.
    if let Some(n) = name {
        let n = n.to_uppercase();
        if keywords.matches_current(&n) {
            return Some(AccountCategory::CurrentAsset);
        }
        if keywords.matches_fixed(&n) {
            return Some(AccountCategory::FixedAsset);
        }
    }

    // 6. Directly under the asset root, split on the fixed-asset block.
    if parent.code == "1000" {
        if code.and_then(numeric_code).is_some_and(|v| v >= 1500) {
            return Some(AccountCategory::FixedAsset);
        }
        return Some(AccountCategory::CurrentAsset);
    }

    // 7.
    Some(AccountCategory::CurrentAsset)
}

/// Simpler chains for liability/revenue/expense: inspect the parent name
/// for marker substrings, default to the operating/current variant. The
/// substring match is against the stored (upper-case) parent name.
fn two_branch(
    parents: &[Account],
    parent_id: Option<i64>,
    first_markers: &[&str],
    second_markers: &[&str],
    first: AccountCategory,
    second: AccountCategory,
) -> AccountCategory {
    if let Some(parent) = parent_id.and_then(|pid| parents.iter().find(|p| p.id == pid)) {
        if first_markers.iter().any(|m| parent.name.contains(m)) {
            return first;
        }
        if second_markers.iter().any(|m| parent.name.contains(m)) {
            return second;
        }
    }
    first
}

fn numeric_code(code: &str) -> Option<u32> {
    // Dashed child codes classify on their 4-digit stem.
    let stem = code.split('-').next().unwrap_or(code);
    if stem.len() == 4 {
        stem.parse().ok()
    } else {
        None
    }
}

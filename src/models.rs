// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountType::Asset => "ASSET",
            AccountType::Liability => "LIABILITY",
            AccountType::Equity => "EQUITY",
            AccountType::Revenue => "REVENUE",
            AccountType::Expense => "EXPENSE",
        };
        f.write_str(s)
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASSET" => Ok(AccountType::Asset),
            "LIABILITY" => Ok(AccountType::Liability),
            "EQUITY" => Ok(AccountType::Equity),
            "REVENUE" => Ok(AccountType::Revenue),
            "EXPENSE" => Ok(AccountType::Expense),
            other => Err(format!("Unknown account type '{}'", other)),
        }
    }
}

impl AccountType {
    /// Code block conventionally reserved for this type: 1xxx assets,
    /// 2xxx liabilities, 3xxx equity, 4xxx revenue, 5xxx-6xxx expenses,
    /// 7xxx project profit/loss carried under equity.
    pub fn code_range_ok(&self, code_value: u32) -> bool {
        match self {
            AccountType::Asset => (1000..2000).contains(&code_value),
            AccountType::Liability => (2000..3000).contains(&code_value),
            AccountType::Equity => {
                (3000..4000).contains(&code_value) || (7000..8000).contains(&code_value)
            }
            AccountType::Revenue => (4000..5000).contains(&code_value),
            AccountType::Expense => (5000..7000).contains(&code_value),
        }
    }

    /// Debit increases the balance of asset and expense accounts; credit
    /// increases the rest.
    pub fn debit_positive(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountCategory {
    CurrentAsset,
    FixedAsset,
    CurrentLiability,
    LongTermLiability,
    Equity,
    OperatingRevenue,
    OtherRevenue,
    OperatingExpense,
    OtherExpense,
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountCategory::CurrentAsset => "CURRENT_ASSET",
            AccountCategory::FixedAsset => "FIXED_ASSET",
            AccountCategory::CurrentLiability => "CURRENT_LIABILITY",
            AccountCategory::LongTermLiability => "LONG_TERM_LIABILITY",
            AccountCategory::Equity => "EQUITY",
            AccountCategory::OperatingRevenue => "OPERATING_REVENUE",
            AccountCategory::OtherRevenue => "OTHER_REVENUE",
            AccountCategory::OperatingExpense => "OPERATING_EXPENSE",
            AccountCategory::OtherExpense => "OTHER_EXPENSE",
        };
        f.write_str(s)
    }
}

impl FromStr for AccountCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CURRENT_ASSET" => Ok(AccountCategory::CurrentAsset),
            "FIXED_ASSET" => Ok(AccountCategory::FixedAsset),
            "CURRENT_LIABILITY" => Ok(AccountCategory::CurrentLiability),
            "LONG_TERM_LIABILITY" => Ok(AccountCategory::LongTermLiability),
            "EQUITY" => Ok(AccountCategory::Equity),
            "OPERATING_REVENUE" => Ok(AccountCategory::OperatingRevenue),
            "OTHER_REVENUE" => Ok(AccountCategory::OtherRevenue),
            "OPERATING_EXPENSE" => Ok(AccountCategory::OperatingExpense),
            "OTHER_EXPENSE" => Ok(AccountCategory::OtherExpense),
            other => Err(format!("Unknown account category '{}'", other)),
        }
    }
}

/// One row of the chart of accounts. Balances are whole Rupiah (IDR has
/// no minor unit in practice) stored as signed integers under the
/// normal-balance convention for the account type. Header accounts group
/// children and never carry transactions or balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub r#type: AccountType,
    pub category: Option<AccountCategory>,
    pub parent_id: Option<i64>,
    pub is_header: bool,
    pub balance: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: i64,
    pub account_code: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub memo: String,
    pub lines: Vec<JournalLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxPayment {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: i64,
    pub terutang: i64,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

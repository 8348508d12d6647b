// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Format a whole-Rupiah amount with Indonesian digit grouping: groups of
/// three separated by `.`, no decimals. Negative amounts keep a leading
/// minus sign.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format with the `Rp` marker used in table output.
pub fn format_rupiah(amount: i64) -> String {
    format!("Rp {}", format_currency(amount))
}

/// Strip every non-digit character and parse the remainder as a
/// non-negative amount. An empty remainder parses to 0; overflow
/// saturates at i64::MAX.
pub fn parse_currency(display: &str) -> i64 {
    let mut value: i64 = 0;
    for ch in display.chars().filter(|c| c.is_ascii_digit()) {
        value = value
            .saturating_mul(10)
            .saturating_add((ch as u8 - b'0') as i64);
    }
    value
}

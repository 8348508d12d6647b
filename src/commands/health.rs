// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::build_ratios;
use crate::db;
use crate::models::AccountType;
use crate::rules::health::{HealthComponents, HealthWeights, score};
use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let low_threshold = *sub.get_one::<f64>("threshold").unwrap_or(&40.0);
    let prior_revenue = sub
        .get_one::<String>("prior-revenue")
        .map(|s| parse_amount(s))
        .transpose()?;

    let components = derive_components(conn, prior_revenue)?;
    let hs = score(components, &HealthWeights::default(), low_threshold)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &hs)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Liquidity".to_string(), format!("{:.1}", hs.components.liquidity)],
        vec![
            "Profitability".to_string(),
            format!("{:.1}", hs.components.profitability),
        ],
        vec!["Leverage".to_string(), format!("{:.1}", hs.components.leverage)],
        vec![
            "Efficiency".to_string(),
            format!("{:.1}", hs.components.efficiency),
        ],
        vec!["Growth".to_string(), format!("{:.1}", hs.components.growth)],
    ];
    println!("{}", pretty_table(&["Component", "Score"], rows));
    println!("Overall: {:.1} (grade {})", hs.overall_score, hs.grade);
    for rec in &hs.recommendations {
        println!(
            "[{:?}] {}: {} -> {}",
            rec.priority, rec.title, rec.description, rec.action
        );
    }
    Ok(())
}

/// Map ledger ratios onto 0-100 component scores with capped linear
/// scales. A ratio that cannot be computed (zero denominator) scores a
/// neutral 50, as does growth when no prior-period revenue is supplied.
fn derive_components(conn: &Connection, prior_revenue: Option<i64>) -> Result<HealthComponents> {
    let r = build_ratios(conn)?;
    let f = |d: Option<rust_decimal::Decimal>| d.and_then(|v| v.to_f64());

    // Current ratio of 2.0 or better scores full marks.
    let liquidity = f(r.current_ratio).map_or(50.0, |cr| (cr / 2.0 * 100.0).clamp(0.0, 100.0));
    // 20% net margin scores full marks.
    let profitability =
        f(r.net_margin).map_or(50.0, |m| (m / 0.2 * 100.0).clamp(0.0, 100.0));
    // Debt-to-equity of 0 is best; 2.0 or worse bottoms out.
    let leverage =
        f(r.debt_to_equity).map_or(50.0, |d| ((1.0 - d / 2.0) * 100.0).clamp(0.0, 100.0));
    // Spending 60% of revenue or less on expenses is full marks; parity
    // or worse bottoms out.
    let efficiency = f(r.opex_ratio)
        .map_or(50.0, |o| ((1.0 - (o - 0.6) / 0.4) * 100.0).clamp(0.0, 100.0));

    let growth = match prior_revenue {
        Some(prior) if prior > 0 => {
            let revenue: i64 = db::list_accounts(conn, true)?
                .iter()
                .filter(|a| !a.is_header && a.r#type == AccountType::Revenue)
                .map(|a| a.balance)
                .sum();
            let g = (revenue - prior) as f64 / prior as f64;
            // +-20% growth spans the scale around a flat 50.
            ((g / 0.2 + 1.0) * 50.0).clamp(0.0, 100.0)
        }
        _ => 50.0,
    };

    Ok(HealthComponents::new(
        liquidity,
        profitability,
        leverage,
        efficiency,
        growth,
    ))
}

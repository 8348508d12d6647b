// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rules::ValidationError;
use serde::Serialize;

/// Component scores, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthComponents {
    pub liquidity: f64,
    pub profitability: f64,
    pub leverage: f64,
    pub efficiency: f64,
    pub growth: f64,
}

impl HealthComponents {
    pub fn new(liquidity: f64, profitability: f64, leverage: f64, efficiency: f64, growth: f64) -> Self {
        let c = |v: f64| v.clamp(0.0, 100.0);
        HealthComponents {
            liquidity: c(liquidity),
            profitability: c(profitability),
            leverage: c(leverage),
            efficiency: c(efficiency),
            growth: c(growth),
        }
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("liquidity", self.liquidity),
            ("profitability", self.profitability),
            ("leverage", self.leverage),
            ("efficiency", self.efficiency),
            ("growth", self.growth),
        ]
    }
}

/// Weight vector for the overall score. Must be non-negative and sum to
/// 1.0 (within a small tolerance).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthWeights {
    pub liquidity: f64,
    pub profitability: f64,
    pub leverage: f64,
    pub efficiency: f64,
    pub growth: f64,
}

impl Default for HealthWeights {
    /// Liquidity and profitability carry the most signal for a
    /// cost-control ledger; growth the least.
    fn default() -> Self {
        HealthWeights {
            liquidity: 0.25,
            profitability: 0.25,
            leverage: 0.2,
            efficiency: 0.2,
            growth: 0.1,
        }
    }
}

impl HealthWeights {
    fn as_array(&self) -> [f64; 5] {
        [
            self.liquidity,
            self.profitability,
            self.leverage,
            self.efficiency,
            self.growth,
        ]
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let w = self.as_array();
        if w.iter().any(|v| *v < 0.0) {
            return Err(ValidationError::BadWeights);
        }
        let sum: f64 = w.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ValidationError::BadWeights);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthScore {
    pub overall_score: f64,
    pub grade: &'static str,
    pub components: HealthComponents,
    pub recommendations: Vec<Recommendation>,
}

/// Grade buckets: >= 80 A, >= 60 B, >= 40 C, below D. The boundaries are
/// the contract; 79.9 grades B, 80.0 grades A.
pub fn grade(score: f64) -> &'static str {
    if score >= 80.0 {
        "A"
    } else if score >= 60.0 {
        "B"
    } else if score >= 40.0 {
        "C"
    } else {
        "D"
    }
}

pub fn overall_score(
    components: &HealthComponents,
    weights: &HealthWeights,
) -> Result<f64, ValidationError> {
    weights.validate()?;
    let c = components.named();
    let w = weights.as_array();
    Ok(c.iter().zip(w).map(|((_, v), wt)| v * wt).sum())
}

/// A component below `low_threshold` yields one recommendation; priority
/// is High when the shortfall is 20 points or more.
pub fn recommendations(components: &HealthComponents, low_threshold: f64) -> Vec<Recommendation> {
    let mut out = Vec::new();
    for (name, value) in components.named() {
        if value >= low_threshold {
            continue;
        }
        let gap = low_threshold - value;
        let priority = if gap >= 20.0 {
            Priority::High
        } else {
            Priority::Medium
        };
        out.push(Recommendation {
            category: name.to_string(),
            priority,
            title: format!("Low {} score", name),
            description: format!(
                "{} score {:.1} is below the {:.0} threshold",
                name, value, low_threshold
            ),
            action: action_for(name).to_string(),
        });
    }
    out
}

fn action_for(component: &str) -> &'static str {
    match component {
        "liquidity" => "Free up working capital: collect receivables, delay non-critical purchases",
        "profitability" => "Review project pricing and direct cost overruns",
        "leverage" => "Reduce short-term debt or convert it to longer maturities",
        "efficiency" => "Cut overhead and site operational spend against revenue",
        "growth" => "Revenue is flat or shrinking; review the project pipeline",
        _ => "Review this component with your accountant",
    }
}

pub fn score(
    components: HealthComponents,
    weights: &HealthWeights,
    low_threshold: f64,
) -> Result<HealthScore, ValidationError> {
    let overall = overall_score(&components, weights)?;
    Ok(HealthScore {
        overall_score: overall,
        grade: grade(overall),
        recommendations: recommendations(&components, low_threshold),
        components,
    })
}

//! Housing budget affordability.
//!
//! The recommended housing budget is 30% of gross monthly income, the
//! ceiling is 40%, and the savings reserve covers six months of the
//! recommended budget. The recommended budget splits 70/15/15 into base
//! rent, utilities and meals.

use serde::Serialize;

use crate::preferences::BudgetAnalysisPreferences;

const RECOMMENDED_SHARE: f64 = 0.30;
const MAXIMUM_SHARE: f64 = 0.40;
const RESERVE_MONTHS: f64 = 6.0;
const BASE_RENT_SHARE: f64 = 0.70;
const UTILITIES_SHARE: f64 = 0.15;
const MEALS_SHARE: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityStatus {
    Comfortable,
    Tight,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetBreakdown {
    pub base_rent: f64,
    pub utilities: f64,
    pub meals: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub monthly_income: f64,
    pub available_after_expenses: f64,
    pub recommended_housing_budget: f64,
    pub maximum_housing_budget: f64,
    pub recommended_savings_reserve: f64,
    pub current_savings: f64,
    pub budget_breakdown: BudgetBreakdown,
    pub affordability_status: AffordabilityStatus,
    pub recommendations: Vec<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the affordability analysis for validated budget preferences.
pub fn analyze_budget(prefs: &BudgetAnalysisPreferences) -> BudgetAnalysis {
    let available = prefs.monthly_income - prefs.current_expenses - prefs.healthcare_costs;
    let recommended = prefs.monthly_income * RECOMMENDED_SHARE;
    let maximum = prefs.monthly_income * MAXIMUM_SHARE;
    let reserve = recommended * RESERVE_MONTHS;

    let budget_breakdown = BudgetBreakdown {
        base_rent: round2(recommended * BASE_RENT_SHARE),
        utilities: if prefs.include_utilities {
            round2(recommended * UTILITIES_SHARE)
        } else {
            0.0
        },
        meals: if prefs.include_meals {
            round2(recommended * MEALS_SHARE)
        } else {
            0.0
        },
    };

    let affordability_status = if available > recommended {
        AffordabilityStatus::Comfortable
    } else {
        AffordabilityStatus::Tight
    };

    let mut recommendations = Vec::new();
    if available < recommended {
        recommendations.push("Consider shared housing or studios to reduce costs".to_string());
        recommendations.push("Look into housing assistance programs".to_string());
    }
    if prefs.savings < reserve {
        recommendations.push(format!("Build emergency fund to ${:.0}", reserve));
    }
    recommendations.push("Compare what's included: meals, utilities, activities".to_string());
    recommendations.push("Ask about rate increases and fee structures".to_string());

    BudgetAnalysis {
        monthly_income: prefs.monthly_income,
        available_after_expenses: round2(available),
        recommended_housing_budget: round2(recommended),
        maximum_housing_budget: round2(maximum),
        recommended_savings_reserve: round2(reserve),
        current_savings: prefs.savings,
        budget_breakdown,
        affordability_status,
        recommendations,
    }
}

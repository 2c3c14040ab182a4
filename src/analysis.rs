// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period summary: balance, where the money went, savings rate and a short
//! list of tips picked by fixed thresholds. Recomputed from scratch on every
//! call; nothing here is persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::{self, OTHER};
use crate::ledger;
use crate::models::{Category, Transaction};
use crate::utils::{fmt_percent, percent_of};

const UNUSUAL_INCREASE_PCT: i64 = 30;
const TOP_CATEGORY_SHARE_PCT: i64 = 40;
const LOW_SAVINGS_PCT: i64 = 10;
const GOOD_SAVINGS_PCT: i64 = 20;
const FEW_CATEGORIES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnusualExpense {
    pub category: String,
    pub increase: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialAnalysis {
    pub monthly_balance: Decimal,
    pub biggest_expense_category: CategoryShare,
    pub unusual_expenses: Vec<UnusualExpense>,
    pub savings_rate: Decimal,
    pub tips: Vec<String>,
    pub expense_breakdown: Vec<CategoryShare>,
}

/// Expense sums per category slug, in first-seen order. Uncategorised
/// expenses count as `other`.
fn expenses_by_category(txs: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut sums: Vec<(String, Decimal)> = Vec::new();
    for t in txs.iter().filter(|t| t.is_expense()) {
        let cat = t.category.as_deref().unwrap_or(OTHER);
        match sums.iter_mut().find(|(c, _)| c == cat) {
            Some((_, v)) => *v = v.saturating_add(t.amount),
            None => sums.push((cat.to_string(), t.amount)),
        }
    }
    sums
}

fn label_of(slug: &str, set: &[Category]) -> String {
    categories::find(slug, set)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| slug.to_string())
}

fn share(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        percent_of(value, total)
    }
}

pub fn analyze_finances(
    transactions: &[Transaction],
    categories: &[Category],
    previous: Option<&[Transaction]>,
) -> FinancialAnalysis {
    let monthly_balance = ledger::balance(transactions);
    let total_income = ledger::total_income(transactions);
    let total_expense = ledger::total_expense(transactions);
    let by_category = expenses_by_category(transactions);

    let mut biggest = CategoryShare {
        name: String::new(),
        value: Decimal::ZERO,
        percentage: Decimal::ZERO,
    };
    for (slug, value) in &by_category {
        if *value > biggest.value {
            biggest = CategoryShare {
                name: label_of(slug, categories),
                value: *value,
                percentage: share(*value, total_expense),
            };
        }
    }

    let expense_breakdown = by_category
        .iter()
        .map(|(slug, value)| CategoryShare {
            name: label_of(slug, categories),
            value: *value,
            percentage: share(*value, total_expense),
        })
        .collect();

    let savings_rate = if total_income > Decimal::ZERO {
        percent_of(total_income.saturating_sub(total_expense), total_income)
    } else {
        Decimal::ZERO
    };

    let mut unusual_expenses = Vec::new();
    if let Some(prev) = previous {
        let prev_by_category = expenses_by_category(prev);
        for (slug, value) in &by_category {
            let prev_value = prev_by_category
                .iter()
                .find(|(c, _)| c == slug)
                .map(|(_, v)| *v)
                .unwrap_or(Decimal::ZERO);
            if prev_value > Decimal::ZERO {
                let increase = percent_of(value.saturating_sub(prev_value), prev_value);
                if increase > Decimal::from(UNUSUAL_INCREASE_PCT) {
                    unusual_expenses.push(UnusualExpense {
                        category: label_of(slug, categories),
                        increase,
                    });
                }
            }
        }
    }

    let mut tips = Vec::new();
    if monthly_balance < Decimal::ZERO {
        tips.push(
            "Warning: your balance is negative this period. Consider cutting non-essential spending."
                .to_string(),
        );
    }
    if biggest.percentage > Decimal::from(TOP_CATEGORY_SHARE_PCT) {
        tips.push(format!(
            "{} accounts for {} of your spending. Look for ways to reduce this expense.",
            biggest.name,
            fmt_percent(&biggest.percentage)
        ));
    }
    if savings_rate < Decimal::from(LOW_SAVINGS_PCT) {
        tips.push("Your savings rate is low. Try to put aside at least 20% of your income.".to_string());
    } else if savings_rate >= Decimal::from(GOOD_SAVINGS_PCT) {
        tips.push("Well done! You are keeping a healthy savings rate. Keep it up!".to_string());
    }
    for u in &unusual_expenses {
        tips.push(format!(
            "Your spending on {} went up {} compared to the previous period.",
            u.category,
            fmt_percent(&u.increase)
        ));
    }
    if by_category.len() <= FEW_CATEGORIES {
        tips.push(
            "Try categorising your expenses in more detail to get a clearer picture of your finances."
                .to_string(),
        );
    }

    FinancialAnalysis {
        monthly_balance,
        biggest_expense_category: biggest,
        unusual_expenses,
        savings_rate,
        tips,
        expense_breakdown,
    }
}

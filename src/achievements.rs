// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::Stats;

pub struct Achievement {
    pub key: &'static str,
    pub text: &'static str,
    unlocked: fn(&Stats) -> bool,
}

const META_KEY: &str = "five_achievements";
const META_THRESHOLD: usize = 5;

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

pub static CATALOGUE: &[Achievement] = &[
    Achievement {
        key: "first_expense",
        text: "Log your first expense",
        unlocked: |s| s.expense_records >= 1,
    },
    Achievement {
        key: "first_monthly_report",
        text: "Complete your first monthly report",
        unlocked: |s| s.monthly_reports_completed >= 1,
    },
    Achievement {
        key: "positive_income",
        text: "Have a positive balance",
        unlocked: |s| s.positive_month_balance,
    },
    Achievement {
        key: "five_days_no_expense",
        text: "Go more than 5 days without an expense",
        unlocked: |s| s.days_without_expense > 5,
    },
    Achievement {
        key: "first_yearly_report",
        text: "Complete your first yearly report",
        unlocked: |s| s.yearly_reports_completed >= 1,
    },
    Achievement {
        key: "house_200",
        text: "Deposit 200 into household expenses",
        unlocked: |s| s.house_deposits >= dec(200),
    },
    Achievement {
        key: "month_end_positive",
        text: "End a month with a positive balance",
        unlocked: |s| s.positive_month_balance && s.reviewed_monthly_report,
    },
    Achievement {
        key: "savings_300",
        text: "Deposit 300 into savings",
        unlocked: |s| s.savings_deposits >= dec(300),
    },
    Achievement {
        key: "no_credit_card",
        text: "Spend nothing on the credit card",
        unlocked: |s| s.no_credit_card_spending,
    },
    Achievement {
        key: "two_days_no_snacks",
        text: "Go 2 days without spending on snacks",
        unlocked: |s| s.days_without_snacks >= 2,
    },
    Achievement {
        key: "track_7_days",
        text: "Track your expenses 7 days in a row",
        unlocked: |s| s.days_tracking_expenses >= 7,
    },
    Achievement {
        key: "first_goal",
        text: "Reach your first savings goal",
        unlocked: |s| s.goals_met >= 1,
    },
    Achievement {
        key: "saved_500",
        text: "Put 500 aside in savings",
        unlocked: |s| s.total_saved >= dec(500),
    },
    Achievement {
        key: "bills_on_time_30",
        text: "Go 30 days without a late bill",
        unlocked: |s| s.days_without_late_bills >= 30,
    },
    Achievement {
        key: "first_chart",
        text: "Build your first monthly chart",
        unlocked: |s| s.built_monthly_chart,
    },
    Achievement {
        key: "saved_50_one_day",
        text: "Save 50 in a single day",
        unlocked: |s| s.saved_50_in_a_day,
    },
    Achievement {
        key: "three_days_no_superfluous",
        text: "Go 3 days without superfluous spending",
        unlocked: |s| s.days_without_superfluous >= 3,
    },
    Achievement {
        key: META_KEY,
        text: "Complete 5 achievements",
        unlocked: |_| false,
    },
    Achievement {
        key: "economized_1000",
        text: "Save more than 1000 in total",
        unlocked: |s| s.total_economized > dec(1000),
    },
    Achievement {
        key: "early_bird",
        text: "Log an expense before 9am",
        unlocked: |s| s.logged_expense_before_9,
    },
    Achievement {
        key: "reviewed_report",
        text: "Review your full monthly report",
        unlocked: |s| s.reviewed_monthly_report,
    },
    Achievement {
        key: "started_month_positive",
        text: "Start a month with a positive balance",
        unlocked: |s| s.started_month_positive,
    },
    Achievement {
        key: "seven_days_no_snacks",
        text: "Avoid spending on snacks for 7 days",
        unlocked: |s| s.days_without_snacks >= 7,
    },
    Achievement {
        key: "emergency_fund",
        text: "Create an emergency fund",
        unlocked: |s| s.created_emergency_fund,
    },
    Achievement {
        key: "financial_education",
        text: "Read about financial education for the first time",
        unlocked: |s| s.read_financial_education,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeStatus {
    pub key: &'static str,
    pub text: &'static str,
    pub unlocked: bool,
}

/// Evaluates every badge against `stats`. The meta badge counts the others.
pub fn evaluate(stats: &Stats) -> Vec<BadgeStatus> {
    let mut out: Vec<BadgeStatus> = CATALOGUE
        .iter()
        .map(|a| BadgeStatus {
            key: a.key,
            text: a.text,
            unlocked: (a.unlocked)(stats),
        })
        .collect();
    let others = out.iter().filter(|b| b.key != META_KEY && b.unlocked).count();
    if let Some(meta) = out.iter_mut().find(|b| b.key == META_KEY) {
        meta.unlocked = others >= META_THRESHOLD;
    }
    out
}

pub fn unlocked_count(stats: &Stats) -> usize {
    evaluate(stats).iter().filter(|b| b.unlocked).count()
}

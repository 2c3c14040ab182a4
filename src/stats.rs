// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Flat achievement counters. Values are bumped by events as they happen and
//! are never rebuilt from the underlying records, so they can drift.

use anyhow::Result;
use chrono::{DateTime, Local, Timelike};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Report;
use crate::store;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub expense_records: u32,
    pub monthly_reports_completed: u32,
    pub yearly_reports_completed: u32,
    pub days_without_expense: u32,
    pub positive_month_balance: bool,
    pub house_deposits: Decimal,
    pub savings_deposits: Decimal,
    pub no_credit_card_spending: bool,
    pub days_without_snacks: u32,
    pub days_tracking_expenses: u32,
    pub goals_met: u32,
    pub total_saved: Decimal,
    pub days_without_late_bills: u32,
    pub built_monthly_chart: bool,
    pub saved_50_in_a_day: bool,
    pub days_without_superfluous: u32,
    pub total_economized: Decimal,
    pub logged_expense_before_9: bool,
    pub reviewed_monthly_report: bool,
    pub started_month_positive: bool,
    pub created_emergency_fund: bool,
    pub read_financial_education: bool,
}

pub fn load(conn: &Connection) -> Result<Stats> {
    store::load_json_or_default(conn, store::STATS_KEY)
}

pub fn save(conn: &Connection, stats: &Stats) -> Result<()> {
    store::save_json(conn, store::STATS_KEY, stats)
}

/// Load, apply `f`, write back the whole blob.
pub fn update<F>(conn: &Connection, f: F) -> Result<Stats>
where
    F: FnOnce(&mut Stats),
{
    let mut stats = load(conn)?;
    f(&mut stats);
    save(conn, &stats)?;
    Ok(stats)
}

pub fn record_expense_logged(conn: &Connection, at: DateTime<Local>) -> Result<Stats> {
    update(conn, |s| {
        s.expense_records += 1;
        if at.hour() < 9 {
            s.logged_expense_before_9 = true;
        }
    })
}

pub fn record_chart_built(conn: &Connection) -> Result<Stats> {
    update(conn, |s| s.built_monthly_chart = true)
}

pub fn record_report_reviewed(conn: &Connection, balance: Decimal) -> Result<Stats> {
    update(conn, |s| {
        s.reviewed_monthly_report = true;
        if balance > Decimal::ZERO {
            s.positive_month_balance = true;
        }
    })
}

pub fn record_goal_met(conn: &Connection) -> Result<Stats> {
    update(conn, |s| s.goals_met += 1)
}

/// Flags toggled directly by the user (`stats set`).
pub fn set_flag(stats: &mut Stats, name: &str, value: bool) -> bool {
    let slot = match name {
        "positive_month_balance" => &mut stats.positive_month_balance,
        "no_credit_card_spending" => &mut stats.no_credit_card_spending,
        "built_monthly_chart" => &mut stats.built_monthly_chart,
        "saved_50_in_a_day" => &mut stats.saved_50_in_a_day,
        "logged_expense_before_9" => &mut stats.logged_expense_before_9,
        "reviewed_monthly_report" => &mut stats.reviewed_monthly_report,
        "started_month_positive" => &mut stats.started_month_positive,
        "created_emergency_fund" => &mut stats.created_emergency_fund,
        "read_financial_education" => &mut stats.read_financial_education,
        _ => return false,
    };
    *slot = value;
    true
}

/// Day counters incremented by the user (`stats bump`).
pub fn bump_counter(stats: &mut Stats, name: &str, by: u32) -> bool {
    let slot = match name {
        "days_without_expense" => &mut stats.days_without_expense,
        "days_without_snacks" => &mut stats.days_without_snacks,
        "days_tracking_expenses" => &mut stats.days_tracking_expenses,
        "days_without_late_bills" => &mut stats.days_without_late_bills,
        "days_without_superfluous" => &mut stats.days_without_superfluous,
        _ => return false,
    };
    *slot = slot.saturating_add(by);
    true
}

/// Money counters fed by the user (`stats deposit`).
pub fn add_amount(stats: &mut Stats, name: &str, amount: Decimal) -> bool {
    let slot = match name {
        "house_deposits" => &mut stats.house_deposits,
        "savings_deposits" => &mut stats.savings_deposits,
        "total_saved" => &mut stats.total_saved,
        "total_economized" => &mut stats.total_economized,
        _ => return false,
    };
    *slot = slot.saturating_add(amount);
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCounts {
    pub total_reports: u32,
    pub monthly_reports_completed: u32,
    pub yearly_reports_completed: u32,
}

pub fn report_counts(reports: &[Report]) -> ReportCounts {
    let periods: BTreeSet<&str> = reports.iter().map(|r| r.period.as_str()).collect();
    let months = periods.len() as u32;
    ReportCounts {
        total_reports: reports.len() as u32,
        monthly_reports_completed: months,
        yearly_reports_completed: if months >= 12 { 1 } else { 0 },
    }
}

pub fn sync_report_counts(conn: &Connection, reports: &[Report]) -> Result<Stats> {
    let counts = report_counts(reports);
    update(conn, |s| {
        s.monthly_reports_completed = counts.monthly_reports_completed;
        s.yearly_reports_completed = counts.yearly_reports_completed;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_blobs_load_with_defaults() {
        let s: Stats = serde_json::from_str(r#"{"expense_records": 4}"#).unwrap();
        assert_eq!(s.expense_records, 4);
        assert_eq!(s.goals_met, 0);
        assert!(!s.built_monthly_chart);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut s = Stats::default();
        assert!(!set_flag(&mut s, "nope", true));
        assert!(!bump_counter(&mut s, "expense_records", 1));
        assert!(bump_counter(&mut s, "days_without_snacks", 2));
        assert_eq!(s.days_without_snacks, 2);
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::{self, FinancialAnalysis};
use crate::error::LedgerError;
use crate::models::Transaction;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_month, pretty_table, previous_month};
use crate::{categories, ledger, reports, stats};
use anyhow::Result;
use rusqlite::Connection;

/// Current and prior period for the requested scope.
pub fn select_periods(
    conn: &Connection,
    sub: &clap::ArgMatches,
) -> Result<(Vec<Transaction>, Option<Vec<Transaction>>)> {
    let all = ledger::load(conn)?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;

    let current = match &month {
        Some(m) => ledger::in_month(&all, m),
        None => all.clone(),
    };
    let previous = if let Some(report_id) = sub.get_one::<String>("previous-report") {
        let report_id = report_id.trim();
        if !reports::load(conn)?.iter().any(|r| r.id == report_id) {
            return Err(LedgerError::ReportNotFound(report_id.to_string()).into());
        }
        Some(ledger::load_report(conn, report_id)?)
    } else if sub.get_flag("compare") {
        match &month {
            Some(m) => Some(ledger::in_month(&all, &previous_month(m)?)),
            None => None,
        }
    } else {
        None
    };
    Ok((current, previous))
}

pub fn run(conn: &Connection, sub: &clap::ArgMatches) -> Result<FinancialAnalysis> {
    let (current, previous) = select_periods(conn, sub)?;
    let set = categories::active_set(conn)?;
    let analysis = analysis::analyze_finances(&current, &set, previous.as_deref());
    stats::record_report_reviewed(conn, analysis.monthly_balance)?;
    Ok(analysis)
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let a = run(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &a)? {
        return Ok(());
    }

    let sign = if a.monthly_balance >= rust_decimal::Decimal::ZERO { "+" } else { "-" };
    println!("Balance: {} {}", sign, fmt_money(&a.monthly_balance.abs()));
    println!("Savings rate: {}", fmt_percent(&a.savings_rate));
    if !a.biggest_expense_category.name.is_empty() {
        println!(
            "Biggest expense: {} ({}, {})",
            a.biggest_expense_category.name,
            fmt_money(&a.biggest_expense_category.value),
            fmt_percent(&a.biggest_expense_category.percentage)
        );
    }
    if !a.expense_breakdown.is_empty() {
        let rows = a
            .expense_breakdown
            .iter()
            .map(|s| vec![s.name.clone(), fmt_money(&s.value), fmt_percent(&s.percentage)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    if !a.unusual_expenses.is_empty() {
        let rows = a
            .unusual_expenses
            .iter()
            .map(|u| vec![u.category.clone(), fmt_percent(&u.increase)])
            .collect();
        println!("{}", pretty_table(&["Unusual", "Increase"], rows));
    }
    for tip in &a.tips {
        println!("- {}", tip);
    }
    Ok(())
}

pub fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut txs = ledger::load(conn)?;
    if let Some(m) = sub.get_one::<String>("month") {
        txs = ledger::in_month(&txs, &parse_month(m)?);
    }
    let set = categories::active_set(conn)?;
    let totals = categories::category_totals(&txs, &set);
    if !totals.is_empty() {
        stats::record_chart_built(conn)?;
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        if totals.is_empty() {
            println!("No expenses recorded for the chart.");
            return Ok(());
        }
        let rows = totals
            .into_iter()
            .map(|t| vec![t.name, fmt_money(&t.total), t.color])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
    }
    Ok(())
}

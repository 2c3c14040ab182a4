// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::commands::analyze;
use tallybook::error::LedgerError;
use tallybook::ledger::{self, NewTransaction};
use tallybook::models::{Transaction, TxKind};
use tallybook::{cli, db, reports, stats, store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn record(conn: &Connection, kind: TxKind, amount: i64, category: Option<&str>, date: (i32, u32, u32)) {
    ledger::add(
        conn,
        NewTransaction {
            description: "entry".into(),
            amount: Decimal::from(amount),
            kind,
            category: category.map(str::to_string),
            other_text: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        },
        Local.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap(),
    )
    .unwrap();
}

fn analyze_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tallybook", "analyze"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("analyze", sub)) => sub.clone(),
        _ => panic!("analyze subcommand not parsed"),
    }
}

#[test]
fn compare_uses_previous_month_across_year_boundary() {
    let conn = setup();
    record(&conn, TxKind::Expense, 100, Some("food"), (2024, 12, 15));
    record(&conn, TxKind::Expense, 150, Some("food"), (2025, 1, 10));
    record(&conn, TxKind::Income, 1000, None, (2025, 1, 5));
    record(&conn, TxKind::Expense, 999, Some("food"), (2024, 11, 30));

    let sub = analyze_matches(&["--month", "2025-01", "--compare"]);
    let (current, previous) = analyze::select_periods(&conn, &sub).unwrap();
    assert_eq!(current.len(), 2);
    let previous = previous.unwrap();
    assert_eq!(previous.len(), 1);
    assert_eq!(previous[0].date, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());

    let a = analyze::run(&conn, &sub).unwrap();
    assert_eq!(a.monthly_balance, Decimal::from(850));
    assert_eq!(a.unusual_expenses.len(), 1);
    assert_eq!(a.unusual_expenses[0].category, "Food");
    assert_eq!(a.unusual_expenses[0].increase, Decimal::from(50));
}

#[test]
fn no_prior_period_without_flags() {
    let conn = setup();
    record(&conn, TxKind::Expense, 40, Some("leisure"), (2025, 1, 3));

    let sub = analyze_matches(&["--month", "2025-01"]);
    let (current, previous) = analyze::select_periods(&conn, &sub).unwrap();
    assert_eq!(current.len(), 1);
    assert!(previous.is_none());

    let sub = analyze_matches(&[]);
    let (current, previous) = analyze::select_periods(&conn, &sub).unwrap();
    assert_eq!(current.len(), 1);
    assert!(previous.is_none());
}

#[test]
fn previous_report_must_exist() {
    let conn = setup();
    let sub = analyze_matches(&["--previous-report", "does-not-exist"]);
    let err = analyze::select_periods(&conn, &sub).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::ReportNotFound("does-not-exist".into()))
    );
    // nothing was recorded for a failed run
    assert!(analyze::run(&conn, &sub).is_err());
    assert!(!stats::load(&conn).unwrap().reviewed_monthly_report);
}

#[test]
fn previous_report_supplies_prior_period() {
    let conn = setup();
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let july = reports::add(&conn, "July", None, "2025-07", now).unwrap();
    record(&conn, TxKind::Expense, 100, Some("food"), (2025, 7, 4));

    reports::add(&conn, "August", None, "2025-08", now).unwrap();
    record(&conn, TxKind::Expense, 200, Some("food"), (2025, 8, 4));
    record(&conn, TxKind::Income, 1000, None, (2025, 8, 1));

    let sub = analyze_matches(&["--previous-report", &july.id]);
    let (current, previous) = analyze::select_periods(&conn, &sub).unwrap();
    assert_eq!(current.len(), 2);
    assert_eq!(previous.unwrap().len(), 1);

    let a = analyze::run(&conn, &sub).unwrap();
    assert_eq!(a.unusual_expenses[0].category, "Food");
    assert_eq!(a.unusual_expenses[0].increase, Decimal::ONE_HUNDRED);
}

#[test]
fn run_marks_report_reviewed() {
    let conn = setup();
    record(&conn, TxKind::Expense, 300, Some("housing"), (2025, 1, 2));

    analyze::run(&conn, &analyze_matches(&[])).unwrap();
    let s = stats::load(&conn).unwrap();
    assert!(s.reviewed_monthly_report);
    assert!(!s.positive_month_balance);

    record(&conn, TxKind::Income, 500, None, (2025, 1, 3));
    analyze::handle(&conn, &analyze_matches(&["--json"])).unwrap();
    assert!(stats::load(&conn).unwrap().positive_month_balance);
}

#[test]
fn chart_records_only_when_there_is_something_to_draw() {
    let conn = setup();
    let chart_matches = || {
        let matches = cli::build_cli().get_matches_from(["tallybook", "chart", "--json"]);
        match matches.subcommand() {
            Some(("chart", sub)) => sub.clone(),
            _ => panic!("chart subcommand not parsed"),
        }
    };

    analyze::chart(&conn, &chart_matches()).unwrap();
    assert!(!stats::load(&conn).unwrap().built_monthly_chart);

    record(&conn, TxKind::Expense, 12, Some("transport"), (2025, 1, 2));
    analyze::chart(&conn, &chart_matches()).unwrap();
    assert!(stats::load(&conn).unwrap().built_monthly_chart);
}

#[test]
fn oversized_amounts_never_panic() {
    let conn = setup();
    let err = ledger::add(
        &conn,
        NewTransaction {
            description: "Jackpot".into(),
            amount: Decimal::MAX,
            kind: TxKind::Income,
            category: None,
            other_text: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        },
        Local::now(),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidTransaction(_))
    ));

    // lists written by something other than `ledger::add`
    let huge = |id: &str, kind: TxKind, amount: Decimal| Transaction {
        id: id.into(),
        description: "hand edited".into(),
        amount,
        kind,
        category: (kind == TxKind::Expense).then(|| "food".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    };
    let txs = vec![
        huge("1", TxKind::Income, Decimal::MAX),
        huge("2", TxKind::Income, Decimal::MAX),
    ];
    store::save_json(&conn, store::DEFAULT_TRANSACTIONS_KEY, &txs).unwrap();
    assert_eq!(ledger::balance(&txs), Decimal::MAX);

    let a = analyze::run(&conn, &analyze_matches(&[])).unwrap();
    assert_eq!(a.monthly_balance, Decimal::MAX);
    assert_eq!(a.savings_rate, Decimal::ONE_HUNDRED);

    let tiny_income = vec![
        huge("1", TxKind::Income, Decimal::new(1, 4)),
        huge("2", TxKind::Expense, Decimal::MAX),
    ];
    store::save_json(&conn, store::DEFAULT_TRANSACTIONS_KEY, &tiny_income).unwrap();
    let a = analyze::run(&conn, &analyze_matches(&[])).unwrap();
    assert_eq!(a.savings_rate, Decimal::MIN);
}

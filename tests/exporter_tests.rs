// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tallybook::ledger::{self, NewTransaction};
use tallybook::models::TxKind;
use tallybook::{cli, commands::exporter, db};
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "tallybook",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(conn, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    let tx = ledger::add(
        &conn,
        NewTransaction {
            description: "Corner Shop".into(),
            amount: Decimal::new(1234, 2),
            kind: TxKind::Expense,
            category: Some("food".into()),
            other_text: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        },
        Local::now(),
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&conn, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": tx.id,
                "date": "2025-01-02",
                "description": "Corner Shop",
                "kind": "expense",
                "amount": "12.34",
                "category": "Food"
            }
        ])
    );
}

#[test]
fn export_transactions_csv_is_chronological() {
    let conn = base_conn();
    for (day, amount) in [(5, 30), (1, 10)] {
        ledger::add(
            &conn,
            NewTransaction {
                description: format!("Pay {}", day),
                amount: Decimal::from(amount),
                kind: TxKind::Income,
                category: None,
                other_text: None,
                date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            },
            Local::now(),
        )
        .unwrap();
    }
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&conn, "csv", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "2025-01-01");
    assert_eq!(&rows[1][2], "Pay 5");
    assert_eq!(&rows[1][5], "");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();
    assert!(run_export(&conn, "xml", &out_str).is_err());
    assert!(!out_path.exists());
}

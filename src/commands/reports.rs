// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::reports::{self, ReportEdit};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::{ledger, stats};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let period = sub.get_one::<String>("period").unwrap();
            let color = sub.get_one::<String>("color").map(|s| s.as_str());
            let report = reports::add(conn, name, color, period, Utc::now())?;
            stats::sync_report_counts(conn, &reports::load(conn)?)?;
            println!(
                "Created report '{}' for {} (id: {}), now active",
                report.name, report.period, report.id
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("use", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let report = reports::set_active(conn, id)?;
            println!("Active report: {} ({})", report.name, report.period);
        }
        Some(("clear", _)) => {
            reports::clear_active(conn)?;
            println!("Using the default ledger");
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let edit = ReportEdit {
                name: sub.get_one::<String>("name").cloned(),
                color: sub.get_one::<String>("color").cloned(),
                period: sub.get_one::<String>("period").cloned(),
            };
            let report = reports::update(conn, id, edit)?;
            stats::sync_report_counts(conn, &reports::load(conn)?)?;
            println!("Updated report '{}'", report.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let removed = reports::remove(conn, id)?;
            println!("Removed report '{}'", removed.name);
        }
        Some(("stats", sub)) => {
            let counts = stats::report_counts(&reports::load(conn)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &counts)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Reports", "Monthly", "Yearly"],
                        vec![vec![
                            counts.total_reports.to_string(),
                            counts.monthly_reports_completed.to_string(),
                            counts.yearly_reports_completed.to_string(),
                        ]],
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct ReportRow {
    id: String,
    name: String,
    period: String,
    color: String,
    transactions: usize,
    balance: String,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let active = reports::active_id(conn)?;
    let mut data = Vec::new();
    for r in reports::load(conn)? {
        let txs = ledger::load_report(conn, &r.id)?;
        data.push(ReportRow {
            active: active.as_deref() == Some(r.id.as_str()),
            transactions: txs.len(),
            balance: fmt_money(&ledger::balance(&txs)),
            id: r.id,
            name: r.name,
            period: r.period,
            color: r.color,
        });
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    if r.active { "*".into() } else { String::new() },
                    r.id,
                    r.name,
                    r.period,
                    r.transactions.to_string(),
                    r.balance,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["", "Id", "Name", "Period", "Txns", "Balance"], rows)
        );
    }
    Ok(())
}

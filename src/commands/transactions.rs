// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::ledger::{self, NewTransaction};
use crate::models::TxKind;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let t = ledger::remove(conn, id)?;
            println!("Removed '{}' ({})", t.description, fmt_money(&t.amount));
        }
        Some(("balance", sub)) => {
            let txs = ledger::load(conn)?;
            let txs = match sub.get_one::<String>("month") {
                Some(month) => ledger::in_month(&txs, &parse_month(month)?),
                None => txs,
            };
            println!("Balance: {}", fmt_money(&ledger::balance(&txs)));
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = Local::now();
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now.date_naive(),
    };
    let new = NewTransaction {
        description,
        amount,
        kind,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        other_text: sub.get_one::<String>("other").map(|s| s.to_string()),
        date,
    };
    let tx = ledger::add(conn, new, now)?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        tx.kind,
        fmt_money(&tx.amount),
        tx.date,
        tx.description,
        tx.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Kind", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
}

/// Rows of the ledger in use, newest first, with optional month/category
/// filters and a limit.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let set = categories::active_set(conn)?;
    let mut txs = ledger::load(conn)?;
    if let Some(month) = sub.get_one::<String>("month") {
        txs = ledger::in_month(&txs, &parse_month(month)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        let cat = categories::slugify(cat);
        txs.retain(|t| t.category.as_deref() == Some(cat.as_str()));
    }
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            category: t
                .category
                .as_deref()
                .map(|c| categories::display_name(c, &set))
                .unwrap_or_default(),
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount),
        })
        .collect())
}

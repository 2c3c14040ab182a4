// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::ledger;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let set = categories::active_set(conn)?;
    let mut txs = ledger::load(conn)?;
    txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["id", "date", "description", "kind", "amount", "category"])?;
        for t in &txs {
            wtr.write_record([
                t.id.clone(),
                t.date.to_string(),
                t.description.clone(),
                t.kind.to_string(),
                t.amount.to_string(),
                t.category
                    .as_deref()
                    .map(|c| categories::display_name(c, &set))
                    .unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = txs
            .iter()
            .map(|t| {
                json!({
                    "id": t.id,
                    "date": t.date.to_string(),
                    "description": t.description,
                    "kind": t.kind.to_string(),
                    "amount": t.amount.to_string(),
                    "category": t.category.as_deref().map(|c| categories::display_name(c, &set)),
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

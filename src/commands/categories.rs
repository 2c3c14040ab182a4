// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").map(|s| s.as_str());
            let cat = categories::add_custom(conn, name, color)?;
            println!("Added category '{}' ({})", cat.label, cat.value);
        }
        Some(("list", sub)) => {
            let set = categories::active_set(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &set)? {
                let data = set
                    .into_iter()
                    .map(|c| {
                        vec![
                            c.value,
                            c.label,
                            c.color,
                            if c.is_custom { "custom" } else { "built-in" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Value", "Label", "Color", "Kind"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let value = sub.get_one::<String>("value").unwrap();
            let removed = categories::remove_custom(conn, value)?;
            println!("Removed category '{}'", removed.label);
        }
        _ => {}
    }
    Ok(())
}

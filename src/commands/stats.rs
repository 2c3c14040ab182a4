// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use crate::{achievements, stats};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = stats::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let val = serde_json::to_value(&s)?;
                let rows = val
                    .as_object()
                    .map(|o| {
                        o.iter()
                            .map(|(k, v)| {
                                let v = match v {
                                    serde_json::Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                };
                                vec![k.clone(), v]
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                println!("{}", pretty_table(&["Stat", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let value = *sub.get_one::<bool>("value").unwrap();
            let mut ok = false;
            stats::update(conn, |s| ok = stats::set_flag(s, name, value))?;
            if !ok {
                bail!("Unknown flag '{}'", name);
            }
            println!("{} = {}", name, value);
        }
        Some(("bump", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let by = *sub.get_one::<u32>("by").unwrap();
            let mut ok = false;
            stats::update(conn, |s| ok = stats::bump_counter(s, name, by))?;
            if !ok {
                bail!("Unknown counter '{}'", name);
            }
            println!("{} += {}", name, by);
        }
        Some(("deposit", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let mut ok = false;
            stats::update(conn, |s| ok = stats::add_amount(s, name, amount))?;
            if !ok {
                bail!("Unknown amount '{}'", name);
            }
            println!("{} += {}", name, amount);
        }
        _ => {}
    }
    Ok(())
}

pub fn achievements(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = stats::load(conn)?;
    let mut badges = achievements::evaluate(&s);
    if sub.get_flag("unlocked") {
        badges.retain(|b| b.unlocked);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &badges)? {
        let total = achievements::CATALOGUE.len();
        let unlocked = achievements::unlocked_count(&s);
        let rows = badges
            .into_iter()
            .map(|b| {
                vec![
                    if b.unlocked { "x" } else { " " }.to_string(),
                    b.text.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Achievement"], rows));
        println!("{}/{} unlocked", unlocked, total);
    }
    Ok(())
}

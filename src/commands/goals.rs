// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::goals::{self, GoalEdit, NewGoal, Progress};
use crate::models::Goal;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("edit", sub)) => {
            let index = *sub.get_one::<usize>("index").unwrap();
            let changes = GoalEdit {
                title: sub.get_one::<String>("title").cloned(),
                target_amount: if sub.get_flag("clear-target") {
                    Some(None)
                } else {
                    opt_decimal(sub, "target")?.map(Some)
                },
                deadline: sub.get_one::<String>("deadline").cloned(),
                description: sub.get_one::<String>("description").cloned(),
            };
            let goal = goals::edit(conn, index, changes)?;
            println!("Updated goal #{} '{}'", index, goal.title);
        }
        Some(("contribute", sub)) => {
            let index = *sub.get_one::<usize>("index").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let goal = goals::contribute(conn, index, amount, Utc::now())?;
            println!(
                "Goal '{}': {} saved, {}",
                goal.title,
                fmt_money(&goal.current_amount),
                progress_text(&goal)
            );
            if goal.completed {
                println!("Goal reached!");
            }
        }
        Some(("rm", sub)) => {
            let index = *sub.get_one::<usize>("index").unwrap();
            let goal = goals::remove(conn, index)?;
            println!("Removed goal '{}'", goal.title);
        }
        _ => {}
    }
    Ok(())
}

fn opt_decimal(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    sub.get_one::<String>(name)
        .map(|s| parse_decimal(s))
        .transpose()
}

pub fn progress_text(goal: &Goal) -> String {
    match goals::progress(goal) {
        Progress::Percent(p) => format!("{} complete", fmt_percent(&p)),
        Progress::Undefined => "set a target to track progress".to_string(),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewGoal {
        title: sub.get_one::<String>("title").unwrap().to_string(),
        target_amount: opt_decimal(sub, "target")?,
        current_amount: opt_decimal(sub, "current")?,
        deadline: sub.get_one::<String>("deadline").cloned(),
        description: sub.get_one::<String>("description").cloned(),
    };
    let index = goals::create(conn, new)?;
    println!("Created goal #{}", index);
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    index: usize,
    #[serde(flatten)]
    goal: Goal,
    progress: Progress,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let all = goals::load(conn)?;
    let data: Vec<GoalRow> = all
        .into_iter()
        .enumerate()
        .map(|(index, goal)| GoalRow {
            index,
            progress: goals::progress(&goal),
            goal,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.index.to_string(),
                    r.goal.title.clone(),
                    fmt_money(&r.goal.current_amount),
                    r.goal.target_amount.map(|t| fmt_money(&t)).unwrap_or_default(),
                    match r.progress {
                        Progress::Percent(p) => fmt_percent(&p),
                        Progress::Undefined => "-".into(),
                    },
                    r.goal.deadline.clone().unwrap_or_default(),
                    if r.goal.completed { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["#", "Title", "Saved", "Target", "Progress", "Deadline", "Done"],
                rows
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let index = *sub.get_one::<usize>("index").unwrap();
    let goal = goals::get(conn, index)?;
    let row = GoalRow {
        index,
        progress: goals::progress(&goal),
        goal,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        return Ok(());
    }
    let goal = &row.goal;
    println!("{} (#{})", goal.title, index);
    if let Some(d) = &goal.description {
        println!("{}", d);
    }
    if let Some(d) = &goal.deadline {
        println!("Deadline: {}", d);
    }
    match goal.target_amount {
        Some(t) => println!("{} of {}, {}", fmt_money(&goal.current_amount), fmt_money(&t), progress_text(goal)),
        None => println!("{} saved, {}", fmt_money(&goal.current_amount), progress_text(goal)),
    }
    if goal.history.is_empty() {
        println!("No contributions yet.");
    } else {
        // newest first
        let rows = goal
            .history
            .iter()
            .rev()
            .map(|m| {
                vec![
                    m.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    fmt_money(&m.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["When", "Amount"], rows));
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .required(required)
        .help("Period as YYYY-MM")
}

fn index_arg() -> Arg {
    Arg::new("index")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("Goal number as shown by `goal list`")
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(clap::crate_version!())
        .about("Personal ledger with reports, savings goals, spending analysis and achievements")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("TALLYBOOK_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").short('d').required(true))
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .short('k')
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("other")
                                .long("other")
                                .help("Name for the category when --category other"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg(false))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("balance").arg(month_arg(false))),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").help("#rrggbb")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("value").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Named ledgers scoped to a period")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("period").long("period").required(true).help("YYYY-MM"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("use").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("clear").about("Switch back to the default ledger"))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("period").long("period")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(Command::new("stats"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").required(true))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("show").arg(index_arg())))
                .subcommand(
                    Command::new("edit")
                        .arg(index_arg())
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("target").long("target"))
                        .arg(
                            Arg::new("clear-target")
                                .long("clear-target")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("target")
                                .help("Remove the target amount"),
                        )
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(index_arg())
                        .arg(
                            Arg::new("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(Command::new("rm").arg(index_arg())),
        )
        .subcommand(json_flags(
            Command::new("analyze")
                .about("Balance, top category, savings rate and tips")
                .arg(month_arg(false))
                .arg(
                    Arg::new("compare")
                        .long("compare")
                        .action(ArgAction::SetTrue)
                        .requires("month")
                        .help("Compare against the previous month"),
                )
                .arg(
                    Arg::new("previous-report")
                        .long("previous-report")
                        .conflicts_with("compare")
                        .help("Report id to use as the prior period"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("chart")
                .about("Expense totals per category")
                .arg(month_arg(false)),
        ))
        .subcommand(
            Command::new("stats")
                .about("Achievement counters")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("value")
                                .required(true)
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("bump")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("by")
                                .long("by")
                                .default_value("1")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(
                    Command::new("deposit")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("achievements")
                .about("Badge catalogue with unlock state")
                .arg(
                    Arg::new("unlocked")
                        .long("unlocked")
                        .action(ArgAction::SetTrue)
                        .help("Only show unlocked badges"),
                ),
        ))
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}

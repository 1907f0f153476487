// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("balancebook")
        .about("Personal income/expense tracking with category budgets")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("category")
                .about("Manage categories and their budgets")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value("#64748b")
                                .help("Display color, opaque to calculations"),
                        )
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .help("Optional monthly budget"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (refused while transactions reference it)")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("set-budget")
                        .about("Set the monthly budget for a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("clear-budget")
                        .about("Remove the budget, excluding the category from budget health")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, defaults to now"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List transactions"))
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(json_flags(Command::new("dashboard").about(
            "Balance, today's and this month's totals, alerts, and budget pulse",
        )))
        .subcommand(
            Command::new("budget")
                .about("Budget health and what-if checks")
                .subcommand(json_flags(
                    Command::new("health").about("Per-category budget standing for this month"),
                ))
                .subcommand(
                    Command::new("check")
                        .about("Project an expense against its category budget before saving")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Month to project into, defaults to now"),
                        )
                        .arg(
                            Arg::new("exclude")
                                .long("exclude")
                                .value_parser(value_parser!(i64))
                                .help("Transaction id being edited, excluded from current spend"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Income/expense reports")
                .subcommand(
                    json_flags(Command::new("month").about("Month summary and category breakdown"))
                        .arg(Arg::new("month").required(true).help("YYYY-MM")),
                )
                .subcommand(
                    json_flags(Command::new("year").about("Per-month totals for a year")).arg(
                        Arg::new("year")
                            .required(true)
                            .value_parser(value_parser!(i32)),
                    ),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Application settings")
                .subcommand(json_flags(Command::new("show").about("Show settings")))
                .subcommand(
                    Command::new("set")
                        .about("Update settings")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("daily-limit").long("daily-limit"))
                        .arg(
                            Arg::new("low-balance-warning")
                                .long("low-balance-warning")
                                .help("Balance below this raises the low-balance alert"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("snapshot")
                        .about("Full JSON dump: categories, transactions, settings")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("snapshot")
                        .about("Import a JSON snapshot, merging categories by name")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan stored rows for integrity problems"))
}

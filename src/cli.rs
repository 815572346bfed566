// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::db::DB_ENV;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Transaction id")
}

pub fn build_cli() -> Command {
    Command::new("spendboard")
        .about("Track spending, paid status and essential vs non-essential targets")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and edit transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("spec").long("spec").help("Specification, default: other"))
                        .arg(Arg::new("kind").long("kind").help("essential | non-essential"))
                        .arg(Arg::new("payment").long("payment").help("credit | debit | pix-cash | investment"))
                        .arg(Arg::new("category").long("category").help("Category, default: food"))
                        .arg(Arg::new("paid").long("paid").action(ArgAction::SetTrue))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list").about("List transactions")))
                .subcommand(
                    Command::new("edit")
                        .about("Edit fields of a transaction")
                        .arg(id_arg())
                        .arg(
                            Arg::new("set")
                                .long("set")
                                .required(true)
                                .action(ArgAction::Append)
                                .allow_hyphen_values(true)
                                .value_name("FIELD=VALUE"),
                        )
                        .arg(
                            Arg::new("dry_run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Show the draft and discard it"),
                        ),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark a transaction paid")
                        .arg(id_arg())
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .help("Mark as not paid instead"),
                        ),
                )
                .subcommand(Command::new("rm").about("Remove a transaction").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Monthly income")
                .subcommand(
                    Command::new("set").arg(
                        Arg::new("amount")
                            .required(true)
                            .allow_hyphen_values(true)
                            .allow_negative_numbers(true),
                    ),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Totals, balance and status"),
        ))
        .subcommand(json_flags(
            Command::new("chart")
                .about("Grouped totals with shares")
                .arg(
                    Arg::new("by")
                        .required(true)
                        .value_parser(["category", "payment", "specification", "essential"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

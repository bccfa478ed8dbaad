// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("EMAIL")
        .required(true)
        .help("Email of the user the data belongs to")
}

fn now_arg() -> Arg {
    Arg::new("now")
        .long("now")
        .value_name("TIMESTAMP")
        .hide(true)
        .help("Override the reference instant (RFC 3339)")
}

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON Lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("saverly")
        .about("Personal finance tracker: transactions, weekly savings goals, and analytics")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "cash", "purchase", "expense"])
                                .required(true)
                                .help("Transaction kind"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Positive amount"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true)
                                .help("What the money movement was for"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("TIMESTAMP")
                                .help("RFC 3339 timestamp, defaults to now"),
                        ),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(user_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most this many transactions"),
                        ),
                )),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Balance, weekly savings, goal, and streak overview")
                .arg(user_arg())
                .arg(now_arg()),
        )
        .subcommand(
            Command::new("goal")
                .about("Weekly savings goal and streak")
                .subcommand(
                    Command::new("set")
                        .about("Set the weekly savings goal")
                        .arg(user_arg())
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Positive goal amount"),
                        )
                        .arg(now_arg()),
                )
                .subcommand(
                    Command::new("status")
                        .about("Show the current goal, savings, and streak")
                        .arg(user_arg())
                        .arg(now_arg()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Income vs expenses analytics")
                .subcommand(with_json_flags(
                    Command::new("chart")
                        .about("Bucketed income/expense series")
                        .arg(user_arg())
                        .arg(
                            Arg::new("timeframe")
                                .long("timeframe")
                                .value_parser(["week", "month", "year"])
                                .default_value("week")
                                .help("Bucket granularity"),
                        )
                        .arg(now_arg()),
                ))
                .subcommand(with_json_flags(
                    Command::new("totals")
                        .about("All-time income and expense totals")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export a user's transactions to CSV")
                .arg(user_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("FILE")
                        .required(true)
                        .help("Output file path"),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Scan stored records for integrity problems")
                .arg(user_arg()),
        )
}

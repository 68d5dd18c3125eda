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
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_hyphen_values(true)
        .help("Positive decimal amount")
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Income and expense transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(amount_arg(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("description").long("description").short('d'))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .help("income|expense"),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit a transaction; omitted fields keep their current value")
                .arg(Arg::new("id").required(true))
                .arg(amount_arg(false))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description").short('d'))
                .arg(Arg::new("type").long("type"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no_recurring")
                        .long("no-recurring")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("recurring"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("type").long("type").help("income|expense"))
                .arg(Arg::new("from").long("from").help("Inclusive start date"))
                .arg(Arg::new("to").long("to").help("Inclusive end date"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn emi_command() -> Command {
    Command::new("emi")
        .about("Installment obligations (EMIs), always counted as expense")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an EMI")
                .arg(Arg::new("name").long("name").required(true))
                .arg(amount_arg(true))
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("end").long("end").help("YYYY-MM-DD, optional")),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit an EMI; omitted fields keep their current value")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(amount_arg(false))
                .arg(Arg::new("start").long("start"))
                .arg(Arg::new("end").long("end"))
                .arg(
                    Arg::new("no_end")
                        .long("no-end")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("end")
                        .help("Make the EMI open-ended"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an EMI")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List EMIs")))
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Track income, expenses, EMIs and a monthly budget")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("POCKETLEDGER_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database and print its path"))
        .subcommand(tx_command())
        .subcommand(emi_command())
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly budget")
                        .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
                )
                .subcommand(json_flags(
                    Command::new("status").about("Budget usage against total expense"),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Total income, expense and balance"),
        ))
        .subcommand(json_flags(
            Command::new("chart").about("Expense breakdown by category"),
        ))
        .subcommand(
            Command::new("settings")
                .about("Display and accounting preferences")
                .subcommand_required(true)
                .subcommand(
                    Command::new("currency")
                        .about("Display currency (USD, EUR, GBP, JPY, INR, CAD, AUD, CNY)")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(
                    Command::new("theme")
                        .about("Chart colour theme")
                        .arg(Arg::new("theme").required(true).help("light|dark|toggle")),
                )
                .subcommand(
                    Command::new("emi-policy")
                        .about("Whether EMIs past their end date still count as expense")
                        .arg(
                            Arg::new("policy")
                                .required(true)
                                .help("always|until-end-date"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show current preferences"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export records to a file")
                .subcommand_required(true)
                .subcommand(export_target("transactions"))
                .subcommand(export_target("emis")),
        )
}

fn export_target(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true))
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
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
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("bukubesar")
        .version(crate_version!())
        .about("Double-entry cost-control ledger with an Indonesian chart of accounts")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(Command::new("seed").about("Seed the standard chart of accounts"))
        .subcommand(
            Command::new("account")
                .about("Manage the chart of accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account (category derived unless overridden)")
                        .arg(Arg::new("code").long("code").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("ASSET|LIABILITY|EQUITY|REVENUE|EXPENSE"),
                        )
                        .arg(Arg::new("parent").long("parent").help("Parent account code"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Override the derived category"),
                        )
                        .arg(
                            Arg::new("header")
                                .long("header")
                                .action(ArgAction::SetTrue)
                                .help("Create a header (grouping) account"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include inactive accounts"),
                    ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Deactivate an account")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(
                    Command::new("classify")
                        .about("Preview the derived category for an account")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("parent").long("parent"))
                        .arg(Arg::new("code").long("code"))
                        .arg(Arg::new("name").long("name")),
                )
                .subcommand(
                    Command::new("next-code")
                        .about("Suggest the next free account code")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("parent").long("parent")),
                ),
        )
        .subcommand(
            Command::new("journal")
                .about("Preview and post balanced journal entries")
                .subcommand(json_flags(
                    Command::new("preview")
                        .about("Preview a two-leg entry without posting")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("debit").long("debit").required(true))
                        .arg(Arg::new("credit").long("credit").required(true)),
                ))
                .subcommand(
                    Command::new("post")
                        .about("Post a two-leg entry")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("debit").long("debit").required(true))
                        .arg(Arg::new("credit").long("credit").required(true))
                        .arg(Arg::new("memo").long("memo").default_value("Manual entry")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List journal entries").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(clap::value_parser!(usize))
                            .default_value("20"),
                    ),
                )),
        )
        .subcommand(
            Command::new("ppn")
                .about("PPN (VAT) position and remittance")
                .subcommand(json_flags(
                    Command::new("status").about("Show Masukan/Keluaran/Terutang"),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Remit PPN Terutang to the tax office")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Defaults to the full Terutang"),
                        )
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .required(true)
                                .help("Cash/bank account code to pay from"),
                        )
                        .arg(Arg::new("reference").long("reference"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List recorded PPN payments"),
                ))
                .subcommand(
                    Command::new("set-accounts")
                        .about("Point the PPN flows at different ledger accounts")
                        .arg(Arg::new("masukan").long("masukan").help("Input VAT account code"))
                        .arg(
                            Arg::new("keluaran")
                                .long("keluaran")
                                .help("Output VAT account code"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Financial reports")
                .subcommand(json_flags(
                    Command::new("balance-sheet").about("Assets vs liabilities + equity"),
                ))
                .subcommand(json_flags(
                    Command::new("trial-balance").about("Debit/credit totals per account"),
                ))
                .subcommand(json_flags(
                    Command::new("ratios").about("Liquidity, margin, and leverage ratios"),
                )),
        )
        .subcommand(json_flags(
            Command::new("health")
                .about("Financial health score, grade, and recommendations")
                .arg(
                    Arg::new("prior-revenue")
                        .long("prior-revenue")
                        .help("Prior-period revenue for the growth component"),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("40")
                        .help("Low-score threshold for recommendations"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export ledger data to CSV")
                .subcommand(
                    Command::new("accounts")
                        .about("Export the chart of accounts")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("journal")
                        .about("Export journal lines")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check ledger integrity invariants"))
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{AppState, Command};
use crate::summary::{BudgetStatus, BudgetTier};
use crate::utils::{bar, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(app: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(app, sub)?,
        Some(("status", sub)) => status(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    app.apply(Command::SetBudget(raw))?;
    let ccy = app.store().preferences().currency;
    println!("Monthly budget set to {}", ccy.fmt_money(app.store().budget()));
    Ok(())
}

fn status(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let st = app.budget_status();
    if maybe_print_json(json_flag, jsonl_flag, &st)? {
        return Ok(());
    }
    match st {
        Some(st) => println!("{}", status_table(app, &st)),
        None => println!("No monthly budget set. Use `budget set <amount>`."),
    }
    Ok(())
}

pub(crate) fn tier_label(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Normal => "ok",
        BudgetTier::Warning => "warning",
        BudgetTier::Critical => "critical",
    }
}

pub(crate) fn status_table(app: &AppState, st: &BudgetStatus) -> comfy_table::Table {
    let ccy = app.store().preferences().currency;
    pretty_table(
        &["Budget", "Remaining", "Used", "", "Status"],
        vec![vec![
            ccy.fmt_money(st.budget),
            ccy.fmt_money(st.remaining),
            fmt_percent(st.percent_used),
            bar(st.percent_used, 20),
            tier_label(st.tier).to_string(),
        ]],
    )
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{AppState, Command, InstallmentForm, Outcome};
use crate::display::fmt_date_range;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(app: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let form = InstallmentForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        start_date: sub
            .get_one::<String>("start")
            .cloned()
            .unwrap_or_else(|| app.as_of().to_string()),
        end_date: sub.get_one::<String>("end").cloned().unwrap_or_default(),
    };
    if let Outcome::Added(id) = app.apply(Command::AddInstallment(form))? {
        let ccy = app.store().preferences().currency;
        if let Some(emi) = app.store().installment(&id) {
            println!(
                "Added EMI '{}' {} ({}) (id {})",
                emi.name,
                ccy.fmt_money(emi.amount),
                fmt_date_range(emi.start_date, emi.end_date),
                id
            );
        }
    }
    Ok(())
}

fn edit(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let mut form = match app.apply(Command::BeginInstallmentEdit(id))? {
        Outcome::EditingInstallment(form) => form,
        other => return Err(anyhow!("unexpected outcome {:?}", other)),
    };
    if let Some(v) = sub.get_one::<String>("name") {
        form.name = v.clone();
    }
    if let Some(v) = sub.get_one::<String>("amount") {
        form.amount = v.clone();
    }
    if let Some(v) = sub.get_one::<String>("start") {
        form.start_date = v.clone();
    }
    if let Some(v) = sub.get_one::<String>("end") {
        form.end_date = v.clone();
    }
    if sub.get_flag("no_end") {
        form.end_date.clear();
    }
    match app.apply(Command::SubmitInstallment(form)) {
        Ok(Outcome::Updated(id)) => println!("Updated EMI {}", id),
        Ok(Outcome::NotFound(id)) => println!("No EMI with id {}", id),
        Ok(_) => {}
        Err(err) => {
            app.apply(Command::CancelInstallmentEdit)?;
            return Err(err.into());
        }
    }
    Ok(())
}

fn rm(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    match app.apply(Command::DeleteInstallment(id))? {
        Outcome::Deleted(id) => println!("Removed EMI {}", id),
        Outcome::NotFound(id) => println!("No EMI with id {}", id),
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct EmiList<'a> {
    emis: &'a [crate::models::Installment],
    total: rust_decimal::Decimal,
}

fn list(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let emis = app.store().installments();
    let total = app.installment_total();
    let printed = if jsonl_flag {
        maybe_print_json(false, true, &emis)?
    } else {
        maybe_print_json(json_flag, false, &EmiList { emis, total })?
    };
    if printed {
        return Ok(());
    }
    if emis.is_empty() {
        println!("No EMIs added yet.");
        return Ok(());
    }
    let ccy = app.store().preferences().currency;
    let policy = app.store().preferences().installment_policy;
    let rows: Vec<Vec<String>> = emis
        .iter()
        .map(|e| {
            let counted = if policy.counts(e, app.as_of()) {
                ""
            } else {
                " (ended)"
            };
            vec![
                format!("{}{}", e.name, counted),
                fmt_date_range(e.start_date, e.end_date),
                ccy.fmt_money(e.amount),
                e.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Period", "Amount", "ID"], rows)
    );
    println!("Total EMIs: {}", ccy.fmt_money(total));
    Ok(())
}

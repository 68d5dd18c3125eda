// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{AppState, Command, Outcome, TransactionForm};
use crate::display::fmt_date;
use crate::models::TransactionType;
use crate::summary::{CategoryFilter, TransactionFilter, TypeFilter};
use crate::utils::{maybe_print_json, parse_date, pretty_table};
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

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a String> {
    sub.get_one::<String>(name)
}

fn add(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let form = TransactionForm {
        amount: arg(sub, "amount").cloned().unwrap_or_default(),
        category: arg(sub, "category").cloned().unwrap_or_default(),
        date: arg(sub, "date")
            .cloned()
            .unwrap_or_else(|| app.as_of().to_string()),
        description: arg(sub, "description").cloned().unwrap_or_default(),
        r#type: arg(sub, "type").cloned().unwrap_or_default(),
        recurring: sub.get_flag("recurring"),
    };
    if let Outcome::Added(id) = app.apply(Command::AddTransaction(form))? {
        let tx = app
            .store()
            .transaction(&id)
            .ok_or_else(|| anyhow!("transaction {} vanished after insert", id))?;
        let ccy = app.store().preferences().currency;
        println!(
            "Recorded {} {} on {} in '{}' (id {})",
            tx.r#type,
            ccy.fmt_money(tx.amount),
            tx.date,
            tx.category,
            id
        );
    }
    Ok(())
}

/// Prefill from the stored record, overlay the given flags, submit.
fn edit(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").map(|s| s.trim().to_string()).unwrap_or_default();
    let mut form = match app.apply(Command::BeginTransactionEdit(id.clone()))? {
        Outcome::EditingTransaction(form) => form,
        other => return Err(anyhow!("unexpected outcome {:?}", other)),
    };
    if let Some(v) = arg(sub, "amount") {
        form.amount = v.clone();
    }
    if let Some(v) = arg(sub, "category") {
        form.category = v.clone();
    }
    if let Some(v) = arg(sub, "date") {
        form.date = v.clone();
    }
    if let Some(v) = arg(sub, "description") {
        form.description = v.clone();
    }
    if let Some(v) = arg(sub, "type") {
        form.r#type = v.clone();
    }
    if sub.get_flag("recurring") {
        form.recurring = true;
    }
    if sub.get_flag("no_recurring") {
        form.recurring = false;
    }
    match app.apply(Command::SubmitTransaction(form)) {
        Ok(Outcome::Updated(id)) => println!("Updated transaction {}", id),
        Ok(Outcome::NotFound(id)) => println!("No transaction with id {}", id),
        Ok(_) => {}
        Err(err) => {
            app.apply(Command::CancelTransactionEdit)?;
            return Err(err.into());
        }
    }
    Ok(())
}

fn rm(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").map(|s| s.trim().to_string()).unwrap_or_default();
    match app.apply(Command::DeleteTransaction(id))? {
        Outcome::Deleted(id) => println!("Removed transaction {}", id),
        Outcome::NotFound(id) => println!("No transaction with id {}", id),
        _ => {}
    }
    Ok(())
}

fn list(app: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found.");
            return Ok(());
        }
        let ccy = app.store().preferences().currency;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let sign = if r.r#type == TransactionType::Income {
                    "+"
                } else {
                    "-"
                };
                let marker = if r.recurring { "↻ " } else { "" };
                vec![
                    fmt_date(r.date),
                    format!("{}{}", marker, r.description),
                    r.category.clone(),
                    format!("{}{}", sign, ccy.fmt_money(r.amount)),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: chrono::NaiveDate,
    pub description: String,
    pub category: String,
    pub r#type: TransactionType,
    pub amount: rust_decimal::Decimal,
    pub recurring: bool,
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let category = match arg(sub, "category").map(|s| s.trim()) {
        None | Some("all") => CategoryFilter::All,
        Some(c) => CategoryFilter::Only(c.to_string()),
    };
    let r#type = match arg(sub, "type").map(|s| s.trim()) {
        None | Some("all") => TypeFilter::All,
        Some(t) => TypeFilter::Only(t.parse::<TransactionType>()?),
    };
    Ok(TransactionFilter {
        category,
        r#type,
        from: arg(sub, "from").map(|s| parse_date(s)).transpose()?,
        to: arg(sub, "to").map(|s| parse_date(s)).transpose()?,
    })
}

pub fn query_rows(app: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(sub)?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(app
        .filtered(&filter)
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date,
            description: t.description.clone(),
            category: t.category.clone(),
            r#type: t.r#type,
            amount: t.amount,
            recurring: t.recurring,
        })
        .collect())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use crate::commands::budgets::status_table;
use crate::summary::{BudgetStatus, Summary};
use crate::utils::{bar, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SummaryReport {
    #[serde(flatten)]
    totals: Summary,
    budget: Option<BudgetStatus>,
}

pub fn summary(app: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let report = SummaryReport {
        totals: app.summary(),
        budget: app.budget_status(),
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    let ccy = app.store().preferences().currency;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense (incl. EMIs)", "Balance"],
            vec![vec![
                ccy.fmt_money(report.totals.total_income),
                ccy.fmt_money(report.totals.total_expense),
                ccy.fmt_money(report.totals.balance),
            ]],
        )
    );
    if let Some(st) = report.budget {
        println!("{}", status_table(app, &st));
    }
    Ok(())
}

pub fn chart(app: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = app.chart();
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expense data to display");
        return Ok(());
    }
    let ccy = app.store().preferences().currency;
    let rows: Vec<Vec<String>> = data
        .labels
        .iter()
        .zip(&data.values)
        .zip(&data.colors)
        .zip(data.shares())
        .map(|(((label, value), color), share)| {
            vec![
                label.clone(),
                ccy.fmt_money(*value),
                fmt_percent(share),
                bar(share, 24),
                color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share", "", "Color"], rows)
    );
    Ok(())
}

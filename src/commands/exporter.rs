// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::AppState;
use anyhow::{Result, bail};

pub fn handle(app: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(app, sub),
        Some(("emis", sub)) => export_emis(app, sub),
        _ => Ok(()),
    }
}

fn format_of(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    match fmt.as_str() {
        "csv" | "json" => Ok(fmt),
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
}

fn export_transactions(app: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_of(sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let txs = app.store().transactions();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "amount",
                "category",
                "description",
                "recurring",
                "created_at",
            ])?;
            for t in txs {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.recurring.to_string(),
                    t.created_at.to_rfc3339(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(out, serde_json::to_string_pretty(txs)?)?,
    }
    tracing::info!(count = txs.len(), out, "transactions exported");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

fn export_emis(app: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_of(sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let emis = app.store().installments();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "name", "amount", "start_date", "end_date", "created_at"])?;
            for e in emis {
                wtr.write_record([
                    e.id.clone(),
                    e.name.clone(),
                    e.amount.to_string(),
                    e.start_date.to_string(),
                    e.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    e.created_at.to_rfc3339(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(out, serde_json::to_string_pretty(emis)?)?,
    }
    tracing::info!(count = emis.len(), out, "EMIs exported");
    println!("Exported {} EMIs to {}", emis.len(), out);
    Ok(())
}

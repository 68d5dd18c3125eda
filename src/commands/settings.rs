// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{AppState, Command, Outcome};
use crate::display::{Currency, Theme};
use crate::models::InstallmentPolicy;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(app: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().parse::<Currency>()?;
            app.apply(Command::SetCurrency(code))?;
            println!("Display currency set to {} ({})", code.code(), code.symbol());
        }
        Some(("theme", sub)) => {
            let raw = sub.get_one::<String>("theme").unwrap().trim().to_lowercase();
            let cmd = if raw == "toggle" {
                Command::ToggleTheme
            } else {
                Command::SetTheme(raw.parse::<Theme>()?)
            };
            if let Outcome::ThemeChanged(t) = app.apply(cmd)? {
                println!("Theme set to {}", t.as_str());
            }
        }
        Some(("emi-policy", sub)) => {
            let policy = sub
                .get_one::<String>("policy")
                .unwrap()
                .parse::<InstallmentPolicy>()?;
            app.apply(Command::SetInstallmentPolicy(policy))?;
            println!("EMI policy set to {}", policy.as_str());
        }
        Some(("show", sub)) => show(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(app: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let prefs = app.store().preferences();
    let v = json!({
        "currency": prefs.currency.code(),
        "theme": prefs.theme.as_str(),
        "emiPolicy": prefs.installment_policy.as_str(),
        "monthlyBudget": app.store().budget().to_string(),
    });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Setting", "Value"],
            vec![
                vec![
                    "currency".into(),
                    format!("{} ({})", prefs.currency.code(), prefs.currency.symbol()),
                ],
                vec!["theme".into(), prefs.theme.as_str().into()],
                vec!["emi-policy".into(), prefs.installment_policy.as_str().into()],
                vec![
                    "monthly budget".into(),
                    prefs.currency.fmt_money(app.store().budget()),
                ],
            ],
        )
    );
    Ok(())
}

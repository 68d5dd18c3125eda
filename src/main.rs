// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use pocketledger::app::AppState;
use pocketledger::db::{self, SqliteStore};
use pocketledger::storage::{KeyValueStore, UnavailableStore};
use pocketledger::store::RecordStore;
use pocketledger::{cli, commands, logging};

fn open_storage(db_override: Option<&PathBuf>) -> Box<dyn KeyValueStore> {
    let opened = db::db_path(db_override.map(|p| p.as_path()))
        .and_then(|path| SqliteStore::open(&path));
    match opened {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "database unavailable, continuing read-only");
            eprintln!("warning: {:#}; changes will not be saved", err);
            Box::new(UnavailableStore::new(format!("{:#}", err)))
        }
    }
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init_tracing(matches.get_count("verbose"));
    let db_override = matches.get_one::<PathBuf>("db");

    if let Some(("init", _)) = matches.subcommand() {
        let path = db::db_path(db_override.map(|p| p.as_path()))?;
        db::open_or_init(&path)?;
        println!("Database initialized at {}", path.display());
        return Ok(());
    }

    let store = RecordStore::load(open_storage(db_override)).context("Load records")?;
    let mut app = AppState::new(store);

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("emi", sub)) => commands::emis::handle(&mut app, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut app, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&app, sub)?,
        Some(("chart", sub)) => commands::reports::chart(&app, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if app.store().is_degraded() {
        bail!("Storage write failed; this change was kept in memory only and is not saved");
    }
    Ok(())
}

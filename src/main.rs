// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use spendboard::dashboard::Dashboard;
use spendboard::{cli, commands, db};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "spendboard=warn",
        1 => "spendboard=info",
        _ => "spendboard=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let store = db::SqliteStore::open(&path)?;
    tracing::debug!(path = %path.display(), "opened database");
    let mut board = Dashboard::new(store);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut board, sub)?,
        Some(("income", sub)) => commands::income::handle(&mut board, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&board, sub)?,
        Some(("chart", sub)) => commands::reports::chart(&board, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&board, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

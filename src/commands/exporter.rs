// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::store::{IncomeStore, TransactionStore};
use crate::utils::required_arg;
use anyhow::{Context, Result, bail};

pub fn handle<S>(board: &Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    let rows = board.transactions()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "specification",
                "kind",
                "payment_method",
                "category",
                "amount",
                "paid",
                "description",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.specification.key().to_string(),
                    t.kind.key().to_string(),
                    t.payment_method.key().to_string(),
                    t.category.key().to_string(),
                    t.amount.to_string(),
                    t.paid.to_string(),
                    t.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        // Same shape the models deserialize from, so an export reads back losslessly.
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(count = rows.len(), %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

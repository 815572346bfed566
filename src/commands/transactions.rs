// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::editing::{Field, FieldValue};
use crate::models::{NewTransaction, Transaction};
use crate::store::{IncomeStore, TransactionStore};
use crate::utils::{
    fmt_money, fmt_paid, maybe_print_json, parse_date, parse_decimal, pretty_table, required_arg,
};
use anyhow::{Context, Result, anyhow};

pub fn handle<S>(board: &mut Dashboard<S>, m: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    match m.subcommand() {
        Some(("add", sub)) => add(board, sub)?,
        Some(("list", sub)) => list(board, sub)?,
        Some(("edit", sub)) => edit(board, sub)?,
        Some(("pay", sub)) => pay(board, sub)?,
        Some(("rm", sub)) => rm(board, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the new transaction from `tx add` arguments; unset options keep the
/// add-form defaults.
pub fn new_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let mut new = NewTransaction {
        amount: parse_decimal(required_arg(sub, "amount")?)?,
        ..NewTransaction::default()
    };
    if let Some(d) = sub.get_one::<String>("date") {
        new.date = parse_date(d)?;
    }
    if let Some(s) = sub.get_one::<String>("spec") {
        new.specification = s.parse()?;
    }
    if let Some(k) = sub.get_one::<String>("kind") {
        new.kind = k.parse()?;
    }
    if let Some(p) = sub.get_one::<String>("payment") {
        new.payment_method = p.parse()?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        new.category = c.parse()?;
    }
    new.paid = sub.get_flag("paid");
    if let Some(d) = sub.get_one::<String>("description") {
        new.description = d.trim().to_string();
    }
    Ok(new)
}

fn add<S>(board: &mut Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let new = new_from_args(sub)?;
    let (amount, date, category) = (new.amount, new.date, new.category);
    let id = board.add(new)?;
    println!(
        "Recorded {} on {} ({}) as {}",
        fmt_money(&amount),
        date,
        category,
        id
    );
    Ok(())
}

pub fn table_rows(data: &[Transaction]) -> Vec<Vec<String>> {
    data.iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.date.to_string(),
                t.specification.to_string(),
                t.kind.to_string(),
                t.payment_method.to_string(),
                t.category.to_string(),
                fmt_money(&t.amount),
                fmt_paid(t.paid).to_string(),
                t.description.clone(),
            ]
        })
        .collect()
}

fn list<S>(board: &mut Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let data = board.transactions()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No transactions recorded yet. Add one with `spendboard tx add`.");
            return Ok(());
        }
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Specification",
                    "Type",
                    "Payment",
                    "Category",
                    "Amount",
                    "Paid",
                    "Description"
                ],
                table_rows(&data),
            )
        );
    }
    Ok(())
}

/// Parses `field=value` into a typed draft value.
pub fn parse_assignment(raw: &str) -> Result<FieldValue> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{}'", raw))?;
    let field: Field = field.parse()?;
    Ok(field.parse_value(value)?)
}

fn edit<S>(board: &mut Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let id = required_arg(sub, "id")?.trim();
    let assignments: Vec<FieldValue> = sub
        .get_many::<String>("set")
        .into_iter()
        .flatten()
        .map(|s| parse_assignment(s))
        .collect::<Result<_>>()?;

    board.begin_edit(id)?;
    for value in assignments {
        if let Err(err) = board.set_draft_field(id, value) {
            board.cancel(id);
            return Err(err.into());
        }
    }

    if sub.get_flag("dry_run") {
        let rows = board.transactions()?;
        let mut data = Vec::new();
        if let Some(draft) = board.editor().draft(id) {
            let current = rows
                .iter()
                .find(|t| t.id == id)
                .with_context(|| format!("Transaction '{}' not found", id))?;
            for field in draft.touched() {
                data.push(vec![
                    field.to_string(),
                    field.of(current).to_string(),
                    draft.value(field, current).to_string(),
                ]);
            }
        }
        board.cancel(id);
        println!("{}", pretty_table(&["Field", "Current", "Draft"], data));
        println!("Dry run: nothing saved");
        return Ok(());
    }

    board.commit(id)?;
    println!("Updated {}", id);
    Ok(())
}

fn pay<S>(board: &mut Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let id = required_arg(sub, "id")?.trim();
    let paid = !sub.get_flag("unpaid");
    board.toggle_paid(id, paid)?;
    println!("Marked {} as {}", id, if paid { "paid" } else { "unpaid" });
    Ok(())
}

fn rm<S>(board: &mut Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let id = required_arg(sub, "id")?.trim();
    board.remove(id)?;
    println!("Removed {}", id);
    Ok(())
}

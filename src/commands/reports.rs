// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::store::{IncomeStore, TransactionStore};
use crate::summary::{GroupBy, GroupShare, essential_split, group_totals_by, with_shares};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, required_arg};
use anyhow::{Result, bail};

pub fn summary<S>(board: &Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let overview = board.overview()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &overview)? {
        return Ok(());
    }
    let s = &overview.summary;
    let data = vec![
        vec!["Income".to_string(), fmt_money(&s.income)],
        vec!["Total spent".to_string(), fmt_money(&s.total_spent)],
        vec!["Balance".to_string(), fmt_money(&s.balance)],
        vec!["Essential".to_string(), fmt_money(&s.essential_spent)],
        vec!["Non-essential".to_string(), fmt_money(&s.non_essential_spent)],
        vec!["Paid".to_string(), fmt_money(&s.paid_total)],
        vec!["Pending".to_string(), fmt_money(&s.pending_total)],
    ];
    println!("{}", pretty_table(&["", "Amount"], data));
    for line in &overview.status.messages {
        println!("{}", line);
    }
    Ok(())
}

/// Breakdown named on the command line, with whole-number shares.
pub fn chart_rows<S>(board: &Dashboard<S>, by: &str) -> Result<Vec<GroupShare>>
where
    S: TransactionStore + IncomeStore,
{
    let rows = board.transactions()?;
    let groups = match by {
        "category" => group_totals_by(&rows, GroupBy::Category),
        "payment" => group_totals_by(&rows, GroupBy::PaymentMethod),
        "specification" => group_totals_by(&rows, GroupBy::Specification),
        "essential" => essential_split(&board.summary()?),
        other => bail!("Unknown breakdown '{}'", other),
    };
    Ok(with_shares(&groups))
}

pub fn chart<S>(board: &Dashboard<S>, sub: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    let by = required_arg(sub, "by")?;
    let mut shares = chart_rows(board, by)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        shares.truncate(*limit);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        return Ok(());
    }
    if shares.is_empty() {
        println!("Add transactions to see the breakdown.");
        return Ok(());
    }
    let data: Vec<Vec<String>> = shares
        .iter()
        .map(|g| {
            vec![
                g.label.clone(),
                fmt_money(&g.total),
                format!("{}%", g.percent),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Group", "Total", "Share"], data));
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::Dashboard;
use crate::store::{IncomeStore, TransactionStore};
use crate::utils::{fmt_money, parse_decimal, required_arg};
use anyhow::Result;

pub fn handle<S>(board: &mut Dashboard<S>, m: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + IncomeStore,
{
    match m.subcommand() {
        Some(("set", sub)) => {
            let income = parse_decimal(required_arg(sub, "amount")?)?;
            board.set_income(income)?;
            println!("Monthly income set to {}", fmt_money(&income));
        }
        Some(("show", _)) => {
            println!("{}", fmt_money(&board.income()?));
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals, breakdowns and status lines derived from the transaction list.
//!
//! Everything here is recomputed from scratch on each call; nothing is cached
//! or maintained incrementally.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{SpendKind, Transaction};

/// Share of total spending that may go to essentials and still meet the target.
pub const ESSENTIAL_TARGET: Decimal = Decimal::from_parts(70, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub income: Decimal,
    pub total_spent: Decimal,
    pub essential_spent: Decimal,
    pub non_essential_spent: Decimal,
    pub balance: Decimal,
    pub paid_total: Decimal,
    pub pending_total: Decimal,
}

fn sum_where(transactions: &[Transaction], pred: impl Fn(&Transaction) -> bool) -> Decimal {
    transactions
        .iter()
        .filter(|t| pred(t))
        .map(|t| t.amount)
        .sum()
}

pub fn compute_summary(transactions: &[Transaction], income: Decimal) -> FinancialSummary {
    let total_spent = sum_where(transactions, |_| true);
    FinancialSummary {
        income,
        total_spent,
        essential_spent: sum_where(transactions, |t| t.kind == SpendKind::Essential),
        non_essential_spent: sum_where(transactions, |t| t.kind == SpendKind::NonEssential),
        balance: income - total_spent,
        paid_total: sum_where(transactions, |t| t.paid),
        pending_total: sum_where(transactions, |t| !t.paid),
    }
}

/// Field a breakdown is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    PaymentMethod,
    Specification,
}

impl GroupBy {
    fn label_of(&self, t: &Transaction) -> &'static str {
        match self {
            GroupBy::Category => t.category.label(),
            GroupBy::PaymentMethod => t.payment_method.label(),
            GroupBy::Specification => t.specification.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub label: String,
    pub total: Decimal,
}

/// Sums amounts per distinct key. Groups are listed in order of first
/// appearance in `transactions`.
pub fn group_totals_by(transactions: &[Transaction], by: GroupBy) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    for t in transactions {
        let label = by.label_of(t);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(g) => g.total += t.amount,
            None => groups.push(GroupTotal {
                label: label.to_string(),
                total: t.amount,
            }),
        }
    }
    groups
}

/// Essential vs non-essential, always both rows and in that order.
pub fn essential_split(summary: &FinancialSummary) -> Vec<GroupTotal> {
    vec![
        GroupTotal {
            label: SpendKind::Essential.label().to_string(),
            total: summary.essential_spent,
        },
        GroupTotal {
            label: SpendKind::NonEssential.label().to_string(),
            total: summary.non_essential_spent,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupShare {
    pub label: String,
    pub total: Decimal,
    /// Whole-number percentage of the grand total.
    pub percent: Decimal,
}

pub fn with_shares(groups: &[GroupTotal]) -> Vec<GroupShare> {
    let grand: Decimal = groups.iter().map(|g| g.total).sum();
    groups
        .iter()
        .map(|g| GroupShare {
            label: g.label.clone(),
            total: g.total,
            percent: if grand.is_zero() {
                Decimal::ZERO
            } else {
                (g.total / grand * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            },
        })
        .collect()
}

/// The four breakdowns the dashboard charts draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartTables {
    pub by_category: Vec<GroupTotal>,
    pub essential_split: Vec<GroupTotal>,
    pub by_payment_method: Vec<GroupTotal>,
    pub by_specification: Vec<GroupTotal>,
}

pub fn chart_tables(transactions: &[Transaction], summary: &FinancialSummary) -> ChartTables {
    ChartTables {
        by_category: group_totals_by(transactions, GroupBy::Category),
        essential_split: essential_split(summary),
        by_payment_method: group_totals_by(transactions, GroupBy::PaymentMethod),
        by_specification: group_totals_by(transactions, GroupBy::Specification),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStatus {
    Positive,
    Negative,
    Zero,
}

impl BalanceStatus {
    pub fn of(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            BalanceStatus::Positive
        } else if balance < Decimal::ZERO {
            BalanceStatus::Negative
        } else {
            BalanceStatus::Zero
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BalanceStatus::Positive => "Positive balance!",
            BalanceStatus::Negative => "Negative balance!",
            BalanceStatus::Zero => "Balance is zero!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    AllPaid,
    NonePaid,
    SomePending,
}

impl PaymentStatus {
    /// An empty list is `NonePaid`, never `AllPaid`.
    pub fn of(transactions: &[Transaction]) -> Self {
        if !transactions.is_empty() && transactions.iter().all(|t| t.paid) {
            PaymentStatus::AllPaid
        } else if transactions.iter().all(|t| !t.paid) {
            PaymentStatus::NonePaid
        } else {
            PaymentStatus::SomePending
        }
    }

    /// `has_transactions` only matters for `NonePaid`: with nothing recorded
    /// the line stays on the neutral "pending" wording.
    pub fn message(&self, has_transactions: bool) -> &'static str {
        match self {
            PaymentStatus::AllPaid => "All purchases paid!",
            PaymentStatus::NonePaid if has_transactions => "No purchases paid!",
            PaymentStatus::NonePaid | PaymentStatus::SomePending => "Some purchases pending!",
        }
    }
}

/// Essential share of total spending, or `None` when nothing was spent.
pub fn essential_ratio(summary: &FinancialSummary) -> Option<Decimal> {
    if summary.total_spent.is_zero() {
        None
    } else {
        Some(summary.essential_spent / summary.total_spent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EssentialTarget {
    WithinTarget,
    OverTarget,
}

impl EssentialTarget {
    /// No spending at all counts as within target.
    pub fn of(summary: &FinancialSummary) -> Self {
        match essential_ratio(summary) {
            Some(r) if r > ESSENTIAL_TARGET => EssentialTarget::OverTarget,
            _ => EssentialTarget::WithinTarget,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EssentialTarget::WithinTarget => "Essential spending target met!",
            EssentialTarget::OverTarget => "Essential spending above target!",
        }
    }
}

/// The three status lines shown under the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub balance: BalanceStatus,
    pub payments: PaymentStatus,
    pub essential: EssentialTarget,
    pub messages: Vec<String>,
}

pub fn status_report(transactions: &[Transaction], summary: &FinancialSummary) -> StatusReport {
    let balance = BalanceStatus::of(summary.balance);
    let payments = PaymentStatus::of(transactions);
    let essential = EssentialTarget::of(summary);
    StatusReport {
        balance,
        payments,
        essential,
        messages: vec![
            balance.message().to_string(),
            payments.message(!transactions.is_empty()).to_string(),
            essential.message().to_string(),
        ],
    }
}

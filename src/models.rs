// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SpendError;

/// Declares a closed set of tags with a stable kebab-case name (storage,
/// serde, CLI) and a display label.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $key)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = SpendError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key().eq_ignore_ascii_case(s) || v.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        SpendError::InvalidField(format!(
                            "unknown {} '{}'",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}

labelled_enum!(
    /// Budget purpose of a transaction.
    Specification {
        FixedExpense => ("fixed-expense", "Fixed expense"),
        Education => ("education", "Education"),
        InvestmentSavings => ("investment-savings", "Investment/Savings"),
        Goal1 => ("goal-1", "Goal 1"),
        Goal2 => ("goal-2", "Goal 2"),
        EmergencyReserve => ("emergency-reserve", "Emergency reserve"),
        Urgency => ("urgency", "Urgency"),
        Other => ("other", "Other"),
    }
);

labelled_enum!(
    /// Essential or non-essential spending; drives the essential target.
    SpendKind {
        Essential => ("essential", "Essential"),
        NonEssential => ("non-essential", "Non-essential"),
    }
);

labelled_enum!(
    PaymentMethod {
        Credit => ("credit", "Credit"),
        Debit => ("debit", "Debit"),
        PixCash => ("pix-cash", "Pix/Cash"),
        Investment => ("investment", "Investment"),
    }
);

labelled_enum!(
    Category {
        Gym => ("gym", "Gym"),
        Food => ("food", "Food"),
        Rideshare => ("rideshare", "Rideshare"),
        Groceries => ("groceries", "Groceries"),
        Installment => ("installment", "Installment"),
        Bills => ("bills", "Bills"),
        Subscriptions => ("subscriptions", "Subscriptions"),
        Education => ("education", "Education"),
        Electronics => ("electronics", "Electronics"),
        Clothing => ("clothing", "Clothing"),
        Restaurant => ("restaurant", "Restaurant"),
        Leisure => ("leisure", "Leisure"),
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub specification: Specification,
    pub kind: SpendKind,
    pub payment_method: PaymentMethod,
    pub category: Category,
    pub amount: Decimal,
    pub paid: bool,
    pub description: String,
}

impl Transaction {
    pub fn from_new(id: impl Into<String>, new: NewTransaction) -> Self {
        Transaction {
            id: id.into(),
            date: new.date,
            specification: new.specification,
            kind: new.kind,
            payment_method: new.payment_method,
            category: new.category,
            amount: new.amount,
            paid: new.paid,
            description: new.description,
        }
    }

    /// Editable fields, without the id.
    pub fn fields(&self) -> NewTransaction {
        NewTransaction {
            date: self.date,
            specification: self.specification,
            kind: self.kind,
            payment_method: self.payment_method,
            category: self.category,
            amount: self.amount,
            paid: self.paid,
            description: self.description.clone(),
        }
    }
}

/// A transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub specification: Specification,
    pub kind: SpendKind,
    pub payment_method: PaymentMethod,
    pub category: Category,
    pub amount: Decimal,
    pub paid: bool,
    pub description: String,
}

impl Default for NewTransaction {
    fn default() -> Self {
        NewTransaction {
            date: chrono::Local::now().date_naive(),
            specification: Specification::Other,
            kind: SpendKind::NonEssential,
            payment_method: PaymentMethod::PixCash,
            category: Category::Food,
            amount: Decimal::ZERO,
            paid: false,
            description: String::new(),
        }
    }
}

impl NewTransaction {
    /// Amount must be strictly positive when a transaction is created.
    pub fn validate(&self) -> Result<(), SpendError> {
        if self.amount <= Decimal::ZERO {
            return Err(SpendError::ValidationRejected(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Partial update. Present fields overwrite; the amount is not re-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub specification: Option<Specification>,
    pub kind: Option<SpendKind>,
    pub payment_method: Option<PaymentMethod>,
    pub category: Option<Category>,
    pub amount: Option<Decimal>,
    pub paid: Option<bool>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn paid(paid: bool) -> Self {
        TransactionPatch {
            paid: Some(paid),
            ..Default::default()
        }
    }

    pub fn apply(&self, t: &mut Transaction) {
        if let Some(d) = self.date {
            t.date = d;
        }
        if let Some(s) = self.specification {
            t.specification = s;
        }
        if let Some(k) = self.kind {
            t.kind = k;
        }
        if let Some(p) = self.payment_method {
            t.payment_method = p;
        }
        if let Some(c) = self.category {
            t.category = c;
        }
        if let Some(a) = self.amount {
            t.amount = a;
        }
        if let Some(p) = self.paid {
            t.paid = p;
        }
        if let Some(ref d) = self.description {
            t.description = d.clone();
        }
    }
}

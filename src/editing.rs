// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Inline row editing.
//!
//! Each transaction id is either viewing (no draft) or editing (one
//! [`DraftEdit`]). Drafts are independent per id; several rows may be open at
//! once. Only [`RowEditor::commit`] and the viewing branch of
//! [`RowEditor::toggle_paid`] write to the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{SpendError, SpendResult};
use crate::models::{
    Category, NewTransaction, PaymentMethod, SpendKind, Specification, Transaction,
    TransactionPatch,
};
use crate::store::TransactionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Specification,
    Kind,
    PaymentMethod,
    Category,
    Amount,
    Paid,
    Description,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::Date,
        Field::Specification,
        Field::Kind,
        Field::PaymentMethod,
        Field::Category,
        Field::Amount,
        Field::Paid,
        Field::Description,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Specification => "specification",
            Field::Kind => "kind",
            Field::PaymentMethod => "payment_method",
            Field::Category => "category",
            Field::Amount => "amount",
            Field::Paid => "paid",
            Field::Description => "description",
        }
    }

    /// Turns user input into a value for this field.
    pub fn parse_value(&self, raw: &str) -> SpendResult<FieldValue> {
        let bad = |what: &str| SpendError::InvalidField(format!("{} '{}' for {}", what, raw, self));
        let v = match self {
            Field::Date => FieldValue::Date(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| bad("invalid date (expected YYYY-MM-DD)"))?,
            ),
            Field::Specification => FieldValue::Specification(raw.parse()?),
            Field::Kind => FieldValue::Kind(raw.parse()?),
            Field::PaymentMethod => FieldValue::PaymentMethod(raw.parse()?),
            Field::Category => FieldValue::Category(raw.parse()?),
            Field::Amount => FieldValue::Amount(
                raw.trim()
                    .parse::<Decimal>()
                    .map_err(|_| bad("invalid amount"))?,
            ),
            Field::Paid => FieldValue::Paid(match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => true,
                "false" | "no" | "n" | "0" => false,
                _ => return Err(bad("invalid flag")),
            }),
            Field::Description => FieldValue::Description(raw.to_string()),
        };
        Ok(v)
    }

    /// This field's value on a stored transaction.
    pub fn of(&self, t: &Transaction) -> FieldValue {
        self.read(&t.fields())
    }

    fn read(&self, t: &NewTransaction) -> FieldValue {
        match self {
            Field::Date => FieldValue::Date(t.date),
            Field::Specification => FieldValue::Specification(t.specification),
            Field::Kind => FieldValue::Kind(t.kind),
            Field::PaymentMethod => FieldValue::PaymentMethod(t.payment_method),
            Field::Category => FieldValue::Category(t.category),
            Field::Amount => FieldValue::Amount(t.amount),
            Field::Paid => FieldValue::Paid(t.paid),
            Field::Description => FieldValue::Description(t.description.clone()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = SpendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == norm)
            .ok_or_else(|| SpendError::InvalidField(format!("unknown field '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    Specification(Specification),
    Kind(SpendKind),
    PaymentMethod(PaymentMethod),
    Category(Category),
    Amount(Decimal),
    Paid(bool),
    Description(String),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Date(_) => Field::Date,
            FieldValue::Specification(_) => Field::Specification,
            FieldValue::Kind(_) => Field::Kind,
            FieldValue::PaymentMethod(_) => Field::PaymentMethod,
            FieldValue::Category(_) => Field::Category,
            FieldValue::Amount(_) => Field::Amount,
            FieldValue::Paid(_) => Field::Paid,
            FieldValue::Description(_) => Field::Description,
        }
    }

    fn write_to(self, t: &mut NewTransaction) {
        match self {
            FieldValue::Date(v) => t.date = v,
            FieldValue::Specification(v) => t.specification = v,
            FieldValue::Kind(v) => t.kind = v,
            FieldValue::PaymentMethod(v) => t.payment_method = v,
            FieldValue::Category(v) => t.category = v,
            FieldValue::Amount(v) => t.amount = v,
            FieldValue::Paid(v) => t.paid = v,
            FieldValue::Description(v) => t.description = v,
        }
    }

    fn write_patch(self, p: &mut TransactionPatch) {
        match self {
            FieldValue::Date(v) => p.date = Some(v),
            FieldValue::Specification(v) => p.specification = Some(v),
            FieldValue::Kind(v) => p.kind = Some(v),
            FieldValue::PaymentMethod(v) => p.payment_method = Some(v),
            FieldValue::Category(v) => p.category = Some(v),
            FieldValue::Amount(v) => p.amount = Some(v),
            FieldValue::Paid(v) => p.paid = Some(v),
            FieldValue::Description(v) => p.description = Some(v),
        }
    }

    /// Text rendering for text-like fields (dates, tags, description).
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Date(d) => Some(d.to_string()),
            FieldValue::Specification(v) => Some(v.label().to_string()),
            FieldValue::Kind(v) => Some(v.label().to_string()),
            FieldValue::PaymentMethod(v) => Some(v.label().to_string()),
            FieldValue::Category(v) => Some(v.label().to_string()),
            FieldValue::Description(s) => Some(s.clone()),
            FieldValue::Amount(_) | FieldValue::Paid(_) => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Paid(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Amount(a) => write!(f, "{}", a),
            FieldValue::Paid(p) => write!(f, "{}", p),
            other => f.write_str(&other.as_text().unwrap_or_default()),
        }
    }
}

/// Uncommitted edit of one transaction: a copy of its fields taken when
/// editing began, plus the set of fields changed since. Only touched fields
/// are shown from the draft or written on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEdit {
    values: NewTransaction,
    touched: BTreeSet<Field>,
}

impl DraftEdit {
    fn seeded_from(t: &Transaction) -> Self {
        DraftEdit {
            values: t.fields(),
            touched: BTreeSet::new(),
        }
    }

    fn set(&mut self, value: FieldValue) {
        self.touched.insert(value.field());
        value.write_to(&mut self.values);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn touched(&self) -> impl Iterator<Item = Field> + '_ {
        self.touched.iter().copied()
    }

    /// Patch carrying only the touched fields.
    pub fn patch(&self) -> TransactionPatch {
        let mut patch = TransactionPatch::default();
        for field in self.touched() {
            field.read(&self.values).write_patch(&mut patch);
        }
        patch
    }

    /// The draft override when the field was changed, else `current`'s value.
    pub fn value(&self, field: Field, current: &Transaction) -> FieldValue {
        if self.is_touched(field) {
            field.read(&self.values)
        } else {
            field.of(current)
        }
    }
}

/// Per-row edit state for a transaction table.
#[derive(Debug, Default, Clone)]
pub struct RowEditor {
    drafts: HashMap<String, DraftEdit>,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn draft(&self, id: &str) -> Option<&DraftEdit> {
        self.drafts.get(id)
    }

    /// Opens a draft seeded from the stored transaction. An id that is already
    /// being edited keeps its draft.
    pub fn begin_edit<S>(&mut self, store: &S, id: &str) -> SpendResult<()>
    where
        S: TransactionStore + ?Sized,
    {
        if self.is_editing(id) {
            return Ok(());
        }
        let current = store.get(id)?;
        self.drafts
            .insert(id.to_string(), DraftEdit::seeded_from(&current));
        Ok(())
    }

    /// Changes one draft field. The store is not touched.
    pub fn set_draft_field(&mut self, id: &str, value: FieldValue) -> SpendResult<()> {
        let draft = self
            .drafts
            .get_mut(id)
            .ok_or_else(|| SpendError::NotEditing(id.to_string()))?;
        draft.set(value);
        Ok(())
    }

    /// Writes the touched draft fields to the store and closes the draft. When
    /// the store no longer has the row, nothing changes and the draft stays open.
    pub fn commit<S>(&mut self, store: &mut S, id: &str) -> SpendResult<()>
    where
        S: TransactionStore + ?Sized,
    {
        let draft = self
            .drafts
            .get(id)
            .ok_or_else(|| SpendError::NotEditing(id.to_string()))?;
        store.update(id, &draft.patch())?;
        self.drafts.remove(id);
        Ok(())
    }

    /// Drops the draft. Returns whether there was one.
    pub fn cancel(&mut self, id: &str) -> bool {
        self.drafts.remove(id).is_some()
    }

    /// Viewing rows are written straight to the store; editing rows only get
    /// their draft updated.
    pub fn toggle_paid<S>(&mut self, store: &mut S, id: &str, paid: bool) -> SpendResult<()>
    where
        S: TransactionStore + ?Sized,
    {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.set(FieldValue::Paid(paid));
                Ok(())
            }
            None => store.update(id, &TransactionPatch::paid(paid)),
        }
    }

    /// Value to display for `field` of row `id`: the draft override when one
    /// exists, else the transaction's current value. `None` for unknown ids.
    pub fn field_value(
        &self,
        transactions: &[Transaction],
        id: &str,
        field: Field,
    ) -> Option<FieldValue> {
        let current = transactions.iter().find(|t| t.id == id);
        match (self.drafts.get(id), current) {
            (Some(d), Some(t)) => Some(d.value(field, t)),
            (Some(d), None) => Some(field.read(&d.values)),
            (None, Some(t)) => Some(field.of(t)),
            (None, None) => None,
        }
    }

    pub fn text_value(&self, transactions: &[Transaction], id: &str, field: Field) -> String {
        self.field_value(transactions, id, field)
            .and_then(|v| v.as_text())
            .unwrap_or_default()
    }

    pub fn amount_value(&self, transactions: &[Transaction], id: &str, field: Field) -> Decimal {
        self.field_value(transactions, id, field)
            .and_then(|v| v.as_amount())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn flag_value(&self, transactions: &[Transaction], id: &str, field: Field) -> bool {
        self.field_value(transactions, id, field)
            .and_then(|v| v.as_flag())
            .unwrap_or(false)
    }
}

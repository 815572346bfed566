// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::{SpendError, SpendResult};
use crate::models::{NewTransaction, Transaction, TransactionPatch};

/// Monthly income used when none has been saved yet.
pub const DEFAULT_INCOME: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Where transactions live. Lists come back in insertion order.
pub trait TransactionStore {
    fn list(&self) -> SpendResult<Vec<Transaction>>;

    /// Stores a new transaction and returns its generated id. Non-positive
    /// amounts are rejected and leave the store untouched.
    fn insert(&mut self, new: NewTransaction) -> SpendResult<String>;

    fn update(&mut self, id: &str, patch: &TransactionPatch) -> SpendResult<()>;

    fn remove(&mut self, id: &str) -> SpendResult<()>;

    fn get(&self, id: &str) -> SpendResult<Transaction> {
        self.list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SpendError::NotFound(id.to_string()))
    }
}

/// Where the monthly income setting lives.
pub trait IncomeStore {
    fn income(&self) -> SpendResult<Decimal>;
    fn set_income(&mut self, income: Decimal) -> SpendResult<()>;
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Vec-backed store, used by tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rows: Vec<Transaction>,
    income: Decimal,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            rows: Vec::new(),
            income: DEFAULT_INCOME,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IncomeStore for MemoryStore {
    fn income(&self) -> SpendResult<Decimal> {
        Ok(self.income)
    }

    fn set_income(&mut self, income: Decimal) -> SpendResult<()> {
        self.income = income;
        Ok(())
    }
}

impl TransactionStore for MemoryStore {
    fn list(&self) -> SpendResult<Vec<Transaction>> {
        Ok(self.rows.clone())
    }

    fn insert(&mut self, new: NewTransaction) -> SpendResult<String> {
        new.validate()?;
        let id = new_id();
        self.rows.push(Transaction::from_new(id.clone(), new));
        Ok(id)
    }

    fn update(&mut self, id: &str, patch: &TransactionPatch) -> SpendResult<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SpendError::NotFound(id.to_string()))?;
        patch.apply(row);
        Ok(())
    }

    fn remove(&mut self, id: &str) -> SpendResult<()> {
        let pos = self
            .rows
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SpendError::NotFound(id.to_string()))?;
        self.rows.remove(pos);
        Ok(())
    }

    fn get(&self, id: &str) -> SpendResult<Transaction> {
        self.rows
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| SpendError::NotFound(id.to_string()))
    }
}

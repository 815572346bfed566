// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::editing::{Field, FieldValue, RowEditor};
use crate::error::SpendResult;
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::store::{IncomeStore, TransactionStore};
use crate::summary::{
    ChartTables, FinancialSummary, StatusReport, chart_tables, compute_summary, status_report,
};

/// Everything the summary screen shows, computed in one pass over the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub summary: FinancialSummary,
    pub status: StatusReport,
    pub charts: ChartTables,
}

/// Owns the store and the per-row edit state, and runs every user command
/// against them one at a time.
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    editor: RowEditor,
}

impl<S> Dashboard<S>
where
    S: TransactionStore + IncomeStore,
{
    pub fn new(store: S) -> Self {
        Dashboard {
            store,
            editor: RowEditor::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn editor(&self) -> &RowEditor {
        &self.editor
    }

    pub fn transactions(&self) -> SpendResult<Vec<Transaction>> {
        self.store.list()
    }

    pub fn income(&self) -> SpendResult<Decimal> {
        self.store.income()
    }

    /// Income is taken as given; zero and negative values are allowed.
    pub fn set_income(&mut self, income: Decimal) -> SpendResult<()> {
        self.store.set_income(income)?;
        tracing::info!(%income, "income updated");
        Ok(())
    }

    pub fn add(&mut self, new: NewTransaction) -> SpendResult<String> {
        match self.store.insert(new) {
            Ok(id) => {
                tracing::info!(%id, "transaction added");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!("add rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> SpendResult<()> {
        self.store.update(id, patch)?;
        tracing::info!(%id, "transaction updated");
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> SpendResult<()> {
        self.store.remove(id)?;
        if self.editor.cancel(id) {
            tracing::debug!(%id, "dropped draft of removed transaction");
        }
        tracing::info!(%id, "transaction removed");
        Ok(())
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editor.is_editing(id)
    }

    pub fn begin_edit(&mut self, id: &str) -> SpendResult<()> {
        self.editor.begin_edit(&self.store, id)?;
        tracing::debug!(%id, "editing");
        Ok(())
    }

    pub fn set_draft_field(&mut self, id: &str, value: FieldValue) -> SpendResult<()> {
        let field = value.field();
        self.editor.set_draft_field(id, value)?;
        tracing::debug!(%id, %field, "draft field set");
        Ok(())
    }

    pub fn commit(&mut self, id: &str) -> SpendResult<()> {
        self.editor.commit(&mut self.store, id)?;
        tracing::info!(%id, "edit committed");
        Ok(())
    }

    pub fn cancel(&mut self, id: &str) {
        if self.editor.cancel(id) {
            tracing::debug!(%id, "edit cancelled");
        }
    }

    pub fn toggle_paid(&mut self, id: &str, paid: bool) -> SpendResult<()> {
        let deferred = self.editor.is_editing(id);
        self.editor.toggle_paid(&mut self.store, id, paid)?;
        tracing::info!(%id, paid, deferred, "paid flag set");
        Ok(())
    }

    pub fn field_value(&self, id: &str, field: Field) -> SpendResult<Option<FieldValue>> {
        let rows = self.store.list()?;
        Ok(self.editor.field_value(&rows, id, field))
    }

    pub fn summary(&self) -> SpendResult<FinancialSummary> {
        let rows = self.store.list()?;
        Ok(compute_summary(&rows, self.store.income()?))
    }

    pub fn overview(&self) -> SpendResult<Overview> {
        let rows = self.store.list()?;
        let summary = compute_summary(&rows, self.store.income()?);
        let status = status_report(&rows, &summary);
        let charts = chart_tables(&rows, &summary);
        Ok(Overview {
            summary,
            status,
            charts,
        })
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SpendError, SpendResult};
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::store::{DEFAULT_INCOME, IncomeStore, TransactionStore, new_id};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendboard", "spendboard"));

/// Environment variable that overrides the database location, read by clap
/// into `--db`.
pub const DB_ENV: &str = "SPENDBOARD_DB";

/// Default database location, used when `--db` is not given.
pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendboard.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> SpendResult<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- seq keeps insertion order; id is the opaque public identifier
    CREATE TABLE IF NOT EXISTS transactions(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        date TEXT NOT NULL,
        specification TEXT NOT NULL,
        kind TEXT NOT NULL,
        payment_method TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        paid INTEGER NOT NULL DEFAULT 0,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// SQLite-backed transaction store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        SqliteStore { conn }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(SqliteStore::new(open_or_init(path)?))
    }

    pub fn in_memory() -> SpendResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SqliteStore::new(conn))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, date, specification, kind, payment_method, category, amount, paid, description FROM transactions";

fn corrupt(id: &str, what: &str, value: &str) -> SpendError {
    SpendError::Corrupt(format!("{} '{}' on transaction {}", what, value, id))
}

fn decode_row(r: &Row<'_>) -> SpendResult<Transaction> {
    let id: String = r.get(0)?;
    let date_s: String = r.get(1)?;
    let spec_s: String = r.get(2)?;
    let kind_s: String = r.get(3)?;
    let pay_s: String = r.get(4)?;
    let cat_s: String = r.get(5)?;
    let amount_s: String = r.get(6)?;
    let paid: bool = r.get(7)?;
    let description: String = r.get(8)?;

    let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
        .map_err(|_| corrupt(&id, "date", &date_s))?;
    let amount = amount_s
        .parse::<Decimal>()
        .map_err(|_| corrupt(&id, "amount", &amount_s))?;
    let specification = spec_s
        .parse()
        .map_err(|_| corrupt(&id, "specification", &spec_s))?;
    let kind = kind_s.parse().map_err(|_| corrupt(&id, "kind", &kind_s))?;
    let payment_method = pay_s
        .parse()
        .map_err(|_| corrupt(&id, "payment method", &pay_s))?;
    let category = cat_s
        .parse()
        .map_err(|_| corrupt(&id, "category", &cat_s))?;
    Ok(Transaction {
        id,
        date,
        specification,
        kind,
        payment_method,
        category,
        amount,
        paid,
        description,
    })
}

impl TransactionStore for SqliteStore {
    fn list(&self) -> SpendResult<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY seq", SELECT_COLUMNS))?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(decode_row(r)?);
        }
        Ok(data)
    }

    fn insert(&mut self, new: NewTransaction) -> SpendResult<String> {
        new.validate()?;
        let id = new_id();
        self.conn.execute(
            "INSERT INTO transactions(id, date, specification, kind, payment_method, category, amount, paid, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                new.date.to_string(),
                new.specification.key(),
                new.kind.key(),
                new.payment_method.key(),
                new.category.key(),
                new.amount.to_string(),
                new.paid,
                new.description
            ],
        )?;
        tracing::debug!(%id, amount = %new.amount, "stored transaction");
        Ok(id)
    }

    fn update(&mut self, id: &str, patch: &TransactionPatch) -> SpendResult<()> {
        let mut current = self.get(id)?;
        patch.apply(&mut current);
        self.conn.execute(
            "UPDATE transactions SET date=?2, specification=?3, kind=?4, payment_method=?5,
             category=?6, amount=?7, paid=?8, description=?9 WHERE id=?1",
            params![
                id,
                current.date.to_string(),
                current.specification.key(),
                current.kind.key(),
                current.payment_method.key(),
                current.category.key(),
                current.amount.to_string(),
                current.paid,
                current.description
            ],
        )?;
        Ok(())
    }

    fn remove(&mut self, id: &str) -> SpendResult<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(SpendError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> SpendResult<Transaction> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id=?1", SELECT_COLUMNS))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => decode_row(r),
            None => Err(SpendError::NotFound(id.to_string())),
        }
    }
}

impl IncomeStore for SqliteStore {
    fn income(&self) -> SpendResult<Decimal> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key='income'", [], |r| {
                r.get(0)
            })
            .optional()?;
        match v {
            Some(s) => s
                .parse::<Decimal>()
                .map_err(|_| SpendError::Corrupt(format!("income setting '{}'", s))),
            None => Ok(DEFAULT_INCOME),
        }
    }

    fn set_income(&mut self, income: Decimal) -> SpendResult<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES('income', ?1)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![income.to_string()],
        )?;
        Ok(())
    }
}

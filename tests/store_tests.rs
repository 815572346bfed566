// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::params;
use rust_decimal::Decimal;
use spendboard::db::SqliteStore;
use spendboard::error::SpendError;
use spendboard::models::{
    Category, NewTransaction, PaymentMethod, SpendKind, Specification, TransactionPatch,
};
use spendboard::store::{DEFAULT_INCOME, IncomeStore, TransactionStore};
use tempfile::tempdir;

fn full_row() -> NewTransaction {
    NewTransaction {
        date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
        specification: Specification::EmergencyReserve,
        kind: SpendKind::Essential,
        payment_method: PaymentMethod::Investment,
        category: Category::Installment,
        amount: Decimal::new(123456, 3),
        paid: true,
        description: "Car, 3/12 \"installment\"".to_string(),
    }
}

#[test]
fn sqlite_round_trips_every_field() {
    let mut store = SqliteStore::in_memory().unwrap();
    let id = store.insert(full_row()).unwrap();
    let got = store.get(&id).unwrap();
    assert_eq!(got.id, id);
    assert_eq!(got.fields(), full_row());
}

#[test]
fn sqlite_lists_in_insertion_order() {
    let mut store = SqliteStore::in_memory().unwrap();
    let mut ids = Vec::new();
    for (day, amount) in [(20, 5), (1, 7), (11, 3)] {
        ids.push(
            store
                .insert(NewTransaction {
                    date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    amount: Decimal::new(amount, 0),
                    ..NewTransaction::default()
                })
                .unwrap(),
        );
    }
    let listed: Vec<String> = store.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn sqlite_rejects_non_positive_amounts() {
    let mut store = SqliteStore::in_memory().unwrap();
    for amount in [Decimal::ZERO, Decimal::new(-1, 0)] {
        let err = store
            .insert(NewTransaction {
                amount,
                ..NewTransaction::default()
            })
            .unwrap_err();
        assert!(matches!(err, SpendError::ValidationRejected(_)));
    }
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn sqlite_update_and_remove() {
    let mut store = SqliteStore::in_memory().unwrap();
    let id = store.insert(full_row()).unwrap();

    store
        .update(
            &id,
            &TransactionPatch {
                category: Some(Category::Electronics),
                paid: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
    let got = store.get(&id).unwrap();
    assert_eq!(got.category, Category::Electronics);
    assert!(!got.paid);
    assert_eq!(got.description, full_row().description);

    let err = store
        .update("nope", &TransactionPatch::paid(true))
        .unwrap_err();
    assert!(matches!(err, SpendError::NotFound(_)));
    assert!(matches!(store.remove("nope"), Err(SpendError::NotFound(_))));

    store.remove(&id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn income_defaults_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.sqlite");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.income().unwrap(), DEFAULT_INCOME);
        store.set_income(Decimal::new(-2500, 1)).unwrap();
        store.insert(full_row()).unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.income().unwrap(), Decimal::new(-250, 0));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn undecodable_rows_are_reported() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .conn()
        .execute(
            "INSERT INTO transactions(id, date, specification, kind, payment_method, category, amount, paid, description)
             VALUES (?1, '2025-01-01', 'other', 'essential', 'debit', 'spaceships', '10', 0, '')",
            params!["x1"],
        )
        .unwrap();
    let err = store.list().unwrap_err();
    assert!(matches!(err, SpendError::Corrupt(_)));
    assert!(err.to_string().contains("spaceships"));
}

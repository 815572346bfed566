// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendboard::dashboard::Dashboard;
use spendboard::db::SqliteStore;
use spendboard::models::{Category, PaymentMethod, SpendKind, Specification, Transaction};
use spendboard::store::{MemoryStore, TransactionStore};
use spendboard::{
    cli,
    commands::{exporter, income, reports, transactions},
};
use tempfile::tempdir;

fn run_tx<S>(board: &mut Dashboard<S>, args: &[&str]) -> anyhow::Result<()>
where
    S: TransactionStore + spendboard::store::IncomeStore,
{
    let mut argv = vec!["spendboard", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(board, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

fn only_row<S: TransactionStore>(board: &Dashboard<S>) -> Transaction
where
    S: spendboard::store::IncomeStore,
{
    let rows = board.transactions().unwrap();
    assert_eq!(rows.len(), 1);
    rows.into_iter().next().unwrap()
}

#[test]
fn tx_add_applies_form_defaults() {
    let mut board = Dashboard::new(MemoryStore::new());
    run_tx(&mut board, &["add", "--amount", "120.50", "--kind", "essential"]).unwrap();
    let t = only_row(&board);
    assert_eq!(t.amount, Decimal::new(12050, 2));
    assert_eq!(t.kind, SpendKind::Essential);
    assert_eq!(t.specification, Specification::Other);
    assert_eq!(t.payment_method, PaymentMethod::PixCash);
    assert_eq!(t.category, Category::Food);
    assert!(!t.paid);
    assert_eq!(t.description, "");
}

#[test]
fn tx_add_rejects_zero_and_bad_tags() {
    let mut board = Dashboard::new(MemoryStore::new());
    let err = run_tx(&mut board, &["add", "--amount", "0"]).unwrap_err();
    assert!(err.to_string().contains("rejected"));
    let err = run_tx(
        &mut board,
        &["add", "--amount", "5", "--category", "spaceships"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("spaceships"));
    assert!(board.transactions().unwrap().is_empty());
}

#[test]
fn tx_edit_commits_all_assignments() {
    let mut board = Dashboard::new(MemoryStore::new());
    run_tx(
        &mut board,
        &[
            "add",
            "--amount",
            "80",
            "--date",
            "2025-04-02",
            "--category",
            "Groceries",
            "--description",
            " weekly ",
        ],
    )
    .unwrap();
    let id = only_row(&board).id;

    run_tx(
        &mut board,
        &["edit", &id, "--set", "amount=50", "--set", "paid=yes"],
    )
    .unwrap();
    let t = only_row(&board);
    assert_eq!(t.amount, Decimal::new(50, 0));
    assert!(t.paid);
    assert_eq!(t.category, Category::Groceries);
    assert_eq!(t.description, "weekly");
    assert_eq!(t.date.to_string(), "2025-04-02");
    assert!(!board.is_editing(&id));
}

#[test]
fn tx_edit_dry_run_and_bad_field_change_nothing() {
    let mut board = Dashboard::new(MemoryStore::new());
    run_tx(&mut board, &["add", "--amount", "80"]).unwrap();
    let before = only_row(&board);

    run_tx(
        &mut board,
        &["edit", &before.id, "--set", "amount=1", "--dry-run"],
    )
    .unwrap();
    assert_eq!(only_row(&board), before);
    assert!(!board.is_editing(&before.id));

    let err = run_tx(&mut board, &["edit", &before.id, "--set", "colour=red"]).unwrap_err();
    assert!(err.to_string().contains("colour"));
    assert_eq!(only_row(&board), before);

    let err = run_tx(&mut board, &["edit", "missing", "--set", "amount=1"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn tx_pay_and_rm() {
    let mut board = Dashboard::new(MemoryStore::new());
    run_tx(&mut board, &["add", "--amount", "10"]).unwrap();
    let id = only_row(&board).id;

    run_tx(&mut board, &["pay", &id]).unwrap();
    assert!(only_row(&board).paid);
    run_tx(&mut board, &["pay", &id, "--unpaid"]).unwrap();
    assert!(!only_row(&board).paid);

    run_tx(&mut board, &["rm", &id]).unwrap();
    assert!(board.transactions().unwrap().is_empty());
    assert!(run_tx(&mut board, &["rm", &id]).is_err());
}

#[test]
fn income_and_chart_commands() {
    let mut board = Dashboard::new(MemoryStore::new());
    let matches = cli::build_cli().get_matches_from(["spendboard", "income", "set", "-100"]);
    if let Some(("income", m)) = matches.subcommand() {
        income::handle(&mut board, m).unwrap();
    } else {
        panic!("no income subcommand");
    }
    assert_eq!(board.income().unwrap(), Decimal::new(-100, 0));

    run_tx(&mut board, &["add", "--amount", "100", "--payment", "credit"]).unwrap();
    run_tx(&mut board, &["add", "--amount", "50", "--payment", "debit"]).unwrap();
    run_tx(&mut board, &["add", "--amount", "50", "--payment", "credit"]).unwrap();

    let shares = reports::chart_rows(&board, "payment").unwrap();
    let got: Vec<(&str, Decimal, Decimal)> = shares
        .iter()
        .map(|g| (g.label.as_str(), g.total, g.percent))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Credit", Decimal::new(150, 0), Decimal::new(75, 0)),
            ("Debit", Decimal::new(50, 0), Decimal::new(25, 0)),
        ]
    );

    let split = reports::chart_rows(&board, "essential").unwrap();
    assert_eq!(split[0].total, Decimal::ZERO);
    assert_eq!(split[1].percent, Decimal::new(100, 0));

    let overview = board.overview().unwrap();
    assert_eq!(overview.summary.balance, Decimal::new(-300, 0));
    assert_eq!(overview.status.messages[0], "Negative balance!");
}

#[test]
fn export_json_reads_back_losslessly() {
    let mut board = Dashboard::new(SqliteStore::in_memory().unwrap());
    run_tx(
        &mut board,
        &[
            "add",
            "--amount",
            "19.90",
            "--spec",
            "goal-1",
            "--category",
            "subscriptions",
            "--paid",
            "--description",
            "Streaming",
        ],
    )
    .unwrap();
    run_tx(&mut board, &["add", "--amount", "7"]).unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "spendboard",
        "export",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(&board, m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Vec<Transaction> = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed, board.transactions().unwrap());
    assert_eq!(parsed[0].specification, Specification::Goal1);
}

#[test]
fn export_csv_has_header_and_rows() {
    let mut board = Dashboard::new(MemoryStore::new());
    run_tx(&mut board, &["add", "--amount", "12.34", "--description", "a, b"]).unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();
    let matches =
        cli::build_cli().get_matches_from(["spendboard", "export", "--out", &out_str]);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(&board, m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.get(6), Some("amount"));
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(6), Some("12.34"));
    assert_eq!(rows[0].get(8), Some("a, b"));
}

#[test]
fn db_override_comes_from_the_db_flag() {
    let cmd = cli::build_cli();
    let db_arg = cmd
        .get_arguments()
        .find(|a| a.get_id() == "db")
        .expect("db arg");
    assert_eq!(
        db_arg.get_env(),
        Some(std::ffi::OsStr::new(spendboard::db::DB_ENV))
    );

    let matches =
        cli::build_cli().get_matches_from(["spendboard", "--db", "board.sqlite", "summary"]);
    assert_eq!(
        matches.get_one::<String>("db").map(String::as_str),
        Some("board.sqlite")
    );
}

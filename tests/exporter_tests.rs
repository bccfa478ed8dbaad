// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use saverly::models::{Transaction, TransactionKind};
use saverly::{cli, commands::exporter, store};
use tempfile::tempdir;

const USER: &str = "u@example.com";

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE kv(key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at TEXT NOT NULL DEFAULT (datetime('now')));",
    )
    .unwrap();
    let txns = vec![
        Transaction {
            id: "1".into(),
            kind: TransactionKind::Income,
            amount: "100".parse().unwrap(),
            description: "salary".into(),
            date: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        },
        Transaction {
            id: "2".into(),
            kind: TransactionKind::Purchase,
            amount: "19.99".parse().unwrap(),
            description: "book, used".into(),
            date: Utc.with_ymd_and_hms(2025, 3, 2, 17, 30, 0).unwrap(),
        },
    ];
    store::save_transactions(&conn, USER, &txns).unwrap();
    conn
}

#[test]
fn export_writes_csv_with_header_and_rows() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("txns.csv");
    let out_str = out.to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "saverly", "export", "--user", USER, "--out", &out_str,
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "id,type,amount,description,date");
    assert_eq!(lines.clone().count(), 2);
    assert!(content.contains("income"));
    assert!(content.contains("19.99"));
    // Comma in the description is quoted, not split
    assert!(content.contains("\"book, used\""));
}

#[test]
fn export_of_empty_user_writes_header_only() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("empty.csv");
    let out_str = out.to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "saverly",
        "export",
        "--user",
        "nobody@example.com",
        "--out",
        &out_str,
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.trim(), "id,type,amount,description,date");
}

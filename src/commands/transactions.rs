// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::store;
use crate::utils::{fmt_signed, maybe_print_json, parse_decimal, pretty_table, resolve_now};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let kind_raw = sub.get_one::<String>("type").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim();
    let date = resolve_now(sub.get_one::<String>("date"))?;

    let Some(kind) = TransactionKind::parse(kind_raw) else {
        bail!("Unknown transaction type '{}'", kind_raw);
    };
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero, got {}", amount);
    }
    if description.is_empty() {
        bail!("Description must not be empty");
    }

    let txn = Transaction {
        id: Utc::now().timestamp_millis().to_string(),
        kind,
        amount,
        description: description.to_string(),
        date,
    };
    store::append_transaction(conn, user, txn)?;
    println!(
        "Recorded {} {} '{}' on {} for {}",
        kind.as_str(),
        amount,
        description,
        date.to_rfc3339(),
        user
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user = sub.get_one::<String>("user").unwrap();
    let mut txns = store::load_transactions(conn, user)?;
    txns.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txns.truncate(*limit);
    }
    Ok(txns
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_rfc3339(),
            kind: t.kind.as_str().to_string(),
            amount: fmt_signed(t.kind, t.amount),
            description: t.description,
        })
        .collect())
}

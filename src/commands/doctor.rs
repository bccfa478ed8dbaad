// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::DateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::TransactionKind;
use crate::store;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let Some(raw) = store::raw_transactions(conn, user)? else {
        println!("No stored transactions for {}", user);
        return Ok(());
    };
    let rows = scan(&raw);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

fn decimal_of(v: &Value) -> Option<Decimal> {
    match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Scan a stored transaction list without deserializing into the domain
/// types, so every bad record is reported instead of only the first.
pub fn scan(raw: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            rows.push(vec!["invalid_json".into(), e.to_string()]);
            return rows;
        }
    };
    let Some(records) = value.as_array() else {
        rows.push(vec![
            "not_a_list".into(),
            "stored value is not a JSON array".into(),
        ]);
        return rows;
    };

    for (i, rec) in records.iter().enumerate() {
        match rec.get("id").and_then(Value::as_str) {
            Some(_) => {}
            None => rows.push(vec!["missing_id".into(), format!("record {}", i)]),
        }

        match rec.get("type").and_then(Value::as_str) {
            None => rows.push(vec!["missing_type".into(), format!("record {}", i)]),
            Some(s) if TransactionKind::parse(s).is_none() => {
                rows.push(vec!["unknown_type".into(), format!("record {}: '{}'", i, s)]);
            }
            Some(_) => {}
        }

        match rec.get("amount").map(decimal_of) {
            None | Some(None) => rows.push(vec!["bad_amount".into(), format!("record {}", i)]),
            Some(Some(d)) if d < Decimal::ZERO => {
                rows.push(vec![
                    "negative_amount".into(),
                    format!("record {}: {}", i, d),
                ]);
            }
            Some(Some(_)) => {}
        }

        match rec.get("date").and_then(Value::as_str) {
            None => rows.push(vec!["missing_date".into(), format!("record {}", i)]),
            Some(s) if DateTime::parse_from_rfc3339(s).is_err() => {
                rows.push(vec!["bad_date".into(), format!("record {}: '{}'", i, s)]);
            }
            Some(_) => {}
        }
    }

    rows
}

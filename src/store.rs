// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Transaction;

pub const NS_TRANSACTIONS: &str = "transactions";
pub const NS_WEEKLY_GOAL: &str = "weekly_goal";
pub const NS_STREAK: &str = "streak";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored transactions for '{user}' are malformed: {reason}")]
    MalformedTransactions { user: String, reason: String },
    #[error("transaction '{id}' has negative amount {amount}")]
    NegativeAmount { id: String, amount: Decimal },
    #[error("stored {field} for '{user}' is not a valid number: '{raw}'")]
    MalformedValue {
        user: String,
        field: &'static str,
        raw: String,
    },
}

pub fn key_for(namespace: &str, user: &str) -> String {
    format!("{}:{}", namespace, user)
}

fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn kv_put(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Load a user's transaction list. A missing key is an empty list; records
/// with an unknown kind or a negative amount are rejected as data errors.
pub fn load_transactions(conn: &Connection, user: &str) -> Result<Vec<Transaction>> {
    let Some(raw) = kv_get(conn, &key_for(NS_TRANSACTIONS, user))? else {
        return Ok(Vec::new());
    };
    let txns: Vec<Transaction> =
        serde_json::from_str(&raw).map_err(|e| StoreError::MalformedTransactions {
            user: user.to_string(),
            reason: e.to_string(),
        })?;
    for t in &txns {
        if t.amount < Decimal::ZERO {
            return Err(StoreError::NegativeAmount {
                id: t.id.clone(),
                amount: t.amount,
            }
            .into());
        }
    }
    Ok(txns)
}

/// Raw stored JSON for a user's list, if any. Used by the doctor scan,
/// which wants to report per-record issues instead of failing on the first.
pub fn raw_transactions(conn: &Connection, user: &str) -> Result<Option<String>> {
    kv_get(conn, &key_for(NS_TRANSACTIONS, user))
}

pub fn save_transactions(conn: &Connection, user: &str, txns: &[Transaction]) -> Result<()> {
    let raw = serde_json::to_string(txns)?;
    kv_put(conn, &key_for(NS_TRANSACTIONS, user), &raw)
}

/// Append-only: transactions are never mutated or deleted once recorded.
pub fn append_transaction(conn: &Connection, user: &str, txn: Transaction) -> Result<()> {
    let mut txns = load_transactions(conn, user)?;
    txns.push(txn);
    save_transactions(conn, user, &txns)
}

pub fn get_goal(conn: &Connection, user: &str) -> Result<Option<Decimal>> {
    match kv_get(conn, &key_for(NS_WEEKLY_GOAL, user))? {
        None => Ok(None),
        Some(raw) => {
            let goal = raw
                .parse::<Decimal>()
                .map_err(|_| StoreError::MalformedValue {
                    user: user.to_string(),
                    field: "weekly goal",
                    raw,
                })?;
            Ok(Some(goal))
        }
    }
}

pub fn set_goal(conn: &Connection, user: &str, goal: Decimal) -> Result<()> {
    kv_put(conn, &key_for(NS_WEEKLY_GOAL, user), &goal.to_string())
}

pub fn get_streak(conn: &Connection, user: &str) -> Result<u32> {
    match kv_get(conn, &key_for(NS_STREAK, user))? {
        None => Ok(0),
        Some(raw) => {
            let streak = raw.parse::<u32>().map_err(|_| StoreError::MalformedValue {
                user: user.to_string(),
                field: "streak",
                raw,
            })?;
            Ok(streak)
        }
    }
}

pub fn set_streak(conn: &Connection, user: &str, streak: u32) -> Result<()> {
    kv_put(conn, &key_for(NS_STREAK, user), &streak.to_string())
}

// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::analytics;
use crate::store;
use crate::utils::{fmt_money, pretty_table, resolve_now};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let now = resolve_now(sub.get_one::<String>("now"))?;

    let txns = store::load_transactions(conn, user)?;
    let balance = analytics::balance(&txns);
    let savings = analytics::weekly_savings(&txns, now);
    let week_count = analytics::week_transaction_count(&txns, now);
    let goal = store::get_goal(conn, user)?;
    let streak = store::get_streak(conn, user)?;

    let rows = vec![
        vec!["Current balance".into(), fmt_money(balance)],
        vec!["Weekly savings".into(), fmt_money(savings)],
        vec![
            "Weekly goal".into(),
            goal.map(fmt_money).unwrap_or_else(|| "not set".into()),
        ],
        vec!["Streak".into(), format!("{} weeks", streak)],
        vec!["Transactions (7 days)".into(), week_count.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

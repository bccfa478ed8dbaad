// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::{self, Timeframe};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, resolve_now};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("chart", sub)) => chart(conn, sub)?,
        Some(("totals", sub)) => totals(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let raw_timeframe = sub.get_one::<String>("timeframe").unwrap();
    let now = resolve_now(sub.get_one::<String>("now"))?;

    let Some(timeframe) = Timeframe::parse(raw_timeframe) else {
        bail!("Unknown timeframe '{}' (use week|month|year)", raw_timeframe);
    };

    let txns = store::load_transactions(conn, user)?;
    let series = analytics::chart_series(&txns, timeframe, now);

    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    fmt_money(b.income),
                    fmt_money(b.expenses),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Bucket", "Income", "Expenses"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct Totals {
    income: Decimal,
    expenses: Decimal,
    balance: Decimal,
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();

    let txns = store::load_transactions(conn, user)?;
    let totals = Totals {
        income: analytics::income_total(&txns),
        expenses: analytics::expense_total(&txns),
        balance: analytics::balance(&txns),
    };

    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let rows = vec![
            vec!["Total income".into(), fmt_money(totals.income)],
            vec!["Total expenses".into(), fmt_money(totals.expenses)],
            vec!["Balance".into(), fmt_money(totals.balance)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

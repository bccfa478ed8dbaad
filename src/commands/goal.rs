// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::analytics::{self, GoalOutcome};
use crate::store;
use crate::utils::{fmt_money, parse_decimal, pretty_table, resolve_now};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Run the goal-set transition: validate, overwrite the saved goal, and
/// bump the streak when current weekly savings already meet the new goal.
/// Validation failure leaves the store untouched.
pub fn apply(
    conn: &Connection,
    user: &str,
    amount: Decimal,
    now: DateTime<Utc>,
) -> Result<GoalOutcome> {
    let txns = store::load_transactions(conn, user)?;
    let savings = analytics::weekly_savings(&txns, now);
    let streak = store::get_streak(conn, user)?;
    let outcome = analytics::evaluate_goal(amount, savings, streak)?;
    store::set_goal(conn, user, outcome.goal)?;
    if outcome.achieved {
        store::set_streak(conn, user, outcome.streak)?;
    }
    Ok(outcome)
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let now = resolve_now(sub.get_one::<String>("now"))?;

    let outcome = apply(conn, user, amount, now)?;
    println!("Weekly savings goal set to {}", fmt_money(outcome.goal));
    if outcome.achieved {
        println!("Goal achieved! Streak is now {}", outcome.streak);
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let now = resolve_now(sub.get_one::<String>("now"))?;

    let txns = store::load_transactions(conn, user)?;
    let savings = analytics::weekly_savings(&txns, now);
    let goal = store::get_goal(conn, user)?;
    let streak = store::get_streak(conn, user)?;

    let mut rows = vec![
        vec!["Weekly savings".into(), fmt_money(savings)],
        vec!["Streak".into(), format!("{} weeks", streak)],
    ];
    match goal {
        Some(goal) => {
            rows.push(vec!["Goal".into(), fmt_money(goal)]);
            if savings >= goal {
                rows.push(vec!["Progress".into(), "goal reached".into()]);
            } else {
                rows.push(vec![
                    "Remaining".into(),
                    fmt_money(goal - savings),
                ]);
            }
        }
        None => rows.push(vec!["Goal".into(), "not set".into()]),
    }
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

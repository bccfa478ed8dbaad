// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::Transaction;

/// Chart timeframe selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "week" => Some(Timeframe::Week),
            "month" => Some(Timeframe::Month),
            "year" => Some(Timeframe::Year),
            _ => None,
        }
    }
}

/// One bar of the income-vs-expenses chart. Both sums are non-negative
/// magnitudes split by direction, not a net.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBucket {
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl ChartBucket {
    fn new(label: String) -> Self {
        ChartBucket {
            label,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
        }
    }
}

/// Signed sum over the whole set. Order-independent; empty set is zero.
pub fn balance(txns: &[Transaction]) -> Decimal {
    txns.iter().map(Transaction::signed_amount).sum()
}

/// All-time sum of income and cash magnitudes.
pub fn income_total(txns: &[Transaction]) -> Decimal {
    txns.iter()
        .filter(|t| t.kind.is_inflow())
        .map(|t| t.amount)
        .sum()
}

/// All-time sum of purchase and expense magnitudes.
pub fn expense_total(txns: &[Transaction]) -> Decimal {
    txns.iter()
        .filter(|t| !t.kind.is_inflow())
        .map(|t| t.amount)
        .sum()
}

fn weekly_window(txns: &[Transaction], now: DateTime<Utc>) -> impl Iterator<Item = &Transaction> {
    // Exactly 7x24h back from now, not calendar-week-aligned; the boundary
    // instant itself is included.
    let week_ago = now - Duration::days(7);
    txns.iter().filter(move |t| t.date >= week_ago)
}

/// Net signed flow over the trailing week, clamped to zero. Savings is a
/// non-negative concept; the floor is deliberate.
pub fn weekly_savings(txns: &[Transaction], now: DateTime<Utc>) -> Decimal {
    weekly_window(txns, now)
        .map(Transaction::signed_amount)
        .sum::<Decimal>()
        .max(Decimal::ZERO)
}

/// Number of transactions in the trailing week. Not clamped.
pub fn week_transaction_count(txns: &[Transaction], now: DateTime<Utc>) -> usize {
    weekly_window(txns, now).count()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    #[error("goal amount must be greater than zero, got {0}")]
    NonPositive(Decimal),
}

/// Result of a goal-set action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalOutcome {
    pub goal: Decimal,
    pub streak: u32,
    pub achieved: bool,
}

/// The goal/streak transition. A non-positive goal is rejected before any
/// state changes. Otherwise the goal overwrites the previous one, and the
/// streak increments by exactly 1 when the current weekly savings already
/// meet it. The streak never decays; it counts goals-met events.
pub fn evaluate_goal(
    goal: Decimal,
    weekly_savings: Decimal,
    streak: u32,
) -> Result<GoalOutcome, GoalError> {
    if goal <= Decimal::ZERO {
        return Err(GoalError::NonPositive(goal));
    }
    let achieved = weekly_savings >= goal;
    Ok(GoalOutcome {
        goal,
        streak: if achieved { streak + 1 } else { streak },
        achieved,
    })
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn day_label(date: DateTime<Utc>) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.day())
}

// Floored day difference: future dates stay negative through the week
// division below instead of rounding toward zero.
fn elapsed_days(now: DateTime<Utc>, date: DateTime<Utc>) -> i64 {
    (now - date).num_seconds().div_euclid(86_400)
}

/// Build the chart series for a timeframe, oldest bucket first.
///
/// Buckets are pre-initialized from `now` (7 days / 4 weeks / 12 months)
/// and each transaction is routed to the bucket whose label matches its
/// computed key. A key with no matching label drops the transaction from
/// the series; conversely a future-dated transaction can collide onto an
/// existing label. Both are long-standing boundary behaviors kept for
/// compatibility.
pub fn chart_series(
    txns: &[Transaction],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<ChartBucket> {
    let mut buckets: Vec<ChartBucket> = match timeframe {
        Timeframe::Week => (0..7)
            .rev()
            .map(|i| ChartBucket::new(day_label(now - Duration::days(i))))
            .collect(),
        Timeframe::Month => (1..=4)
            .map(|n| ChartBucket::new(format!("Week {}", n)))
            .collect(),
        Timeframe::Year => (0..12)
            .rev()
            .map(|i| {
                let idx = (now.month0() as i64 - i).rem_euclid(12) as usize;
                ChartBucket::new(MONTH_NAMES[idx].to_string())
            })
            .collect(),
    };

    for t in txns {
        let key = match timeframe {
            Timeframe::Week => {
                let diff_days = elapsed_days(now, t.date);
                (diff_days < 7).then(|| day_label(t.date))
            }
            Timeframe::Month => {
                let diff_days = elapsed_days(now, t.date);
                (diff_days < 28).then(|| format!("Week {}", 4 - diff_days.div_euclid(7)))
            }
            Timeframe::Year => {
                let diff_months = (now.year() - t.date.year()) * 12 + now.month() as i32
                    - t.date.month() as i32;
                (diff_months < 12).then(|| MONTH_NAMES[t.date.month0() as usize].to_string())
            }
        };
        let Some(key) = key else { continue };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.label == key) {
            if t.kind.is_inflow() {
                bucket.income += t.amount;
            } else {
                bucket.expenses += t.amount;
            }
        }
    }

    buckets
}

// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use saverly::analytics::{self, Timeframe};
use saverly::models::{Transaction, TransactionKind};

fn txn(kind: TransactionKind, amount: &str, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id: date.timestamp_millis().to_string(),
        kind,
        amount: amount.parse().unwrap(),
        description: "test".into(),
        date,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// Saturday, March 15 2025, midday UTC
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

fn labels(series: &[analytics::ChartBucket]) -> Vec<&str> {
    series.iter().map(|b| b.label.as_str()).collect()
}

#[test]
fn week_series_covers_the_last_seven_days_oldest_first() {
    let series = analytics::chart_series(&[], Timeframe::Week, now());
    assert_eq!(
        labels(&series),
        ["Mar 9", "Mar 10", "Mar 11", "Mar 12", "Mar 13", "Mar 14", "Mar 15"]
    );
    assert!(series
        .iter()
        .all(|b| b.income == Decimal::ZERO && b.expenses == Decimal::ZERO));
}

#[test]
fn week_income_lands_in_its_day_bucket_only() {
    let txns = vec![txn(
        TransactionKind::Income,
        "20",
        now() - Duration::days(3),
    )];
    let series = analytics::chart_series(&txns, Timeframe::Week, now());
    for bucket in &series {
        if bucket.label == "Mar 12" {
            assert_eq!(bucket.income, dec("20"));
            assert_eq!(bucket.expenses, Decimal::ZERO);
        } else {
            assert_eq!(bucket.income, Decimal::ZERO);
            assert_eq!(bucket.expenses, Decimal::ZERO);
        }
    }
}

#[test]
fn week_splits_directions_not_net() {
    let day = now() - Duration::days(1);
    let txns = vec![
        txn(TransactionKind::Cash, "40", day),
        txn(TransactionKind::Purchase, "15", day),
    ];
    let series = analytics::chart_series(&txns, Timeframe::Week, now());
    let bucket = series.iter().find(|b| b.label == "Mar 14").unwrap();
    assert_eq!(bucket.income, dec("40"));
    assert_eq!(bucket.expenses, dec("15"));
}

// A transaction inside the 7-day window whose calendar day predates the
// initialized labels vanishes from the series. Known boundary behavior,
// kept for compatibility.
#[test]
fn week_in_window_transaction_with_unlisted_day_label_is_dropped() {
    // 6 days and 20 hours ago: day difference truncates to 6 (included),
    // but the calendar day is Mar 8, one day before the first label.
    let date = now() - Duration::days(6) - Duration::hours(20);
    let txns = vec![txn(TransactionKind::Income, "99", date)];
    let series = analytics::chart_series(&txns, Timeframe::Week, now());
    assert!(series.iter().all(|b| b.income == Decimal::ZERO));
}

#[test]
fn week_future_transaction_is_dropped() {
    let txns = vec![txn(
        TransactionKind::Income,
        "50",
        now() + Duration::days(2),
    )];
    let series = analytics::chart_series(&txns, Timeframe::Week, now());
    assert!(series.iter().all(|b| b.income == Decimal::ZERO));
}

#[test]
fn month_series_buckets_by_elapsed_week() {
    let txns = vec![
        txn(TransactionKind::Expense, "30", now() - Duration::days(10)),
        txn(TransactionKind::Income, "80", now() - Duration::days(2)),
        txn(TransactionKind::Income, "70", now() - Duration::days(27)),
        // Exactly 28 days out falls outside the window
        txn(TransactionKind::Income, "999", now() - Duration::days(28)),
    ];
    let series = analytics::chart_series(&txns, Timeframe::Month, now());
    assert_eq!(labels(&series), ["Week 1", "Week 2", "Week 3", "Week 4"]);
    assert_eq!(series[0].income, dec("70")); // 27 days back -> Week 1
    assert_eq!(series[2].expenses, dec("30")); // 10 days back -> Week 3
    assert_eq!(series[3].income, dec("80")); // 2 days back -> Week 4
    assert_eq!(series[1].income, Decimal::ZERO);
}

// A future-dated transaction floors to a negative elapsed-week count, so
// its computed bucket name is past "Week 4" and absent from the series.
#[test]
fn month_future_transaction_is_dropped() {
    let txns = vec![txn(
        TransactionKind::Income,
        "10",
        now() + Duration::days(2),
    )];
    let series = analytics::chart_series(&txns, Timeframe::Month, now());
    assert!(series.iter().all(|b| b.income == Decimal::ZERO));
}

#[test]
fn year_series_covers_trailing_twelve_months() {
    let series = analytics::chart_series(&[], Timeframe::Year, now());
    assert_eq!(
        labels(&series),
        ["Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]
    );
}

#[test]
fn year_buckets_by_calendar_month() {
    let txns = vec![
        txn(
            TransactionKind::Income,
            "100",
            Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap(),
        ),
        txn(
            TransactionKind::Expense,
            "45",
            Utc.with_ymd_and_hms(2024, 7, 20, 9, 0, 0).unwrap(),
        ),
        // Twelve calendar months back is excluded
        txn(
            TransactionKind::Income,
            "999",
            Utc.with_ymd_and_hms(2024, 3, 31, 9, 0, 0).unwrap(),
        ),
    ];
    let series = analytics::chart_series(&txns, Timeframe::Year, now());
    let jan = series.iter().find(|b| b.label == "Jan").unwrap();
    assert_eq!(jan.income, dec("100"));
    let jul = series.iter().find(|b| b.label == "Jul").unwrap();
    assert_eq!(jul.expenses, dec("45"));
    let mar = series.iter().find(|b| b.label == "Mar").unwrap();
    assert_eq!(mar.income, Decimal::ZERO);
}

// A future-dated transaction collides onto the trailing month with the same
// name. Known boundary behavior, kept for compatibility.
#[test]
fn year_future_transaction_collides_onto_same_month_label() {
    let txns = vec![txn(
        TransactionKind::Income,
        "10",
        Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
    )];
    let series = analytics::chart_series(&txns, Timeframe::Year, now());
    let sep = series.iter().find(|b| b.label == "Sep").unwrap();
    assert_eq!(sep.income, dec("10"));
}

#[test]
fn bucket_sums_match_included_magnitudes() {
    let txns = vec![
        txn(TransactionKind::Income, "10", now()),
        txn(TransactionKind::Cash, "5.50", now() - Duration::days(2)),
        txn(TransactionKind::Expense, "3", now() - Duration::days(4)),
        // Outside the week window, contributes nothing
        txn(TransactionKind::Income, "1000", now() - Duration::days(20)),
    ];
    let series = analytics::chart_series(&txns, Timeframe::Week, now());
    let income_sum: Decimal = series.iter().map(|b| b.income).sum();
    let expense_sum: Decimal = series.iter().map(|b| b.expenses).sum();
    assert_eq!(income_sum, dec("15.50"));
    assert_eq!(expense_sum, dec("3"));
}

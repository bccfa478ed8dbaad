// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of transaction kinds. Anything else in stored data is a
/// data error, rejected at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Cash,
    Purchase,
    Expense,
}

impl TransactionKind {
    /// Income and cash flow in; purchases and expenses flow out.
    pub fn is_inflow(self) -> bool {
        matches!(self, TransactionKind::Income | TransactionKind::Cash)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Cash => "cash",
            TransactionKind::Purchase => "purchase",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "cash" => Some(TransactionKind::Cash),
            "purchase" => Some(TransactionKind::Purchase),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A single dated money movement. Immutable once recorded; the amount is a
/// non-negative magnitude and the sign is derived from the kind, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Contribution to balance and savings: `+amount` for income/cash,
    /// `-amount` for purchase/expense. Single source of truth for sign
    /// resolution; every aggregate goes through here.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_inflow() {
            self.amount
        } else {
            -self.amount
        }
    }
}

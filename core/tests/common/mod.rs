//! Hand-built records for integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, TimeDelta, Utc};
use console_core::{
    record::{Risk, Transaction, TransactionStatus},
    types::Timestamp,
};

pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn txn(seq: usize, status: TransactionStatus, score: u8) -> Transaction {
    Transaction {
        id:        format!("TXN-{seq:06}"),
        timestamp: t0() - TimeDelta::minutes(seq as i64),
        amount:    1_000 * seq as u64,
        currency:  "USD".to_string(),
        sender:    format!("Sender {seq}"),
        receiver:  format!("Receiver {seq}"),
        status,
        risk:      Risk::from_score(score),
        country:   "United States".to_string(),
        method:    "Wire Transfer".to_string(),
        flags:     Vec::new(),
    }
}

/// `n` approved low-risk transactions, TXN-000001 upward.
pub fn plain_txns(n: usize) -> Vec<Transaction> {
    (1..=n).map(|i| txn(i, TransactionStatus::Approved, 10)).collect()
}

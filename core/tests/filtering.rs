mod common;

use common::{plain_txns, txn};
use console_core::{
    filter::{distinct_values, CategoryFilter, FilterState},
    record::{RiskLevel, Transaction, TransactionStatus},
};
use proptest::prelude::*;

fn three() -> Vec<Transaction> {
    vec![
        txn(1, TransactionStatus::Flagged, 75),
        txn(2, TransactionStatus::Approved, 20),
        txn(3, TransactionStatus::Pending, 40),
    ]
}

#[test]
fn search_by_id_returns_exactly_one() {
    let records = three();
    let hits = FilterState::<Transaction>::with_query("TXN-000002").apply(&records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "TXN-000002");
}

#[test]
fn status_filter_returns_only_flagged() {
    let records = three();
    let state = FilterState::<Transaction>::new(
        "",
        CategoryFilter::Only(TransactionStatus::Flagged),
        CategoryFilter::All,
    );
    let hits = state.apply(&records);
    assert_eq!(hits.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), vec!["TXN-000001"]);
}

#[test]
fn disjoint_query_and_status_give_empty_set() {
    let records = three();
    let state = FilterState::<Transaction>::new(
        "TXN-000002",
        CategoryFilter::Only(TransactionStatus::Flagged),
        CategoryFilter::All,
    );
    assert!(state.apply(&records).is_empty());
}

#[test]
fn search_is_case_insensitive_over_designated_fields() {
    let records = three();
    assert_eq!(FilterState::<Transaction>::with_query("txn-000003").apply(&records).len(), 1);
    assert_eq!(FilterState::<Transaction>::with_query("RECEIVER 1").apply(&records).len(), 1);
    assert_eq!(FilterState::<Transaction>::with_query("united states").apply(&records).len(), 3);
    // Currency is not a search field.
    assert!(FilterState::<Transaction>::with_query("usd").apply(&records).is_empty());
}

#[test]
fn risk_filter_uses_the_banded_level() {
    let records = three();
    let state = FilterState::<Transaction>::new(
        "",
        CategoryFilter::All,
        CategoryFilter::Only(RiskLevel::High),
    );
    let hits = state.apply(&records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].risk.score(), 75);
}

#[test]
fn default_state_matches_everything_in_order() {
    let records = plain_txns(12);
    let state = FilterState::<Transaction>::default();
    assert!(state.is_default());
    assert_eq!(state.matching_indices(&records), (0..12).collect::<Vec<_>>());
}

#[test]
fn distinct_values_are_sorted_and_unique() {
    let mut records = plain_txns(3);
    records[0].sender = "zed".into();
    records[1].sender = "amy".into();
    records[2].sender = "zed".into();
    assert_eq!(distinct_values(&records, |t| t.sender.as_str()), vec!["amy", "zed"]);
}

fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::Approved),
        Just(TransactionStatus::Flagged),
        Just(TransactionStatus::Rejected),
    ]
}

proptest! {
    #[test]
    fn filtered_view_is_an_ordered_subset_and_idempotent(
        statuses in proptest::collection::vec((status_strategy(), 0u8..=100), 0..40),
        query in "[a-zA-Z0-9 -]{0,6}",
        pick in proptest::option::of(status_strategy()),
    ) {
        let records: Vec<Transaction> = statuses
            .iter()
            .enumerate()
            .map(|(i, (s, score))| txn(i + 1, *s, *score))
            .collect();
        let primary = pick.map_or(CategoryFilter::All, CategoryFilter::Only);
        let state = FilterState::<Transaction>::new(query, primary, CategoryFilter::All);

        let idx = state.matching_indices(&records);
        prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(idx.iter().all(|&i| i < records.len()));

        let once: Vec<Transaction> = state.apply(&records).into_iter().cloned().collect();
        let twice: Vec<Transaction> = state.apply(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}

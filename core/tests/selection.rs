mod common;

use common::{plain_txns, t0, txn};
use console_core::{
    config::{ConsoleConfig, TableConfig},
    error::{ConsoleError, ConsoleResult},
    filter::{CategoryFilter, FilterState},
    record::{RecordKind, Transaction, TransactionStatus},
    selection::{ActionSink, BulkAction, BulkActionReport, LogSink, MemorySink, SelectionSet},
    session::ConsoleSession,
    view::TableView,
};
use proptest::prelude::*;

/// Sink standing in for an audit trail that is down.
struct RejectingSink {
    attempts: usize,
}

impl ActionSink for RejectingSink {
    fn submit(&mut self, report: &BulkActionReport) -> ConsoleResult<()> {
        self.attempts += 1;
        Err(ConsoleError::SinkRejected {
            report_id: report.report_id.to_string(),
            reason:    "audit trail unavailable".to_string(),
        })
    }
}

fn refs(records: &[Transaction]) -> Vec<&Transaction> {
    records.iter().collect()
}

#[test]
fn toggle_one_twice_is_identity() {
    let mut sel = SelectionSet::new();
    sel.toggle_one("TXN-000004");
    let before = sel.clone();

    assert!(sel.toggle_one("TXN-000009"));
    assert!(!sel.toggle_one("TXN-000009"));
    assert_eq!(sel, before);
}

#[test]
fn toggle_all_from_empty_and_back() {
    let records = plain_txns(5);
    let view = refs(&records);
    let mut sel = SelectionSet::new();

    sel.toggle_all(&view);
    assert_eq!(sel.len(), 5);
    assert!(sel.all_selected(&view));

    sel.toggle_all(&view);
    assert!(sel.is_empty());
}

#[test]
fn toggle_all_replaces_a_partial_selection() {
    let records = plain_txns(4);
    let view = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_one("TXN-000002");
    sel.toggle_one("OUTSIDE-1");

    sel.toggle_all(&view);
    assert_eq!(sel.len(), 4);
    assert!(!sel.contains("OUTSIDE-1"));
}

#[test]
fn stale_ids_are_inert() {
    let records = plain_txns(6);
    let all = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_all(&all);

    // Narrow the view to the first two records; the other four stay selected.
    let narrow: Vec<&Transaction> = all[..2].to_vec();
    assert_eq!(sel.len(), 6);
    assert_eq!(sel.visible_count(narrow.iter().copied()), 2);
    assert!(sel.all_selected(&narrow));

    let mut sink = MemorySink::default();
    let outcome = sel
        .apply_bulk(BulkAction::Approve, &narrow, "analyst1@ff.com", t0(), &mut sink)
        .expect("two records in view");
    assert_eq!(outcome.report.record_ids, vec!["TXN-000001", "TXN-000002"]);
    assert_eq!(outcome.report.kind, RecordKind::Transaction);
    assert!(sel.is_empty());
}

#[test]
fn retain_visible_drops_hidden_ids() {
    let records = plain_txns(6);
    let all = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_all(&all);
    assert_eq!(sel.retain_visible(&all[3..]), 3);
    assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["TXN-000004", "TXN-000005", "TXN-000006"]);
}

#[test]
fn bulk_action_clears_even_when_sink_fails() {
    let records = plain_txns(3);
    let view = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_one("TXN-000003");

    let mut sink = RejectingSink { attempts: 0 };
    let outcome = sel
        .apply_bulk(BulkAction::Reject, &view, "analyst1@ff.com", t0(), &mut sink)
        .expect("one record in view");
    assert!(!outcome.delivered);
    assert_eq!(sink.attempts, 1);
    assert!(sel.is_empty());
}

#[test]
fn bulk_action_with_nothing_in_view_reports_nothing() {
    let records = plain_txns(3);
    let view = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_one("TXN-999999");

    let mut sink = MemorySink::default();
    assert!(sel.apply_bulk(BulkAction::Flag, &view, "a", t0(), &mut sink).is_none());
    assert!(sink.reports.is_empty());
    assert!(sel.is_empty());
}

#[test]
fn duplicate_ids_in_view_do_not_break_bulk_actions() {
    let records = vec![
        txn(1, TransactionStatus::Pending, 20),
        txn(1, TransactionStatus::Flagged, 80),
    ];
    let view = refs(&records);
    let mut sel = SelectionSet::new();
    sel.toggle_one("TXN-000001");

    let mut sink = MemorySink::default();
    let outcome = sel
        .apply_bulk(BulkAction::Approve, &view, "analyst1@ff.com", t0(), &mut sink)
        .expect("selected id is in view");
    assert_eq!(outcome.report.record_ids, vec!["TXN-000001", "TXN-000001"]);
    assert!(sel.is_empty());
}

#[test]
fn view_selection_survives_filter_changes() {
    let records = vec![
        txn(1, TransactionStatus::Flagged, 80),
        txn(2, TransactionStatus::Approved, 10),
        txn(3, TransactionStatus::Flagged, 90),
    ];
    let mut view: TableView<Transaction> = TableView::new(records.into(), &TableConfig::default()).unwrap();
    view.toggle_all();
    assert_eq!(view.selection().len(), 3);

    view.set_filter(FilterState::new("", CategoryFilter::Only(TransactionStatus::Flagged), CategoryFilter::All))
        .unwrap();
    assert_eq!(view.selection().len(), 3);
    assert_eq!(view.visible_selected(), 2);
    assert!(view.all_selected());

    let mut sink = MemorySink::default();
    let outcome = view.bulk_action(BulkAction::Flag, "analyst1@ff.com", t0(), &mut sink).unwrap();
    assert_eq!(outcome.report.record_ids, vec!["TXN-000001", "TXN-000003"]);
    assert!(outcome.delivered);
    assert_eq!(sink.reports.len(), 1);
    assert!(view.selection().is_empty());
}

#[test]
fn session_bulk_action_is_attributed_to_the_operator() {
    let _ = env_logger::builder().is_test(true).try_init();
    let session = ConsoleSession::build(ConsoleConfig::default_test()).unwrap();
    let mut view = session.kyc_view().unwrap();
    view.toggle_all();
    let expected = view.filtered_len();

    let outcome = session.bulk_action(&mut view, BulkAction::Flag, &mut LogSink).unwrap();
    assert!(outcome.delivered);
    assert_eq!(outcome.report.actor, session.config.operator);
    assert_eq!(outcome.report.issued_at, session.clock.now());
    assert_eq!(outcome.report.record_ids.len(), expected);
    assert_eq!(outcome.report.kind, RecordKind::KycProfile);
    assert!(view.selection().is_empty());
}

#[test]
fn prune_selection_is_opt_in() {
    let mut view: TableView<Transaction> =
        TableView::new(plain_txns(5).into(), &TableConfig::default()).unwrap();
    view.toggle_all();
    view.set_query("TXN-000001").unwrap();
    assert_eq!(view.selection().len(), 5);
    assert_eq!(view.prune_selection(), 4);
    assert_eq!(view.selection().len(), 1);
}

proptest! {
    #[test]
    fn toggle_all_twice_restores_empty_or_full_selection(
        n in 0usize..30,
        start_full in any::<bool>(),
        extra_toggles in proptest::collection::vec(1usize..40, 0..6),
    ) {
        let records = plain_txns(n);
        let view = refs(&records);
        let mut sel = SelectionSet::new();
        if start_full {
            sel.toggle_all(&view);
        }
        let before = sel.clone();

        sel.toggle_all(&view);
        sel.toggle_all(&view);
        prop_assert_eq!(&sel, &before);

        // toggle_one pairs are always identity, whatever the ids.
        for seq in &extra_toggles {
            let id = format!("TXN-{seq:06}");
            sel.toggle_one(&id);
            sel.toggle_one(&id);
        }
        prop_assert_eq!(sel, before);
    }
}

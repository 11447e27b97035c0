mod common;

use chrono::TimeDelta;
use common::{t0, txn};
use console_core::{
    clock::SessionClock,
    config::ConsoleConfig,
    dataset::SessionData,
    metrics::DashboardMetrics,
    record::TransactionStatus,
    session::ConsoleSession,
};

#[test]
fn counts_volume_and_distribution() {
    let mut txns = vec![
        txn(1, TransactionStatus::Flagged, 95),
        txn(2, TransactionStatus::Rejected, 65),
        txn(3, TransactionStatus::Approved, 5),
        txn(4, TransactionStatus::Pending, 45),
    ];
    txns[0].country = "Russia".into();
    txns[1].country = "Russia".into();

    let data = SessionData::from_parts(txns, Vec::new(), Vec::new(), Vec::new());
    let m = DashboardMetrics::compute(&data, &SessionClock::frozen(t0()));

    assert_eq!(m.total_transactions, 4);
    assert_eq!(m.flagged_transactions, 2);
    assert_eq!(m.total_volume, 10_000);
    assert_eq!(m.risk_distribution.total(), 4);
    assert_eq!(m.top_risk_countries[0].country, "Russia");
    assert_eq!(m.top_risk_countries[0].risk_score, 80);
    assert_eq!(m.top_risk_countries[1].risk_score, 25);
}

#[test]
fn trend_covers_thirty_days_ending_today() {
    let mut old = txn(1, TransactionStatus::Approved, 10);
    old.timestamp = t0() - TimeDelta::days(45);
    let recent = txn(2, TransactionStatus::Approved, 10);

    let data = SessionData::from_parts(vec![old, recent], Vec::new(), Vec::new(), Vec::new());
    let m = DashboardMetrics::compute(&data, &SessionClock::frozen(t0()));

    assert_eq!(m.transaction_trend.len(), 30);
    assert_eq!(m.transaction_trend.last().unwrap().date, t0().date_naive());
    assert_eq!(m.transaction_trend.iter().map(|p| p.count).sum::<usize>(), 1);
    assert_eq!(m.transaction_trend.last().unwrap().volume, 2_000);
}

#[test]
fn session_metrics_serialize_with_dashboard_keys() {
    let session = ConsoleSession::build(ConsoleConfig::default_test()).unwrap();
    let json = serde_json::to_value(&session.metrics).unwrap();
    assert!(json.get("pendingKYC").is_some());
    assert!(json.get("activeInvestigations").is_some());
    assert!(session.metrics.active_investigations <= session.data.investigations.len());
    assert!(session.metrics.top_risk_countries.len() <= 5);
}

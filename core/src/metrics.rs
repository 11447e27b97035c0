//! Dashboard metrics derived from the session dataset.
//!
//! Pure aggregation: computed once after generation and on demand,
//! never stored back into the collections.

use crate::{
    clock::SessionClock,
    dataset::SessionData,
    record::{InvestigationStatus, KycStatus, RiskLevel, TransactionStatus},
};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const TREND_DAYS: i64 = 30;
pub const TOP_COUNTRY_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low:      usize,
    pub medium:   usize,
    pub high:     usize,
    pub critical: usize,
}

impl RiskDistribution {
    fn bump(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low      => self.low += 1,
            RiskLevel::Medium   => self.medium += 1,
            RiskLevel::High     => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date:   NaiveDate,
    pub count:  usize,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRisk {
    pub country:    String,
    pub count:      usize,
    pub risk_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_transactions:    usize,
    pub flagged_transactions:  usize,
    pub total_volume:          u64,
    pub active_investigations: usize,
    #[serde(rename = "pendingKYC")]
    pub pending_kyc:           usize,
    pub risk_distribution:     RiskDistribution,
    pub transaction_trend:     Vec<TrendPoint>,
    pub top_risk_countries:    Vec<CountryRisk>,
}

impl DashboardMetrics {
    pub fn compute(data: &SessionData, clock: &SessionClock) -> Self {
        let txns = &data.transactions;

        let flagged_transactions = txns
            .iter()
            .filter(|t| matches!(t.status, TransactionStatus::Flagged | TransactionStatus::Rejected))
            .count();
        let total_volume = txns.iter().map(|t| t.amount).sum();

        let pending_kyc = data
            .kyc_profiles
            .iter()
            .filter(|p| matches!(p.status, KycStatus::Pending | KycStatus::Review))
            .count();

        let active_investigations = data
            .investigations
            .iter()
            .filter(|i| i.status != InvestigationStatus::Closed)
            .count();

        let mut risk_distribution = RiskDistribution::default();
        for t in txns.iter() {
            risk_distribution.bump(t.risk.level());
        }

        // 30 calendar days ending on the session's start date (UTC).
        let today = clock.started_at.date_naive();
        let mut by_day: BTreeMap<NaiveDate, (usize, u64)> = (0..TREND_DAYS)
            .rev()
            .map(|back| (today - TimeDelta::days(back), (0, 0)))
            .collect();
        for t in txns.iter() {
            if let Some(slot) = by_day.get_mut(&t.timestamp.date_naive()) {
                slot.0 += 1;
                slot.1 += t.amount;
            }
        }
        let transaction_trend = by_day
            .into_iter()
            .map(|(date, (count, volume))| TrendPoint { date, count, volume })
            .collect();

        Self {
            total_transactions: txns.len(),
            flagged_transactions,
            total_volume,
            active_investigations,
            pending_kyc,
            risk_distribution,
            transaction_trend,
            top_risk_countries: top_risk_countries(data),
        }
    }
}

/// Countries ranked by rounded mean risk score, highest first.
/// Ties keep first-seen order.
fn top_risk_countries(data: &SessionData) -> Vec<CountryRisk> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (usize, u64)> = HashMap::new();
    for t in data.transactions.iter() {
        let entry = totals.entry(t.country.as_str()).or_insert_with(|| {
            order.push(t.country.as_str());
            (0, 0)
        });
        entry.0 += 1;
        entry.1 += u64::from(t.risk.score());
    }

    let mut ranked: Vec<CountryRisk> = order
        .into_iter()
        .map(|country| {
            let (count, total) = totals[country];
            CountryRisk {
                country: country.to_string(),
                count,
                risk_score: (total as f64 / count as f64).round() as u8,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    ranked.truncate(TOP_COUNTRY_COUNT);
    ranked
}

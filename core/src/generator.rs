//! Record generator: builds every session collection in one pass.
//!
//! RULES:
//!   - Collections are created in bulk at session start, never incrementally.
//!   - Every collection draws from its own CollectionRng slot.
//!   - Timestamps are anchored on the session clock's start instant.
//!   - Risk levels are only ever derived from scores via `Risk::from_score`.

use crate::{
    clock::SessionClock,
    record::{
        AuditLogEntry, DocumentStatus, Investigation, InvestigationStatus, KycDocument,
        KycProfile, KycStatus, Priority, Record, RecordKind, Risk, Transaction,
        TransactionStatus, Category,
    },
    rng::{CollectionRng, CollectionSlot, RngBank},
    types::Timestamp,
    vocabulary::Vocabulary,
};
use chrono::TimeDelta;

/// Scores strictly above this escalate a record and attach flags.
pub const ESCALATION_SCORE: u8 = 70;

const TRANSACTION_WINDOW_DAYS: i64 = 30;
const PROFILE_WINDOW_DAYS: i64 = 365;
const INVESTIGATION_WINDOW_DAYS: i64 = 60;
const AUDIT_WINDOW_DAYS: i64 = 7;

const INVESTIGATION_DESCRIPTION: &str =
    "Investigation triggered by automated risk assessment. Requires manual review and verification.";

pub struct RecordGenerator<'a> {
    clock: &'a SessionClock,
    bank:  &'a RngBank,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(clock: &'a SessionClock, bank: &'a RngBank) -> Self {
        Self { clock, bank }
    }

    /// Transactions from the last 30 days, newest first.
    pub fn transactions(&self, count: usize) -> Vec<Transaction> {
        let mut rng = self.bank.for_collection(CollectionSlot::Transactions);
        let now = self.clock.started_at;
        let window_start = self.clock.days_before_start(TRANSACTION_WINDOW_DAYS);

        let mut out: Vec<Transaction> = (0..count)
            .map(|i| {
                let risk = Risk::from_score(rng.next_u64_below(100) as u8);
                let escalated = risk.score() > ESCALATION_SCORE;
                let status = if escalated {
                    *rng.pick(&[TransactionStatus::Flagged, TransactionStatus::Rejected])
                } else {
                    *rng.pick(TransactionStatus::ALL)
                };
                let flags = if escalated {
                    let n = rng.between(1, 3);
                    Vocabulary::draw_flags(&mut rng, Vocabulary::transaction_flags(), n)
                } else {
                    Vec::new()
                };

                Transaction {
                    id: RecordKind::Transaction.format_id(i + 1),
                    timestamp: random_time_between(&mut rng, window_start, now),
                    amount: rng.next_u64_below(1_000_000) + 100,
                    currency: Vocabulary::currency(&mut rng).to_string(),
                    sender: Vocabulary::person_name(&mut rng).to_string(),
                    receiver: Vocabulary::person_name(&mut rng).to_string(),
                    status,
                    risk,
                    country: Vocabulary::country(&mut rng).to_string(),
                    method: Vocabulary::payment_method(&mut rng).to_string(),
                    flags,
                }
            })
            .collect();

        newest_first(&mut out);
        log::debug!("generated {} transactions", out.len());
        out
    }

    /// KYC profiles joined within the last year, in id order.
    pub fn kyc_profiles(&self, count: usize) -> Vec<KycProfile> {
        let mut rng = self.bank.for_collection(CollectionSlot::KycProfiles);
        let now = self.clock.started_at;
        let window_start = self.clock.days_before_start(PROFILE_WINDOW_DAYS);

        let out: Vec<KycProfile> = (0..count)
            .map(|i| {
                let risk = Risk::from_score(rng.next_u64_below(100) as u8);
                let escalated = risk.score() > ESCALATION_SCORE;
                let status = if escalated {
                    *rng.pick(&[KycStatus::Review, KycStatus::Rejected])
                } else {
                    *rng.pick(KycStatus::ALL)
                };
                let join_date = random_time_between(&mut rng, window_start, now);
                let flags = if escalated {
                    let n = rng.between(1, 2);
                    Vocabulary::draw_flags(&mut rng, Vocabulary::profile_flags(), n)
                } else {
                    Vec::new()
                };
                let documents = Vocabulary::document_types()
                    .iter()
                    .map(|doc_type| KycDocument {
                        doc_type: doc_type.to_string(),
                        status: *rng.pick(DocumentStatus::ALL),
                        upload_date: random_time_between(&mut rng, join_date, now),
                    })
                    .collect();

                KycProfile {
                    id: RecordKind::KycProfile.format_id(i + 1),
                    name: Vocabulary::person_name(&mut rng).to_string(),
                    email: format!("user{}@example.com", i + 1),
                    country: Vocabulary::country(&mut rng).to_string(),
                    status,
                    risk,
                    join_date,
                    last_activity: random_time_between(&mut rng, join_date, now),
                    total_transactions: rng.next_u64_below(500) as u32,
                    total_volume: rng.next_u64_below(10_000_000),
                    documents,
                    flags,
                }
            })
            .collect();

        log::debug!("generated {} kyc profiles", out.len());
        out
    }

    /// Investigations opened in the last 60 days, newest first.
    pub fn investigations(&self, count: usize) -> Vec<Investigation> {
        let mut rng = self.bank.for_collection(CollectionSlot::Investigations);
        let now = self.clock.started_at;
        let window_start = self.clock.days_before_start(INVESTIGATION_WINDOW_DAYS);

        let mut out: Vec<Investigation> = (0..count)
            .map(|i| {
                let created_at = random_time_between(&mut rng, window_start, now);
                let profile_seq = rng.between(1, 100) as usize;
                Investigation {
                    id: RecordKind::Investigation.format_id(i + 1),
                    profile_id: RecordKind::KycProfile.format_id(profile_seq),
                    profile_name: Vocabulary::person_name(&mut rng).to_string(),
                    case_type: rng.pick(Vocabulary::investigation_types()).to_string(),
                    status: *rng.pick(InvestigationStatus::ALL),
                    priority: *rng.pick(Priority::ALL),
                    assignee: rng.pick(Vocabulary::assignees()).to_string(),
                    created_at,
                    updated_at: random_time_between(&mut rng, created_at, now),
                    description: INVESTIGATION_DESCRIPTION.to_string(),
                }
            })
            .collect();

        newest_first(&mut out);
        log::debug!("generated {} investigations", out.len());
        out
    }

    /// Audit entries from the last 7 days, newest first.
    pub fn audit_logs(&self, count: usize) -> Vec<AuditLogEntry> {
        let mut rng = self.bank.for_collection(CollectionSlot::AuditLogs);
        let now = self.clock.started_at;
        let window_start = self.clock.days_before_start(AUDIT_WINDOW_DAYS);

        let mut out: Vec<AuditLogEntry> = (0..count)
            .map(|i| {
                let timestamp = random_time_between(&mut rng, window_start, now);
                let user = rng.pick(Vocabulary::operators()).to_string();
                let action = rng.pick(Vocabulary::audit_actions()).to_string();
                let resource = rng.pick(Vocabulary::audit_resources()).to_string();
                let details = format!(
                    "Action performed on {} #{}",
                    rng.pick(Vocabulary::audit_resources()),
                    rng.next_u64_below(10_000)
                );
                let ip_address = (0..4)
                    .map(|_| rng.next_u64_below(255).to_string())
                    .collect::<Vec<_>>()
                    .join(".");

                AuditLogEntry {
                    id: RecordKind::AuditLog.format_id(i + 1),
                    timestamp,
                    user,
                    action,
                    resource,
                    details,
                    ip_address,
                }
            })
            .collect();

        newest_first(&mut out);
        log::debug!("generated {} audit entries", out.len());
        out
    }
}

/// Uniform instant in [start, end), millisecond resolution.
/// Returns `start` when the window is empty.
pub fn random_time_between(rng: &mut CollectionRng, start: Timestamp, end: Timestamp) -> Timestamp {
    let span_ms = (end - start).num_milliseconds();
    if span_ms <= 0 {
        return start;
    }
    start + TimeDelta::milliseconds(rng.next_u64_below(span_ms as u64) as i64)
}

/// Stable sort, descending by primary timestamp.
fn newest_first<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| b.primary_time().cmp(&a.primary_time()));
}

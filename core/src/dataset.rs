//! Session dataset: the once-per-session record collections.
//!
//! Owned by the ConsoleSession and handed to views as shared,
//! read-only `Arc<[R]>` slices. Nothing mutates a collection after
//! `SessionData::generate` returns.

use crate::{
    clock::SessionClock,
    generator::RecordGenerator,
    record::{AuditLogEntry, Investigation, KycProfile, Transaction},
    rng::RngBank,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How many records of each kind a session generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CollectionSizes {
    pub transactions:   usize,
    pub kyc_profiles:   usize,
    pub investigations: usize,
    pub audit_logs:     usize,
}

impl Default for CollectionSizes {
    fn default() -> Self {
        Self {
            transactions:   10_000,
            kyc_profiles:   500,
            investigations: 50,
            audit_logs:     1_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionData {
    pub transactions:   Arc<[Transaction]>,
    pub kyc_profiles:   Arc<[KycProfile]>,
    pub investigations: Arc<[Investigation]>,
    pub audit_logs:     Arc<[AuditLogEntry]>,
}

impl SessionData {
    pub fn generate(clock: &SessionClock, bank: &RngBank, sizes: &CollectionSizes) -> Self {
        let generator = RecordGenerator::new(clock, bank);
        let data = Self {
            transactions:   generator.transactions(sizes.transactions).into(),
            kyc_profiles:   generator.kyc_profiles(sizes.kyc_profiles).into(),
            investigations: generator.investigations(sizes.investigations).into(),
            audit_logs:     generator.audit_logs(sizes.audit_logs).into(),
        };
        log::info!(
            "session data ready: seed={} txns={} profiles={} investigations={} audit={}",
            bank.seed(),
            data.transactions.len(),
            data.kyc_profiles.len(),
            data.investigations.len(),
            data.audit_logs.len()
        );
        data
    }

    /// Build a dataset from explicit collections (tests, fixtures).
    pub fn from_parts(
        transactions: Vec<Transaction>,
        kyc_profiles: Vec<KycProfile>,
        investigations: Vec<Investigation>,
        audit_logs: Vec<AuditLogEntry>,
    ) -> Self {
        Self {
            transactions:   transactions.into(),
            kyc_profiles:   kyc_profiles.into(),
            investigations: investigations.into(),
            audit_logs:     audit_logs.into(),
        }
    }
}

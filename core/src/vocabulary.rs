//! Curated value lists the record generator draws from.
//!
//! All draws go through a CollectionRng, so the same seed yields the
//! same names, countries and flags.

use crate::rng::CollectionRng;

/// Deterministic picker over the console's fixed vocabularies.
pub struct Vocabulary;

impl Vocabulary {
    pub fn person_name(rng: &mut CollectionRng) -> &'static str {
        *rng.pick(Self::names())
    }

    pub fn country(rng: &mut CollectionRng) -> &'static str {
        *rng.pick(Self::countries())
    }

    pub fn payment_method(rng: &mut CollectionRng) -> &'static str {
        *rng.pick(Self::payment_methods())
    }

    pub fn currency(rng: &mut CollectionRng) -> &'static str {
        *rng.pick(Self::currencies())
    }

    /// Draw `count` flags with replacement; duplicates are kept.
    pub fn draw_flags(
        rng: &mut CollectionRng,
        pool: &'static [&'static str],
        count: u64,
    ) -> Vec<String> {
        (0..count).map(|_| rng.pick(pool).to_string()).collect()
    }

    pub fn names() -> &'static [&'static str] {
        &[
            "John Smith", "Emma Wilson", "Michael Chen", "Sarah Johnson", "David Brown",
            "Lisa Anderson", "Robert Taylor", "Maria Garcia", "James Martinez", "Jennifer Lee",
            "William Davis", "Patricia Rodriguez", "Richard Wilson", "Linda Moore",
            "Thomas Jackson",
        ]
    }

    pub fn countries() -> &'static [&'static str] {
        &[
            "United States", "United Kingdom", "Germany", "France", "Japan", "Singapore",
            "Switzerland", "Canada", "Australia", "Netherlands", "Russia", "China", "Brazil",
            "Nigeria", "India",
        ]
    }

    pub fn payment_methods() -> &'static [&'static str] {
        &["Wire Transfer", "ACH", "SWIFT", "Card Payment", "Crypto", "Check"]
    }

    pub fn currencies() -> &'static [&'static str] {
        &["USD", "EUR", "GBP", "JPY", "CHF"]
    }

    pub fn transaction_flags() -> &'static [&'static str] {
        &[
            "High-risk country",
            "Unusual amount",
            "Velocity check failed",
            "Sanctions list match",
            "PEP match",
        ]
    }

    pub fn profile_flags() -> &'static [&'static str] {
        &[
            "Incomplete documents",
            "Address mismatch",
            "PEP",
            "Sanctions list",
            "High-risk country",
        ]
    }

    pub fn document_types() -> &'static [&'static str] {
        &["ID Document", "Proof of Address"]
    }

    pub fn investigation_types() -> &'static [&'static str] {
        &["AML Alert", "Fraud Detection", "KYC Review", "Sanctions Check", "PEP Investigation"]
    }

    pub fn assignees() -> &'static [&'static str] {
        &["Alice Cooper", "Bob Smith", "Carol White", "David Lee", "Emma Brown"]
    }

    pub fn operators() -> &'static [&'static str] {
        &["admin@ff.com", "analyst1@ff.com", "analyst2@ff.com", "compliance@ff.com"]
    }

    pub fn audit_actions() -> &'static [&'static str] {
        &[
            "Approved transaction",
            "Flagged transaction",
            "Updated KYC profile",
            "Created investigation",
            "Closed investigation",
            "Updated policy",
            "Exported report",
        ]
    }

    pub fn audit_resources() -> &'static [&'static str] {
        &["Transaction", "KYC Profile", "Investigation", "Policy", "Report"]
    }
}

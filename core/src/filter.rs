//! Filter predicate engine.
//!
//! A record is in view when ALL of the following hold:
//!   - the query is empty, or the lowercased query is a substring of at
//!     least one of the record's designated search fields, lowercased;
//!   - each categorical filter is `All` or equals the record's value exactly.
//!
//! Evaluation is a full re-scan of the collection and preserves input
//! order. There is no incremental recomputation.

use crate::record::{
    AuditLogEntry, Category, Investigation, InvestigationStatus, KycProfile, KycStatus, Priority,
    Record, RiskLevel, Transaction, TransactionStatus,
};
use std::collections::BTreeSet;
use std::fmt;

/// Wire value used for the wildcard in selects and query strings.
pub const ALL_PARAM: &str = "all";

// ── Filter values ──────────────────────────────────────────────────

/// A value a categorical filter can hold and round-trip through a
/// query-string parameter.
pub trait FilterValue: Clone + PartialEq + fmt::Debug {
    fn to_param(&self) -> String;
    fn from_param(raw: &str) -> Option<Self>;
}

impl<T: Category> FilterValue for T {
    fn to_param(&self) -> String {
        self.as_str().to_string()
    }

    fn from_param(raw: &str) -> Option<Self> {
        T::parse(raw)
    }
}

/// Free-form categories (audit users and actions).
impl FilterValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Either the wildcard or one exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter<T> {
    All,
    Only(T),
}

impl<T> Default for CategoryFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: FilterValue> CategoryFilter<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn to_param(&self) -> String {
        match self {
            Self::All     => ALL_PARAM.to_string(),
            Self::Only(v) => v.to_param(),
        }
    }

    /// `"all"` is the wildcard; anything else must parse as a value.
    pub fn from_param(raw: &str) -> Option<Self> {
        if raw == ALL_PARAM {
            return Some(Self::All);
        }
        T::from_param(raw).map(Self::Only)
    }
}

// ── Filterable records ─────────────────────────────────────────────

/// Per-variant filter wiring: which fields the free-text query scans and
/// which two categorical dimensions the view filters on.
pub trait Filterable: Record {
    type Primary: FilterValue;
    type Secondary: FilterValue;

    /// Query-string names of the two categorical dimensions.
    const PRIMARY_PARAM: &'static str;
    const SECONDARY_PARAM: &'static str;

    fn search_fields(&self) -> impl Iterator<Item = &str>;
    fn primary_is(&self, want: &Self::Primary) -> bool;
    fn secondary_is(&self, want: &Self::Secondary) -> bool;
}

impl Filterable for Transaction {
    type Primary = TransactionStatus;
    type Secondary = RiskLevel;

    const PRIMARY_PARAM: &'static str = "status";
    const SECONDARY_PARAM: &'static str = "risk";

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.id.as_str(),
            self.sender.as_str(),
            self.receiver.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
    }

    fn primary_is(&self, want: &TransactionStatus) -> bool {
        self.status == *want
    }

    fn secondary_is(&self, want: &RiskLevel) -> bool {
        self.risk.level() == *want
    }
}

impl Filterable for KycProfile {
    type Primary = KycStatus;
    type Secondary = RiskLevel;

    const PRIMARY_PARAM: &'static str = "status";
    const SECONDARY_PARAM: &'static str = "risk";

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.email.as_str(), self.id.as_str()].into_iter()
    }

    fn primary_is(&self, want: &KycStatus) -> bool {
        self.status == *want
    }

    fn secondary_is(&self, want: &RiskLevel) -> bool {
        self.risk.level() == *want
    }
}

impl Filterable for Investigation {
    type Primary = InvestigationStatus;
    type Secondary = Priority;

    const PRIMARY_PARAM: &'static str = "status";
    const SECONDARY_PARAM: &'static str = "priority";

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.id.as_str(),
            self.profile_name.as_str(),
            self.case_type.as_str(),
        ]
        .into_iter()
    }

    fn primary_is(&self, want: &InvestigationStatus) -> bool {
        self.status == *want
    }

    fn secondary_is(&self, want: &Priority) -> bool {
        self.priority == *want
    }
}

impl Filterable for AuditLogEntry {
    type Primary = String;
    type Secondary = String;

    const PRIMARY_PARAM: &'static str = "user";
    const SECONDARY_PARAM: &'static str = "action";

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.action.as_str(),
            self.resource.as_str(),
            self.details.as_str(),
            self.user.as_str(),
        ]
        .into_iter()
    }

    fn primary_is(&self, want: &String) -> bool {
        self.user == *want
    }

    fn secondary_is(&self, want: &String) -> bool {
        self.action == *want
    }
}

// ── Filter state ───────────────────────────────────────────────────

/// Compound predicate: free-text query plus two categorical filters.
pub struct FilterState<R: Filterable> {
    pub query:     String,
    pub primary:   CategoryFilter<R::Primary>,
    pub secondary: CategoryFilter<R::Secondary>,
}

impl<R: Filterable> FilterState<R> {
    pub fn new(
        query: impl Into<String>,
        primary: CategoryFilter<R::Primary>,
        secondary: CategoryFilter<R::Secondary>,
    ) -> Self {
        Self { query: query.into(), primary, secondary }
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self::new(query, CategoryFilter::All, CategoryFilter::All)
    }

    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.primary.is_all() && self.secondary.is_all()
    }

    /// Evaluate the predicate with an already-lowercased needle.
    fn admits(&self, record: &R, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || record
                .search_fields()
                .any(|field| field.to_lowercase().contains(needle));
        let primary_ok = match &self.primary {
            CategoryFilter::All     => true,
            CategoryFilter::Only(v) => record.primary_is(v),
        };
        let secondary_ok = match &self.secondary {
            CategoryFilter::All     => true,
            CategoryFilter::Only(v) => record.secondary_is(v),
        };
        text_ok && primary_ok && secondary_ok
    }

    /// Indices of matching records, in input order.
    pub fn matching_indices(&self, records: &[R]) -> Vec<usize> {
        let needle = self.query.to_lowercase();
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.admits(r, &needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Matching records, in input order.
    pub fn apply<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let needle = self.query.to_lowercase();
        records.iter().filter(|r| self.admits(r, &needle)).collect()
    }
}

impl<R: Filterable> Default for FilterState<R> {
    fn default() -> Self {
        Self::new(String::new(), CategoryFilter::All, CategoryFilter::All)
    }
}

impl<R: Filterable> Clone for FilterState<R> {
    fn clone(&self) -> Self {
        Self {
            query:     self.query.clone(),
            primary:   self.primary.clone(),
            secondary: self.secondary.clone(),
        }
    }
}

impl<R: Filterable> PartialEq for FilterState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
            && self.primary == other.primary
            && self.secondary == other.secondary
    }
}

impl<R: Filterable> fmt::Debug for FilterState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("query", &self.query)
            .field(R::PRIMARY_PARAM, &self.primary)
            .field(R::SECONDARY_PARAM, &self.secondary)
            .finish()
    }
}

/// Sorted distinct values of a field, for building select options
/// (the audit view's user and action lists).
pub fn distinct_values<R, F>(records: &[R], field: F) -> Vec<String>
where
    F: Fn(&R) -> &str,
{
    records
        .iter()
        .map(|r| field(r).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_params() {
        assert_eq!(CategoryFilter::<RiskLevel>::from_param("all"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::<RiskLevel>::from_param("high"),
            Some(CategoryFilter::Only(RiskLevel::High))
        );
        assert_eq!(CategoryFilter::<RiskLevel>::from_param("HIGH"), None);
        assert_eq!(CategoryFilter::Only(TransactionStatus::Flagged).to_param(), "flagged");
    }

    #[test]
    fn free_form_values_accept_anything() {
        assert_eq!(
            CategoryFilter::<String>::from_param("admin@ff.com"),
            Some(CategoryFilter::Only("admin@ff.com".to_string()))
        );
    }
}

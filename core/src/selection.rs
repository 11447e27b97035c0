//! Selection set and bulk actions.
//!
//! RULES:
//!   - The selection holds record ids; it never owns records.
//!   - A filter change does not prune the selection. Ids outside the
//!     current filtered view are inert: they count toward neither the
//!     select-all comparison nor any bulk action.
//!   - A bulk action always clears the selection, whether or not the
//!     sink accepted the report. No retry, no rollback.

use crate::{
    error::ConsoleResult,
    record::{Record, RecordKind},
    types::{RecordId, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Approve,
    Flag,
    Reject,
}

impl BulkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Flag    => "flag",
            Self::Reject  => "reject",
        }
    }
}

/// What a bulk action reports to the external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkActionReport {
    pub report_id:   Uuid,
    pub action:      BulkAction,
    pub kind:        RecordKind,
    pub actor:       String,
    pub issued_at:   Timestamp,
    /// Affected ids, in filtered-view order.
    pub record_ids:  Vec<RecordId>,
}

/// The external collaborator a bulk action reports to (an audit trail,
/// an event bus, a backend call).
pub trait ActionSink {
    fn submit(&mut self, report: &BulkActionReport) -> ConsoleResult<()>;
}

/// Sink that keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<BulkActionReport>,
}

impl ActionSink for MemorySink {
    fn submit(&mut self, report: &BulkActionReport) -> ConsoleResult<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Sink that only writes reports to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl ActionSink for LogSink {
    fn submit(&mut self, report: &BulkActionReport) -> ConsoleResult<()> {
        log::info!(
            "bulk {} on {} {:?} record(s) by {}: {}",
            report.action.as_str(),
            report.record_ids.len(),
            report.kind,
            report.actor,
            report.record_ids.join(",")
        );
        Ok(())
    }
}

/// Result of a bulk action: the report plus whether the sink took it.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub report:    BulkActionReport,
    pub delivered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Insert if absent, remove if present. Returns true if now selected.
    pub fn toggle_one(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Number of selected ids that are present in the filtered view.
    pub fn visible_count<'a, R: Record>(&self, filtered: impl IntoIterator<Item = &'a R>) -> usize {
        filtered.into_iter().filter(|r| self.contains(r.id())).count()
    }

    /// True when every filtered record is selected (and there is at least one).
    /// Stale ids outside the view do not affect the answer.
    pub fn all_selected<'a, R: Record>(&self, filtered: &[&'a R]) -> bool {
        !filtered.is_empty() && self.visible_count(filtered.iter().copied()) == filtered.len()
    }

    /// Select-all / deselect-all over the filtered view. When every filtered
    /// record is already selected the selection is cleared; otherwise it is
    /// replaced (not extended) by exactly the filtered ids.
    pub fn toggle_all<'a, R: Record>(&mut self, filtered: &[&'a R]) {
        if self.all_selected(filtered) {
            self.ids.clear();
        } else {
            self.ids = filtered.iter().map(|r| r.id().to_string()).collect();
        }
    }

    /// Drop ids that are not in the filtered view. Returns how many were dropped.
    pub fn retain_visible<'a, R: Record>(&mut self, filtered: &[&'a R]) -> usize {
        let visible: BTreeSet<&str> = filtered.iter().map(|r| r.id()).collect();
        let before = self.ids.len();
        self.ids.retain(|id| visible.contains(id.as_str()));
        before - self.ids.len()
    }

    /// Selected records, in filtered-view order.
    pub fn selected_in_view<'a, R: Record>(&self, filtered: &[&'a R]) -> Vec<&'a R> {
        filtered.iter().copied().filter(|r| self.contains(r.id())).collect()
    }

    /// Report the selected ∩ filtered records to `sink`, then clear the
    /// selection unconditionally. Returns None when nothing in view is
    /// selected; the selection is still cleared.
    pub fn apply_bulk<'a, R: Record>(
        &mut self,
        action: BulkAction,
        filtered: &[&'a R],
        actor: &str,
        issued_at: Timestamp,
        sink: &mut dyn ActionSink,
    ) -> Option<BulkOutcome> {
        let record_ids: Vec<RecordId> = self
            .selected_in_view(filtered)
            .into_iter()
            .map(|r| r.id().to_string())
            .collect();
        let stale = self.ids.len().saturating_sub(record_ids.len());
        self.ids.clear();

        if record_ids.is_empty() {
            log::debug!("bulk {} skipped: no selected records in view ({stale} stale)", action.as_str());
            return None;
        }

        let report = BulkActionReport {
            report_id: Uuid::new_v4(),
            action,
            kind: R::KIND,
            actor: actor.to_string(),
            issued_at,
            record_ids,
        };
        let delivered = match sink.submit(&report) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("bulk {} report {} not delivered: {e}", action.as_str(), report.report_id);
                false
            }
        };
        Some(BulkOutcome { report, delivered })
    }
}

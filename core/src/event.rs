//! View events: how table state changes reach the views that render them.
//!
//! RULE: Observers never reach into a TableView's internals.
//! They receive a ViewEvent after each state change and pull whatever
//! derived data they need (filtered rows, window slice) from the view.

use crate::{record::RecordKind, selection::BulkAction, types::Pixels};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every change a TableView publishes.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    // ── Filtering ──────────────────────────────────
    FilterChanged {
        kind:    RecordKind,
        matched: usize,
        total:   usize,
    },

    // ── Windowing ──────────────────────────────────
    WindowChanged {
        start:        usize,
        end:          usize,
        total_height: Pixels,
    },

    // ── Selection ──────────────────────────────────
    SelectionChanged {
        selected:         usize,
        visible_selected: usize,
    },
    BulkActionApplied {
        action:    BulkAction,
        report_id: Option<Uuid>,
        records:   usize,
        delivered: bool,
    },

    // ── Export ─────────────────────────────────────
    Exported {
        filename: String,
        rows:     usize,
        bytes:    usize,
    },
}

impl ViewEvent {
    /// Stable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::FilterChanged { .. }     => "filter_changed",
            ViewEvent::WindowChanged { .. }     => "window_changed",
            ViewEvent::SelectionChanged { .. }  => "selection_changed",
            ViewEvent::BulkActionApplied { .. } => "bulk_action_applied",
            ViewEvent::Exported { .. }          => "exported",
        }
    }
}

/// Anything that wants to hear about view changes.
pub trait ViewObserver {
    fn on_event(&mut self, event: &ViewEvent);
}

impl<F: FnMut(&ViewEvent)> ViewObserver for F {
    fn on_event(&mut self, event: &ViewEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

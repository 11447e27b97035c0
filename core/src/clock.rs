//! Session clock: owns the session start instant and the notion of "now".
//!
//! Record generation always anchors on `started_at`, so a session's data is
//! reproducible from (seed, started_at). Export filenames and bulk-action
//! reports read `now()`, which is either frozen at `started_at` (tests,
//! reproducible runs) or tracks the wall clock.

use crate::types::Timestamp;
use chrono::{DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClock {
    pub started_at: Timestamp,
    pub mode:       ClockMode,
}

impl SessionClock {
    /// Live clock starting at the current wall-clock instant.
    pub fn live() -> Self {
        Self {
            started_at: truncate_millis(Utc::now()),
            mode:       ClockMode::Live,
        }
    }

    /// Clock pinned at `at`; `now()` never moves.
    pub fn frozen(at: Timestamp) -> Self {
        Self {
            started_at: truncate_millis(at),
            mode:       ClockMode::Frozen,
        }
    }

    pub fn now(&self) -> Timestamp {
        match self.mode {
            ClockMode::Frozen => self.started_at,
            ClockMode::Live   => truncate_millis(Utc::now()),
        }
    }

    /// The instant `days` whole days before session start.
    pub fn days_before_start(&self, days: i64) -> Timestamp {
        self.started_at - TimeDelta::days(days)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    Frozen,
    Live,
}

/// Drop sub-millisecond precision so timestamps survive an ISO-8601 round trip.
pub fn truncate_millis(at: Timestamp) -> Timestamp {
    at.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(at)
}

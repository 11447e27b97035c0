//! Shared primitive types used across the console engine.

use chrono::{DateTime, Utc};

/// A stable, unique identifier for any record in a session.
pub type RecordId = String;

/// Wall-clock instant. All timestamps are UTC with millisecond precision.
pub type Timestamp = DateTime<Utc>;

/// Vertical distance in CSS pixels.
pub type Pixels = f64;

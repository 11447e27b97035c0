//! The record model shared by every table view.
//!
//! Field names serialize in lowerCamelCase and timestamps as ISO-8601
//! strings with millisecond precision, which is exactly the JSON export
//! shape.

use crate::types::{RecordId, Timestamp};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Closed categorical enums ───────────────────────────────────────

/// A closed set of string-valued categories (statuses, levels, priorities).
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive match against the wire value.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

macro_rules! category_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Category>::parse(s).ok_or_else(|| UnknownCategory {
                    kind: stringify!($name),
                    value: s.to_string(),
                })
            }
        }
    };
}

/// Returned when a string does not name any variant of a category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownCategory {
    pub kind:  &'static str,
    pub value: String,
}

category_enum!(
    /// Banding of a 0–100 risk score.
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
);

category_enum!(
    TransactionStatus {
        Pending => "pending",
        Approved => "approved",
        Flagged => "flagged",
        Rejected => "rejected",
    }
);

category_enum!(
    KycStatus {
        Verified => "verified",
        Pending => "pending",
        Rejected => "rejected",
        Review => "review",
    }
);

category_enum!(
    InvestigationStatus {
        Open => "open",
        InProgress => "in-progress",
        Closed => "closed",
    }
);

category_enum!(
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
);

category_enum!(
    DocumentStatus {
        Verified => "verified",
        Pending => "pending",
        Rejected => "rejected",
    }
);

impl RiskLevel {
    /// Step function: low <30, medium 30–59, high 60–84, critical >=85.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29  => Self::Low,
            30..=59 => Self::Medium,
            60..=84 => Self::High,
            _       => Self::Critical,
        }
    }
}

// ── Risk score ─────────────────────────────────────────────────────

pub const MAX_RISK_SCORE: u8 = 100;

/// A risk score and its derived level. The level is never stored
/// independently: it is computed from the score on construction and
/// checked on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRisk", rename_all = "camelCase")]
pub struct Risk {
    risk_score: u8,
    risk_level: RiskLevel,
}

impl Risk {
    /// Scores above 100 are clamped.
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_RISK_SCORE);
        Self {
            risk_score: score,
            risk_level: RiskLevel::from_score(score),
        }
    }

    pub fn score(&self) -> u8 {
        self.risk_score
    }

    pub fn level(&self) -> RiskLevel {
        self.risk_level
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRisk {
    risk_score: u8,
    risk_level: RiskLevel,
}

impl TryFrom<RawRisk> for Risk {
    type Error = String;

    fn try_from(raw: RawRisk) -> Result<Self, Self::Error> {
        if raw.risk_score > MAX_RISK_SCORE {
            return Err(format!("risk score {} out of range", raw.risk_score));
        }
        let risk = Risk::from_score(raw.risk_score);
        if risk.risk_level != raw.risk_level {
            return Err(format!(
                "risk level '{}' disagrees with score {} (expected '{}')",
                raw.risk_level, raw.risk_score, risk.risk_level
            ));
        }
        Ok(risk)
    }
}

// ── Timestamps ─────────────────────────────────────────────────────

/// ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2024-03-01T12:00:00.000Z`.
pub fn iso8601(at: &Timestamp) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Serde adapter for [`iso8601`] timestamps.
pub mod iso8601_serde {
    use crate::types::Timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::iso8601(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// ── Record kinds ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Transaction,
    KycProfile,
    Investigation,
    AuditLog,
}

impl RecordKind {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Transaction   => "TXN",
            Self::KycProfile    => "KYC",
            Self::Investigation => "INV",
            Self::AuditLog      => "LOG",
        }
    }

    /// Zero-padded width of the sequence part of an id.
    pub fn id_width(&self) -> usize {
        match self {
            Self::AuditLog => 8,
            _              => 6,
        }
    }

    /// Format the id for 1-based sequence number `seq`.
    pub fn format_id(&self, seq: usize) -> RecordId {
        format!("{}-{:0width$}", self.id_prefix(), seq, width = self.id_width())
    }
}

/// Behaviour common to every record variant.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + 'static {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// The timestamp the collection is ordered by.
    fn primary_time(&self) -> Timestamp;

    fn risk(&self) -> Option<Risk> {
        None
    }

    fn flags(&self) -> &[String] {
        &[]
    }
}

// ── Variants ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id:        RecordId,
    #[serde(with = "iso8601_serde")]
    pub timestamp: Timestamp,
    pub amount:    u64,
    pub currency:  String,
    pub sender:    String,
    pub receiver:  String,
    pub status:    TransactionStatus,
    #[serde(flatten)]
    pub risk:      Risk,
    pub country:   String,
    pub method:    String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags:     Vec<String>,
}

impl Record for Transaction {
    const KIND: RecordKind = RecordKind::Transaction;

    fn id(&self) -> &str { &self.id }
    fn primary_time(&self) -> Timestamp { self.timestamp }
    fn risk(&self) -> Option<Risk> { Some(self.risk) }
    fn flags(&self) -> &[String] { &self.flags }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDocument {
    #[serde(rename = "type")]
    pub doc_type:    String,
    pub status:      DocumentStatus,
    #[serde(with = "iso8601_serde")]
    pub upload_date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycProfile {
    pub id:                 RecordId,
    pub name:               String,
    pub email:              String,
    pub country:            String,
    pub status:             KycStatus,
    #[serde(flatten)]
    pub risk:               Risk,
    #[serde(with = "iso8601_serde")]
    pub join_date:          Timestamp,
    #[serde(with = "iso8601_serde")]
    pub last_activity:      Timestamp,
    pub total_transactions: u32,
    pub total_volume:       u64,
    pub documents:          Vec<KycDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags:              Vec<String>,
}

impl Record for KycProfile {
    const KIND: RecordKind = RecordKind::KycProfile;

    fn id(&self) -> &str { &self.id }
    fn primary_time(&self) -> Timestamp { self.join_date }
    fn risk(&self) -> Option<Risk> { Some(self.risk) }
    fn flags(&self) -> &[String] { &self.flags }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    pub id:           RecordId,
    pub profile_id:   RecordId,
    pub profile_name: String,
    #[serde(rename = "type")]
    pub case_type:    String,
    pub status:       InvestigationStatus,
    pub priority:     Priority,
    pub assignee:     String,
    #[serde(with = "iso8601_serde")]
    pub created_at:   Timestamp,
    #[serde(with = "iso8601_serde")]
    pub updated_at:   Timestamp,
    pub description:  String,
}

impl Record for Investigation {
    const KIND: RecordKind = RecordKind::Investigation;

    fn id(&self) -> &str { &self.id }
    fn primary_time(&self) -> Timestamp { self.created_at }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id:         RecordId,
    #[serde(with = "iso8601_serde")]
    pub timestamp:  Timestamp,
    pub user:       String,
    pub action:     String,
    pub resource:   String,
    pub details:    String,
    pub ip_address: String,
}

impl Record for AuditLogEntry {
    const KIND: RecordKind = RecordKind::AuditLog;

    fn id(&self) -> &str { &self.id }
    fn primary_time(&self) -> Timestamp { self.timestamp }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_step_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(84), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(85), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn ids_are_prefixed_and_padded() {
        assert_eq!(RecordKind::Transaction.format_id(2), "TXN-000002");
        assert_eq!(RecordKind::AuditLog.format_id(17), "LOG-00000017");
    }

    #[test]
    fn category_parse_is_case_sensitive() {
        assert_eq!("flagged".parse::<TransactionStatus>(), Ok(TransactionStatus::Flagged));
        assert!("Flagged".parse::<TransactionStatus>().is_err());
        assert_eq!(
            InvestigationStatus::parse("in-progress"),
            Some(InvestigationStatus::InProgress)
        );
    }

    #[test]
    fn inconsistent_risk_is_rejected_on_deserialize() {
        let ok: Risk = serde_json::from_str(r#"{"riskScore":85,"riskLevel":"critical"}"#).unwrap();
        assert_eq!(ok.level(), RiskLevel::Critical);

        let bad = serde_json::from_str::<Risk>(r#"{"riskScore":10,"riskLevel":"high"}"#);
        assert!(bad.is_err());
    }
}

//! Export serializer: filtered records to CSV or JSON bytes.
//!
//! Export never mutates state. Delivery (a browser download, a file on
//! disk) belongs to the caller; this module only produces the payload and
//! a suggested filename.
//!
//! CSV comes in two flavours:
//!   - `Raw`: values joined with commas, nothing quoted. A value containing
//!     a comma or newline corrupts its row. This is the console's
//!     long-standing output format and stays the default.
//!   - `Quoted`: RFC 4180 quoting via the `csv` crate.

use crate::{
    error::{ConsoleError, ConsoleResult},
    record::{iso8601, AuditLogEntry, Investigation, KycProfile, Record, Transaction},
    types::Timestamp,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvMode {
    #[default]
    Raw,
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv(CsvMode),
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv(_) => "csv",
            Self::Json   => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv(_) => "text/csv",
            Self::Json   => "application/json",
        }
    }
}

/// Per-variant export layout.
pub trait Exportable: Record {
    /// Filename stem, e.g. `transactions`.
    const STEM: &'static str;

    /// Human-readable column names, in output order.
    fn csv_header() -> &'static [&'static str];

    /// Field values in header order. Timestamps are ISO-8601.
    fn csv_row(&self) -> Vec<String>;
}

impl Exportable for Transaction {
    const STEM: &'static str = "transactions";

    fn csv_header() -> &'static [&'static str] {
        &[
            "ID", "Timestamp", "Amount", "Currency", "Sender", "Receiver", "Status",
            "Risk Level", "Risk Score", "Country", "Method",
        ]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            iso8601(&self.timestamp),
            self.amount.to_string(),
            self.currency.clone(),
            self.sender.clone(),
            self.receiver.clone(),
            self.status.to_string(),
            self.risk.level().to_string(),
            self.risk.score().to_string(),
            self.country.clone(),
            self.method.clone(),
        ]
    }
}

impl Exportable for KycProfile {
    const STEM: &'static str = "kyc-profiles";

    fn csv_header() -> &'static [&'static str] {
        &[
            "ID", "Name", "Email", "Country", "Status", "Risk Level", "Risk Score",
            "Join Date", "Last Activity", "Total Transactions", "Total Volume",
        ]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.country.clone(),
            self.status.to_string(),
            self.risk.level().to_string(),
            self.risk.score().to_string(),
            iso8601(&self.join_date),
            iso8601(&self.last_activity),
            self.total_transactions.to_string(),
            self.total_volume.to_string(),
        ]
    }
}

impl Exportable for Investigation {
    const STEM: &'static str = "investigations";

    fn csv_header() -> &'static [&'static str] {
        &[
            "ID", "Profile ID", "Profile Name", "Type", "Status", "Priority", "Assignee",
            "Created At", "Updated At", "Description",
        ]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.profile_id.clone(),
            self.profile_name.clone(),
            self.case_type.clone(),
            self.status.to_string(),
            self.priority.to_string(),
            self.assignee.clone(),
            iso8601(&self.created_at),
            iso8601(&self.updated_at),
            self.description.clone(),
        ]
    }
}

impl Exportable for AuditLogEntry {
    const STEM: &'static str = "audit-log";

    fn csv_header() -> &'static [&'static str] {
        &["ID", "Timestamp", "User", "Action", "Resource", "Details", "IP Address"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            iso8601(&self.timestamp),
            self.user.clone(),
            self.action.clone(),
            self.resource.clone(),
            self.details.clone(),
            self.ip_address.clone(),
        ]
    }
}

/// A finished export, ready to be handed to a download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename:  String,
    pub mime_type: &'static str,
    pub bytes:     Vec<u8>,
    pub rows:      usize,
}

impl ExportPayload {
    /// Write the payload into `dir` under its suggested filename.
    /// Colons in the timestamp are replaced so the name is valid on every
    /// filesystem.
    pub fn write_to(&self, dir: &Path) -> ConsoleResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.filename.replace(':', "-"));
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `{stem}-{ISO-8601 timestamp}.{ext}`
pub fn export_filename<R: Exportable>(format: ExportFormat, at: Timestamp) -> String {
    format!("{}-{}.{}", R::STEM, iso8601(&at), format.extension())
}

pub fn export<R: Exportable>(
    records: &[&R],
    format: ExportFormat,
    at: Timestamp,
) -> ConsoleResult<ExportPayload> {
    let bytes = match format {
        ExportFormat::Csv(CsvMode::Raw)    => csv_raw(records).into_bytes(),
        ExportFormat::Csv(CsvMode::Quoted) => csv_quoted(records)?,
        ExportFormat::Json                 => serde_json::to_vec_pretty(records)?,
    };
    let payload = ExportPayload {
        filename:  export_filename::<R>(format, at),
        mime_type: format.mime_type(),
        bytes,
        rows:      records.len(),
    };
    log::info!(
        "exported {} {} row(s) as {} ({} bytes)",
        payload.rows,
        R::STEM,
        format.extension(),
        payload.bytes.len()
    );
    Ok(payload)
}

fn csv_raw<R: Exportable>(records: &[&R]) -> String {
    std::iter::once(R::csv_header().join(","))
        .chain(records.iter().map(|r| r.csv_row().join(",")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_quoted<R: Exportable>(records: &[&R]) -> ConsoleResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(R::csv_header())?;
    for r in records {
        writer.write_record(r.csv_row())?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| ConsoleError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

mod common;

use common::{plain_txns, t0, txn};
use console_core::{
    config::ConsoleConfig,
    export::{export, export_filename, CsvMode, ExportFormat},
    record::{AuditLogEntry, Transaction, TransactionStatus},
    session::ConsoleSession,
};

const TXN_HEADER: &str =
    "ID,Timestamp,Amount,Currency,Sender,Receiver,Status,Risk Level,Risk Score,Country,Method";

#[test]
fn raw_csv_has_header_and_one_line_per_record() {
    let records = plain_txns(2);
    let refs: Vec<&Transaction> = records.iter().collect();
    let payload = export(&refs, ExportFormat::Csv(CsvMode::Raw), t0()).unwrap();
    let text = String::from_utf8(payload.bytes).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], TXN_HEADER);
    assert_eq!(
        lines[1],
        "TXN-000001,2024-06-01T11:59:00.000Z,1000,USD,Sender 1,Receiver 1,approved,low,10,United States,Wire Transfer"
    );
    assert_eq!(payload.mime_type, "text/csv");
    assert_eq!(payload.rows, 2);
}

#[test]
fn raw_csv_does_not_quote_embedded_commas() {
    let mut record = txn(1, TransactionStatus::Flagged, 90);
    record.sender = "Acme, Inc.".to_string();
    let payload = export(&[&record], ExportFormat::Csv(CsvMode::Raw), t0()).unwrap();
    let text = String::from_utf8(payload.bytes).unwrap();
    let row = text.lines().nth(1).unwrap();
    // The row now has one more column than the header.
    assert_eq!(row.split(',').count(), TXN_HEADER.split(',').count() + 1);
}

#[test]
fn quoted_csv_reads_back_with_the_csv_crate() {
    let mut record = txn(1, TransactionStatus::Flagged, 90);
    record.sender = "Acme, Inc. \"East\"".to_string();
    let payload = export(&[&record], ExportFormat::Csv(CsvMode::Quoted), t0()).unwrap();

    let mut reader = csv::Reader::from_reader(payload.bytes.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 11);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][4], "Acme, Inc. \"East\"");
}

#[test]
fn json_round_trips_field_values() {
    let mut records = plain_txns(3);
    records[1].flags = vec!["Unusual amount".to_string()];
    let refs: Vec<&Transaction> = records.iter().collect();
    let payload = export(&refs, ExportFormat::Json, t0()).unwrap();
    let text = String::from_utf8(payload.bytes.clone()).unwrap();

    assert!(text.starts_with("[\n  {"));
    assert!(text.contains("\"riskScore\": 10"));
    assert!(text.contains("\"riskLevel\": \"low\""));
    assert!(text.contains("\"timestamp\": \"2024-06-01T11:59:00.000Z\""));

    let back: Vec<Transaction> = serde_json::from_slice(&payload.bytes).unwrap();
    assert_eq!(back, records);
}

#[test]
fn json_rejects_inconsistent_risk() {
    let bad = r#"[{
        "id": "TXN-000001", "timestamp": "2024-06-01T11:59:00.000Z", "amount": 5,
        "currency": "USD", "sender": "a", "receiver": "b", "status": "approved",
        "riskScore": 95, "riskLevel": "low", "country": "France", "method": "Card"
    }]"#;
    assert!(serde_json::from_str::<Vec<Transaction>>(bad).is_err());
}

#[test]
fn filenames_follow_stem_timestamp_extension() {
    assert_eq!(
        export_filename::<Transaction>(ExportFormat::Csv(CsvMode::Raw), t0()),
        "transactions-2024-06-01T12:00:00.000Z.csv"
    );
    assert_eq!(
        export_filename::<AuditLogEntry>(ExportFormat::Json, t0()),
        "audit-log-2024-06-01T12:00:00.000Z.json"
    );
}

#[test]
fn session_export_uses_filtered_view_and_writes_to_disk() {
    let session = ConsoleSession::build(ConsoleConfig::default_test()).unwrap();
    let mut view = session.transactions_view().unwrap();
    view.set_query("TXN-00001").unwrap();
    let expected = view.filtered_len();
    assert!(expected > 0);

    let payload = session.export(&mut view, None).unwrap();
    assert_eq!(payload.rows, expected);
    assert_eq!(payload.filename, "transactions-2024-06-01T12:00:00.000Z.csv");

    let dir = std::env::temp_dir().join(format!("console-export-{}", std::process::id()));
    let path = payload.write_to(&dir).unwrap();
    assert!(path.file_name().unwrap().to_string_lossy().ends_with("12-00-00.000Z.csv"));
    assert_eq!(std::fs::read(&path).unwrap(), payload.bytes);
    std::fs::remove_dir_all(&dir).ok();
}

//! console-runner: headless driver for the compliance console engine.
//!
//! Usage:
//!   console-runner --seed 12345 --view transactions --query "status=flagged&risk=high"
//!   console-runner --config console.json --view audit --scroll 1200 --export csv --out ./exports
//!   console-runner --view kyc --query "risk=critical" --bulk flag

use anyhow::{bail, Result};
use console_core::{
    config::ConsoleConfig,
    export::{CsvMode, ExportFormat, Exportable},
    filter::Filterable,
    selection::{BulkAction, LogSink},
    session::ConsoleSession,
    url_sync::MemoryAddressBar,
    view::TableView,
};
use std::env;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match str_arg(&args, "--config") {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    let view = str_arg(&args, "--view").unwrap_or("transactions");
    let query = str_arg(&args, "--query").unwrap_or("");
    let scroll = parse_arg(&args, "--scroll", 0.0f64);
    let out_dir = str_arg(&args, "--out").unwrap_or("./exports");
    let format = match str_arg(&args, "--export") {
        None => None,
        Some("csv") => Some(ExportFormat::Csv(CsvMode::Raw)),
        Some("csv-quoted") => Some(ExportFormat::Csv(CsvMode::Quoted)),
        Some("json") => Some(ExportFormat::Json),
        Some(other) => bail!("unknown --export format '{other}' (csv, csv-quoted, json)"),
    };
    let bulk = match str_arg(&args, "--bulk") {
        None => None,
        Some("approve") => Some(BulkAction::Approve),
        Some("flag") => Some(BulkAction::Flag),
        Some("reject") => Some(BulkAction::Reject),
        Some(other) => bail!("unknown --bulk action '{other}' (approve, flag, reject)"),
    };

    println!("Compliance console: console-runner");
    println!("  seed:   {}", config.seed);
    println!("  view:   {view}");
    println!("  query:  {query}");
    println!("  scroll: {scroll}");
    println!();

    let session = ConsoleSession::build(config)?;
    println!("{}", serde_json::to_string_pretty(&session.metrics)?);
    println!();

    let run = Run { query, scroll, format, bulk, out_dir: Path::new(out_dir) };
    match view {
        "transactions" => run.drive(&session, &session.data.transactions),
        "kyc" => run.drive(&session, &session.data.kyc_profiles),
        "investigations" => run.drive(&session, &session.data.investigations),
        "audit" => run.drive(&session, &session.data.audit_logs),
        other => bail!("unknown --view '{other}' (transactions, kyc, investigations, audit)"),
    }
}

struct Run<'a> {
    query:   &'a str,
    scroll:  f64,
    format:  Option<ExportFormat>,
    bulk:    Option<BulkAction>,
    out_dir: &'a Path,
}

impl Run<'_> {
    fn drive<R: Filterable + Exportable>(&self, session: &ConsoleSession, records: &Arc<[R]>) -> Result<()> {
        let bar = MemoryAddressBar::new(R::STEM, self.query);
        let mut view: TableView<R> = session.view_from_url(records, bar)?;
        view.scroll_to(self.scroll)?;

        println!("filter:   {:?}", view.filter());
        println!("matched:  {} / {}", view.filtered_len(), view.total_len());

        let slice = view.window_slice()?.clone();
        println!(
            "window:   visible {}..{}  render {}..{}  height {}px",
            slice.visible_start, slice.visible_end, slice.start, slice.end, slice.total_height
        );
        for (offset, record) in view.visible_rows()? {
            println!("  {offset:>9.0}  {}", record.csv_row().join(" | "));
        }

        if let Some(format) = self.format {
            let payload = session.export(&mut view, Some(format))?;
            let path = payload.write_to(self.out_dir)?;
            log::info!("wrote {} ({})", path.display(), payload.mime_type);
            println!();
            println!("exported {} row(s) to {}", payload.rows, path.display());
        }

        if let Some(action) = self.bulk {
            view.toggle_all();
            let mut sink = LogSink;
            match session.bulk_action(&mut view, action, &mut sink) {
                Some(outcome) => println!(
                    "bulk {}: {} record(s), report {}",
                    action.as_str(),
                    outcome.report.record_ids.len(),
                    outcome.report.report_id
                ),
                None => println!("bulk {}: nothing in view", action.as_str()),
            }
        }
        Ok(())
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

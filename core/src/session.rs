//! Console session: built once at startup from a ConsoleConfig.
//!
//! RULE: Nothing in this crate lives in a module-level global. The session
//! owns the clock, the RNG bank and the generated data, and hands out
//! table views over shared slices of it.

use crate::{
    clock::SessionClock,
    config::ConsoleConfig,
    dataset::SessionData,
    error::ConsoleResult,
    export::{ExportFormat, ExportPayload, Exportable},
    filter::Filterable,
    metrics::DashboardMetrics,
    record::{AuditLogEntry, Investigation, KycProfile, Transaction},
    rng::RngBank,
    selection::{ActionSink, BulkAction, BulkOutcome},
    url_sync::AddressBar,
    view::TableView,
};
use std::sync::Arc;

pub struct ConsoleSession {
    pub config:   ConsoleConfig,
    pub clock:    SessionClock,
    pub rng_bank: RngBank,
    pub data:     SessionData,
    pub metrics:  DashboardMetrics,
}

impl ConsoleSession {
    pub fn build(config: ConsoleConfig) -> ConsoleResult<Self> {
        config.validate()?;
        let clock = match config.started_at {
            Some(at) => SessionClock::frozen(at),
            None     => SessionClock::live(),
        };
        let rng_bank = RngBank::new(config.seed);
        let data = SessionData::generate(&clock, &rng_bank, &config.sizes);
        let metrics = DashboardMetrics::compute(&data, &clock);
        log::info!(
            "session built: seed={} started_at={} mode={:?}",
            config.seed,
            clock.started_at,
            clock.mode
        );
        Ok(Self { config, clock, rng_bank, data, metrics })
    }

    pub fn view<R: Filterable + Exportable>(&self, records: &Arc<[R]>) -> ConsoleResult<TableView<R>> {
        TableView::new(Arc::clone(records), &self.config.table)
    }

    /// View whose filter is kept in step with the address bar's query string.
    pub fn view_from_url<R: Filterable + Exportable>(
        &self,
        records: &Arc<[R]>,
        bar: impl AddressBar + 'static,
    ) -> ConsoleResult<TableView<R>> {
        TableView::from_address_bar(Arc::clone(records), &self.config.table, Box::new(bar))
    }

    pub fn transactions_view(&self) -> ConsoleResult<TableView<Transaction>> {
        self.view(&self.data.transactions)
    }

    pub fn kyc_view(&self) -> ConsoleResult<TableView<KycProfile>> {
        self.view(&self.data.kyc_profiles)
    }

    pub fn investigations_view(&self) -> ConsoleResult<TableView<Investigation>> {
        self.view(&self.data.investigations)
    }

    pub fn audit_view(&self) -> ConsoleResult<TableView<AuditLogEntry>> {
        self.view(&self.data.audit_logs)
    }

    /// Bulk action attributed to the configured operator at the current time.
    pub fn bulk_action<R: Filterable + Exportable>(
        &self,
        view: &mut TableView<R>,
        action: BulkAction,
        sink: &mut dyn ActionSink,
    ) -> Option<BulkOutcome> {
        view.bulk_action(action, &self.config.operator, self.clock.now(), sink)
    }

    /// Export a view's filtered records, stamped with the current time.
    /// `None` uses the configured CSV mode.
    pub fn export<R: Filterable + Exportable>(
        &self,
        view: &mut TableView<R>,
        format: Option<ExportFormat>,
    ) -> ConsoleResult<ExportPayload> {
        let format = format.unwrap_or(ExportFormat::Csv(self.config.csv_mode));
        view.export(format, self.clock.now())
    }
}

//! Table view: one filtered, windowed, selectable table over a shared
//! record collection.
//!
//! RULES:
//!   - The record collection is shared and read-only; the view owns only
//!     derived state (filtered indices, selection, scroll window).
//!   - Every mutation recomputes what it invalidates, then publishes one or
//!     more ViewEvents to observers, in registration order.
//!   - A filter change re-scans the whole collection and updates the row
//!     count of the window. It never touches the selection.
//!   - A view bound to an address bar hydrates its filter from it once, then
//!     writes every later filter change back through UrlFilterSync.

use crate::{
    config::TableConfig,
    error::ConsoleResult,
    event::{SubscriptionId, ViewEvent, ViewObserver},
    export::{self, ExportFormat, ExportPayload, Exportable},
    filter::{CategoryFilter, FilterState, Filterable},
    selection::{ActionSink, BulkAction, BulkOutcome, SelectionSet},
    types::{Pixels, Timestamp},
    url_sync::{AddressBar, UrlFilterSync},
    window::{RowWindow, WindowSlice},
};
use std::sync::Arc;

pub struct TableView<R: Filterable + Exportable> {
    records:   Arc<[R]>,
    filter:    FilterState<R>,
    /// Indices into `records` that pass `filter`, in collection order.
    filtered:  Vec<usize>,
    selection: SelectionSet,
    window:    RowWindow,
    url:       Option<Box<dyn AddressBar>>,
    observers: Vec<(SubscriptionId, Box<dyn ViewObserver>)>,
    next_id:   u64,
}

impl<R: Filterable + Exportable> TableView<R> {
    pub fn new(records: Arc<[R]>, table: &TableConfig) -> ConsoleResult<Self> {
        Self::with_filter(records, table, FilterState::default())
    }

    /// View starting from an existing filter state (e.g. hydrated from the URL).
    pub fn with_filter(
        records: Arc<[R]>,
        table: &TableConfig,
        filter: FilterState<R>,
    ) -> ConsoleResult<Self> {
        let mut window = RowWindow::new(table.row_height, table.viewport_height, table.overscan)?;
        let filtered = filter.matching_indices(&records);
        window.set_row_count(filtered.len());
        Ok(Self {
            records,
            filter,
            filtered,
            selection: SelectionSet::new(),
            window,
            url: None,
            observers: Vec::new(),
            next_id: 0,
        })
    }

    /// View whose filter lives in `bar`'s query string: hydrated now,
    /// rewritten on every later filter change.
    pub fn from_address_bar(
        records: Arc<[R]>,
        table: &TableConfig,
        bar: Box<dyn AddressBar>,
    ) -> ConsoleResult<Self> {
        let filter = UrlFilterSync::<R>::new().hydrate(&*bar);
        let mut view = Self::with_filter(records, table, filter)?;
        view.url = Some(bar);
        Ok(view)
    }

    pub fn address_bar(&self) -> Option<&dyn AddressBar> {
        self.url.as_deref()
    }

    // ── Observers ──────────────────────────────────

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn publish(&mut self, event: ViewEvent) {
        log::debug!("[{:?}] {}", R::KIND, event.name());
        for (_, observer) in &mut self.observers {
            observer.on_event(&event);
        }
    }

    // ── Read side ──────────────────────────────────

    pub fn records(&self) -> &Arc<[R]> {
        &self.records
    }

    pub fn filter(&self) -> &FilterState<R> {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn total_len(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Records passing the current filter, in collection order.
    pub fn filtered(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    /// Filtered record at a filtered-view position.
    pub fn row(&self, position: usize) -> Option<&R> {
        self.filtered.get(position).map(|&i| &self.records[i])
    }

    pub fn window_slice(&mut self) -> ConsoleResult<&WindowSlice> {
        self.window.slice()
    }

    /// Records in the current render range, with their absolute offsets.
    pub fn visible_rows(&mut self) -> ConsoleResult<Vec<(Pixels, &R)>> {
        let slice = self.window.slice()?.clone();
        Ok(slice
            .rows
            .iter()
            .filter_map(|row| self.row(row.index).map(|r| (row.offset, r)))
            .collect())
    }

    /// Number of selected ids present in the filtered view.
    pub fn visible_selected(&self) -> usize {
        self.selection.visible_count(self.filtered())
    }

    /// State of the header checkbox.
    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.filtered())
    }

    // ── Filtering ──────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) -> ConsoleResult<()> {
        let mut next = self.filter.clone();
        next.query = query.into();
        self.set_filter(next)
    }

    pub fn set_primary(&mut self, value: CategoryFilter<R::Primary>) -> ConsoleResult<()> {
        let mut next = self.filter.clone();
        next.primary = value;
        self.set_filter(next)
    }

    pub fn set_secondary(&mut self, value: CategoryFilter<R::Secondary>) -> ConsoleResult<()> {
        let mut next = self.filter.clone();
        next.secondary = value;
        self.set_filter(next)
    }

    /// Replace the whole filter. No-op (and no events) if unchanged.
    pub fn set_filter(&mut self, filter: FilterState<R>) -> ConsoleResult<()> {
        if filter == self.filter {
            return Ok(());
        }
        self.filter = filter;
        self.filtered = self.filter.matching_indices(&self.records);
        self.window.set_row_count(self.filtered.len());
        if let Some(bar) = self.url.as_deref_mut() {
            UrlFilterSync::<R>::new().sync(bar, &self.filter);
        }

        let event = ViewEvent::FilterChanged {
            kind:    R::KIND,
            matched: self.filtered.len(),
            total:   self.records.len(),
        };
        self.publish(event);
        self.publish_window()
    }

    // ── Windowing ──────────────────────────────────

    pub fn scroll_to(&mut self, offset: Pixels) -> ConsoleResult<()> {
        if self.window.set_scroll_offset(offset) {
            self.publish_window()?;
        }
        Ok(())
    }

    pub fn resize_viewport(&mut self, height: Pixels) -> ConsoleResult<()> {
        if self.window.set_viewport_height(height)? {
            self.publish_window()?;
        }
        Ok(())
    }

    fn publish_window(&mut self) -> ConsoleResult<()> {
        let slice = self.window.slice()?;
        let event = ViewEvent::WindowChanged {
            start:        slice.start,
            end:          slice.end,
            total_height: slice.total_height,
        };
        self.publish(event);
        Ok(())
    }

    // ── Selection ──────────────────────────────────

    /// Returns true if the record is now selected.
    pub fn toggle_one(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle_one(id);
        self.publish_selection();
        selected
    }

    pub fn toggle_all(&mut self) {
        let filtered: Vec<&R> = self.filtered.iter().map(|&i| &self.records[i]).collect();
        self.selection.toggle_all(&filtered);
        self.publish_selection();
    }

    /// Drop selected ids that the current filter hides. Returns how many.
    pub fn prune_selection(&mut self) -> usize {
        let filtered: Vec<&R> = self.filtered.iter().map(|&i| &self.records[i]).collect();
        let dropped = self.selection.retain_visible(&filtered);
        if dropped > 0 {
            self.publish_selection();
        }
        dropped
    }

    fn publish_selection(&mut self) {
        let event = ViewEvent::SelectionChanged {
            selected:         self.selection.len(),
            visible_selected: self.visible_selected(),
        };
        self.publish(event);
    }

    /// Apply `action` to the selected records in view and report it to
    /// `sink`. The selection is cleared either way.
    pub fn bulk_action(
        &mut self,
        action: BulkAction,
        actor: &str,
        at: Timestamp,
        sink: &mut dyn ActionSink,
    ) -> Option<BulkOutcome> {
        let filtered: Vec<&R> = self.filtered.iter().map(|&i| &self.records[i]).collect();
        let outcome = self.selection.apply_bulk(action, &filtered, actor, at, sink);

        let event = ViewEvent::BulkActionApplied {
            action,
            report_id: outcome.as_ref().map(|o| o.report.report_id),
            records:   outcome.as_ref().map_or(0, |o| o.report.record_ids.len()),
            delivered: outcome.as_ref().is_some_and(|o| o.delivered),
        };
        self.publish(event);
        self.publish_selection();
        outcome
    }

    // ── Export ─────────────────────────────────────

    /// Serialize the filtered records. Does not change view state.
    pub fn export(&mut self, format: ExportFormat, at: Timestamp) -> ConsoleResult<ExportPayload> {
        let payload = export::export(&self.filtered(), format, at)?;
        let event = ViewEvent::Exported {
            filename: payload.filename.clone(),
            rows:     payload.rows,
            bytes:    payload.bytes.len(),
        };
        self.publish(event);
        Ok(payload)
    }
}

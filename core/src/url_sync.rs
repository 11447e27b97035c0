//! URL filter sync: mirrors a view's filter state into the query string.
//!
//! Three parameters: `search` (free text) plus the view's two categorical
//! dimensions (`status` and `risk` on the monitoring view). A parameter is
//! omitted when it holds its default (`""` or `all`).
//!
//! On mount the current query string is parsed into the initial filter
//! state. On every later change the state is re-serialized and the address
//! bar's query is replaced, without adding a history entry, only when the
//! serialized form differs from what is already there.

use crate::filter::{CategoryFilter, FilterState, FilterValue, Filterable};
use std::marker::PhantomData;
use url::form_urlencoded;

pub const SEARCH_PARAM: &str = "search";

/// Wherever the current query string lives: a browser location binding,
/// or an in-memory stand-in.
pub trait AddressBar {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the query string in place (no new history entry).
    fn replace_query(&mut self, query: &str);
}

/// In-memory address bar that records how often it was rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAddressBar {
    pub path:         String,
    query:            String,
    pub replacements: usize,
}

impl MemoryAddressBar {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path:         path.into(),
            query:        strip_question_mark(&query.into()).to_string(),
            replacements: 0,
        }
    }

    /// Full location, e.g. `/monitoring?status=flagged`.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl AddressBar for MemoryAddressBar {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = strip_question_mark(query).to_string();
        self.replacements += 1;
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Serialize filter state, omitting parameters at their defaults.
pub fn encode_filters<R: Filterable>(state: &FilterState<R>) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    if !state.query.is_empty() {
        out.append_pair(SEARCH_PARAM, &state.query);
    }
    if let CategoryFilter::Only(v) = &state.primary {
        out.append_pair(R::PRIMARY_PARAM, &v.to_param());
    }
    if let CategoryFilter::Only(v) = &state.secondary {
        out.append_pair(R::SECONDARY_PARAM, &v.to_param());
    }
    out.finish()
}

/// Parse a query string into filter state. Absent parameters take their
/// defaults; the first occurrence of a repeated parameter wins; values
/// that do not name a category fall back to `all`.
pub fn decode_filters<R: Filterable>(query: &str) -> FilterState<R> {
    let mut search: Option<String> = None;
    let mut primary: Option<CategoryFilter<R::Primary>> = None;
    let mut secondary: Option<CategoryFilter<R::Secondary>> = None;

    for (key, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        if key == SEARCH_PARAM && search.is_none() {
            search = Some(value.into_owned());
        } else if key == R::PRIMARY_PARAM && primary.is_none() {
            primary = Some(parse_category(R::PRIMARY_PARAM, &value));
        } else if key == R::SECONDARY_PARAM && secondary.is_none() {
            secondary = Some(parse_category(R::SECONDARY_PARAM, &value));
        }
    }

    FilterState::new(
        search.unwrap_or_default(),
        primary.unwrap_or_default(),
        secondary.unwrap_or_default(),
    )
}

fn parse_category<T: FilterValue>(param: &str, raw: &str) -> CategoryFilter<T> {
    CategoryFilter::from_param(raw).unwrap_or_else(|| {
        log::warn!("ignoring unknown {param} filter value '{raw}'");
        CategoryFilter::All
    })
}

/// Keeps one view's filter state and an address bar in step.
pub struct UrlFilterSync<R: Filterable> {
    _view: PhantomData<fn() -> R>,
}

impl<R: Filterable> Default for UrlFilterSync<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Filterable> UrlFilterSync<R> {
    pub fn new() -> Self {
        Self { _view: PhantomData }
    }

    /// Initial filter state from the address bar (mount).
    pub fn hydrate(&self, bar: &dyn AddressBar) -> FilterState<R> {
        let state = decode_filters::<R>(&bar.query());
        log::debug!("hydrated filters from url: {state:?}");
        state
    }

    /// Write `state` to the address bar if it differs from the current
    /// query. Returns true when the bar was rewritten.
    pub fn sync(&self, bar: &mut dyn AddressBar, state: &FilterState<R>) -> bool {
        let next = encode_filters(state);
        if next == bar.query() {
            return false;
        }
        bar.replace_query(&next);
        true
    }
}

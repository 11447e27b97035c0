//! console-core: client-side tabular engine for the compliance console.
//!
//! Deterministic record generation, filtering, row virtualization,
//! selection with bulk actions, CSV/JSON export, URL filter sync and
//! keyboard chords. No rendering, no I/O beyond optional file export.

pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod generator;
pub mod keyboard;
pub mod metrics;
pub mod record;
pub mod rng;
pub mod selection;
pub mod session;
pub mod types;
pub mod url_sync;
pub mod view;
pub mod vocabulary;
pub mod window;

//! Keyboard command surface.
//!
//! - `/` focuses the primary search input, unless focus is already in a
//!   text field.
//! - `g` (outside a text field) arms a one-second chord. The next key
//!   navigates if it is one of `o m k i p a`; any next key disarms it.
//!
//! Not a general command parser: one level, one prefix, timeout based.
//! Time is supplied by the caller so the chord window is testable.

use crate::types::Timestamp;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

pub const CHORD_TIMEOUT_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Overview,
    Monitoring,
    Kyc,
    Investigations,
    Policies,
    Audit,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Overview       => "/",
            Self::Monitoring     => "/monitoring",
            Self::Kyc            => "/kyc",
            Self::Investigations => "/investigations",
            Self::Policies       => "/policies",
            Self::Audit          => "/audit",
        }
    }

    /// Second key of the `g` chord.
    pub fn from_chord_key(key: char) -> Option<Self> {
        match key {
            'o' => Some(Self::Overview),
            'm' => Some(Self::Monitoring),
            'k' => Some(Self::Kyc),
            'i' => Some(Self::Investigations),
            'p' => Some(Self::Policies),
            'a' => Some(Self::Audit),
            _   => None,
        }
    }
}

/// Where keyboard focus was when the key arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// An input or textarea.
    TextField,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    FocusSearch,
    Navigate(Route),
}

#[derive(Debug, Clone, Default)]
pub struct ShortcutHandler {
    /// When the pending `g` was pressed.
    armed_at: Option<Timestamp>,
}

impl ShortcutHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self, now: Timestamp) -> bool {
        self.armed_at
            .is_some_and(|at| now - at < TimeDelta::milliseconds(CHORD_TIMEOUT_MS))
    }

    /// Feed one keydown. Returns the action to perform, if any.
    pub fn handle_key(&mut self, key: char, focus: FocusTarget, now: Timestamp) -> Option<ShortcutAction> {
        let in_text = focus == FocusTarget::TextField;

        if key == '/' && !in_text {
            return Some(ShortcutAction::FocusSearch);
        }

        if key == 'g' && !in_text {
            self.armed_at = Some(now);
            return None;
        }

        // The pending buffer is checked regardless of focus; only arming
        // requires focus outside a text field.
        if self.is_armed(now) {
            self.armed_at = None;
            let action = Route::from_chord_key(key).map(ShortcutAction::Navigate);
            if let Some(ShortcutAction::Navigate(route)) = action {
                log::debug!("chord g{key} -> {}", route.path());
            }
            return action;
        }

        self.armed_at = None;
        None
    }
}

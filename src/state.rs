//! Per-page presentation state and its transitions

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    document::BlockList,
    error::{StateError, StateResult, StorageResult},
    store::{KeyValueStore, write_json},
};

/// Store key of the presentation state record
pub const STATE_KEY: &str = "notion-presenter-state";

pub const MIN_FOCUS_COUNT: u32 = 1;
pub const MAX_FOCUS_COUNT: u32 = 20;
pub const DEFAULT_FOCUS_COUNT: u32 = 1;

/// Clamp a focus window size to `1..=20`
#[must_use]
pub const fn clamp_focus_count(count: u32) -> u32 {
    if count < MIN_FOCUS_COUNT {
        MIN_FOCUS_COUNT
    } else if count > MAX_FOCUS_COUNT {
        MAX_FOCUS_COUNT
    } else {
        count
    }
}

const fn default_focus_count() -> u32 {
    DEFAULT_FOCUS_COUNT
}

/// How far the presentation has progressed on a page, and how it is viewed
///
/// `focus_mode` and `section_mode` are never both set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PresentationState {
    pub page_id: String,
    /// Number of blocks revealed so far
    pub visible_count: u32,
    pub showing_all: bool,
    #[serde(default)]
    pub focus_mode: bool,
    #[serde(default = "default_focus_count")]
    pub focus_mode_count: u32,
    #[serde(default)]
    pub section_mode: bool,
}

impl PresentationState {
    /// Initial state of a page nobody has presented yet: everything shown
    #[must_use]
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            visible_count: 0,
            showing_all: true,
            focus_mode: false,
            focus_mode_count: DEFAULT_FOCUS_COUNT,
            section_mode: false,
        }
    }

    /// Decode a stored record for `page_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the record is malformed or belongs to another page
    pub fn from_json(json: &str, page_id: &str) -> StateResult<Self> {
        let mut state: Self =
            serde_json::from_str(json).map_err(|e| StateError::malformed(e.to_string()))?;
        if state.page_id != page_id {
            return Err(StateError::page_mismatch(page_id, state.page_id));
        }
        state.focus_mode_count = clamp_focus_count(state.focus_mode_count);
        if state.focus_mode && state.section_mode {
            state.section_mode = false;
        }
        Ok(state)
    }

    /// Load the state for `page_id`. Anything unusable in the store yields
    /// the initial state.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore, page_id: &str) -> Self {
        let Some(json) = store.get(STATE_KEY.to_string()) else {
            return Self::new(page_id);
        };
        match Self::from_json(&json, page_id) {
            Ok(state) => state,
            Err(StateError::PageMismatch { found, .. }) => {
                debug!(page_id, stored = %found, "stored state belongs to another page");
                Self::new(page_id)
            }
            Err(e) => {
                warn!(page_id, error = %e, "ignoring unreadable presentation state");
                Self::new(page_id)
            }
        }
    }

    /// Persist the state
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the write
    pub fn save(&self, store: &dyn KeyValueStore) -> StorageResult<()> {
        write_json(store, STATE_KEY, self)
    }

    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count as usize
    }

    /// Index of the most recently revealed block
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.visible_count().checked_sub(1)
    }

    fn set_visible_count(&mut self, count: usize) {
        self.visible_count = u32::try_from(count).unwrap_or(u32::MAX);
    }

    /// Reveal the next block, skipping over empty ones
    pub fn reveal(&mut self, blocks: &BlockList) {
        let total = blocks.len();
        let mut count = self.visible_count().min(total);
        if count < total {
            count += 1;
            while count < total && blocks.is_empty_at(count - 1) {
                count += 1;
            }
        }
        self.set_visible_count(count);
        self.showing_all = false;
    }

    /// Hide the last revealed block, skipping back over empty ones
    pub fn hide_last(&mut self, blocks: &BlockList) {
        let mut count = self.visible_count().min(blocks.len());
        if count > 0 {
            count -= 1;
            while count > 0 && blocks.is_empty_at(count - 1) {
                count -= 1;
            }
        }
        self.set_visible_count(count);
        self.showing_all = false;
    }

    pub const fn toggle_all(&mut self) {
        self.showing_all = !self.showing_all;
    }

    pub const fn reset(&mut self) {
        self.visible_count = 0;
        self.showing_all = false;
    }

    /// Enable or disable focus mode. Enabling turns section mode off.
    pub const fn set_focus_mode(&mut self, enabled: bool, count: Option<u32>) {
        self.focus_mode = enabled;
        if enabled {
            self.section_mode = false;
        }
        if let Some(count) = count {
            self.focus_mode_count = clamp_focus_count(count);
        }
    }

    pub const fn set_focus_mode_count(&mut self, count: u32) {
        self.focus_mode_count = clamp_focus_count(count);
    }

    /// Enable or disable section mode. Enabling turns focus mode off.
    pub const fn set_section_mode(&mut self, enabled: bool) {
        self.section_mode = enabled;
        if enabled {
            self.focus_mode = false;
        }
    }
}

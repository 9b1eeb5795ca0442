//! Profile-wide presenter settings
//!
//! Unlike [`PresentationState`](crate::state::PresentationState), which is
//! tied to a single page, preferences follow the user across pages: whether
//! the presenter starts enabled, the default view mode, and the cosmetic
//! toolbar and animation settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::StorageResult,
    state::{DEFAULT_FOCUS_COUNT, clamp_focus_count},
    store::{KeyValueStore, write_json},
};

/// Store key of the preferences record
pub const PREFERENCES_KEY: &str = "notion-presenter-preferences";

/// Upper bound of the animation speed setting (tenths of a second)
pub const MAX_ANIMATION_SPEED: u8 = 20;

/// Fade-outs never last longer than this
pub const MAX_FADE_OUT_MS: u32 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, uniffi::Enum)]
#[serde(try_from = "u8", into = "u8")]
pub enum ToolbarSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl TryFrom<u8> for ToolbarSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Small),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Large),
            other => Err(format!("invalid toolbar size: {other}")),
        }
    }
}

impl From<ToolbarSize> for u8 {
    fn from(size: ToolbarSize) -> Self {
        match size {
            ToolbarSize::Small => 0,
            ToolbarSize::Medium => 1,
            ToolbarSize::Large => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Activate the presenter as soon as a page session starts
    pub enabled: bool,
    pub presentation_mode: bool,
    pub focus_mode: bool,
    pub focus_mode_count: u32,
    pub section_mode: bool,
    pub toolbar_expanded: bool,
    pub toolbar_size: ToolbarSize,
    /// Fade duration in tenths of a second, 0 disables fades
    pub animation_speed: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enabled: false,
            presentation_mode: false,
            focus_mode: false,
            focus_mode_count: DEFAULT_FOCUS_COUNT,
            section_mode: false,
            toolbar_expanded: true,
            toolbar_size: ToolbarSize::default(),
            animation_speed: 0,
        }
    }
}

impl Preferences {
    /// Load preferences, falling back to defaults when absent or unreadable
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(json) = store.get(PREFERENCES_KEY.to_string()) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(mut preferences) => {
                preferences.focus_mode_count = clamp_focus_count(preferences.focus_mode_count);
                preferences.animation_speed = preferences.animation_speed.min(MAX_ANIMATION_SPEED);
                preferences
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable preferences");
                Self::default()
            }
        }
    }

    /// Persist preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the write
    pub fn save(&self, store: &dyn KeyValueStore) -> StorageResult<()> {
        write_json(store, PREFERENCES_KEY, self)
    }

    /// Set the animation speed, clamped to `0..=20`
    pub fn set_animation_speed(&mut self, speed: u32) {
        self.animation_speed = u8::try_from(speed)
            .unwrap_or(MAX_ANIMATION_SPEED)
            .min(MAX_ANIMATION_SPEED);
    }

    #[must_use]
    pub fn fade_in_ms(&self) -> u32 {
        u32::from(self.animation_speed) * 100
    }

    #[must_use]
    pub fn fade_out_ms(&self) -> u32 {
        self.fade_in_ms().min(MAX_FADE_OUT_MS)
    }
}

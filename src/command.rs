//! Presenter commands and their keyboard shortcuts

/// The six commands a presenter can issue while presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum Command {
    HideLast,
    RevealNext,
    ToggleShowAll,
    Reset,
    ExpandAllToggles,
    TogglePresentationMode,
}

/// A key press as seen by the host
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct KeyPress {
    /// Physical key code, e.g. `Digit2`
    pub code: String,
    /// Alt (Option on macOS) held
    pub alt: bool,
}

impl Command {
    pub const ALL: [Self; 6] = [
        Self::HideLast,
        Self::RevealNext,
        Self::ToggleShowAll,
        Self::Reset,
        Self::ExpandAllToggles,
        Self::TogglePresentationMode,
    ];

    /// Command bound to a key press, if any. Every binding needs Alt.
    #[must_use]
    pub fn from_key(key: &KeyPress) -> Option<Self> {
        if !key.alt {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|command| command.key_code() == key.code)
    }

    #[must_use]
    pub const fn key_code(self) -> &'static str {
        match self {
            Self::HideLast => "Digit1",
            Self::RevealNext => "Digit2",
            Self::ToggleShowAll => "Digit3",
            Self::Reset => "Digit4",
            Self::ExpandAllToggles => "Digit5",
            Self::TogglePresentationMode => "Digit6",
        }
    }

    /// Human readable description, used for toolbar tooltips
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HideLast => "Hide last revealed block",
            Self::RevealNext => "Reveal next block",
            Self::ToggleShowAll => "Toggle between progress and all blocks",
            Self::Reset => "Hide all blocks",
            Self::ExpandAllToggles => "Expand all toggle blocks",
            Self::TogglePresentationMode => "Toggle presentation mode",
        }
    }

    /// Shortcut label, `⌥2` on macOS and `Alt+2` elsewhere
    #[must_use]
    pub fn hotkey_label(self, mac: bool) -> String {
        let digit = self.key_code().trim_start_matches("Digit");
        if mac {
            format!("⌥{digit}")
        } else {
            format!("Alt+{digit}")
        }
    }
}

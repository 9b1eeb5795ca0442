//! Messages exchanged with the host's background coordinator and popup
//!
//! Messages are JSON objects tagged by `action`, e.g.
//! `{"action": "setFocusMode", "focusMode": true, "focusModeCount": 3}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{MessageError, MessageResult},
    preferences::ToolbarSize,
};

const ACTIONS: [&str; 9] = [
    "enable",
    "disable",
    "getStatus",
    "setFocusMode",
    "setFocusModeCount",
    "setSectionMode",
    "setPresentationMode",
    "setToolbarSize",
    "setAnimationSpeed",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    Enable,
    Disable,
    GetStatus,
    #[serde(rename_all = "camelCase")]
    SetFocusMode {
        focus_mode: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focus_mode_count: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    SetFocusModeCount { focus_mode_count: u32 },
    #[serde(rename_all = "camelCase")]
    SetSectionMode { section_mode: bool },
    #[serde(rename_all = "camelCase")]
    SetPresentationMode { presentation_mode: bool },
    #[serde(rename_all = "camelCase")]
    SetToolbarSize { toolbar_size: ToolbarSize },
    #[serde(rename_all = "camelCase")]
    SetAnimationSpeed { animation_speed: u32 },
}

impl Message {
    /// Decode a message
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::UnknownAction`] when the action is not one we
    /// handle, and [`MessageError::Malformed`] for anything else that does
    /// not decode
    pub fn from_json(json: &str) -> MessageResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| MessageError::malformed(e.to_string()))?;
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::malformed("missing action"))?;
        if !ACTIONS.contains(&action) {
            return Err(MessageError::unknown_action(action));
        }
        serde_json::from_value(value).map_err(|e| MessageError::malformed(e.to_string()))
    }
}

/// Reply to the presenter's status query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub active: bool,
    pub block_count: u32,
    pub presentation_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<bool>,
    },
    Status(Status),
}

impl Response {
    #[must_use]
    pub const fn ok() -> Self {
        Self::Ack {
            success: true,
            active: None,
        }
    }

    #[must_use]
    pub const fn active(active: bool) -> Self {
        Self::Ack {
            success: true,
            active: Some(active),
        }
    }

    /// Encode the response as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails
    pub fn to_json(&self) -> MessageResult<String> {
        serde_json::to_string(self).map_err(|e| MessageError::malformed(e.to_string()))
    }
}

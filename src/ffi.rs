//! `UniFFI` bindings for the presenter
//!
//! This module exposes a page session to the host (the browser extension's
//! content script or any other embedder). The host implements [`PageHost`]
//! and [`KeyValueStore`] and drives the session through [`Presenter`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    command::{Command, KeyPress},
    error::PresenterError,
    host::PageHost,
    message::{Message, Status},
    page,
    preferences::ToolbarSize,
    session::PresenterSession,
    state::PresentationState,
    store::KeyValueStore,
};

/// Presenter for a single page
#[derive(uniffi::Object)]
pub struct Presenter {
    session: Mutex<PresenterSession>,
}

#[uniffi::export]
impl Presenter {
    /// Start a presenter for the page at `page_path` (the URL path), restoring
    /// stored state and preferences
    ///
    /// # Errors
    ///
    /// Returns an error if restoring presentation mode cannot be persisted
    #[uniffi::constructor]
    pub fn new(
        page_path: &str,
        host: Arc<dyn PageHost>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, PresenterError> {
        let session = PresenterSession::start(page::derive_page_id(page_path), host, store)?;
        Ok(Self {
            session: Mutex::new(session),
        })
    }

    pub fn page_id(&self) -> String {
        self.session().page_id().to_string()
    }

    pub fn activate(&self) {
        self.session().activate();
    }

    pub fn deactivate(&self) {
        self.session().deactivate();
    }

    pub fn is_active(&self) -> bool {
        self.session().is_active()
    }

    /// Turn the presenter on or off, remembering the choice for later page
    /// loads
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_enabled(&self, enabled: bool) -> Result<(), PresenterError> {
        Ok(self.session().set_enabled(enabled)?)
    }

    /// Run a command. Returns whether it was handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting state cannot be persisted
    pub fn dispatch(&self, command: Command) -> Result<bool, PresenterError> {
        Ok(self.session().dispatch(command)?)
    }

    /// Handle a key press. Returns whether the key was consumed and its
    /// default action should be suppressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting state cannot be persisted
    pub fn handle_key(&self, key: KeyPress) -> Result<bool, PresenterError> {
        Ok(self.session().handle_key(&key)?)
    }

    /// Handle a JSON message and return the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be decoded or its change
    /// cannot be persisted
    pub fn handle_message(&self, json: &str) -> Result<String, PresenterError> {
        let message = Message::from_json(json)?;
        let response = self.session().handle_message(message)?;
        Ok(response.to_json()?)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_focus_mode(&self, enabled: bool, count: Option<u32>) -> Result<(), PresenterError> {
        Ok(self.session().set_focus_mode(enabled, count)?)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_focus_mode_count(&self, count: u32) -> Result<(), PresenterError> {
        Ok(self.session().set_focus_mode_count(count)?)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_section_mode(&self, enabled: bool) -> Result<(), PresenterError> {
        Ok(self.session().set_section_mode(enabled)?)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_presentation_mode(&self, enabled: bool) -> Result<(), PresenterError> {
        Ok(self.session().set_presentation_mode(enabled)?)
    }

    pub fn is_presentation_mode(&self) -> bool {
        self.session().presentation_mode()
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_toolbar_size(&self, size: ToolbarSize) -> Result<(), PresenterError> {
        Ok(self.session().set_toolbar_size(size)?)
    }

    pub fn toolbar_size(&self) -> ToolbarSize {
        self.session().preferences().toolbar_size
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_toolbar_expanded(&self, expanded: bool) -> Result<(), PresenterError> {
        Ok(self.session().set_toolbar_expanded(expanded)?)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_animation_speed(&self, speed: u32) -> Result<(), PresenterError> {
        Ok(self.session().set_animation_speed(speed)?)
    }

    pub fn animation_speed(&self) -> u32 {
        u32::from(self.session().preferences().animation_speed)
    }

    pub fn status(&self) -> Status {
        self.session().status()
    }

    pub fn state(&self) -> PresentationState {
        self.session().state().clone()
    }
}

impl Presenter {
    fn session(&self) -> MutexGuard<'_, PresenterSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Identifier of the page at a URL path
#[uniffi::export]
pub fn page_id_for_path(path: &str) -> String {
    page::derive_page_id(path)
}

/// Whether the presenter should be injected into a URL
#[uniffi::export]
pub fn is_presentable_url(url: &str) -> bool {
    page::is_notion_page(url)
}

/// Description and shortcut label of every command, in toolbar order
#[uniffi::export]
pub fn command_labels(mac: bool) -> Vec<CommandLabel> {
    Command::ALL
        .into_iter()
        .map(|command| CommandLabel {
            command,
            description: command.description().to_string(),
            hotkey: command.hotkey_label(mac),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CommandLabel {
    pub command: Command,
    pub description: String,
    pub hotkey: String,
}

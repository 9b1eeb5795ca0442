//! Presenter session: the context object for one page
//!
//! A session owns the page's [`PresentationState`] and the user's
//! [`Preferences`], talks to the page through a [`PageHost`] and persists
//! through a [`KeyValueStore`]. Every command re-reads the page's blocks,
//! applies its transition, pushes visibility updates to the host and saves
//! the state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    command::{Command, KeyPress},
    document::{BlockList, ContentNode, ContentTree, collapsed_toggles},
    error::StorageResult,
    host::PageHost,
    message::{Message, Response, Status},
    preferences::{Preferences, ToolbarSize},
    state::PresentationState,
    store::KeyValueStore,
    visibility::{Fades, plan_updates, reveal_all},
};

pub struct PresenterSession {
    host: Arc<dyn PageHost>,
    store: Arc<dyn KeyValueStore>,
    state: PresentationState,
    preferences: Preferences,
    active: bool,
    presentation_mode: bool,
}

impl PresenterSession {
    /// Create an inactive session for `page_id`, loading its stored state
    pub fn new(
        page_id: impl Into<String>,
        host: Arc<dyn PageHost>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let page_id = page_id.into();
        let state = PresentationState::load(&*store, &page_id);
        let preferences = Preferences::load(&*store);
        Self {
            host,
            store,
            state,
            preferences,
            active: false,
            presentation_mode: false,
        }
    }

    /// Create a session and bring it up the way the user left things: the
    /// stored view mode is applied and, if the presenter is enabled, the
    /// session activates and restores presentation mode.
    ///
    /// # Errors
    ///
    /// Returns an error if restoring presentation mode cannot be persisted
    pub fn start(
        page_id: impl Into<String>,
        host: Arc<dyn PageHost>,
        store: Arc<dyn KeyValueStore>,
    ) -> StorageResult<Self> {
        let mut session = Self::new(page_id, host, store);
        if session.preferences.focus_mode {
            session
                .state
                .set_focus_mode(true, Some(session.preferences.focus_mode_count));
        }
        if session.preferences.section_mode {
            session.state.set_section_mode(true);
        }
        if session.preferences.enabled {
            session.activate();
            if session.preferences.presentation_mode {
                session.set_presentation_mode(true)?;
            }
        }
        Ok(session)
    }

    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.state.page_id
    }

    #[must_use]
    pub const fn state(&self) -> &PresentationState {
        &self.state
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn presentation_mode(&self) -> bool {
        self.presentation_mode
    }

    /// Start presenting: render the current state
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        let count = self.refresh();
        info!(page_id = %self.state.page_id, block_count = count, "presenter activated");
    }

    /// Stop presenting: restore the chrome and show every block again
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if self.presentation_mode {
            self.host.set_chrome_hidden(false);
            self.presentation_mode = false;
        }
        let root = self.host.content();
        if let Some(blocks) = BlockList::collect(&ContentTree::new(&root)) {
            self.host.apply_updates(reveal_all(&blocks));
        }
        info!(page_id = %self.state.page_id, "presenter deactivated");
    }

    /// Run a command. Returns whether it was handled; commands are ignored
    /// while inactive or when the page has no blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting state cannot be persisted
    pub fn dispatch(&mut self, command: Command) -> StorageResult<bool> {
        if !self.active {
            return Ok(false);
        }
        let root = self.host.content();
        let Some(blocks) = BlockList::collect(&ContentTree::new(&root)).filter(|b| !b.is_empty())
        else {
            debug!(?command, "no blocks on page, ignoring command");
            return Ok(false);
        };

        match command {
            Command::ExpandAllToggles => {
                self.expand_toggles(&root);
                return Ok(true);
            }
            Command::TogglePresentationMode => {
                self.set_presentation_mode(!self.presentation_mode)?;
                return Ok(true);
            }
            Command::Reset => {
                self.state.reset();
                self.render(&blocks, None);
                info!("reset: all blocks hidden");
            }
            Command::ToggleShowAll => {
                self.state.toggle_all();
                self.render(&blocks, None);
                info!(
                    showing_all = self.state.showing_all,
                    visible_count = self.state.visible_count,
                    block_count = blocks.len(),
                    "toggled show all"
                );
            }
            Command::RevealNext => {
                let previous = self.state.visible_count();
                self.state.reveal(&blocks);
                self.render(&blocks, Some(previous));
                info!(
                    visible_count = self.state.visible_count,
                    block_count = blocks.len(),
                    "reveal"
                );
            }
            Command::HideLast => {
                let previous = self.state.visible_count();
                self.state.hide_last(&blocks);
                self.render(&blocks, Some(previous));
                info!(
                    visible_count = self.state.visible_count,
                    block_count = blocks.len(),
                    "hide"
                );
            }
        }
        self.save_state()?;
        Ok(true)
    }

    /// Run the command bound to a key press. Returns whether the key was
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting state cannot be persisted
    pub fn handle_key(&mut self, key: &KeyPress) -> StorageResult<bool> {
        match Command::from_key(key) {
            Some(command) => self.dispatch(command),
            None => Ok(false),
        }
    }

    /// Handle a message from the host's coordinator
    ///
    /// # Errors
    ///
    /// Returns an error if a setter cannot persist its change
    pub fn handle_message(&mut self, message: Message) -> StorageResult<Response> {
        let response = match message {
            Message::Enable => {
                self.set_enabled(true)?;
                Response::active(true)
            }
            Message::Disable => {
                self.set_enabled(false)?;
                Response::active(false)
            }
            Message::GetStatus => Response::Status(self.status()),
            Message::SetFocusMode {
                focus_mode,
                focus_mode_count,
            } => {
                self.set_focus_mode(focus_mode, focus_mode_count)?;
                Response::ok()
            }
            Message::SetFocusModeCount { focus_mode_count } => {
                self.set_focus_mode_count(focus_mode_count)?;
                Response::ok()
            }
            Message::SetSectionMode { section_mode } => {
                self.set_section_mode(section_mode)?;
                Response::ok()
            }
            Message::SetPresentationMode { presentation_mode } => {
                self.set_presentation_mode(presentation_mode)?;
                Response::ok()
            }
            Message::SetToolbarSize { toolbar_size } => {
                self.set_toolbar_size(toolbar_size)?;
                Response::ok()
            }
            Message::SetAnimationSpeed { animation_speed } => {
                self.set_animation_speed(animation_speed)?;
                Response::ok()
            }
        };
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_focus_mode(&mut self, enabled: bool, count: Option<u32>) -> StorageResult<()> {
        self.state.set_focus_mode(enabled, count);
        self.preferences.focus_mode = enabled;
        self.preferences.focus_mode_count = self.state.focus_mode_count;
        if enabled {
            self.preferences.section_mode = false;
        }
        info!(
            enabled,
            count = self.state.focus_mode_count,
            "focus mode changed"
        );
        self.after_mode_change()
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_focus_mode_count(&mut self, count: u32) -> StorageResult<()> {
        self.state.set_focus_mode_count(count);
        self.preferences.focus_mode_count = self.state.focus_mode_count;
        info!(count = self.state.focus_mode_count, "focus mode count changed");
        self.after_mode_change()
    }

    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted
    pub fn set_section_mode(&mut self, enabled: bool) -> StorageResult<()> {
        self.state.set_section_mode(enabled);
        self.preferences.section_mode = enabled;
        if enabled {
            self.preferences.focus_mode = false;
        }
        info!(enabled, "section mode changed");
        self.after_mode_change()
    }

    /// Turn the presenter on or off for this and future page loads
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_enabled(&mut self, enabled: bool) -> StorageResult<()> {
        if enabled {
            self.activate();
        } else {
            self.deactivate();
        }
        self.preferences.enabled = enabled;
        self.save_preferences()
    }

    /// Hide or restore the application chrome around the page
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_presentation_mode(&mut self, enabled: bool) -> StorageResult<()> {
        self.host.set_chrome_hidden(enabled);
        self.presentation_mode = enabled;
        self.preferences.presentation_mode = enabled;
        info!(enabled, "presentation mode changed");
        self.save_preferences()
    }

    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_toolbar_size(&mut self, size: ToolbarSize) -> StorageResult<()> {
        self.preferences.toolbar_size = size;
        self.save_preferences()
    }

    /// Set the fade speed in tenths of a second, clamped to `0..=20`
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_animation_speed(&mut self, speed: u32) -> StorageResult<()> {
        self.preferences.set_animation_speed(speed);
        self.save_preferences()
    }

    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted
    pub fn set_toolbar_expanded(&mut self, expanded: bool) -> StorageResult<()> {
        self.preferences.toolbar_expanded = expanded;
        self.save_preferences()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        let root = self.host.content();
        let block_count = BlockList::collect(&ContentTree::new(&root)).map_or(0, |b| b.len());
        Status {
            active: self.active,
            block_count: u32::try_from(block_count).unwrap_or(u32::MAX),
            presentation_mode: self.presentation_mode,
        }
    }

    /// Click every collapsed toggle once. Returns how many were expanded.
    fn expand_toggles(&self, root: &ContentNode) -> usize {
        let expanded = collapsed_toggles(root)
            .into_iter()
            .filter(|id| self.host.click_toggle(id.to_string()))
            .count();
        info!(expanded, "expanded toggle blocks");
        expanded
    }

    fn render(&self, blocks: &BlockList, previous_count: Option<usize>) {
        let fades = Fades::from(&self.preferences);
        self.host
            .apply_updates(plan_updates(&self.state, blocks, previous_count, fades));
    }

    /// Re-render from a fresh snapshot. Returns the number of blocks.
    fn refresh(&self) -> usize {
        let root = self.host.content();
        match BlockList::collect(&ContentTree::new(&root)) {
            Some(blocks) if !blocks.is_empty() => {
                self.render(&blocks, None);
                blocks.len()
            }
            _ => 0,
        }
    }

    fn after_mode_change(&mut self) -> StorageResult<()> {
        if self.active {
            self.refresh();
        }
        self.save_state()?;
        self.save_preferences()
    }

    fn save_state(&self) -> StorageResult<()> {
        self.state.save(&*self.store).inspect_err(|e| {
            warn!(error = %e, "failed to persist presentation state");
        })
    }

    fn save_preferences(&self) -> StorageResult<()> {
        self.preferences.save(&*self.store).inspect_err(|e| {
            warn!(error = %e, "failed to persist preferences");
        })
    }
}

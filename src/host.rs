use crate::{document::ContentNode, visibility::BlockUpdate};

/// The page the presenter runs in, implemented by the host
#[uniffi::export(with_foreign)]
pub trait PageHost: Send + Sync {
    /// Snapshot of the current document, rooted at the document element
    fn content(&self) -> ContentNode;

    /// Show or hide blocks
    fn apply_updates(&self, updates: Vec<BlockUpdate>);

    /// Click the expand control of a toggle block. Returns whether a control
    /// was found and clicked.
    fn click_toggle(&self, block_id: String) -> bool;

    /// Hide or restore the surrounding application chrome
    fn set_chrome_hidden(&self, hidden: bool);
}

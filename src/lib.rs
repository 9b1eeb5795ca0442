#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

uniffi::setup_scaffolding!();

pub mod command;
pub mod document;
pub mod error;
pub mod ffi;
pub mod host;
pub mod message;
pub mod page;
pub mod preferences;
pub mod sections;
pub mod session;
pub mod state;
pub mod store;
pub mod visibility;

// Re-export common error types for convenience
pub use error::{
    MessageError, MessageResult, PresenterError, PresenterResult, StateError, StateResult,
    StorageError, StorageResult,
};
pub use session::PresenterSession;
pub use state::PresentationState;

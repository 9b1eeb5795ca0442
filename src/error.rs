//! Error types for the presenter library
//!
//! This module provides centralized error handling using `thiserror` across all components

use thiserror::Error;

/// Errors raised while reading a persisted presentation state
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum StateError {
    /// The stored record is not valid JSON or does not match the schema
    #[error("Malformed state record: {0}")]
    Malformed(String),

    /// The stored record belongs to another page
    #[error("State belongs to page {found}, expected {expected}")]
    PageMismatch { expected: String, found: String },
}

impl StateError {
    /// Create a malformed record error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    /// Create a page mismatch error
    pub fn page_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::PageMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result type for state loading
pub type StateResult<T> = Result<T, StateError>;

/// Key-value store errors
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum StorageError {
    /// The store refused the write
    #[error("Store refused write for key: {0}")]
    WriteRefused(String),

    /// A record could not be encoded
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

impl StorageError {
    /// Create a write refused error
    pub fn write_refused(key: impl Into<String>) -> Self {
        Self::WriteRefused(key.into())
    }

    /// Create a serialization failed error
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed(reason.into())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Host message errors
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum MessageError {
    /// The `action` field names nothing we handle
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The message is not valid JSON or is missing fields
    #[error("Malformed message: {0}")]
    Malformed(String),
}

impl MessageError {
    /// Create an unknown action error
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction(action.into())
    }

    /// Create a malformed message error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}

/// Result type for message handling
pub type MessageResult<T> = Result<T, MessageError>;

/// Main unified error type that can represent any presenter error
#[derive(Debug, Error, uniffi::Error)]
pub enum PresenterError {
    /// State error
    #[error(transparent)]
    State(#[from] StateError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Message error
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Result type for presenter operations
pub type PresenterResult<T> = Result<T, PresenterError>;

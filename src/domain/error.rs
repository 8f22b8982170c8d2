//! Error types for the console core.
//!
//! This module defines the crate-wide error type [`ConsoleError`], the
//! collaborator-facing [`ServiceError`], and a [`Result`] alias. All errors are
//! implemented with `thiserror`.

use thiserror::Error;

/// Message shown when the remote collaborator fails without saying why.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// The main error type for console operations.
///
/// Variants mirror what a list screen can show to the user: a failed fetch
/// renders an error panel, a failed mutation keeps the modal open, and a
/// protected role is rejected before anything reaches the network.
///
/// # Examples
///
/// ```
/// use coursedesk::ConsoleError;
///
/// let err = ConsoleError::SystemRoleImmutable { role: "Administrator".into() };
/// assert_eq!(err.to_string(), "Role 'Administrator' is a system role and cannot be modified");
/// ```
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The initial list fetch failed.
    ///
    /// The screen shows an inline error state instead of the table.
    #[error("Failed to load: {0}")]
    Fetch(String),

    /// A create, update, or delete call failed.
    ///
    /// The triggering modal stays open and the collection is left unchanged.
    #[error("{0}")]
    Mutation(String),

    /// A mutation targeted a role flagged as a system role.
    #[error("Role '{role}' is a system role and cannot be modified")]
    SystemRoleImmutable {
        /// Name of the protected role.
        role: String,
    },

    /// A resource or action tag string did not name a known tag.
    #[error("Unknown {kind} tag: {value}")]
    UnknownTag {
        /// Which tag family was being parsed (`resource`, `action`, ...).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local storage (the JSON-file collaborator) failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a remote resource service.
///
/// Each variant carries the collaborator's own message, if it provided one.
/// The synchronizer does not classify these further; it surfaces the message
/// or falls back to a generic one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Listing the collection failed (network or server failure).
    #[error("fetch failed{}", detail(.0))]
    Fetch(Option<String>),

    /// The payload was rejected.
    #[error("validation failed{}", detail(.0))]
    Validation(Option<String>),

    /// The targeted record does not exist.
    #[error("not found{}", detail(.0))]
    NotFound(Option<String>),

    /// Any other server-side failure.
    #[error("server error{}", detail(.0))]
    Server(Option<String>),
}

impl ServiceError {
    /// Returns the collaborator-provided message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Fetch(m) | Self::Validation(m) | Self::NotFound(m) | Self::Server(m) => {
                m.as_deref().filter(|m| !m.trim().is_empty())
            }
        }
    }

    /// Returns the message to show the user, falling back to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }

    /// Shorthand for a validation failure with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(Some(message.into()))
    }

    /// Shorthand for a not-found failure with a message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(Some(message.into()))
    }

    /// Shorthand for a server failure with a message.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(Some(message.into()))
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

//! Structured error handling for board, workflow and generation operations.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of an [`Error`], so any collaborator failure (board API,
/// generation backend, file I/O) can be wrapped without losing its chain.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while dispatching a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The board state query failed (connectivity, authorization).
    SelectionRead,
    /// A matched selection is missing an object its workflow requires.
    MalformedSelection,
    /// The generation backend call failed.
    Invocation,
    /// The generation backend call did not complete in time.
    Timeout,
    /// Input validation failed.
    InvalidInput,
    /// A model endpoint was asked for a state change it cannot make.
    InvalidTransition,
    /// Configuration error.
    Configuration,
    /// Serialization/deserialization error.
    Serialization,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns true if the generation backend failed or timed out.
    #[must_use]
    pub const fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::Invocation | Self::Timeout)
    }

    /// Returns true if this kind signals a classifier/extractor contract
    /// violation rather than a routine user-facing failure.
    #[must_use]
    pub const fn is_internal_fault(&self) -> bool {
        matches!(self, Self::MalformedSelection)
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a new selection read error.
    pub fn selection_read() -> Self {
        Self::new(ErrorKind::SelectionRead)
    }

    /// Creates a new malformed selection error.
    pub fn malformed_selection() -> Self {
        Self::new(ErrorKind::MalformedSelection)
    }

    /// Creates a new invocation error.
    pub fn invocation() -> Self {
        Self::new(ErrorKind::Invocation)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new invalid transition error.
    pub fn invalid_transition() -> Self {
        Self::new(ErrorKind::InvalidTransition)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(ErrorKind::SelectionRead, error).with_message("I/O operation failed")
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON document")
    }
}

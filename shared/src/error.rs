//! Error types for the Book Trip code hook.
//!
//! Only integration problems are errors. A bad slot value from the user is a
//! [`ValidationResult`](crate::validation::ValidationResult), never an `Error`.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that fail the invocation instead of producing a dialog response.
#[derive(Error, Debug)]
pub enum Error {
    /// Intent the bot routed to us that this handler does not serve
    #[error("Intent with name {0} not supported")]
    UnknownIntent(String),

    /// Invocation source other than the dialog or fulfillment hook
    #[error("Unsupported invocation source: {0}")]
    UnsupportedInvocationSource(String),

    /// Structural field missing from the inbound event
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error comes from a malformed or mismatched inbound event.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownIntent(_)
                | Error::UnsupportedInvocationSource(_)
                | Error::MissingField(_)
        )
    }
}

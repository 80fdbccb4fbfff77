//! Domain error type shared by every handler algorithm.
//!
//! Handlers never construct a `sawtooth_sdk` [`ApplyError`] directly; they
//! return `Result<T, DomainError>` so that validation logic stays free of SDK
//! types, and the handler shell at the edge of each `apply()` converts via
//! [`From`]. This keeps each handler's own message strings as the single
//! source of truth for what callers observe.

use sawtooth_sdk::processor::handler::ApplyError;

/// The message `InternalError` always surfaces to the validator, regardless
/// of the underlying cause.
const INTERNAL_ERROR_MESSAGE: &str = "An unknown error has occured.";

#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    /// A domain/business-rule violation. The message is part of the
    /// observable interface and must match the handler's documented wording
    /// verbatim.
    #[error("{0}")]
    Invalid(String),

    /// Anything else: malformed state, context I/O failure, a bug. The
    /// wrapped message is logged but never surfaced to the caller.
    #[error("internal: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::Invalid(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal(message.into())
    }
}

impl From<DomainError> for ApplyError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Invalid(msg) => ApplyError::InvalidTransaction(msg),
            DomainError::Internal(msg) => {
                tracing::error!(cause = %msg, "internal error while applying transaction");
                ApplyError::InternalError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<sawtooth_sdk::processor::handler::ContextError> for DomainError {
    fn from(err: sawtooth_sdk::processor::handler::ContextError) -> Self {
        DomainError::internal(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

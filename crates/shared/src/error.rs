use thiserror::Error;

/// Failure modes of the API collaborator as seen by the client.
///
/// Local field-level validation never produces one of these; that is the
/// validator's `FieldErrors` map and involves no network call. Nothing here
/// is fatal: every variant maps to a retry or corrected input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiClientError {
    /// Login rejected; surfaced inline on the login form, credentials not
    /// persisted.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The server rejected the payload (4xx). Surfaced as a single message
    /// while the form stays open.
    #[error("server rejected request: {message}")]
    Validation { message: String },
    /// Mutation target no longer exists on the server.
    #[error("record not found")]
    NotFound,
    /// Network fault or 5xx. Retryable; prior data stays visible.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiClientError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

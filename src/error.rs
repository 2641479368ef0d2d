use thiserror::Error;

/// Misuse of the session tracker
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("a session is already active")]
    SessionActive,

    #[error("no session is active")]
    NoActiveSession,
}

/// Failure reported by a coaching collaborator. Never surfaced to the
/// swimmer: [`ResilientCoach`](crate::coach::ResilientCoach) swaps in a
/// fallback.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("coaching service unavailable")]
    Unavailable,

    #[error("coaching service returned an empty response")]
    EmptyResponse,

    #[error("malformed coaching response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("coaching request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

use thiserror::Error;

/// The form was rejected before anything was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifiers of every required input left empty, in form order
    #[error("missing required fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

/// The backend answered with a non-success status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("backend rejected the report: {}", .0.as_deref().unwrap_or("no message"))]
    BadRequest(Option<String>),

    #[error("backend could not find the incident")]
    NotFound,

    #[error("backend answered HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Unexpected {
        status: u16,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Server(#[from] ServerError),

    /// The request never completed (DNS, connection, timeout)
    #[error("network error: {0}")]
    Network(String),

    #[error("a submission for this teacher is already in flight")]
    AlreadyInFlight,
}

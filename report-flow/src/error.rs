use thiserror::Error;

/// Errors surfaced by the report and prediction flows.
#[derive(Error, Debug)]
pub enum FlowError {
    /// A required local field is missing or malformed. Raised before any
    /// network call; no session state is mutated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An operation was invoked out of order, e.g. PDF export before the
    /// report pipeline completed.
    #[error("Invalid state: {0}")]
    State(String),

    /// A collaborator answered with `success: false`. Carries the
    /// collaborator-supplied message.
    #[error("Service error: {0}")]
    Service(String),

    /// The request never completed. No structured message is guaranteed.
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;

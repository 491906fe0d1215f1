/// Failures that occur outside the status pipeline.
///
/// Every variant is converted into a best-effort [`Response`] with status
/// UNKNOWN before it reaches the caller of the executor.
///
/// [`Response`]: crate::response::Response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request failed shape checks before any connection was attempted.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The device connection could not be established.
    #[error("connection setup failed: {0}")]
    Connection(String),

    /// The deadline elapsed before the check task delivered a result.
    #[error("request timed out")]
    Timeout,

    /// The caller cancelled the request before the check task finished.
    #[error("request cancelled")]
    Cancelled,

    /// The check task panicked.
    #[error("execution faulted: {0}")]
    Fault(String),

    /// Reading hardware health from an established connection failed.
    #[error("read hardware health failed: {0}")]
    Read(String),
}

/// A component state token could not be converted into a numeric code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("unrecognized component state '{0}'")]
    Unrecognized(String),
}

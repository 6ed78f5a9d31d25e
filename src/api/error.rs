use thiserror::Error;

/// Failures surfaced by the chat API client. All of them are recoverable at
/// the call site; the view shows a toast or keeps its previous state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or connection failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered, but the body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A well-formed response carrying a non-success status.
    #[error("server error: {0}")]
    Api(String),
}

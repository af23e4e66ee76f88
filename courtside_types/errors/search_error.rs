use thiserror::Error;

/// Errors raised while querying the player search endpoint.
///
/// The widget surfaces all of them to the user as the same generic message;
/// the variants only matter for logging.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("Search endpoint responded with status {0}")]
    Status(u16),

    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search task aborted: {0}")]
    Aborted(String),
}

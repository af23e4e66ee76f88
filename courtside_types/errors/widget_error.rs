use thiserror::Error;

/// Errors for widget construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Required element #{0} not found on page")]
    MissingElement(String),

    #[error("Invalid search endpoint {0}")]
    InvalidEndpoint(String),
}

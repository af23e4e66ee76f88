use thiserror::Error;

pub mod search_error;
pub mod widget_error;

pub use search_error::SearchError;
pub use widget_error::WidgetError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Infrastructure(format!("{:#?}", err))
    }
}

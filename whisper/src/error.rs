pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Rejected(String),
    #[error("network error {0}")]
    Network(String),
    #[error("clipboard error {0}")]
    Clipboard(String),
    #[error("{0} is not available in the current view")]
    Unavailable(&'static str),
    #[error("session storage error {0}")]
    Storage(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Network(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Network(e.to_string())
    }
}

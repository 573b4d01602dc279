/// Result type for [`SentinelClient`] operations.
///
/// [`SentinelClient`]: crate::SentinelClient
pub type Result<T> = std::result::Result<T, SentinelError>;

/// Errors returned by the [`SentinelClient`].
///
/// [`SentinelClient`]: crate::SentinelClient
#[derive(thiserror::Error, Debug)]
pub enum SentinelError {
    /// The sentinel answered with a non-success HTTP status.
    #[error("Sentinel returned HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// An error occurred while contacting the sentinel.
    #[error("Error contacting sentinel: {0}")]
    Reqwest(reqwest::Error),
}

impl From<reqwest::Error> for SentinelError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SentinelError::Status(status),
            None => SentinelError::Reqwest(err),
        }
    }
}

impl SentinelError {
    /// The HTTP status, if the sentinel answered with an error status.
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

use thiserror::Error;

/// Errors returned by generated api calls
#[derive(Error, Debug)]
pub enum Error {
    #[error("An api key is required (HTTP 401)")]
    KeyRequired,

    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("Service unavailable (HTTP 503)")]
    Unavailable,

    #[error("Api returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Region {0} is not supported by this operation")]
    NotSupportedRegion(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid map key \"{key}\": {reason}")]
    InvalidMapKey { key: String, reason: String },

    #[error("Invalid uri template \"{template}\": {reason}")]
    UriTemplate { template: String, reason: String },

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Map a non-success status code to its error
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match status {
            401 => Error::KeyRequired,
            429 => Error::RateLimited,
            503 => Error::Unavailable,
            _ => Error::Api {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::KeyRequired => Some(401),
            Error::RateLimited => Some(429),
            Error::Unavailable => Some(503),
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

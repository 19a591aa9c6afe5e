use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IsapiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("{context} failed: {status}")]
    Status {
        status: StatusCode,
        context: String,
    },

    #[error("unknown stream type: {0}")]
    UnknownStreamType(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<url::ParseError> for IsapiError {
    fn from(e: url::ParseError) -> Self {
        IsapiError::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IsapiError>;

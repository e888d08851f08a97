

use thiserror::Error;

use crate::deletion::DeletionError;


#[derive(Error, Debug)]
pub enum SmartUserError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Deletion failed: {0}")]
    Deletion(#[from] DeletionError),
}


pub type Result<T> = std::result::Result<T, SmartUserError>;

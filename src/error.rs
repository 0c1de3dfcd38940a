use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("input error: {0}")]
    Input(String),
    #[error("error fetching Jira ticket {key}: {detail}")]
    RemoteFetch { key: String, detail: String },
    #[error("remote update failed: {0}")]
    RemoteCreate(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

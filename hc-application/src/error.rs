use hc_core::usecases::Error as BError;
use std::io;
use thiserror::Error;

pub use hc_core::repositories;

impl From<repositories::Error> for AppError {
    fn from(err: repositories::Error) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<hc_core::deadline::DeadlineExceeded> for AppError {
    fn from(err: hc_core::deadline::DeadlineExceeded) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// The business error, if any.
    pub fn business(&self) -> Option<&BError> {
        match self {
            Self::Business(err) => Some(err),
            _ => None,
        }
    }
}

use super::json_error_response;
use crate::adapters::json::ParseError;
use anyhow::anyhow;
use hc_application::error::AppError;
use hc_core::usecases::{Error as BError, ErrorCategory};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{2}")]
    OtherWithStatus(Status, &'static str, #[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => {
                Self::OtherWithStatus(Status::UnprocessableEntity, "unprocessable", anyhow!(err))
            }
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(Status::UnprocessableEntity, "unprocessable", anyhow!(err))
            }
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        let key = match err {
            ParseError::Id(_) => "invalid_id_format",
            ParseError::Date(_) => "bad_input",
        };
        Self::OtherWithStatus(Status::BadRequest, key, err.into())
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        Self::App(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::App(err.into())
    }
}

pub fn status_of_category(category: ErrorCategory) -> Status {
    match category {
        ErrorCategory::BadInput => Status::BadRequest,
        ErrorCategory::NotAuthenticated => Status::Unauthorized,
        ErrorCategory::NotFound => Status::NotFound,
        ErrorCategory::Forbidden => Status::Forbidden,
        ErrorCategory::Conflict => Status::Conflict,
        ErrorCategory::Unprocessable => Status::UnprocessableEntity,
        ErrorCategory::Internal => Status::InternalServerError,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(AppError::Business(err)) => {
                let status = status_of_category(err.category());
                if status == Status::InternalServerError {
                    error!("Error: {err}");
                    json_error_response(req, status, err.key(), "Internal server error", Some(&err))
                } else {
                    json_error_response(req, status, err.key(), &err.to_string(), None)
                }
            }
            Error::App(err) => {
                error!("Error: {err}");
                json_error_response(
                    req,
                    Status::InternalServerError,
                    "internal",
                    "Internal server error",
                    Some(&err),
                )
            }
            Error::OtherWithStatus(status, key, err) => {
                json_error_response(req, status, key, &err.to_string(), None)
            }
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(
                    req,
                    Status::InternalServerError,
                    "internal",
                    "Internal server error",
                    Some(&err),
                )
            }
        }
    }
}

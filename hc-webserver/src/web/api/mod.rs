use std::{fmt::Display, result};

use hc_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, catch, catchers, delete, get,
    http::Status,
    post, put,
    response::{self, Responder},
    routes, Catcher, Route, State,
};

use super::{guards::*, sqlite, Cfg};
use crate::{
    adapters::json::{self, from_json, to_json},
    core::prelude::*,
};
use hc_application::prelude as flows;

mod error;
mod files;
mod requests;
mod service;
mod threads;
mod users;
mod watches;

pub use self::error::Error as ApiError;

#[cfg(test)]
mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   auth   --- //
        users::get_logout,
        // ---   files   --- //
        files::post_upload,
        // ---   requests   --- //
        requests::get_requests,
        requests::post_request,
        requests::get_request,
        requests::put_request,
        requests::delete_request,
        requests::put_request_status,
        requests::get_request_history,
        requests::get_offers,
        requests::post_offer,
        // ---   threads   --- //
        threads::get_threads,
        threads::get_thread_messages,
        threads::put_thread_read,
        threads::post_message,
        // ---   watches   --- //
        watches::get_watches,
        watches::post_watch,
        watches::delete_watch,
        // ---   site   --- //
        service::get_site_status,
        service::post_service,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

#[catch(default)]
fn default_catcher(status: Status, _req: &rocket::Request) -> Json<JsonErrorResponse> {
    Json(JsonErrorResponse {
        http_status: status.code,
        key: status_key(status).to_owned(),
        message: status.reason().unwrap_or_default().to_owned(),
        details: None,
    })
}

fn status_key(status: Status) -> &'static str {
    match status.code {
        400 => "bad_input",
        401 => "not_authenticated",
        403 => "forbidden",
        404 => "not_found",
        409 => "conflict",
        422 => "unprocessable",
        _ => "internal",
    }
}

fn json_error_response<'r, 'o: 'r>(
    req: &'r rocket::Request<'_>,
    status: Status,
    key: &str,
    message: &str,
    details: Option<&dyn Display>,
) -> response::Result<'o> {
    let exposes_details = req
        .rocket()
        .state::<Cfg>()
        .is_some_and(|cfg| cfg.environment.exposes_error_details());
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        key: key.to_owned(),
        message: message.to_owned(),
        details: details
            .filter(|_| exposes_details)
            .map(ToString::to_string),
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

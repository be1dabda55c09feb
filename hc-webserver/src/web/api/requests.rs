use std::str::FromStr;

use super::*;
use hc_application::{event_bus::EventBus, prelude::RequestFilter};

fn bad_query(name: &str, value: &str) -> ApiError {
    ApiError::OtherWithStatus(
        Status::BadRequest,
        "bad_input",
        anyhow::anyhow!("Invalid value '{value}' of query parameter '{name}'"),
    )
}

#[get("/requests?<meeting_id>&<status>&<q>")]
pub fn get_requests(
    connections: sqlite::Connections,
    cache: &State<Cache>,
    auth: Auth,
    deadline: HandlerDeadline,
    meeting_id: Option<&str>,
    status: Option<&str>,
    q: Option<String>,
) -> Result<Vec<json::Request>> {
    let user_id = auth.user_id(&connections)?;
    let filter = RequestFilter {
        meeting_id: meeting_id.map(from_json::id).transpose()?,
        status: status
            .map(|s| RequestStatus::from_str(s).map_err(|_| bad_query("status", s)))
            .transpose()?,
        text: q.filter(|q| !q.trim().is_empty()),
    };
    let requests =
        flows::list_visible_requests(&connections, cache, deadline.0, &user_id, &filter)?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

#[post("/requests", format = "application/json", data = "<new_request>")]
pub fn post_request(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    auth: Auth,
    deadline: HandlerDeadline,
    new_request: JsonResult<json::NewRequest>,
) -> Result<json::Request> {
    let user_id = auth.user_id(&connections)?;
    let new_request = from_json::try_new_request(new_request?.into_inner())?;
    let request = flows::create_request(&connections, events, deadline.0, &user_id, new_request)?;
    Ok(Json(request.into()))
}

#[get("/requests/<id>")]
pub fn get_request(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<json::Request> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let request = flows::get_request(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(request.into()))
}

#[put("/requests/<id>", format = "application/json", data = "<update>")]
pub fn put_request(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
    update: JsonResult<json::RequestUpdate>,
) -> Result<json::Request> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let update = from_json::try_request_update(update?.into_inner())?;
    let request = flows::update_request(&connections, events, deadline.0, &user_id, &id, update)?;
    Ok(Json(request.into()))
}

#[delete("/requests/<id>")]
pub fn delete_request(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<()> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    flows::delete_request(&connections, events, deadline.0, &user_id, &id)?;
    Ok(Json(()))
}

#[put("/requests/<id>/status", format = "application/json", data = "<update>")]
pub fn put_request_status(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
    update: JsonResult<json::StatusUpdate>,
) -> Result<json::Request> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let params = from_json::try_transition(update?.into_inner())?;
    let request =
        flows::transition_request(&connections, events, deadline.0, &user_id, &id, params)?;
    Ok(Json(request.into()))
}

#[get("/requests/<id>/history")]
pub fn get_request_history(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<Vec<json::RequestHistory>> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let history = flows::request_history(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(history.into_iter().map(Into::into).collect()))
}

/// Ids of the users who offered to carry the request.
#[get("/requests/<id>/offers")]
pub fn get_offers(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<Vec<String>> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let providers = flows::potential_providers(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(
        providers
            .into_iter()
            .map(|p| p.user_id.to_string())
            .collect(),
    ))
}

#[post("/requests/<id>/offers", format = "application/json", data = "<action>")]
pub fn post_offer(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
    action: JsonResult<json::OfferAction>,
) -> Result<()> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    match action?.into_inner() {
        json::OfferAction::Add => {
            flows::add_offer(&connections, events, deadline.0, &user_id, &id)?;
        }
        json::OfferAction::Withdraw => {
            flows::withdraw_offer(&connections, events, deadline.0, &user_id, &id)?;
        }
        json::OfferAction::Reject { user_id: rejected } => {
            let rejected = from_json::id(&rejected)?;
            flows::reject_offer(&connections, events, deadline.0, &user_id, &id, &rejected)?;
        }
    }
    Ok(Json(()))
}

use super::*;
use hc_application::event_bus::EventBus;

#[get("/threads")]
pub fn get_threads(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
) -> Result<Vec<json::Thread>> {
    let user_id = auth.user_id(&connections)?;
    let threads = flows::threads_of_user(&connections, deadline.0, &user_id)?;
    Ok(Json(threads.into_iter().map(to_json::thread).collect()))
}

#[get("/threads/<id>/messages")]
pub fn get_thread_messages(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<Vec<json::Message>> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    let messages = flows::thread_messages(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

#[put("/threads/<id>/read")]
pub fn put_thread_read(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<()> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    flows::mark_thread_read(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(()))
}

#[post("/messages", format = "application/json", data = "<new_message>")]
pub fn post_message(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    cfg: &State<Cfg>,
    auth: Auth,
    deadline: HandlerDeadline,
    new_message: JsonResult<json::NewMessage>,
) -> Result<json::Message> {
    let user_id = auth.user_id(&connections)?;
    let Some(new_message) = from_json::try_new_message(new_message?.into_inner())? else {
        return Err(ApiError::OtherWithStatus(
            Status::BadRequest,
            "bad_input",
            anyhow::anyhow!("Either a thread or a request is required"),
        ));
    };
    let posted = flows::post_message(
        &connections,
        events,
        deadline.0,
        cfg.message_delay,
        &user_id,
        new_message,
    )?;
    Ok(Json(posted.message.into()))
}

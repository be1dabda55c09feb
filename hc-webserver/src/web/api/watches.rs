use super::*;

#[get("/watches")]
pub fn get_watches(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
) -> Result<Vec<json::Watch>> {
    let user_id = auth.user_id(&connections)?;
    let watches = flows::watches_of_user(&connections, deadline.0, &user_id)?;
    Ok(Json(watches.into_iter().map(Into::into).collect()))
}

#[post("/watches", format = "application/json", data = "<new_watch>")]
pub fn post_watch(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    new_watch: JsonResult<json::NewWatch>,
) -> Result<json::Watch> {
    let user_id = auth.user_id(&connections)?;
    let new_watch = from_json::try_new_watch(new_watch?.into_inner())?;
    let watch = flows::create_watch(&connections, deadline.0, &user_id, new_watch)?;
    Ok(Json(watch.into()))
}

#[delete("/watches/<id>")]
pub fn delete_watch(
    connections: sqlite::Connections,
    auth: Auth,
    deadline: HandlerDeadline,
    id: &str,
) -> Result<()> {
    let user_id = auth.user_id(&connections)?;
    let id = from_json::id(id)?;
    flows::delete_watch(&connections, deadline.0, &user_id, &id)?;
    Ok(Json(()))
}

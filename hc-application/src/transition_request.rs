use super::*;
use crate::event_bus::EventBus;
use usecases::TransitionParams;

pub fn transition_request(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
    params: TransitionParams,
) -> Result<Request> {
    let (request, change) = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::transition_request(db, actor, id, params, Timestamp::now())
    })?;
    log::info!(
        "Request {id} changed from {} to {}",
        change.old_status.as_ref(),
        change.new_status.as_ref()
    );
    events.publish(LifecycleEvent::RequestStatusChanged {
        request: request.clone(),
        change,
    });
    Ok(request)
}

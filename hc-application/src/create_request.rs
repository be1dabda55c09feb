use super::*;
use crate::event_bus::EventBus;
use usecases::NewRequest;

pub fn create_request(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    new_request: NewRequest,
) -> Result<Request> {
    let request = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::create_request(db, actor, new_request.clone(), Timestamp::now())
    })?;
    log::info!("User {user_id} created request {}", request.id);
    events.publish(LifecycleEvent::RequestCreated {
        request: request.clone(),
    });
    Ok(request)
}

use super::*;
use crate::event_bus::EventBus;

pub fn delete_request(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
) -> Result<()> {
    let request = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::delete_request(db, actor, id)
    })?;
    log::info!("User {user_id} deleted request {id}");
    events.publish(LifecycleEvent::RequestDeleted { request });
    Ok(())
}

use super::*;
use crate::event_bus::EventBus;
use usecases::RequestUpdate;

/// Updates the fields of a request and optionally its status.
///
/// A status change is published separately from the field update.
pub fn update_request(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
    update: RequestUpdate,
) -> Result<Request> {
    let outcome = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::update_request(db, actor, id, update.clone(), Timestamp::now())
    })?;
    let usecases::UpdateOutcome {
        request,
        fields_updated,
        status_change,
    } = outcome;
    if fields_updated {
        events.publish(LifecycleEvent::RequestUpdated {
            request: request.clone(),
        });
    }
    if let Some(change) = status_change {
        log::info!(
            "Request {id} changed from {} to {}",
            change.old_status.as_ref(),
            change.new_status.as_ref()
        );
        events.publish(LifecycleEvent::RequestStatusChanged {
            request: request.clone(),
            change,
        });
    }
    Ok(request)
}

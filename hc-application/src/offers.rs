use super::*;
use crate::event_bus::EventBus;

pub fn add_offer(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    request_id: &Id,
) -> Result<Request> {
    let request = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::add_offer(db, actor, request_id, Timestamp::now())
    })?;
    events.publish(LifecycleEvent::PotentialProviderAdded {
        request: request.clone(),
        user_id: *user_id,
    });
    Ok(request)
}

/// Withdraws the own offer. Withdrawing twice is not an error.
pub fn withdraw_offer(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    request_id: &Id,
) -> Result<()> {
    let withdrawn = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::withdraw_offer(db, actor, request_id)
    })?;
    if let Some(request) = withdrawn {
        events.publish(LifecycleEvent::PotentialProviderSelfRemoved {
            request,
            user_id: *user_id,
        });
    }
    Ok(())
}

pub fn reject_offer(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    request_id: &Id,
    rejected_user_id: &Id,
) -> Result<()> {
    let request = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::reject_offer(db, actor, request_id, rejected_user_id)
    })?;
    events.publish(LifecycleEvent::PotentialProviderRejected {
        request,
        user_id: *rejected_user_id,
    });
    Ok(())
}

pub fn potential_providers(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    request_id: &Id,
) -> Result<Vec<PotentialProvider>> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::potential_providers(db, actor, request_id)
    })
}

use std::time::Duration;

use super::*;
use crate::event_bus::EventBus;
use usecases::{NewMessage, PostedMessage, ThreadSummary};

/// Posts a message and notifies the other participants after `delay`.
///
/// Messages that are posted to the same thread within the delay
/// result in a single notification.
pub fn post_message(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    delay: Duration,
    user_id: &Id,
    new_message: NewMessage,
) -> Result<PostedMessage> {
    let posted = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::post_message(db, actor, new_message.clone(), Timestamp::now())
    })?;
    log::debug!(
        "User {user_id} posted message {} to thread {}",
        posted.message.id,
        posted.thread.id
    );
    events.publish_delayed(
        LifecycleEvent::MessageCreated {
            request: posted.request.clone(),
            message: posted.message.clone(),
            coalesced_sender_ids: vec![],
        },
        delay,
    );
    Ok(posted)
}

pub fn threads_of_user(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
) -> Result<Vec<ThreadSummary>> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::threads_of_actor(db, actor)
    })
}

pub fn thread_messages(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    thread_id: &Id,
) -> Result<Vec<Message>> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::thread_messages(db, actor, thread_id)
    })
}

pub fn mark_thread_read(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    thread_id: &Id,
) -> Result<()> {
    write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::mark_thread_read(db, actor, thread_id, Timestamp::now())
    })
}

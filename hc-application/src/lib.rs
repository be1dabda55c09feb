//! # hc-application
//!
//! Flows that coordinate the use cases of the core within database
//! transactions and publish lifecycle events after each commit.

use std::sync::Arc;

use hc_core::{deadline::Deadline, gateways::notify::NotificationGateway};

mod create_request;
mod delete_request;
mod files;
mod housekeeping;
mod list_requests;
mod meetings;
mod messages;
mod offers;
mod organizations;
mod transition_request;
mod update_request;
mod users;
mod watches;

pub mod error;
pub mod event_bus;
pub mod notification_dispatcher;
pub mod visibility_cache;

pub mod prelude {
    pub use super::{
        create_request::*, delete_request::*, files::*, housekeeping::*, list_requests::*,
        meetings::*, messages::*, offers::*, organizations::*, transition_request::*,
        update_request::*, users::*, watches::*,
    };
}

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use hc_core::{
    authorization::Actor, db::*, entities::*, events::LifecycleEvent, repositories::*, usecases,
};

use event_bus::EventBus;
use notification_dispatcher::NotificationDispatcher;
use visibility_cache::{CacheMaintainer, VisibilityCache};

#[cfg(test)]
pub(crate) mod tests;

pub mod sqlite {
    pub use hc_db_sqlite::{run_embedded_database_migrations, Connections, DbConnection};
}

/// Registers the subscribers that maintain the visibility cache
/// and send notifications.
pub fn subscribe_event_handlers(
    events: &EventBus,
    connections: &sqlite::Connections,
    cache: Arc<VisibilityCache>,
    notify: Arc<dyn NotificationGateway + Send + Sync>,
    default_language: Language,
) {
    events.subscribe(
        "visibility-cache",
        Arc::new(CacheMaintainer::new(connections.clone(), cache)),
    );
    events.subscribe(
        "notifications",
        Arc::new(NotificationDispatcher::new(
            connections.clone(),
            notify,
            default_language,
        )),
    );
}

/// Runs a use case on behalf of a user within an exclusive transaction.
///
/// The deadline is checked again right before the commit.
fn write_as_user<T, F>(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    mut f: F,
) -> Result<T>
where
    F: FnMut(&sqlite::DbConnection, &Actor) -> std::result::Result<T, usecases::Error>,
{
    deadline.check()?;
    let mut db = connections.exclusive()?;
    db.transaction(|db| {
        let actor = usecases::load_actor(db, user_id)?;
        let value = f(db, &actor)?;
        deadline.check()?;
        Ok::<_, usecases::Error>(value)
    })
    .map_err(|err| {
        log::warn!("Transaction of user {user_id} failed: {err}");
        err.into()
    })
}

/// Runs a use case on behalf of a user on a consistent snapshot.
fn read_as_user<T, F>(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    mut f: F,
) -> Result<T>
where
    F: FnMut(&sqlite::DbConnection, &Actor) -> std::result::Result<T, usecases::Error>,
{
    deadline.check()?;
    let value = connections.shared()?.transaction(|db| {
        let actor = usecases::load_actor(db, user_id)?;
        f(db, &actor)
    })?;
    Ok(value)
}

/// Runs administrative use cases within an exclusive transaction.
fn write<T, F>(connections: &sqlite::Connections, deadline: Deadline, f: F) -> Result<T>
where
    F: FnMut(&sqlite::DbConnection) -> std::result::Result<T, usecases::Error>,
{
    deadline.check()?;
    let mut db = connections.exclusive()?;
    db.transaction(f).map_err(|err| {
        log::warn!("Transaction failed: {err}");
        err.into()
    })
}

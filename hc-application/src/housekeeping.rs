use hc_core::gateways::object_store::ObjectStore;

use super::*;
use crate::event_bus::EventBus;
use usecases::HousekeepingJob;

/// Runs a single job and returns the number of affected entities.
pub fn run_housekeeping_job(
    connections: &sqlite::Connections,
    events: &EventBus,
    object_store: &dyn ObjectStore,
    job: HousekeepingJob,
) -> Result<usize> {
    log::info!("Running housekeeping job {}", job.as_ref());
    match job {
        HousekeepingJob::FileCleanup => delete_unreferenced_files(connections, object_store),
        HousekeepingJob::LocationCleanup => write(connections, Deadline::none(), |db| {
            usecases::delete_orphaned_locations(db)
        }),
        HousekeepingJob::TokenCleanup => write(connections, Deadline::none(), |db| {
            usecases::delete_expired_access_tokens(db, Timestamp::now())
        }),
        HousekeepingJob::OutdatedRequests => notify_outdated_requests(connections, events),
    }
}

fn delete_unreferenced_files(
    connections: &sqlite::Connections,
    object_store: &dyn ObjectStore,
) -> Result<usize> {
    let files = connections
        .shared()?
        .transaction(|db| usecases::unreferenced_files(db, Timestamp::now()))?;
    let mut count = 0;
    for file in files {
        // A missing object must not keep the record alive
        if let Err(err) = object_store.delete_object(&file.object_key()) {
            log::error!("Failed to delete object of file {}: {err}", file.id);
        }
        match write(connections, Deadline::none(), |db| Ok(db.delete_file(&file.id)?)) {
            Ok(()) => count += 1,
            Err(err) => log::warn!("Failed to delete file {}: {err}", file.id),
        }
    }
    log::info!("Deleted {count} unreferenced files");
    Ok(count)
}

fn notify_outdated_requests(connections: &sqlite::Connections, events: &EventBus) -> Result<usize> {
    let requests = connections
        .shared()?
        .transaction(|db| usecases::outdated_requests(db, today()))?;
    let count = requests.len();
    for request in requests {
        log::debug!("Request {} is outdated", request.id);
        events.publish(LifecycleEvent::RequestOutdated { request });
    }
    log::info!("Found {count} outdated requests");
    Ok(count)
}

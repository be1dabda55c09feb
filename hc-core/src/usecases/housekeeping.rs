use strum::{AsRefStr, EnumIter, EnumString};

use super::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HousekeepingJob {
    FileCleanup,
    LocationCleanup,
    TokenCleanup,
    OutdatedRequests,
}

/// Open requests that should have been fulfilled before today.
pub fn outdated_requests<R: RequestRepo>(repo: &R, today: Date) -> Result<Vec<Request>> {
    Ok(repo.outdated_open_requests(today)?)
}

pub fn delete_expired_access_tokens<R: AccessTokenRepo>(repo: &R, now: Timestamp) -> Result<usize> {
    let count = repo.delete_expired_access_tokens(now)?;
    log::info!("Deleted {count} expired access tokens");
    Ok(count)
}

pub fn delete_orphaned_locations<R: LocationRepo>(repo: &R) -> Result<usize> {
    let count = repo.delete_orphaned_locations()?;
    log::info!("Deleted {count} orphaned locations");
    Ok(count)
}

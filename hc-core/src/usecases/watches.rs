use std::collections::BTreeSet;

use super::{load_actor, load_invite_only_audience, prelude::*};
use crate::{
    authorization,
    util::validate::Validate,
    watch::watch_matches,
};

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewWatch {
    pub name        : Option<String>,
    pub destination : Option<Location>,
    pub origin      : Option<Location>,
    pub meeting_id  : Option<Id>,
    pub search_text : Option<String>,
    pub size_floor  : Option<RequestSize>,
}

pub fn create_watch<R: Db>(repo: &R, actor: &Actor, new_watch: NewWatch, now: Timestamp) -> Result<Watch> {
    let NewWatch {
        name,
        destination,
        origin,
        meeting_id,
        search_text,
        size_floor,
    } = new_watch;
    let watch = Watch {
        id: Id::new(),
        owner_id: actor.id(),
        name: name.filter(|n| !n.trim().is_empty()),
        destination: destination.filter(|l| !l.is_empty()),
        origin: origin.filter(|l| !l.is_empty()),
        meeting_id,
        search_text: search_text
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty()),
        size_floor,
        created_at: now,
    };
    watch.validate().map_err(|_| Error::WatchWithoutCriteria)?;
    if let Some(meeting_id) = &watch.meeting_id {
        repo.get_meeting(meeting_id)?;
    }
    repo.create_watch(&watch)?;
    Ok(watch)
}

pub fn watches_of_actor<R: Db>(repo: &R, actor: &Actor) -> Result<Vec<Watch>> {
    Ok(repo.watches_of_user(&actor.id())?)
}

/// Deletes a watch of the actor. Watches of others are reported as missing.
pub fn delete_watch<R: Db>(repo: &R, actor: &Actor, id: &Id) -> Result<()> {
    let watch = match repo.get_watch(id) {
        Ok(watch) => watch,
        Err(RepoError::NotFound) => return Err(Error::NotFound),
        Err(err) => return Err(err.into()),
    };
    if watch.owner_id != actor.id() {
        return Err(Error::NotFound);
    }
    repo.delete_watch(&watch.id)?;
    Ok(())
}

/// Owners of matching watches that are allowed to see the request.
///
/// The creator is never included.
pub fn watchers_of_request<R: Db>(repo: &R, request: &Request) -> Result<Vec<Id>> {
    let owner_ids: BTreeSet<_> = repo
        .all_watches()?
        .iter()
        .filter(|watch| watch.owner_id != request.creator_id)
        .filter(|watch| watch_matches(watch, request))
        .map(|watch| watch.owner_id)
        .collect();
    let mut watcher_ids = Vec::with_capacity(owner_ids.len());
    for owner_id in owner_ids {
        let actor = match load_actor(repo, &owner_id) {
            Ok(actor) => actor,
            Err(Error::Repo(RepoError::NotFound)) => continue,
            Err(err) => return Err(err),
        };
        let audience = if authorization::needs_invite_only_audience(&actor, request) {
            Some(load_invite_only_audience(repo, request)?)
        } else {
            None
        };
        if authorization::is_visible(&actor, request, audience.as_ref()) {
            watcher_ids.push(owner_id);
        }
    }
    Ok(watcher_ids)
}

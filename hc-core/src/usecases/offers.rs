use super::{authorize_on_request, load_request, prelude::*};

/// Registers the actor as a potential provider of an open request.
pub fn add_offer<R: Db>(repo: &R, actor: &Actor, request_id: &Id, now: Timestamp) -> Result<Request> {
    let request = load_request(repo, request_id)?;
    authorize_on_request(repo, actor, &request, Action::Offer)?;
    if request.status != RequestStatus::Open {
        return Err(Error::RequestNotOpen);
    }
    let potential_provider = PotentialProvider {
        request_id: request.id,
        user_id: actor.id(),
        created_at: now,
    };
    repo.add_potential_provider(&potential_provider)
        .map_err(|err| match err {
            RepoError::AlreadyExists => Error::AlreadyOffered,
            err => err.into(),
        })?;
    log::debug!("User {} offered to provide request {}", actor.id(), request.id);
    Ok(request)
}

/// Withdraws the offer of the actor.
///
/// Returns `None` if there was no offer to withdraw.
pub fn withdraw_offer<R: Db>(repo: &R, actor: &Actor, request_id: &Id) -> Result<Option<Request>> {
    let request = load_request(repo, request_id)?;
    authorize_on_request(repo, actor, &request, Action::WithdrawOffer)?;
    let deleted = repo.delete_potential_provider(&request.id, &actor.id())?;
    if deleted == 0 {
        return Ok(None);
    }
    log::debug!("User {} withdrew the offer for request {}", actor.id(), request.id);
    Ok(Some(request))
}

/// Rejects the offer of another user.
pub fn reject_offer<R: Db>(
    repo: &R,
    actor: &Actor,
    request_id: &Id,
    user_id: &Id,
) -> Result<Request> {
    let request = load_request(repo, request_id)?;
    authorize_on_request(repo, actor, &request, Action::RejectOffer)?;
    let deleted = repo.delete_potential_provider(&request.id, user_id)?;
    if deleted == 0 {
        return Err(Error::NotFound);
    }
    log::debug!("Offer of user {} for request {} rejected", user_id, request.id);
    Ok(request)
}

pub fn potential_providers<R: Db>(
    repo: &R,
    actor: &Actor,
    request_id: &Id,
) -> Result<Vec<PotentialProvider>> {
    let request = load_request(repo, request_id)?;
    authorize_on_request(repo, actor, &request, Action::View)?;
    let potential_providers = repo.potential_providers(&request.id)?;
    if request.creator_id == actor.id() || actor.overrides(&request) {
        return Ok(potential_providers);
    }
    // Others only see their own offer
    Ok(potential_providers
        .into_iter()
        .filter(|pp| pp.user_id == actor.id())
        .collect())
}

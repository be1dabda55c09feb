use super::{authorize_on_request, load_request, prelude::*, trust_circle};
use crate::{
    events::StatusChange,
    status::{self, TransitionError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionParams {
    pub target: RequestStatus,
    pub provider_id: Option<Id>,
    /// The status the client believes to be current.
    pub expected_status: Option<RequestStatus>,
}

impl From<TransitionError> for Error {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Stale => Self::StaleStatus,
            TransitionError::Illegal => Self::IllegalTransition,
            TransitionError::MissingProvider => Self::MissingProvider,
            TransitionError::Forbidden => Self::Forbidden,
        }
    }
}

/// Checks that the provider belongs to the organization of the
/// request or to one that it trusts.
fn check_provider<R: Db>(repo: &R, request: &Request, provider_id: &Id) -> Result<()> {
    if provider_id == &request.creator_id {
        return Err(Error::BadProvider);
    }
    match repo.get_user(provider_id) {
        Ok(_) => {}
        Err(RepoError::NotFound) => return Err(Error::BadProvider),
        Err(err) => return Err(err.into()),
    }
    let trusted = trust_circle(repo, &request.organization_id)?;
    let affiliated = repo
        .memberships_of_user(provider_id)?
        .iter()
        .any(|m| trusted.contains(&m.organization_id));
    if !affiliated {
        log::debug!(
            "User {} is not affiliated with an organization trusted by {}",
            provider_id,
            request.organization_id
        );
        return Err(Error::BadProvider);
    }
    Ok(())
}

/// Applies a status transition together with its history entry and
/// the cleanup of potential providers.
///
/// Must run within a single transaction.
pub fn transition_request<R: Db>(
    repo: &R,
    actor: &Actor,
    id: &Id,
    params: TransitionParams,
    now: Timestamp,
) -> Result<(Request, StatusChange)> {
    let TransitionParams {
        target,
        provider_id,
        expected_status,
    } = params;
    let request = load_request(repo, id)?;
    authorize_on_request(repo, actor, &request, Action::Transition(target))?;
    if expected_status.is_some_and(|expected| expected != request.status) {
        return Err(Error::StaleStatus);
    }
    let mut updated = status::apply_transition(
        &request,
        &actor.id(),
        actor.overrides(&request),
        target,
        provider_id,
        now.date(),
    )?;
    let old_status = request.status;
    if old_status == RequestStatus::Open {
        if let Some(provider_id) = &updated.provider_id {
            check_provider(repo, &request, provider_id)?;
        }
    }
    updated.updated_at = now;
    repo.update_request_status(&updated, old_status)
        .map_err(|err| match err {
            RepoError::InvalidVersion => Error::StaleStatus,
            err => err.into(),
        })?;
    let history = RequestHistory {
        request_id: request.id,
        actor_id: actor.id(),
        old_status,
        new_status: updated.status,
        old_provider_id: request.provider_id,
        new_provider_id: updated.provider_id,
        created_at: now,
    };
    repo.add_request_history(&history)?;

    let mut rejected_potential_provider_ids = vec![];
    if old_status == RequestStatus::Open {
        // Only the offer of the accepted provider survives
        match updated.provider_id {
            Some(provider_id) => {
                rejected_potential_provider_ids = repo
                    .potential_providers(&request.id)?
                    .into_iter()
                    .map(|pp| pp.user_id)
                    .filter(|user_id| user_id != &provider_id)
                    .collect();
                for user_id in &rejected_potential_provider_ids {
                    repo.delete_potential_provider(&request.id, user_id)?;
                }
            }
            None => {
                repo.delete_potential_providers(&request.id)?;
            }
        }
    }
    log::info!(
        "Request {} changed from {} to {} by {}",
        request.id,
        old_status.as_ref(),
        updated.status.as_ref(),
        actor.id()
    );
    let change = StatusChange {
        actor_id: actor.id(),
        old_status,
        new_status: updated.status,
        old_provider_id: request.provider_id,
        new_provider_id: updated.provider_id,
        rejected_potential_provider_ids,
    };
    Ok((updated, change))
}

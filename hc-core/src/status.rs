//! The request status machine.

use crate::entities::*;

/// Who may trigger a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionActor {
    Creator,
    Provider,
    /// Anyone who is allowed to act on the request.
    Any,
}

#[rustfmt::skip]
const TRANSITIONS: &[(RequestStatus, RequestStatus, TransitionActor)] = {
    use RequestStatus::*;
    use TransitionActor::*;
    &[
        (Open,      Accepted,  Creator),
        (Open,      Removed,   Creator),
        (Accepted,  Open,      Creator),
        (Accepted,  Delivered, Provider),
        (Accepted,  Received,  Creator),
        (Accepted,  Removed,   Creator),
        (Delivered, Accepted,  Provider),
        (Delivered, Completed, Creator),
        (Completed, Delivered, Creator),
        (Completed, Accepted,  Creator),
        (Received,  Completed, Any),
    ]
};

/// The actor required for a transition or `None` if it is illegal.
pub fn transition_actor(from: RequestStatus, to: RequestStatus) -> Option<TransitionActor> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, actor)| *actor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("The status did not change or has been changed concurrently")]
    Stale,
    #[error("Illegal transition")]
    Illegal,
    #[error("Missing provider")]
    MissingProvider,
    #[error("Actor is not allowed to trigger this transition")]
    Forbidden,
}

/// Checks a transition against the table and computes the new values
/// of status, provider and completion date.
///
/// The affiliation of a newly accepted provider is not checked here.
pub fn apply_transition(
    request: &Request,
    actor_id: &Id,
    actor_overrides: bool,
    to: RequestStatus,
    provider_id: Option<Id>,
    today: Date,
) -> Result<Request, TransitionError> {
    let from = request.status;
    if from == to {
        return Err(TransitionError::Stale);
    }
    let required_actor = transition_actor(from, to).ok_or(TransitionError::Illegal)?;
    let is_creator = &request.creator_id == actor_id;
    let is_provider = request.provider_id.as_ref() == Some(actor_id);
    let permitted = match required_actor {
        // Nobody but the creator may remove a request
        _ if to == RequestStatus::Removed => is_creator,
        TransitionActor::Creator => is_creator || actor_overrides,
        TransitionActor::Provider => is_provider || actor_overrides,
        TransitionActor::Any => is_creator || is_provider || actor_overrides,
    };
    if !permitted {
        return Err(TransitionError::Forbidden);
    }
    let provider_id = if !to.requires_provider() {
        None
    } else if from == RequestStatus::Open {
        Some(provider_id.ok_or(TransitionError::MissingProvider)?)
    } else {
        request.provider_id
    };
    let completed_on = if to.requires_completed_on() {
        request.completed_on.or(Some(today))
    } else {
        None
    };
    Ok(Request {
        status: to,
        provider_id,
        completed_on,
        ..request.clone()
    })
}

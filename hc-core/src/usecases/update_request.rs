use super::{authorize_on_request, load_request, prelude::*, transition_request, TransitionParams};
use crate::{events::StatusChange, util::validate::Validate};

/// Changes of a request. Fields that are `None` stay untouched.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
    pub title           : Option<String>,
    pub description     : Option<Option<String>>,
    pub destination     : Option<Location>,
    pub origin          : Option<Option<Location>>,
    pub size            : Option<RequestSize>,
    pub needed_before   : Option<Option<Date>>,
    pub kilograms       : Option<Option<f64>>,
    pub url             : Option<Option<String>>,
    pub photo_id        : Option<Option<Id>>,
    pub visibility      : Option<RequestVisibility>,
    pub organization_id : Option<Id>,
    pub creator_id      : Option<Id>,
    pub status          : Option<RequestStatus>,
    pub provider_id     : Option<Id>,
    pub expected_status : Option<RequestStatus>,
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub request: Request,
    /// Set if any of the fields has been changed.
    pub fields_updated: bool,
    pub status_change: Option<StatusChange>,
}

fn apply_fields(request: &Request, update: &RequestUpdate) -> Request {
    let mut updated = request.clone();
    if let Some(title) = &update.title {
        updated.title = title.trim().to_owned();
    }
    if let Some(description) = &update.description {
        updated.description = description.clone().filter(|d| !d.trim().is_empty());
    }
    if let Some(destination) = &update.destination {
        updated.destination = destination.clone();
    }
    if let Some(origin) = &update.origin {
        updated.origin = origin.clone().filter(|o| !o.is_empty());
    }
    if let Some(size) = update.size {
        updated.size = size;
    }
    if let Some(needed_before) = update.needed_before {
        updated.needed_before = needed_before;
    }
    if let Some(kilograms) = update.kilograms {
        updated.kilograms = kilograms;
    }
    if let Some(url) = &update.url {
        updated.url = url.clone().filter(|u| !u.trim().is_empty());
    }
    if let Some(photo_id) = update.photo_id {
        updated.photo_id = photo_id;
    }
    if let Some(visibility) = update.visibility {
        updated.visibility = visibility;
    }
    updated
}

pub fn update_request<R: Db>(
    repo: &R,
    actor: &Actor,
    id: &Id,
    update: RequestUpdate,
    now: Timestamp,
) -> Result<UpdateOutcome> {
    let request = load_request(repo, id)?;
    authorize_on_request(repo, actor, &request, Action::View)?;
    if update
        .organization_id
        .is_some_and(|org_id| org_id != request.organization_id)
        || update
            .creator_id
            .is_some_and(|creator_id| creator_id != request.creator_id)
    {
        return Err(Error::ImmutableField);
    }
    let mut current = request.clone();
    let updated = apply_fields(&request, &update);
    let fields_updated = updated != request;
    if fields_updated {
        authorize_on_request(repo, actor, &request, Action::UpdateFields)?;
        if updated.destination.is_empty() {
            return Err(Error::Location);
        }
        if updated.photo_id != request.photo_id {
            if let Some(photo_id) = &updated.photo_id {
                repo.get_file(photo_id)?;
            }
        }
        updated.validate()?;
        current = Request {
            updated_at: now,
            ..updated
        };
        repo.update_request(&current)?;
    }

    // Repeating the current status without a new provider changes nothing
    let target = update.status.filter(|status| {
        *status != request.status
            || update
                .provider_id
                .is_some_and(|p| Some(p) != request.provider_id)
    });
    let status_change = if let Some(target) = target {
        let params = TransitionParams {
            target,
            provider_id: update.provider_id,
            expected_status: update.expected_status,
        };
        let (transitioned, change) = transition_request(repo, actor, id, params, now)?;
        current = transitioned;
        Some(change)
    } else {
        if update.provider_id.is_some_and(|p| Some(p) != request.provider_id) {
            // The provider can only be changed by a transition
            return Err(Error::IllegalTransition);
        }
        None
    };
    Ok(UpdateOutcome {
        request: current,
        fields_updated,
        status_change,
    })
}

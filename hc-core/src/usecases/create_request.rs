use super::prelude::*;
use crate::util::validate::Validate;

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewRequest {
    pub organization_id : Id,
    pub title           : String,
    pub description     : Option<String>,
    pub destination     : Option<Location>,
    pub origin          : Option<Location>,
    pub size            : RequestSize,
    pub needed_before   : Option<Date>,
    pub kilograms       : Option<f64>,
    pub url             : Option<String>,
    pub photo_id        : Option<Id>,
    pub meeting_id      : Option<Id>,
    pub visibility      : RequestVisibility,
}

pub fn create_request<R: Db>(
    repo: &R,
    actor: &Actor,
    new_request: NewRequest,
    now: Timestamp,
) -> Result<Request> {
    let NewRequest {
        organization_id,
        title,
        description,
        destination,
        origin,
        size,
        needed_before,
        kilograms,
        url,
        photo_id,
        meeting_id,
        visibility,
    } = new_request;
    if !actor.is_member_of(&organization_id) {
        log::debug!(
            "User {} is not a member of organization {}",
            actor.id(),
            organization_id
        );
        return Err(Error::Forbidden);
    }
    let destination = if let Some(meeting_id) = &meeting_id {
        let meeting = repo.get_meeting(meeting_id).map_err(|err| match err {
            RepoError::NotFound => Error::NotFound,
            err => err.into(),
        })?;
        if meeting.has_ended(now.date()) {
            return Err(Error::MeetingEnded);
        }
        meeting.location
    } else {
        destination
            .filter(|d| !d.is_empty())
            .ok_or(Error::Location)?
    };
    if let Some(photo_id) = &photo_id {
        repo.get_file(photo_id)?;
    }
    let request = Request {
        id: Id::new(),
        creator_id: actor.id(),
        organization_id,
        status: RequestStatus::Open,
        provider_id: None,
        title: title.trim().to_owned(),
        description: description.filter(|d| !d.trim().is_empty()),
        destination,
        origin: origin.filter(|o| !o.is_empty()),
        size,
        needed_before,
        kilograms,
        url: url.filter(|u| !u.trim().is_empty()),
        photo_id,
        meeting_id,
        visibility,
        completed_on: None,
        created_at: now,
        updated_at: now,
    };
    request.validate()?;
    log::debug!("Creating new request {}", request.id);
    repo.create_request(&request)?;
    Ok(request)
}

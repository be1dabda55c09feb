use super::prelude::*;
use crate::util::{token::generate_token, validate::{MeetingInvalidation, Validate}};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub name          : String,
    pub description   : Option<String>,
    pub start_date    : Date,
    pub end_date      : Date,
    pub location      : Location,
    pub image_id      : Option<Id>,
    pub more_info_url : Option<String>,
}

impl From<MeetingInvalidation> for Error {
    fn from(err: MeetingInvalidation) -> Self {
        match err {
            MeetingInvalidation::Name => Self::Name,
            MeetingInvalidation::EndDateBeforeStart => Self::EndDateBeforeStart,
            MeetingInvalidation::Url => Self::Url,
        }
    }
}

fn load_meeting<R: MeetingRepo>(repo: &R, id: &Id) -> Result<Meeting> {
    repo.get_meeting(id).map_err(|err| match err {
        RepoError::NotFound => Error::NotFound,
        err => err.into(),
    })
}

/// Creates a meeting with the actor as organizer.
pub fn create_meeting<R: Db>(
    repo: &R,
    actor: &Actor,
    new_meeting: NewMeeting,
    now: Timestamp,
) -> Result<Meeting> {
    let NewMeeting {
        name,
        description,
        start_date,
        end_date,
        location,
        image_id,
        more_info_url,
    } = new_meeting;
    if location.is_empty() {
        return Err(Error::Location);
    }
    let meeting = Meeting {
        id: Id::new(),
        name: name.trim().to_owned(),
        description,
        start_date,
        end_date,
        creator_id: actor.id(),
        location,
        image_id,
        more_info_url,
        invite_code: Some(generate_token()),
        created_at: now,
    };
    meeting.validate()?;
    repo.create_meeting(&meeting)?;
    repo.add_meeting_participant(&MeetingParticipant {
        meeting_id: meeting.id,
        user_id: actor.id(),
        is_organizer: true,
    })?;
    log::info!("Created meeting {} ({})", meeting.id, meeting.name);
    Ok(meeting)
}

pub fn get_meeting<R: Db>(repo: &R, id: &Id) -> Result<Meeting> {
    load_meeting(repo, id)
}

fn is_meeting_organizer<R: MeetingRepo>(repo: &R, meeting: &Meeting, user_id: &Id) -> Result<bool> {
    if &meeting.creator_id == user_id {
        return Ok(true);
    }
    Ok(repo
        .meeting_participants(&meeting.id)?
        .iter()
        .any(|p| &p.user_id == user_id && p.is_organizer))
}

/// Users may join a meeting by themselves while organizers may add anyone.
pub fn add_meeting_participant<R: Db>(
    repo: &R,
    actor: &Actor,
    meeting_id: &Id,
    user_id: &Id,
    is_organizer: bool,
) -> Result<()> {
    let meeting = load_meeting(repo, meeting_id)?;
    let actor_is_organizer = is_meeting_organizer(repo, &meeting, &actor.id())?;
    if !actor_is_organizer && (user_id != &actor.id() || is_organizer) {
        return Err(Error::Forbidden);
    }
    repo.get_user(user_id)?;
    repo.add_meeting_participant(&MeetingParticipant {
        meeting_id: meeting.id,
        user_id: *user_id,
        is_organizer,
    })?;
    Ok(())
}

/// Invites someone by email. Only organizers may invite.
pub fn create_meeting_invite<R: Db>(
    repo: &R,
    actor: &Actor,
    meeting_id: &Id,
    invitee_email: &str,
    now: Timestamp,
) -> Result<(Meeting, MeetingInvite)> {
    let meeting = load_meeting(repo, meeting_id)?;
    if !is_meeting_organizer(repo, &meeting, &actor.id())? {
        return Err(Error::Forbidden);
    }
    let invitee_email: EmailAddress = invitee_email.parse()?;
    let invite = MeetingInvite {
        meeting_id: meeting.id,
        inviter_id: actor.id(),
        invitee_email,
        secret_token: generate_token(),
        created_at: now,
    };
    repo.create_meeting_invite(&invite)?;
    log::debug!("Created invite for meeting {}", meeting.id);
    Ok((meeting, invite))
}

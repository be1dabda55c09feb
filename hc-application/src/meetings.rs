use super::*;
use crate::event_bus::EventBus;
use usecases::NewMeeting;

pub fn create_meeting(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    new_meeting: NewMeeting,
) -> Result<Meeting> {
    let meeting = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::create_meeting(db, actor, new_meeting.clone(), Timestamp::now())
    })?;
    log::info!("User {user_id} created meeting {}", meeting.id);
    Ok(meeting)
}

pub fn add_meeting_participant(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    meeting_id: &Id,
    participant_id: &Id,
    is_organizer: bool,
) -> Result<()> {
    write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::add_meeting_participant(db, actor, meeting_id, participant_id, is_organizer)
    })
}

/// Invites someone by email. The invitation is sent asynchronously.
pub fn invite_to_meeting(
    connections: &sqlite::Connections,
    events: &EventBus,
    deadline: Deadline,
    user_id: &Id,
    meeting_id: &Id,
    invitee_email: &str,
) -> Result<MeetingInvite> {
    let (meeting, invite) = write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::create_meeting_invite(db, actor, meeting_id, invitee_email, Timestamp::now())
    })?;
    events.publish(LifecycleEvent::MeetingInviteCreated {
        meeting,
        invite: invite.clone(),
    });
    Ok(invite)
}

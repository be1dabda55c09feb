use crate::{
    email::EmailAddress,
    id::Id,
    location::Location,
    time::{Date, Timestamp},
};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id            : Id,
    pub name          : String,
    pub description   : Option<String>,
    pub start_date    : Date,
    pub end_date      : Date,
    pub creator_id    : Id,
    pub location      : Location,
    pub image_id      : Option<Id>,
    pub more_info_url : Option<String>,
    pub invite_code   : Option<String>,
    pub created_at    : Timestamp,
}

impl Meeting {
    pub fn has_ended(&self, today: Date) -> bool {
        self.end_date < today
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingParticipant {
    pub meeting_id: Id,
    pub user_id: Id,
    pub is_organizer: bool,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingInvite {
    pub meeting_id    : Id,
    pub inviter_id    : Id,
    pub invitee_email : EmailAddress,
    pub secret_token  : String,
    pub created_at    : Timestamp,
}

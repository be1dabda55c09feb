use crate::{id::Id, time::Timestamp};

/// A conversation attached to a request.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id         : Id,
    pub request_id : Id,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadParticipant {
    pub thread_id      : Id,
    pub user_id        : Id,
    pub last_viewed_at : Option<Timestamp>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id         : Id,
    pub thread_id  : Id,
    pub sender_id  : Id,
    pub content    : String,
    pub created_at : Timestamp,
}

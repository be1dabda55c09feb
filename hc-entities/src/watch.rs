use crate::{id::Id, location::Location, request::RequestSize, time::Timestamp};

/// A saved filter. Every criterion that is set must match.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Watch {
    pub id          : Id,
    pub owner_id    : Id,
    pub name        : Option<String>,
    pub destination : Option<Location>,
    pub origin      : Option<Location>,
    pub meeting_id  : Option<Id>,
    pub search_text : Option<String>,
    pub size_floor  : Option<RequestSize>,
    pub created_at  : Timestamp,
}

impl Watch {
    pub fn has_criteria(&self) -> bool {
        self.destination.is_some()
            || self.origin.is_some()
            || self.meeting_id.is_some()
            || self.search_text.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.size_floor.is_some()
    }
}

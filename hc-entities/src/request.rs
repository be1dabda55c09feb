use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    id::Id,
    location::Location,
    time::{Date, Timestamp},
};

/// Lifecycle status of a request.
///
/// The wire names are stable and stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Accepted,
    Delivered,
    /// Legacy name of a completed request, kept on the wire.
    Received,
    Completed,
    Removed,
}

impl RequestStatus {
    /// No transitions leave a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Removed)
    }

    /// Statuses that require a provider.
    pub fn requires_provider(self) -> bool {
        matches!(
            self,
            Self::Accepted | Self::Delivered | Self::Received | Self::Completed
        )
    }

    /// Statuses that require a completion date.
    pub fn requires_completed_on(self) -> bool {
        matches!(self, Self::Received | Self::Completed)
    }

    /// Requests in these statuses are only visible to creator and provider.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Removed)
    }
}

pub type RequestSizePrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestSize {
    Tiny   = 0,
    #[default]
    Small  = 1,
    Medium = 2,
    Large  = 3,
    Xlarge = 4,
}

#[derive(Debug, Error)]
#[error("Invalid request size primitive: {0}")]
pub struct InvalidRequestSizePrimitive(RequestSizePrimitive);

impl TryFrom<RequestSizePrimitive> for RequestSize {
    type Error = InvalidRequestSizePrimitive;
    fn try_from(from: RequestSizePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidRequestSizePrimitive(from))
    }
}

impl From<RequestSize> for RequestSizePrimitive {
    fn from(from: RequestSize) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RequestVisibility {
    #[default]
    All,
    Trusted,
    SameOrganization,
    InviteOnly,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id              : Id,
    pub creator_id      : Id,
    pub organization_id : Id,
    pub status          : RequestStatus,
    pub provider_id     : Option<Id>,
    pub title           : String,
    pub description     : Option<String>,
    pub destination     : Location,
    pub origin          : Option<Location>,
    pub size            : RequestSize,
    pub needed_before   : Option<Date>,
    pub kilograms       : Option<f64>,
    pub url             : Option<String>,
    pub photo_id        : Option<Id>,
    pub meeting_id      : Option<Id>,
    pub visibility      : RequestVisibility,
    pub completed_on    : Option<Date>,
    pub created_at      : Timestamp,
    pub updated_at      : Timestamp,
}

/// One accepted status transition. Never mutated.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHistory {
    pub request_id      : Id,
    pub actor_id        : Id,
    pub old_status      : RequestStatus,
    pub new_status      : RequestStatus,
    pub old_provider_id : Option<Id>,
    pub new_provider_id : Option<Id>,
    pub created_at      : Timestamp,
}

/// A user who offered to fulfill an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialProvider {
    pub request_id: Id,
    pub user_id: Id,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn status_wire_names() {
        assert_eq!(RequestStatus::Open.as_ref(), "open");
        assert_eq!(RequestStatus::Received.as_ref(), "received");
        for status in RequestStatus::iter() {
            assert_eq!(status.as_ref().parse::<RequestStatus>().unwrap(), status);
        }
        assert!("closed".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn provider_and_completion_requirements() {
        assert!(!RequestStatus::Open.requires_provider());
        assert!(!RequestStatus::Removed.requires_provider());
        assert!(RequestStatus::Received.requires_provider());
        assert!(RequestStatus::Received.requires_completed_on());
        assert!(!RequestStatus::Delivered.requires_completed_on());
    }

    #[test]
    fn sizes_are_ordered() {
        assert!(RequestSize::Tiny < RequestSize::Small);
        assert!(RequestSize::Medium > RequestSize::Small);
        assert!(RequestSize::Xlarge > RequestSize::Large);
        assert_eq!("XLarge".parse::<RequestSize>().unwrap(), RequestSize::Xlarge);
    }

    #[test]
    fn visibility_wire_names() {
        assert_eq!(RequestVisibility::SameOrganization.as_ref(), "same_organization");
        assert_eq!(
            "invite_only".parse::<RequestVisibility>().unwrap(),
            RequestVisibility::InviteOnly
        );
    }
}

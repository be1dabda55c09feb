use super::*;
use hc_entities as e;

impl From<e::location::Location> for Location {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            description,
            country,
            state,
            county,
            city,
            borough,
            latitude,
            longitude,
        } = from;
        Self {
            description,
            country,
            state,
            county,
            city,
            borough,
            lat: latitude,
            lng: longitude,
        }
    }
}

impl From<Location> for e::location::Location {
    fn from(from: Location) -> Self {
        let Location {
            description,
            country,
            state,
            county,
            city,
            borough,
            lat,
            lng,
        } = from;
        Self {
            description,
            country,
            state,
            county,
            city,
            borough,
            latitude: lat,
            longitude: lng,
        }
    }
}

impl From<e::request::RequestStatus> for RequestStatus {
    fn from(from: e::request::RequestStatus) -> Self {
        use e::request::RequestStatus as S;
        match from {
            S::Open => Self::Open,
            S::Accepted => Self::Accepted,
            S::Delivered => Self::Delivered,
            S::Received => Self::Received,
            S::Completed => Self::Completed,
            S::Removed => Self::Removed,
        }
    }
}

impl From<RequestStatus> for e::request::RequestStatus {
    fn from(from: RequestStatus) -> Self {
        use RequestStatus as S;
        match from {
            S::Open => Self::Open,
            S::Accepted => Self::Accepted,
            S::Delivered => Self::Delivered,
            S::Received => Self::Received,
            S::Completed => Self::Completed,
            S::Removed => Self::Removed,
        }
    }
}

impl From<e::request::RequestSize> for RequestSize {
    fn from(from: e::request::RequestSize) -> Self {
        use e::request::RequestSize as S;
        match from {
            S::Tiny => Self::Tiny,
            S::Small => Self::Small,
            S::Medium => Self::Medium,
            S::Large => Self::Large,
            S::Xlarge => Self::Xlarge,
        }
    }
}

impl From<RequestSize> for e::request::RequestSize {
    fn from(from: RequestSize) -> Self {
        use RequestSize as S;
        match from {
            S::Tiny => Self::Tiny,
            S::Small => Self::Small,
            S::Medium => Self::Medium,
            S::Large => Self::Large,
            S::Xlarge => Self::Xlarge,
        }
    }
}

impl From<e::request::RequestVisibility> for RequestVisibility {
    fn from(from: e::request::RequestVisibility) -> Self {
        use e::request::RequestVisibility as V;
        match from {
            V::All => Self::All,
            V::Trusted => Self::Trusted,
            V::SameOrganization => Self::SameOrganization,
            V::InviteOnly => Self::InviteOnly,
        }
    }
}

impl From<RequestVisibility> for e::request::RequestVisibility {
    fn from(from: RequestVisibility) -> Self {
        use RequestVisibility as V;
        match from {
            V::All => Self::All,
            V::Trusted => Self::Trusted,
            V::SameOrganization => Self::SameOrganization,
            V::InviteOnly => Self::InviteOnly,
        }
    }
}

impl From<e::request::Request> for Request {
    fn from(from: e::request::Request) -> Self {
        let e::request::Request {
            id,
            creator_id,
            organization_id,
            status,
            provider_id,
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
            completed_on,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.to_string(),
            creator_id: creator_id.to_string(),
            organization_id: organization_id.to_string(),
            status: status.into(),
            provider_id: provider_id.map(|id| id.to_string()),
            title,
            description,
            destination: destination.into(),
            origin: origin.map(Into::into),
            size: size.into(),
            needed_before: needed_before.map(e::time::format_date),
            kilograms,
            url,
            photo_id: photo_id.map(|id| id.to_string()),
            meeting_id: meeting_id.map(|id| id.to_string()),
            visibility: visibility.into(),
            completed_on: completed_on.map(e::time::format_date),
            created_at: created_at.as_millis(),
            updated_at: updated_at.as_millis(),
        }
    }
}

impl From<e::request::RequestHistory> for RequestHistory {
    fn from(from: e::request::RequestHistory) -> Self {
        let e::request::RequestHistory {
            request_id: _,
            actor_id,
            old_status,
            new_status,
            old_provider_id,
            new_provider_id,
            created_at,
        } = from;
        Self {
            actor_id: actor_id.to_string(),
            old_status: old_status.into(),
            new_status: new_status.into(),
            old_provider_id: old_provider_id.map(|id| id.to_string()),
            new_provider_id: new_provider_id.map(|id| id.to_string()),
            created_at: created_at.as_millis(),
        }
    }
}

impl From<e::message::Message> for Message {
    fn from(from: e::message::Message) -> Self {
        let e::message::Message {
            id,
            thread_id,
            sender_id,
            content,
            created_at,
        } = from;
        Self {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            sender_id: sender_id.to_string(),
            content,
            created_at: created_at.as_millis(),
        }
    }
}

impl From<e::watch::Watch> for Watch {
    fn from(from: e::watch::Watch) -> Self {
        let e::watch::Watch {
            id,
            owner_id: _,
            name,
            destination,
            origin,
            meeting_id,
            search_text,
            size_floor,
            created_at,
        } = from;
        Self {
            id: id.to_string(),
            name,
            destination: destination.map(Into::into),
            origin: origin.map(Into::into),
            meeting_id: meeting_id.map(|id| id.to_string()),
            search_text,
            size_floor: size_floor.map(Into::into),
            created_at: created_at.as_millis(),
        }
    }
}

impl From<e::file::File> for UploadedFile {
    fn from(from: e::file::File) -> Self {
        let e::file::File {
            id,
            name,
            size,
            content_type,
            url,
            url_expires_at: _,
            created_at: _,
        } = from;
        Self {
            id: id.to_string(),
            filename: name,
            url,
            content_type,
            size,
        }
    }
}

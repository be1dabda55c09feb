pub use hc_boundary::*;

use crate::core::{entities as e, usecases};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Id(#[from] e::IdParseError),
    #[error("Invalid date: {0}")]
    Date(#[from] time::error::Parse),
}

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case parameters both are outside this crate.

    pub fn id(s: &str) -> Result<e::Id, ParseError> {
        Ok(s.parse()?)
    }

    fn opt_id(s: Option<String>) -> Result<Option<e::Id>, ParseError> {
        s.as_deref().map(id).transpose()
    }

    fn opt_date(s: Option<String>) -> Result<Option<e::Date>, ParseError> {
        Ok(s.as_deref().map(e::parse_date).transpose()?)
    }

    pub fn try_new_request(from: NewRequest) -> Result<usecases::NewRequest, ParseError> {
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
        } = from;
        Ok(usecases::NewRequest {
            organization_id: id(&organization_id)?,
            title,
            description,
            destination: destination.map(Into::into),
            origin: origin.map(Into::into),
            size: size.map(Into::into).unwrap_or_default(),
            needed_before: opt_date(needed_before)?,
            kilograms,
            url,
            photo_id: opt_id(photo_id)?,
            meeting_id: opt_id(meeting_id)?,
            visibility: visibility.map(Into::into).unwrap_or_default(),
        })
    }

    pub fn try_request_update(from: RequestUpdate) -> Result<usecases::RequestUpdate, ParseError> {
        let RequestUpdate {
            title,
            description,
            destination,
            origin,
            size,
            needed_before,
            kilograms,
            url,
            photo_id,
            visibility,
            organization_id,
            creator_id,
            status,
            provider_id,
            expected_status,
        } = from;
        Ok(usecases::RequestUpdate {
            title,
            description,
            destination: destination.map(Into::into),
            origin: origin.map(|o| o.map(Into::into)),
            size: size.map(Into::into),
            needed_before: needed_before.map(opt_date).transpose()?,
            kilograms,
            url,
            photo_id: photo_id.map(opt_id).transpose()?,
            visibility: visibility.map(Into::into),
            organization_id: opt_id(organization_id)?,
            creator_id: opt_id(creator_id)?,
            status: status.map(Into::into),
            provider_id: opt_id(provider_id)?,
            expected_status: expected_status.map(Into::into),
        })
    }

    pub fn try_transition(from: StatusUpdate) -> Result<usecases::TransitionParams, ParseError> {
        let StatusUpdate {
            status,
            provider_id,
            expected_status,
        } = from;
        Ok(usecases::TransitionParams {
            target: status.into(),
            provider_id: opt_id(provider_id)?,
            expected_status: expected_status.map(Into::into),
        })
    }

    /// `None` if neither a thread nor a request is given.
    pub fn try_new_message(from: NewMessage) -> Result<Option<usecases::NewMessage>, ParseError> {
        let NewMessage {
            thread_id,
            request_id,
            content,
        } = from;
        let target = match (thread_id, request_id) {
            (Some(thread_id), _) => usecases::MessageTarget::Thread(id(&thread_id)?),
            (None, Some(request_id)) => usecases::MessageTarget::Request(id(&request_id)?),
            (None, None) => return Ok(None),
        };
        Ok(Some(usecases::NewMessage { target, content }))
    }

    pub fn try_new_watch(from: NewWatch) -> Result<usecases::NewWatch, ParseError> {
        let NewWatch {
            name,
            destination,
            origin,
            meeting_id,
            search_text,
            size_floor,
        } = from;
        Ok(usecases::NewWatch {
            name,
            destination: destination.map(Into::into),
            origin: origin.map(Into::into),
            meeting_id: opt_id(meeting_id)?,
            search_text,
            size_floor: size_floor.map(Into::into),
        })
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    pub fn thread(from: usecases::ThreadSummary) -> Thread {
        let usecases::ThreadSummary {
            thread,
            participant_ids,
            unread,
            last_message,
        } = from;
        Thread {
            id: thread.id.to_string(),
            request_id: thread.request_id.to_string(),
            participant_ids: participant_ids.iter().map(ToString::to_string).collect(),
            unread,
            last_message: last_message.map(Into::into),
            updated_at: thread.updated_at.as_millis(),
        }
    }
}

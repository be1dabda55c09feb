use std::collections::HashSet;

use super::*;
use crate::visibility_cache::{self, VisibilityCache};

#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub meeting_id: Option<Id>,
    pub status: Option<RequestStatus>,
    /// Case-insensitive substring of title or description
    pub text: Option<String>,
}

impl RequestFilter {
    fn matches(&self, request: &Request) -> bool {
        if self.meeting_id.is_some() && request.meeting_id != self.meeting_id {
            return false;
        }
        if self.status.is_some_and(|status| status != request.status) {
            return false;
        }
        let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let text = text.to_lowercase();
        request.title.to_lowercase().contains(&text)
            || request
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&text))
    }
}

/// All requests the user may see, newest first.
///
/// The cached slices only preselect candidates. Requests of the
/// user and invite-only requests are never cached and always
/// loaded from the database.
pub fn list_visible_requests(
    connections: &sqlite::Connections,
    cache: &VisibilityCache,
    deadline: Deadline,
    user_id: &Id,
    filter: &RequestFilter,
) -> Result<Vec<Request>> {
    deadline.check()?;
    let orgs = connections.shared()?.transaction(|db| {
        let org_ids: Vec<_> = db
            .memberships_of_user(user_id)?
            .into_iter()
            .map(|m| m.organization_id)
            .collect();
        Ok::<_, usecases::Error>(db.get_orgs(&org_ids)?)
    })?;
    let cached_ids: Vec<_> = visibility_cache::cached_request_ids(connections, cache, &orgs)?
        .into_iter()
        .collect();
    let mut requests = read_as_user(connections, deadline, user_id, |db, actor| {
        let mut seen = HashSet::new();
        let candidates: Vec<_> = db
            .get_requests(&cached_ids)?
            .into_iter()
            .chain(db.requests_of_user(&actor.id())?)
            .chain(db.active_invite_only_requests()?)
            .filter(|r| seen.insert(r.id))
            .filter(|r| filter.matches(r))
            .collect();
        usecases::filter_visible(db, actor, candidates)
    })?;
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(requests)
}

pub fn get_request(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
) -> Result<Request> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::get_request(db, actor, id)
    })
}

pub fn request_history(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    id: &Id,
) -> Result<Vec<RequestHistory>> {
    read_as_user(connections, deadline, user_id, |db, actor| {
        usecases::request_history(db, actor, id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_entities::builders::*;

    #[test]
    fn filter_by_text_and_status() {
        let request = Request::build()
            .title("Swiss Chocolate")
            .description("Dark, 70%")
            .finish();
        let by_title = RequestFilter {
            text: Some("chocolate".into()),
            ..Default::default()
        };
        assert!(by_title.matches(&request));
        let by_description = RequestFilter {
            text: Some(" DARK ".into()),
            ..Default::default()
        };
        assert!(by_description.matches(&request));
        let by_status = RequestFilter {
            status: Some(RequestStatus::Accepted),
            ..Default::default()
        };
        assert!(!by_status.matches(&request));
        let by_meeting = RequestFilter {
            meeting_id: Some(Id::new()),
            ..Default::default()
        };
        assert!(!by_meeting.matches(&request));
        assert!(RequestFilter::default().matches(&request));
    }
}

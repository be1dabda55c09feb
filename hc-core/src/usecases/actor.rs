use std::collections::HashSet;

use super::prelude::*;
use crate::authorization::{self, Denial, InviteOnlyAudience};

/// Loads the user with memberships and the organizations that trust them.
pub fn load_actor<R>(repo: &R, user_id: &Id) -> Result<Actor>
where
    R: UserRepo + MembershipRepo + OrganizationRepo,
{
    let user = repo.get_user(user_id)?;
    let memberships = repo.memberships_of_user(user_id)?;
    let mut trusted_org_ids = HashSet::new();
    for membership in &memberships {
        trusted_org_ids.insert(membership.organization_id);
        trusted_org_ids.extend(repo.trusted_org_ids(&membership.organization_id)?);
    }
    Ok(Actor {
        user,
        memberships,
        trusted_org_ids,
    })
}

/// The organization itself and all organizations it trusts.
pub fn trust_circle<R: OrganizationRepo>(repo: &R, org_id: &Id) -> Result<HashSet<Id>> {
    let mut org_ids: HashSet<_> = repo.trusted_org_ids(org_id)?.into_iter().collect();
    org_ids.insert(*org_id);
    Ok(org_ids)
}

pub fn load_invite_only_audience<R>(repo: &R, request: &Request) -> Result<InviteOnlyAudience>
where
    R: PotentialProviderRepo + MeetingRepo + UserRepo,
{
    let potential_provider_ids = repo
        .potential_providers(&request.id)?
        .into_iter()
        .map(|pp| pp.user_id)
        .collect();
    let mut meeting_invitee_ids = HashSet::new();
    if let Some(meeting_id) = &request.meeting_id {
        meeting_invitee_ids.extend(
            repo.meeting_participants(meeting_id)?
                .into_iter()
                .map(|p| p.user_id),
        );
        for invite in repo.meeting_invites(meeting_id)? {
            if let Some(user) = repo.try_get_user_by_email(invite.invitee_email.as_str())? {
                meeting_invitee_ids.insert(user.id);
            }
        }
    }
    Ok(InviteOnlyAudience {
        potential_provider_ids,
        meeting_invitee_ids,
    })
}

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::NotAuthenticated => Self::Unauthorized,
            Denial::NotFound => Self::NotFound,
            Denial::Forbidden => Self::Forbidden,
        }
    }
}

pub fn authorize_on_request<R>(
    repo: &R,
    actor: &Actor,
    request: &Request,
    action: Action,
) -> Result<()>
where
    R: PotentialProviderRepo + MeetingRepo + UserRepo,
{
    let audience = if authorization::needs_invite_only_audience(actor, request)
        && !actor.overrides(request)
    {
        Some(load_invite_only_audience(repo, request)?)
    } else {
        None
    };
    authorization::authorize(Some(actor), request, audience.as_ref(), action)?;
    Ok(())
}

/// Keeps only the requests that are visible for the actor.
///
/// Admin overrides do not apply here.
pub fn filter_visible<R>(repo: &R, actor: &Actor, requests: Vec<Request>) -> Result<Vec<Request>>
where
    R: PotentialProviderRepo + MeetingRepo + UserRepo,
{
    let mut visible = Vec::with_capacity(requests.len());
    for request in requests {
        let audience = if authorization::needs_invite_only_audience(actor, &request) {
            Some(load_invite_only_audience(repo, &request)?)
        } else {
            None
        };
        if authorization::is_visible(actor, &request, audience.as_ref()) {
            visible.push(request);
        }
    }
    Ok(visible)
}

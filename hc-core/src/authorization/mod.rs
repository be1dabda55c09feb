//! Decides whether an actor may perform an action on a request.

use std::collections::HashSet;

use crate::entities::*;

#[cfg(test)]
mod tests;

/// An authenticated user together with everything needed
/// to resolve visibility rules.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: User,
    pub memberships: Vec<UserOrganization>,
    /// Organizations the user belongs to plus all organizations
    /// that trust one of them.
    pub trusted_org_ids: HashSet<Id>,
}

impl Actor {
    pub fn id(&self) -> Id {
        self.user.id
    }

    pub fn is_member_of(&self, org_id: &Id) -> bool {
        self.memberships.iter().any(|m| &m.organization_id == org_id)
    }

    pub fn is_org_admin_of(&self, org_id: &Id) -> bool {
        self.memberships
            .iter()
            .any(|m| &m.organization_id == org_id && m.role == OrgRole::Admin)
    }

    pub fn org_ids(&self) -> impl Iterator<Item = &Id> {
        self.memberships.iter().map(|m| &m.organization_id)
    }

    /// Admins that may act on the request as if they created it.
    pub fn overrides(&self, request: &Request) -> bool {
        self.user.admin_role.overrides_requests() || self.is_org_admin_of(&request.organization_id)
    }
}

/// Users that may see an invite-only request besides creator and provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteOnlyAudience {
    pub potential_provider_ids: HashSet<Id>,
    pub meeting_invitee_ids: HashSet<Id>,
}

impl InviteOnlyAudience {
    pub fn contains(&self, user_id: &Id) -> bool {
        self.potential_provider_ids.contains(user_id) || self.meeting_invitee_ids.contains(user_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    UpdateFields,
    Transition(RequestStatus),
    Offer,
    WithdrawOffer,
    RejectOffer,
    AddMessage,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
}

/// Whether the request is visible for the actor without any admin overrides.
///
/// The same predicate decides which requests appear in lists.
pub fn is_visible(
    actor: &Actor,
    request: &Request,
    invite_only_audience: Option<&InviteOnlyAudience>,
) -> bool {
    let user_id = actor.id();
    if request.creator_id == user_id {
        return true;
    }
    let is_provider = request.provider_id == Some(user_id);
    if request.status.is_closed() {
        return is_provider;
    }
    match request.visibility {
        RequestVisibility::All => true,
        RequestVisibility::Trusted => actor.trusted_org_ids.contains(&request.organization_id),
        RequestVisibility::SameOrganization => actor.is_member_of(&request.organization_id),
        RequestVisibility::InviteOnly => {
            is_provider || invite_only_audience.is_some_and(|a| a.contains(&user_id))
        }
    }
}

/// Whether an invite-only audience is needed to decide visibility.
pub fn needs_invite_only_audience(actor: &Actor, request: &Request) -> bool {
    request.visibility == RequestVisibility::InviteOnly
        && !request.status.is_closed()
        && request.creator_id != actor.id()
        && request.provider_id != Some(actor.id())
}

pub fn can_view(
    actor: &Actor,
    request: &Request,
    invite_only_audience: Option<&InviteOnlyAudience>,
) -> bool {
    actor.overrides(request) || is_visible(actor, request, invite_only_audience)
}

/// Decides about request-level permissions.
///
/// Status specific rules of transitions and offers are checked by
/// the status machine and the offer use cases afterwards.
pub fn authorize(
    actor: Option<&Actor>,
    request: &Request,
    invite_only_audience: Option<&InviteOnlyAudience>,
    action: Action,
) -> Result<(), Denial> {
    let Some(actor) = actor else {
        return Err(Denial::NotAuthenticated);
    };
    if !can_view(actor, request, invite_only_audience) {
        return Err(Denial::NotFound);
    }
    let is_creator = request.creator_id == actor.id();
    let overrides = actor.overrides(request);
    let permitted = match action {
        Action::View => true,
        Action::UpdateFields => {
            (is_creator || overrides)
                && matches!(
                    request.status,
                    RequestStatus::Open | RequestStatus::Accepted
                )
        }
        Action::Transition(RequestStatus::Removed) | Action::Delete => is_creator,
        Action::Transition(_) => {
            is_creator || overrides || request.provider_id == Some(actor.id())
        }
        Action::Offer | Action::WithdrawOffer => !is_creator,
        Action::RejectOffer => is_creator || overrides,
        Action::AddMessage => true,
    };
    if !permitted {
        return Err(Denial::Forbidden);
    }
    Ok(())
}

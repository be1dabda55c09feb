use super::*;
use hc_entities::builders::*;

fn actor_in(orgs: &[Id], trusted: &[Id]) -> Actor {
    let user = User::build().finish();
    let memberships = orgs
        .iter()
        .map(|org_id| UserOrganization {
            user_id: user.id,
            organization_id: *org_id,
            auth_id: None,
            auth_email: None,
            role: OrgRole::User,
        })
        .collect();
    Actor {
        user,
        memberships,
        trusted_org_ids: orgs.iter().chain(trusted).copied().collect(),
    }
}

#[test]
fn creator_always_sees_own_request() {
    let actor = actor_in(&[], &[]);
    for status in [RequestStatus::Open, RequestStatus::Removed] {
        let request = Request::build()
            .creator(actor.id())
            .status(status)
            .visibility(RequestVisibility::InviteOnly)
            .finish();
        assert!(is_visible(&actor, &request, None));
    }
}

#[test]
fn public_requests_are_visible_for_everyone() {
    let actor = actor_in(&[], &[]);
    let request = Request::build().visibility(RequestVisibility::All).finish();
    assert!(is_visible(&actor, &request, None));
}

#[test]
fn closed_requests_are_only_visible_for_creator_and_provider() {
    let actor = actor_in(&[], &[]);
    let request = Request::build()
        .status(RequestStatus::Completed)
        .provider(Some(Id::new()))
        .finish();
    assert!(!is_visible(&actor, &request, None));
    let request = Request::build()
        .status(RequestStatus::Completed)
        .provider(Some(actor.id()))
        .finish();
    assert!(is_visible(&actor, &request, None));
    let request = Request::build().status(RequestStatus::Removed).finish();
    assert!(!is_visible(&actor, &request, None));
}

#[test]
fn trusted_requests() {
    let own_org = Id::new();
    let trusted_org = Id::new();
    let other_org = Id::new();
    let actor = actor_in(&[own_org], &[trusted_org]);
    let request = |org| {
        Request::build()
            .organization(org)
            .visibility(RequestVisibility::Trusted)
            .finish()
    };
    assert!(is_visible(&actor, &request(own_org), None));
    assert!(is_visible(&actor, &request(trusted_org), None));
    assert!(!is_visible(&actor, &request(other_org), None));
}

#[test]
fn same_organization_requests() {
    let own_org = Id::new();
    let trusted_org = Id::new();
    let actor = actor_in(&[own_org], &[trusted_org]);
    let request = |org| {
        Request::build()
            .organization(org)
            .visibility(RequestVisibility::SameOrganization)
            .finish()
    };
    assert!(is_visible(&actor, &request(own_org), None));
    assert!(!is_visible(&actor, &request(trusted_org), None));
    let outsider = actor_in(&[], &[]);
    assert!(!is_visible(&outsider, &request(own_org), None));
}

#[test]
fn invite_only_requests() {
    let actor = actor_in(&[], &[]);
    let request = Request::build()
        .visibility(RequestVisibility::InviteOnly)
        .finish();
    assert!(needs_invite_only_audience(&actor, &request));
    assert!(!is_visible(&actor, &request, None));
    assert!(!is_visible(
        &actor,
        &request,
        Some(&InviteOnlyAudience::default())
    ));

    let mut audience = InviteOnlyAudience::default();
    audience.potential_provider_ids.insert(actor.id());
    assert!(is_visible(&actor, &request, Some(&audience)));

    let mut audience = InviteOnlyAudience::default();
    audience.meeting_invitee_ids.insert(actor.id());
    assert!(is_visible(&actor, &request, Some(&audience)));

    let request = Request::build()
        .visibility(RequestVisibility::InviteOnly)
        .status(RequestStatus::Accepted)
        .provider(Some(actor.id()))
        .finish();
    assert!(!needs_invite_only_audience(&actor, &request));
    assert!(is_visible(&actor, &request, None));
}

#[test]
fn hidden_requests_are_not_found() {
    let actor = actor_in(&[], &[]);
    let request = Request::build()
        .visibility(RequestVisibility::SameOrganization)
        .finish();
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::View),
        Err(Denial::NotFound)
    );
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::UpdateFields),
        Err(Denial::NotFound)
    );
    assert_eq!(
        authorize(None, &request, None, Action::View),
        Err(Denial::NotAuthenticated)
    );
}

#[test]
fn visible_but_not_editable_is_forbidden() {
    let actor = actor_in(&[], &[]);
    let request = Request::build().finish();
    assert!(authorize(Some(&actor), &request, None, Action::View).is_ok());
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::UpdateFields),
        Err(Denial::Forbidden)
    );
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::Delete),
        Err(Denial::Forbidden)
    );
    assert!(authorize(Some(&actor), &request, None, Action::Offer).is_ok());
    assert!(authorize(Some(&actor), &request, None, Action::AddMessage).is_ok());
}

#[test]
fn creator_may_only_edit_open_or_accepted_requests() {
    let actor = actor_in(&[], &[]);
    for (status, permitted) in [
        (RequestStatus::Open, true),
        (RequestStatus::Accepted, true),
        (RequestStatus::Delivered, false),
        (RequestStatus::Completed, false),
    ] {
        let request = Request::build()
            .creator(actor.id())
            .status(status)
            .finish();
        assert_eq!(
            authorize(Some(&actor), &request, None, Action::UpdateFields).is_ok(),
            permitted
        );
    }
}

#[test]
fn creator_cannot_offer() {
    let actor = actor_in(&[], &[]);
    let request = Request::build().creator(actor.id()).finish();
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::Offer),
        Err(Denial::Forbidden)
    );
}

#[test]
fn admins_override_everything_but_destructive_actions() {
    let mut actor = actor_in(&[], &[]);
    actor.user.admin_role = AdminRole::SalesAdmin;
    let request = Request::build()
        .visibility(RequestVisibility::InviteOnly)
        .finish();
    assert!(authorize(Some(&actor), &request, None, Action::View).is_ok());
    assert!(authorize(Some(&actor), &request, None, Action::UpdateFields).is_ok());
    assert!(authorize(
        Some(&actor),
        &request,
        None,
        Action::Transition(RequestStatus::Accepted)
    )
    .is_ok());
    assert_eq!(
        authorize(
            Some(&actor),
            &request,
            None,
            Action::Transition(RequestStatus::Removed)
        ),
        Err(Denial::Forbidden)
    );
    assert_eq!(
        authorize(Some(&actor), &request, None, Action::Delete),
        Err(Denial::Forbidden)
    );
}

#[test]
fn org_admins_override_within_their_organization() {
    let org = Id::new();
    let mut actor = actor_in(&[org], &[]);
    actor.memberships[0].role = OrgRole::Admin;
    let own = Request::build()
        .organization(org)
        .visibility(RequestVisibility::InviteOnly)
        .finish();
    let foreign = Request::build()
        .visibility(RequestVisibility::InviteOnly)
        .finish();
    assert!(authorize(Some(&actor), &own, None, Action::UpdateFields).is_ok());
    assert_eq!(
        authorize(Some(&actor), &foreign, None, Action::View),
        Err(Denial::NotFound)
    );
}

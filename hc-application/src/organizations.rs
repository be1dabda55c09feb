use super::*;
use crate::visibility_cache::VisibilityCache;
use usecases::NewOrganization;

pub fn create_organization(
    connections: &sqlite::Connections,
    new_org: NewOrganization,
) -> Result<Organization> {
    write(connections, Deadline::none(), |db| {
        usecases::create_organization(db, new_org.clone())
    })
}

pub fn add_organization_domain(
    connections: &sqlite::Connections,
    org_id: &Id,
    domain: &str,
) -> Result<()> {
    write(connections, Deadline::none(), |db| {
        usecases::add_organization_domain(db, org_id, domain)
    })
}

pub fn add_member(
    connections: &sqlite::Connections,
    user_id: &Id,
    org_id: &Id,
    role: OrgRole,
) -> Result<UserOrganization> {
    write(connections, Deadline::none(), |db| {
        let auth_email = db.get_user(user_id)?.email.into_string();
        usecases::add_member(db, user_id, org_id, role, Some(auth_email))
    })
}

pub fn remove_member(connections: &sqlite::Connections, user_id: &Id, org_id: &Id) -> Result<()> {
    write(connections, Deadline::none(), |db| {
        usecases::remove_member(db, user_id, org_id)
    })
}

/// Creates a mutual trust and drops the cached private slices of both.
pub fn create_trust(
    connections: &sqlite::Connections,
    cache: &VisibilityCache,
    org_id: &Id,
    other_org_id: &Id,
) -> Result<()> {
    let orgs = write(connections, Deadline::none(), |db| {
        usecases::create_trust(db, org_id, other_org_id)?;
        Ok(db.get_orgs(&[*org_id, *other_org_id])?)
    })?;
    if let Err(err) = cache.invalidate_trust(&orgs) {
        log::warn!("Failed to invalidate cached visibility after creating trust: {err}");
    }
    Ok(())
}

pub fn remove_trust(
    connections: &sqlite::Connections,
    cache: &VisibilityCache,
    org_id: &Id,
    other_org_id: &Id,
) -> Result<()> {
    let orgs = write(connections, Deadline::none(), |db| {
        usecases::remove_trust(db, org_id, other_org_id)?;
        Ok(db.get_orgs(&[*org_id, *other_org_id])?)
    })?;
    if let Err(err) = cache.invalidate_trust(&orgs) {
        log::warn!("Failed to invalidate cached visibility after removing trust: {err}");
    }
    Ok(())
}

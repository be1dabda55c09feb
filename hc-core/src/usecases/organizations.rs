use super::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct NewOrganization {
    pub name: String,
    pub url: Option<String>,
    pub auth_type: AuthType,
    pub auth_config: Option<String>,
    pub domains: Vec<String>,
}

pub fn create_organization<R: Db>(repo: &R, new_org: NewOrganization) -> Result<Organization> {
    let NewOrganization {
        name,
        url,
        auth_type,
        auth_config,
        domains,
    } = new_org;
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(Error::Name);
    }
    if repo
        .all_orgs()?
        .iter()
        .any(|org| org.name.eq_ignore_ascii_case(&name))
    {
        return Err(Error::OrganizationExists);
    }
    let org = Organization {
        id: Id::new(),
        name,
        url,
        auth_type,
        auth_config,
    };
    repo.create_org(&org)?;
    for domain in domains {
        add_organization_domain(repo, &org.id, &domain)?;
    }
    log::info!("Created organization {} ({})", org.name, org.id);
    Ok(org)
}

pub fn add_organization_domain<R: Db>(repo: &R, org_id: &Id, domain: &str) -> Result<()> {
    let domain = domain.trim().trim_start_matches('@').to_lowercase();
    if domain.is_empty() || !domain.contains('.') {
        return Err(Error::Name);
    }
    repo.get_org(org_id)?;
    repo.add_org_domain(&OrganizationDomain {
        organization_id: *org_id,
        domain,
    })?;
    Ok(())
}

pub fn add_member<R: Db>(
    repo: &R,
    user_id: &Id,
    org_id: &Id,
    role: OrgRole,
    auth_email: Option<String>,
) -> Result<UserOrganization> {
    repo.get_user(user_id)?;
    repo.get_org(org_id)?;
    let membership = UserOrganization {
        user_id: *user_id,
        organization_id: *org_id,
        auth_id: None,
        auth_email,
        role,
    };
    repo.add_membership(&membership)?;
    Ok(membership)
}

pub fn remove_member<R: Db>(repo: &R, user_id: &Id, org_id: &Id) -> Result<()> {
    if repo.remove_membership(user_id, org_id)? == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

/// Creates a trust between two organizations in both directions.
pub fn create_trust<R: Db>(repo: &R, org_id: &Id, other_org_id: &Id) -> Result<()> {
    if org_id == other_org_id {
        return Err(Error::Forbidden);
    }
    repo.get_org(org_id)?;
    repo.get_org(other_org_id)?;
    let trust = OrganizationTrust {
        organization_id: *org_id,
        trusted_organization_id: *other_org_id,
    };
    repo.create_trust(&trust)?;
    repo.create_trust(&trust.reversed())?;
    log::info!("Organizations {} and {} trust each other", org_id, other_org_id);
    Ok(())
}

/// Removes a trust in both directions.
pub fn remove_trust<R: Db>(repo: &R, org_id: &Id, other_org_id: &Id) -> Result<()> {
    let trust = OrganizationTrust {
        organization_id: *org_id,
        trusted_organization_id: *other_org_id,
    };
    let removed = repo.delete_trust(&trust)? + repo.delete_trust(&trust.reversed())?;
    if removed == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

use super::*;

impl<'a> OrganizationRepo for DbConnection<'a> {
    fn create_org(&self, org: &Organization) -> Result<()> {
        create_org(&mut self.conn.borrow_mut(), org)
    }
    fn get_org(&self, id: &Id) -> Result<Organization> {
        get_org(&mut self.conn.borrow_mut(), id)
    }
    fn get_orgs(&self, ids: &[Id]) -> Result<Vec<Organization>> {
        get_orgs(&mut self.conn.borrow_mut(), ids)
    }
    fn all_orgs(&self) -> Result<Vec<Organization>> {
        all_orgs(&mut self.conn.borrow_mut())
    }

    fn add_org_domain(&self, domain: &OrganizationDomain) -> Result<()> {
        add_org_domain(&mut self.conn.borrow_mut(), domain)
    }
    fn find_orgs_by_domain(&self, domain: &str) -> Result<Vec<Organization>> {
        find_orgs_by_domain(&mut self.conn.borrow_mut(), domain)
    }

    fn create_trust(&self, trust: &OrganizationTrust) -> Result<()> {
        create_trust(&mut self.conn.borrow_mut(), trust)
    }
    fn delete_trust(&self, trust: &OrganizationTrust) -> Result<usize> {
        delete_trust(&mut self.conn.borrow_mut(), trust)
    }
    fn trusted_org_ids(&self, org_id: &Id) -> Result<Vec<Id>> {
        trusted_org_ids(&mut self.conn.borrow_mut(), org_id)
    }
}

impl TryFrom<models::OrganizationEntity> for Organization {
    type Error = repo::Error;
    fn try_from(from: models::OrganizationEntity) -> Result<Self> {
        let models::OrganizationEntity {
            id,
            name,
            url,
            auth_type,
            auth_config,
        } = from;
        Ok(Self {
            id: load_id(&id)?,
            name,
            url,
            auth_type: load_named(&auth_type)?,
            auth_config,
        })
    }
}

fn load_orgs(entities: Vec<models::OrganizationEntity>) -> Result<Vec<Organization>> {
    entities.into_iter().map(TryInto::try_into).collect()
}

fn create_org(conn: &mut SqliteConnection, org: &Organization) -> Result<()> {
    let Organization {
        id,
        name,
        url,
        auth_type,
        auth_config,
    } = org;
    let new_org = models::NewOrganization {
        id: id.to_string(),
        name,
        url: url.as_deref(),
        auth_type: auth_type.as_ref(),
        auth_config: auth_config.as_deref(),
    };
    diesel::insert_into(schema::organizations::table)
        .values(new_org)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_org(conn: &mut SqliteConnection, id: &Id) -> Result<Organization> {
    use schema::organizations::dsl;
    dsl::organizations
        .filter(dsl::id.eq(id.to_string()))
        .select(models::OrganizationEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn get_orgs(conn: &mut SqliteConnection, ids: &[Id]) -> Result<Vec<Organization>> {
    use schema::organizations::dsl;
    load_orgs(
        dsl::organizations
            .filter(dsl::id.eq_any(ids_to_strings(ids)))
            .select(models::OrganizationEntity::as_select())
            .load(conn)
            .map_err(from_diesel_err)?,
    )
}

fn all_orgs(conn: &mut SqliteConnection) -> Result<Vec<Organization>> {
    use schema::organizations::dsl;
    load_orgs(
        dsl::organizations
            .select(models::OrganizationEntity::as_select())
            .order_by(dsl::name)
            .load(conn)
            .map_err(from_diesel_err)?,
    )
}

fn add_org_domain(conn: &mut SqliteConnection, domain: &OrganizationDomain) -> Result<()> {
    let new_domain = models::NewOrganizationDomain {
        organization_id: domain.organization_id.to_string(),
        domain: &domain.domain,
    };
    diesel::insert_into(schema::organization_domains::table)
        .values(new_domain)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn find_orgs_by_domain(conn: &mut SqliteConnection, domain: &str) -> Result<Vec<Organization>> {
    use schema::{organization_domains as d, organizations as o};
    load_orgs(
        o::table
            .inner_join(d::table.on(d::organization_id.eq(o::id)))
            .filter(d::domain.eq(domain.to_lowercase()))
            .select(models::OrganizationEntity::as_select())
            .load(conn)
            .map_err(from_diesel_err)?,
    )
}

fn create_trust(conn: &mut SqliteConnection, trust: &OrganizationTrust) -> Result<()> {
    let new_trust = models::NewOrganizationTrust {
        organization_id: trust.organization_id.to_string(),
        trusted_organization_id: trust.trusted_organization_id.to_string(),
    };
    diesel::insert_into(schema::organization_trusts::table)
        .values(new_trust)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_trust(conn: &mut SqliteConnection, trust: &OrganizationTrust) -> Result<usize> {
    use schema::organization_trusts::dsl;
    diesel::delete(
        dsl::organization_trusts
            .filter(dsl::organization_id.eq(trust.organization_id.to_string()))
            .filter(dsl::trusted_organization_id.eq(trust.trusted_organization_id.to_string())),
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

fn trusted_org_ids(conn: &mut SqliteConnection, org_id: &Id) -> Result<Vec<Id>> {
    use schema::organization_trusts::dsl;
    dsl::organization_trusts
        .select(dsl::trusted_organization_id)
        .filter(dsl::organization_id.eq(org_id.to_string()))
        .load::<String>(conn)
        .map_err(from_diesel_err)?
        .iter()
        .map(|id| load_id(id))
        .collect()
}

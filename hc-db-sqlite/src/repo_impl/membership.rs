use super::*;

impl<'a> MembershipRepo for DbConnection<'a> {
    fn add_membership(&self, membership: &UserOrganization) -> Result<()> {
        add_membership(&mut self.conn.borrow_mut(), membership)
    }
    fn remove_membership(&self, user_id: &Id, org_id: &Id) -> Result<usize> {
        remove_membership(&mut self.conn.borrow_mut(), user_id, org_id)
    }
    fn memberships_of_user(&self, user_id: &Id) -> Result<Vec<UserOrganization>> {
        memberships_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn memberships_of_orgs(&self, org_ids: &[Id]) -> Result<Vec<UserOrganization>> {
        memberships_of_orgs(&mut self.conn.borrow_mut(), org_ids)
    }
}

impl TryFrom<models::UserOrganizationEntity> for UserOrganization {
    type Error = repo::Error;
    fn try_from(from: models::UserOrganizationEntity) -> Result<Self> {
        let models::UserOrganizationEntity {
            user_id,
            organization_id,
            auth_id,
            auth_email,
            role,
        } = from;
        Ok(Self {
            user_id: load_id(&user_id)?,
            organization_id: load_id(&organization_id)?,
            auth_id,
            auth_email,
            role: load_primitive(role)?,
        })
    }
}

fn add_membership(conn: &mut SqliteConnection, membership: &UserOrganization) -> Result<()> {
    let UserOrganization {
        user_id,
        organization_id,
        auth_id,
        auth_email,
        role,
    } = membership;
    let new_membership = models::NewUserOrganization {
        user_id: user_id.to_string(),
        organization_id: organization_id.to_string(),
        auth_id: auth_id.as_deref(),
        auth_email: auth_email.as_deref(),
        role: (*role).into(),
    };
    diesel::insert_into(schema::user_organizations::table)
        .values(new_membership)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn remove_membership(conn: &mut SqliteConnection, user_id: &Id, org_id: &Id) -> Result<usize> {
    use schema::user_organizations::dsl;
    diesel::delete(
        dsl::user_organizations
            .filter(dsl::user_id.eq(user_id.to_string()))
            .filter(dsl::organization_id.eq(org_id.to_string())),
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

fn memberships_of_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<Vec<UserOrganization>> {
    use schema::user_organizations::dsl;
    dsl::user_organizations
        .filter(dsl::user_id.eq(user_id.to_string()))
        .select(models::UserOrganizationEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

fn memberships_of_orgs(conn: &mut SqliteConnection, org_ids: &[Id]) -> Result<Vec<UserOrganization>> {
    use schema::user_organizations::dsl;
    dsl::user_organizations
        .filter(dsl::organization_id.eq_any(ids_to_strings(org_ids)))
        .select(models::UserOrganizationEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

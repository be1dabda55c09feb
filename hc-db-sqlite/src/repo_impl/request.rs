use super::{
    location::{
        delete_location, delete_replaced_location, insert_location, load_locations, lookup_location,
        update_location, upsert_location,
    },
    *,
};

impl<'a> RequestRepo for DbConnection<'a> {
    fn create_request(&self, request: &Request) -> Result<()> {
        create_request(&mut self.conn.borrow_mut(), request)
    }
    fn update_request(&self, request: &Request) -> Result<()> {
        update_request(&mut self.conn.borrow_mut(), request)
    }
    fn update_request_status(
        &self,
        request: &Request,
        expected_status: RequestStatus,
    ) -> Result<()> {
        update_request_status(&mut self.conn.borrow_mut(), request, expected_status)
    }
    fn delete_request(&self, id: &Id) -> Result<()> {
        delete_request(&mut self.conn.borrow_mut(), id)
    }

    fn get_request(&self, id: &Id) -> Result<Request> {
        get_request(&mut self.conn.borrow_mut(), id)
    }
    fn get_requests(&self, ids: &[Id]) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        let query = dsl::requests
            .filter(dsl::id.eq_any(ids_to_strings(ids)))
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
    fn all_requests(&self) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        load_requests_where(&mut self.conn.borrow_mut(), dsl::requests.into_boxed())
    }

    fn active_public_requests(&self) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        let query = dsl::requests
            .filter(dsl::status.ne_all(closed_status_names()))
            .filter(dsl::visibility.eq(RequestVisibility::All.as_ref().to_owned()))
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
    fn active_private_requests_of_org(&self, org_id: &Id) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        let query = dsl::requests
            .filter(dsl::status.ne_all(closed_status_names()))
            .filter(dsl::visibility.ne(RequestVisibility::All.as_ref().to_owned()))
            .filter(dsl::organization_id.eq(org_id.to_string()))
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
    fn active_invite_only_requests(&self) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        let query = dsl::requests
            .filter(dsl::status.ne_all(closed_status_names()))
            .filter(dsl::visibility.eq(RequestVisibility::InviteOnly.as_ref().to_owned()))
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
    fn requests_of_user(&self, user_id: &Id) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        let user_id = user_id.to_string();
        let query = dsl::requests
            .filter(
                dsl::creator_id
                    .eq(user_id.clone())
                    .or(dsl::provider_id.assume_not_null().eq(user_id)),
            )
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
    fn outdated_open_requests(&self, today: Date) -> Result<Vec<Request>> {
        use schema::requests::dsl;
        // Dates are stored as YYYY-MM-DD and compare lexicographically
        let query = dsl::requests
            .filter(dsl::status.eq(RequestStatus::Open.as_ref().to_owned()))
            .filter(dsl::needed_before.lt(format_date(today)))
            .into_boxed();
        load_requests_where(&mut self.conn.borrow_mut(), query)
    }
}

impl<'a> RequestHistoryRepo for DbConnection<'a> {
    fn add_request_history(&self, entry: &RequestHistory) -> Result<()> {
        add_request_history(&mut self.conn.borrow_mut(), entry)
    }
    fn request_history(&self, request_id: &Id) -> Result<Vec<RequestHistory>> {
        request_history(&mut self.conn.borrow_mut(), request_id)
    }
}

fn closed_status_names() -> Vec<String> {
    use strum::IntoEnumIterator as _;
    RequestStatus::iter()
        .filter(|status| status.is_closed())
        .map(|status| status.as_ref().to_owned())
        .collect()
}

fn load_request(
    entity: models::RequestEntity,
    locations: &std::collections::HashMap<i64, Location>,
) -> Result<Request> {
    let models::RequestEntity {
        id,
        creator_id,
        organization_id,
        status,
        provider_id,
        title,
        description,
        destination_rowid,
        origin_rowid,
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
    } = entity;
    Ok(Request {
        id: load_id(&id)?,
        creator_id: load_id(&creator_id)?,
        organization_id: load_id(&organization_id)?,
        status: load_named(&status)?,
        provider_id: load_opt_id(provider_id)?,
        title,
        description,
        destination: lookup_location(locations, destination_rowid)?,
        origin: origin_rowid
            .map(|rowid| lookup_location(locations, rowid))
            .transpose()?,
        size: load_primitive(size)?,
        needed_before: load_opt_date(needed_before)?,
        kilograms,
        url,
        photo_id: load_opt_id(photo_id)?,
        meeting_id: load_opt_id(meeting_id)?,
        visibility: load_named(&visibility)?,
        completed_on: load_opt_date(completed_on)?,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_requests(
    conn: &mut SqliteConnection,
    entities: Vec<models::RequestEntity>,
) -> Result<Vec<Request>> {
    let rowids = entities
        .iter()
        .flat_map(|e| std::iter::once(e.destination_rowid).chain(e.origin_rowid))
        .collect();
    let locations = load_locations(conn, rowids)?;
    entities
        .into_iter()
        .map(|entity| load_request(entity, &locations))
        .collect()
}

fn load_requests_where(
    conn: &mut SqliteConnection,
    query: schema::requests::BoxedQuery<'static, diesel::sqlite::Sqlite>,
) -> Result<Vec<Request>> {
    use schema::requests::dsl;
    let entities = query
        .order_by(dsl::created_at.desc())
        .select(models::RequestEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?;
    load_requests(conn, entities)
}

fn create_request(conn: &mut SqliteConnection, request: &Request) -> Result<()> {
    let Request {
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
    } = request;
    let destination_rowid = insert_location(conn, destination)?;
    let origin_rowid = origin
        .as_ref()
        .map(|location| insert_location(conn, location))
        .transpose()?;
    let new_request = models::NewRequest {
        id: id.to_string(),
        creator_id: creator_id.to_string(),
        organization_id: organization_id.to_string(),
        status: status.as_ref(),
        provider_id: provider_id.as_ref().map(ToString::to_string),
        title,
        description: description.as_deref(),
        destination_rowid,
        origin_rowid,
        size: (*size).into(),
        needed_before: needed_before.map(format_date),
        kilograms: *kilograms,
        url: url.as_deref(),
        photo_id: photo_id.as_ref().map(ToString::to_string),
        meeting_id: meeting_id.as_ref().map(ToString::to_string),
        visibility: visibility.as_ref(),
        completed_on: completed_on.map(format_date),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    };
    diesel::insert_into(schema::requests::table)
        .values(new_request)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn location_rowids(conn: &mut SqliteConnection, id: &str) -> Result<(i64, Option<i64>)> {
    use schema::requests::dsl;
    dsl::requests
        .select((dsl::destination_rowid, dsl::origin_rowid))
        .filter(dsl::id.eq(id))
        .first::<(i64, Option<i64>)>(conn)
        .map_err(from_diesel_err)
}

fn update_request(conn: &mut SqliteConnection, request: &Request) -> Result<()> {
    use schema::requests::dsl;
    let id = request.id.to_string();
    let (destination_rowid, old_origin_rowid) = location_rowids(conn, &id)?;
    update_location(conn, destination_rowid, &request.destination)?;
    let origin_rowid = upsert_location(conn, old_origin_rowid, request.origin.as_ref())?;
    let changeset = models::RequestFieldsChangeset {
        title: &request.title,
        description: request.description.as_deref(),
        origin_rowid,
        size: request.size.into(),
        needed_before: request.needed_before.map(format_date),
        kilograms: request.kilograms,
        url: request.url.as_deref(),
        photo_id: request.photo_id.as_ref().map(ToString::to_string),
        visibility: request.visibility.as_ref(),
        updated_at: request.updated_at.as_millis(),
    };
    diesel::update(dsl::requests.filter(dsl::id.eq(&id)))
        .set(changeset)
        .execute(conn)
        .map_err(from_diesel_err)?;
    delete_replaced_location(conn, old_origin_rowid, origin_rowid)?;
    Ok(())
}

fn update_request_status(
    conn: &mut SqliteConnection,
    request: &Request,
    expected_status: RequestStatus,
) -> Result<()> {
    use schema::requests::dsl;
    let id = request.id.to_string();
    let changeset = models::RequestStatusChangeset {
        status: request.status.as_ref(),
        provider_id: request.provider_id.as_ref().map(ToString::to_string),
        completed_on: request.completed_on.map(format_date),
        updated_at: request.updated_at.as_millis(),
    };
    let count = diesel::update(
        dsl::requests
            .filter(dsl::id.eq(&id))
            .filter(dsl::status.eq(expected_status.as_ref())),
    )
    .set(changeset)
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        // Either missing or modified concurrently
        location_rowids(conn, &id)?;
        log::debug!(
            "Status of request {id} is no longer {}",
            expected_status.as_ref()
        );
        return Err(repo::Error::InvalidVersion);
    }
    Ok(())
}

fn delete_request(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::requests::dsl;
    let id = id.to_string();
    let (destination_rowid, origin_rowid) = location_rowids(conn, &id)?;
    // History, offers and threads are deleted by cascade
    diesel::delete(dsl::requests.filter(dsl::id.eq(&id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    delete_location(conn, destination_rowid)?;
    if let Some(rowid) = origin_rowid {
        delete_location(conn, rowid)?;
    }
    Ok(())
}

fn get_request(conn: &mut SqliteConnection, id: &Id) -> Result<Request> {
    use schema::requests::dsl;
    let entity = dsl::requests
        .filter(dsl::id.eq(id.to_string()))
        .select(models::RequestEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?;
    load_requests(conn, vec![entity])?
        .pop()
        .ok_or(repo::Error::NotFound)
}

impl TryFrom<models::RequestHistoryEntity> for RequestHistory {
    type Error = repo::Error;
    fn try_from(from: models::RequestHistoryEntity) -> Result<Self> {
        let models::RequestHistoryEntity {
            request_id,
            actor_id,
            old_status,
            new_status,
            old_provider_id,
            new_provider_id,
            created_at,
        } = from;
        Ok(Self {
            request_id: load_id(&request_id)?,
            actor_id: load_id(&actor_id)?,
            old_status: load_named(&old_status)?,
            new_status: load_named(&new_status)?,
            old_provider_id: load_opt_id(old_provider_id)?,
            new_provider_id: load_opt_id(new_provider_id)?,
            created_at: Timestamp::from_millis(created_at),
        })
    }
}

fn add_request_history(conn: &mut SqliteConnection, entry: &RequestHistory) -> Result<()> {
    let RequestHistory {
        request_id,
        actor_id,
        old_status,
        new_status,
        old_provider_id,
        new_provider_id,
        created_at,
    } = entry;
    let entity = models::RequestHistoryEntity {
        request_id: request_id.to_string(),
        actor_id: actor_id.to_string(),
        old_status: old_status.as_ref().to_owned(),
        new_status: new_status.as_ref().to_owned(),
        old_provider_id: old_provider_id.as_ref().map(ToString::to_string),
        new_provider_id: new_provider_id.as_ref().map(ToString::to_string),
        created_at: created_at.as_millis(),
    };
    diesel::insert_into(schema::request_history::table)
        .values(entity)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn request_history(conn: &mut SqliteConnection, request_id: &Id) -> Result<Vec<RequestHistory>> {
    use schema::request_history::dsl;
    dsl::request_history
        .filter(dsl::request_id.eq(request_id.to_string()))
        .order_by((dsl::created_at.desc(), dsl::rowid.desc()))
        .select(models::RequestHistoryEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

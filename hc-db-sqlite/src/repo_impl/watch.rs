use super::{
    location::{insert_location, load_location},
    *,
};

impl<'a> WatchRepo for DbConnection<'a> {
    fn create_watch(&self, watch: &Watch) -> Result<()> {
        create_watch(&mut self.conn.borrow_mut(), watch)
    }
    fn get_watch(&self, id: &Id) -> Result<Watch> {
        get_watch(&mut self.conn.borrow_mut(), id)
    }
    fn delete_watch(&self, id: &Id) -> Result<()> {
        delete_watch(&mut self.conn.borrow_mut(), id)
    }
    fn watches_of_user(&self, owner_id: &Id) -> Result<Vec<Watch>> {
        watches_of_user(&mut self.conn.borrow_mut(), owner_id)
    }
    fn all_watches(&self) -> Result<Vec<Watch>> {
        all_watches(&mut self.conn.borrow_mut())
    }
}

fn load_watch(conn: &mut SqliteConnection, entity: models::WatchEntity) -> Result<Watch> {
    let models::WatchEntity {
        id,
        owner_id,
        name,
        destination_rowid,
        origin_rowid,
        meeting_id,
        search_text,
        size_floor,
        created_at,
    } = entity;
    let destination = destination_rowid
        .map(|rowid| load_location(conn, rowid))
        .transpose()?;
    let origin = origin_rowid
        .map(|rowid| load_location(conn, rowid))
        .transpose()?;
    Ok(Watch {
        id: load_id(&id)?,
        owner_id: load_id(&owner_id)?,
        name,
        destination,
        origin,
        meeting_id: load_opt_id(meeting_id)?,
        search_text,
        size_floor: size_floor.map(load_primitive).transpose()?,
        created_at: Timestamp::from_millis(created_at),
    })
}

fn load_watches(conn: &mut SqliteConnection, entities: Vec<models::WatchEntity>) -> Result<Vec<Watch>> {
    entities
        .into_iter()
        .map(|entity| load_watch(conn, entity))
        .collect()
}

fn create_watch(conn: &mut SqliteConnection, watch: &Watch) -> Result<()> {
    let Watch {
        id,
        owner_id,
        name,
        destination,
        origin,
        meeting_id,
        search_text,
        size_floor,
        created_at,
    } = watch;
    let destination_rowid = destination
        .as_ref()
        .map(|location| insert_location(conn, location))
        .transpose()?;
    let origin_rowid = origin
        .as_ref()
        .map(|location| insert_location(conn, location))
        .transpose()?;
    let new_watch = models::NewWatch {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: name.as_deref(),
        destination_rowid,
        origin_rowid,
        meeting_id: meeting_id.as_ref().map(ToString::to_string),
        search_text: search_text.as_deref(),
        size_floor: size_floor.map(Into::into),
        created_at: created_at.as_millis(),
    };
    diesel::insert_into(schema::watches::table)
        .values(new_watch)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_watch(conn: &mut SqliteConnection, id: &Id) -> Result<Watch> {
    use schema::watches::dsl;
    let entity = dsl::watches
        .filter(dsl::id.eq(id.to_string()))
        .select(models::WatchEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?;
    load_watch(conn, entity)
}

fn delete_watch(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::watches::dsl;
    let count = diesel::delete(dsl::watches.filter(dsl::id.eq(id.to_string())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    // The locations of the watch are collected by the location cleanup
    Ok(())
}

fn watches_of_user(conn: &mut SqliteConnection, owner_id: &Id) -> Result<Vec<Watch>> {
    use schema::watches::dsl;
    let entities = dsl::watches
        .filter(dsl::owner_id.eq(owner_id.to_string()))
        .order_by(dsl::created_at.desc())
        .select(models::WatchEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?;
    load_watches(conn, entities)
}

fn all_watches(conn: &mut SqliteConnection) -> Result<Vec<Watch>> {
    use schema::watches::dsl;
    let entities = dsl::watches
        .select(models::WatchEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?;
    load_watches(conn, entities)
}

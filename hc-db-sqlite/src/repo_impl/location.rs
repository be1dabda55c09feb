use std::collections::HashMap;

use super::*;

impl<'a> LocationRepo for DbConnection<'a> {
    fn delete_orphaned_locations(&self) -> Result<usize> {
        delete_orphaned_locations(&mut self.conn.borrow_mut())
    }
}

fn new_location(location: &Location) -> models::NewLocation<'_> {
    let Location {
        description,
        country,
        state,
        county,
        city,
        borough,
        latitude,
        longitude,
    } = location;
    models::NewLocation {
        description: description.as_deref(),
        country: country.as_deref(),
        state: state.as_deref(),
        county: county.as_deref(),
        city: city.as_deref(),
        borough: borough.as_deref(),
        latitude: *latitude,
        longitude: *longitude,
    }
}

impl From<models::LocationEntity> for Location {
    fn from(from: models::LocationEntity) -> Self {
        let models::LocationEntity {
            rowid: _,
            description,
            country,
            state,
            county,
            city,
            borough,
            latitude,
            longitude,
        } = from;
        Self {
            description,
            country,
            state,
            county,
            city,
            borough,
            latitude,
            longitude,
        }
    }
}

pub fn insert_location(conn: &mut SqliteConnection, location: &Location) -> Result<i64> {
    diesel::insert_into(schema::locations::table)
        .values(new_location(location))
        .execute(conn)
        .map_err(from_diesel_err)?;
    inserted_rowid(conn)
}

pub fn update_location(conn: &mut SqliteConnection, rowid: i64, location: &Location) -> Result<()> {
    use schema::locations::dsl;
    diesel::update(dsl::locations.filter(dsl::rowid.eq(rowid)))
        .set(new_location(location))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

pub fn delete_location(conn: &mut SqliteConnection, rowid: i64) -> Result<()> {
    use schema::locations::dsl;
    diesel::delete(dsl::locations.filter(dsl::rowid.eq(rowid)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

/// Updates or inserts an optional location and returns the row
/// that should be referenced afterwards.
///
/// A row that is no longer needed is kept until the reference to it
/// has been removed, see [`delete_replaced_location`].
pub fn upsert_location(
    conn: &mut SqliteConnection,
    rowid: Option<i64>,
    location: Option<&Location>,
) -> Result<Option<i64>> {
    match (rowid, location) {
        (Some(rowid), Some(location)) => {
            update_location(conn, rowid, location)?;
            Ok(Some(rowid))
        }
        (None, Some(location)) => insert_location(conn, location).map(Some),
        (_, None) => Ok(None),
    }
}

/// Deletes the previous row of an optional location once its owner
/// no longer references it.
pub fn delete_replaced_location(
    conn: &mut SqliteConnection,
    old_rowid: Option<i64>,
    new_rowid: Option<i64>,
) -> Result<()> {
    match (old_rowid, new_rowid) {
        (Some(old_rowid), None) => delete_location(conn, old_rowid),
        _ => Ok(()),
    }
}

pub fn load_location(conn: &mut SqliteConnection, rowid: i64) -> Result<Location> {
    use schema::locations::dsl;
    Ok(dsl::locations
        .filter(dsl::rowid.eq(rowid))
        .select(models::LocationEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?
        .into())
}

pub fn load_locations(
    conn: &mut SqliteConnection,
    rowids: Vec<i64>,
) -> Result<HashMap<i64, Location>> {
    use schema::locations::dsl;
    if rowids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(dsl::locations
        .filter(dsl::rowid.eq_any(rowids))
        .select(models::LocationEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| (entity.rowid, entity.into()))
        .collect())
}

pub fn lookup_location(locations: &HashMap<i64, Location>, rowid: i64) -> Result<Location> {
    locations.get(&rowid).cloned().ok_or_else(|| {
        log::warn!("Referential integrity violation: Location {rowid} not found");
        repo::Error::NotFound
    })
}

fn delete_orphaned_locations(conn: &mut SqliteConnection) -> Result<usize> {
    diesel::sql_query(
        r#"
DELETE FROM locations WHERE rowid NOT IN (
    SELECT destination_rowid FROM requests
    UNION SELECT origin_rowid FROM requests WHERE origin_rowid IS NOT NULL
    UNION SELECT home_location_rowid FROM users WHERE home_location_rowid IS NOT NULL
    UNION SELECT location_rowid FROM meetings
    UNION SELECT destination_rowid FROM watches WHERE destination_rowid IS NOT NULL
    UNION SELECT origin_rowid FROM watches WHERE origin_rowid IS NOT NULL
)"#,
    )
    .execute(conn)
    .map_err(from_diesel_err)
}

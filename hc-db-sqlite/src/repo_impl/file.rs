use std::collections::HashSet;

use super::*;

impl<'a> FileRepo for DbConnection<'a> {
    fn create_file(&self, file: &File) -> Result<()> {
        create_file(&mut self.conn.borrow_mut(), file)
    }
    fn get_file(&self, id: &Id) -> Result<File> {
        get_file(&mut self.conn.borrow_mut(), id)
    }
    fn unreferenced_files(&self, created_before: Timestamp) -> Result<Vec<File>> {
        unreferenced_files(&mut self.conn.borrow_mut(), created_before)
    }
    fn delete_file(&self, id: &Id) -> Result<()> {
        delete_file(&mut self.conn.borrow_mut(), id)
    }
}

impl TryFrom<models::FileEntity> for File {
    type Error = repo::Error;
    fn try_from(from: models::FileEntity) -> Result<Self> {
        let models::FileEntity {
            id,
            name,
            size,
            content_type,
            url,
            url_expires_at,
            created_at,
        } = from;
        Ok(Self {
            id: load_id(&id)?,
            name,
            size: size.max(0) as u64,
            content_type,
            url,
            url_expires_at: url_expires_at.map(Timestamp::from_millis),
            created_at: Timestamp::from_millis(created_at),
        })
    }
}

fn create_file(conn: &mut SqliteConnection, file: &File) -> Result<()> {
    let File {
        id,
        name,
        size,
        content_type,
        url,
        url_expires_at,
        created_at,
    } = file;
    let new_file = models::NewFile {
        id: id.to_string(),
        name,
        size: i64::try_from(*size).map_err(anyhow::Error::from)?,
        content_type,
        url,
        url_expires_at: url_expires_at.map(Timestamp::as_millis),
        created_at: created_at.as_millis(),
    };
    diesel::insert_into(schema::files::table)
        .values(new_file)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_file(conn: &mut SqliteConnection, id: &Id) -> Result<File> {
    use schema::files::dsl;
    dsl::files
        .filter(dsl::id.eq(id.to_string()))
        .select(models::FileEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn referenced_file_ids(conn: &mut SqliteConnection) -> Result<HashSet<String>> {
    let photo_ids = {
        use schema::requests::dsl;
        dsl::requests
            .select(dsl::photo_id)
            .filter(dsl::photo_id.is_not_null())
            .load::<Option<String>>(conn)
            .map_err(from_diesel_err)?
    };
    let avatar_ids = {
        use schema::users::dsl;
        dsl::users
            .select(dsl::avatar_id)
            .filter(dsl::avatar_id.is_not_null())
            .load::<Option<String>>(conn)
            .map_err(from_diesel_err)?
    };
    let image_ids = {
        use schema::meetings::dsl;
        dsl::meetings
            .select(dsl::image_id)
            .filter(dsl::image_id.is_not_null())
            .load::<Option<String>>(conn)
            .map_err(from_diesel_err)?
    };
    Ok(photo_ids
        .into_iter()
        .chain(avatar_ids)
        .chain(image_ids)
        .flatten()
        .collect())
}

fn unreferenced_files(conn: &mut SqliteConnection, created_before: Timestamp) -> Result<Vec<File>> {
    use schema::files::dsl;
    let referenced = referenced_file_ids(conn)?;
    dsl::files
        .filter(dsl::created_at.lt(created_before.as_millis()))
        .select(models::FileEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .filter(|file| !referenced.contains(&file.id))
        .map(TryInto::try_into)
        .collect()
}

fn delete_file(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::files::dsl;
    let count = diesel::delete(dsl::files.filter(dsl::id.eq(id.to_string())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

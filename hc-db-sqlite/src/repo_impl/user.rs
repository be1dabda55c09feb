use super::{
    location::{delete_replaced_location, load_location, upsert_location},
    *,
};

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_users(&self, ids: &[Id]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }

    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_nickname(&self, nickname: &str) -> Result<Option<User>> {
        try_get_user_by_nickname(&mut self.conn.borrow_mut(), nickname)
    }
}

fn new_user(user: &User, home_location_rowid: Option<i64>) -> models::NewUser<'_> {
    let User {
        id,
        email,
        nickname,
        first_name,
        last_name,
        avatar,
        home_location: _,
        admin_role,
        preferences,
        created_at,
    } = user;
    models::NewUser {
        id: id.to_string(),
        email: email.as_str(),
        nickname,
        first_name: first_name.as_deref(),
        last_name: last_name.as_deref(),
        avatar_id: avatar.as_ref().map(ToString::to_string),
        home_location_rowid,
        admin_role: (*admin_role).into(),
        language: preferences.language.as_ref(),
        weight_unit: preferences.weight_unit.as_ref(),
        time_zone: preferences.time_zone.as_deref(),
        created_at: created_at.as_millis(),
    }
}

fn load_user(conn: &mut SqliteConnection, entity: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        id,
        email,
        nickname,
        first_name,
        last_name,
        avatar_id,
        home_location_rowid,
        admin_role,
        language,
        weight_unit,
        time_zone,
        created_at,
    } = entity;
    let home_location = home_location_rowid
        .map(|rowid| load_location(conn, rowid))
        .transpose()?;
    Ok(User {
        id: load_id(&id)?,
        email: load_email(&email)?,
        nickname,
        first_name,
        last_name,
        avatar: load_opt_id(avatar_id)?,
        home_location,
        admin_role: load_primitive(admin_role)?,
        preferences: Preferences {
            language: load_named(&language)?,
            weight_unit: load_named(&weight_unit)?,
            time_zone,
        },
        created_at: Timestamp::from_millis(created_at),
    })
}

fn load_users(conn: &mut SqliteConnection, entities: Vec<models::UserEntity>) -> Result<Vec<User>> {
    entities
        .into_iter()
        .map(|entity| load_user(conn, entity))
        .collect()
}

fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    let home_location_rowid = upsert_location(conn, None, user.home_location.as_ref())?;
    diesel::insert_into(schema::users::table)
        .values(new_user(user, home_location_rowid))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    use schema::users::dsl;
    let id = user.id.to_string();
    let old_home_location_rowid = dsl::users
        .select(dsl::home_location_rowid)
        .filter(dsl::id.eq(&id))
        .first::<Option<i64>>(conn)
        .map_err(from_diesel_err)?;
    let home_location_rowid =
        upsert_location(conn, old_home_location_rowid, user.home_location.as_ref())?;
    diesel::update(dsl::users.filter(dsl::id.eq(&id)))
        .set(new_user(user, home_location_rowid))
        .execute(conn)
        .map_err(from_diesel_err)?;
    delete_replaced_location(conn, old_home_location_rowid, home_location_rowid)?;
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &Id) -> Result<User> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::id.eq(id.to_string()))
        .select(models::UserEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?;
    load_user(conn, entity)
}

fn get_users(conn: &mut SqliteConnection, ids: &[Id]) -> Result<Vec<User>> {
    use schema::users::dsl;
    let entities = dsl::users
        .filter(dsl::id.eq_any(ids_to_strings(ids)))
        .select(models::UserEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?;
    load_users(conn, entities)
}

fn all_users(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    use schema::users::dsl;
    let entities = dsl::users
        .select(models::UserEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?;
    load_users(conn, entities)
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email))
        .select(models::UserEntity::as_select())
        .first(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_user(conn, entity))
        .transpose()
}

fn try_get_user_by_nickname(conn: &mut SqliteConnection, nickname: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    // The column is declared with COLLATE NOCASE
    dsl::users
        .filter(dsl::nickname.eq(nickname))
        .select(models::UserEntity::as_select())
        .first(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| load_user(conn, entity))
        .transpose()
}

use super::*;

impl<'a> AccessTokenRepo for DbConnection<'a> {
    fn create_access_token(&self, token: &AccessToken) -> Result<()> {
        create_access_token(&mut self.conn.borrow_mut(), token)
    }
    fn get_access_token(&self, token_hash: &str) -> Result<AccessToken> {
        get_access_token(&mut self.conn.borrow_mut(), token_hash)
    }
    fn delete_access_token(&self, token_hash: &str) -> Result<usize> {
        delete_access_token(&mut self.conn.borrow_mut(), token_hash)
    }
    fn delete_expired_access_tokens(&self, expired_before: Timestamp) -> Result<usize> {
        delete_expired_access_tokens(&mut self.conn.borrow_mut(), expired_before)
    }
}

impl From<&AccessToken> for models::AccessTokenEntity {
    fn from(from: &AccessToken) -> Self {
        let AccessToken {
            token_hash,
            user_id,
            organization_id,
            created_at,
            expires_at,
        } = from;
        Self {
            token_hash: token_hash.clone(),
            user_id: user_id.to_string(),
            organization_id: organization_id.as_ref().map(ToString::to_string),
            created_at: created_at.as_millis(),
            expires_at: expires_at.as_millis(),
        }
    }
}

impl TryFrom<models::AccessTokenEntity> for AccessToken {
    type Error = repo::Error;
    fn try_from(from: models::AccessTokenEntity) -> Result<Self> {
        let models::AccessTokenEntity {
            token_hash,
            user_id,
            organization_id,
            created_at,
            expires_at,
        } = from;
        Ok(Self {
            token_hash,
            user_id: load_id(&user_id)?,
            organization_id: load_opt_id(organization_id)?,
            created_at: Timestamp::from_millis(created_at),
            expires_at: Timestamp::from_millis(expires_at),
        })
    }
}

fn create_access_token(conn: &mut SqliteConnection, token: &AccessToken) -> Result<()> {
    diesel::insert_into(schema::access_tokens::table)
        .values(models::AccessTokenEntity::from(token))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_access_token(conn: &mut SqliteConnection, token_hash: &str) -> Result<AccessToken> {
    use schema::access_tokens::dsl;
    dsl::access_tokens
        .filter(dsl::token_hash.eq(token_hash))
        .select(models::AccessTokenEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn delete_access_token(conn: &mut SqliteConnection, token_hash: &str) -> Result<usize> {
    use schema::access_tokens::dsl;
    diesel::delete(dsl::access_tokens.filter(dsl::token_hash.eq(token_hash)))
        .execute(conn)
        .map_err(from_diesel_err)
}

fn delete_expired_access_tokens(
    conn: &mut SqliteConnection,
    expired_before: Timestamp,
) -> Result<usize> {
    use schema::access_tokens::dsl;
    diesel::delete(dsl::access_tokens.filter(dsl::expires_at.lt(expired_before.as_millis())))
        .execute(conn)
        .map_err(from_diesel_err)
}

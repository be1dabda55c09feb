use super::*;

impl<'a> PotentialProviderRepo for DbConnection<'a> {
    fn add_potential_provider(&self, potential_provider: &PotentialProvider) -> Result<()> {
        let PotentialProvider {
            request_id,
            user_id,
            created_at,
        } = potential_provider;
        let entity = models::PotentialProviderEntity {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
            created_at: created_at.as_millis(),
        };
        diesel::insert_into(schema::potential_providers::table)
            .values(entity)
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?;
        Ok(())
    }

    fn delete_potential_provider(&self, request_id: &Id, user_id: &Id) -> Result<usize> {
        use schema::potential_providers::dsl;
        diesel::delete(
            dsl::potential_providers
                .filter(dsl::request_id.eq(request_id.to_string()))
                .filter(dsl::user_id.eq(user_id.to_string())),
        )
        .execute(&mut **self.conn.borrow_mut())
        .map_err(from_diesel_err)
    }

    fn delete_potential_providers(&self, request_id: &Id) -> Result<usize> {
        use schema::potential_providers::dsl;
        diesel::delete(dsl::potential_providers.filter(dsl::request_id.eq(request_id.to_string())))
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)
    }

    fn potential_providers(&self, request_id: &Id) -> Result<Vec<PotentialProvider>> {
        use schema::potential_providers::dsl;
        dsl::potential_providers
            .filter(dsl::request_id.eq(request_id.to_string()))
            .order_by(dsl::created_at)
            .select(models::PotentialProviderEntity::as_select())
            .load(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .into_iter()
            .map(|entity| {
                let models::PotentialProviderEntity {
                    request_id,
                    user_id,
                    created_at,
                } = entity;
                Ok(PotentialProvider {
                    request_id: load_id(&request_id)?,
                    user_id: load_id(&user_id)?,
                    created_at: Timestamp::from_millis(created_at),
                })
            })
            .collect()
    }
}

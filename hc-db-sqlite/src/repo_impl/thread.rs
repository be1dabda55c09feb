use super::*;

impl<'a> ThreadRepo for DbConnection<'a> {
    fn create_thread(&self, thread: &Thread) -> Result<()> {
        let entity = models::ThreadEntity {
            id: thread.id.to_string(),
            request_id: thread.request_id.to_string(),
            created_at: thread.created_at.as_millis(),
            updated_at: thread.updated_at.as_millis(),
        };
        diesel::insert_into(schema::threads::table)
            .values(entity)
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?;
        Ok(())
    }

    fn touch_thread(&self, id: &Id, updated_at: Timestamp) -> Result<()> {
        use schema::threads::dsl;
        let count = diesel::update(dsl::threads.filter(dsl::id.eq(id.to_string())))
            .set(dsl::updated_at.eq(updated_at.as_millis()))
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?;
        if count == 0 {
            return Err(repo::Error::NotFound);
        }
        Ok(())
    }

    fn get_thread(&self, id: &Id) -> Result<Thread> {
        use schema::threads::dsl;
        dsl::threads
            .filter(dsl::id.eq(id.to_string()))
            .select(models::ThreadEntity::as_select())
            .first(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .try_into()
    }

    fn threads_of_request(&self, request_id: &Id) -> Result<Vec<Thread>> {
        use schema::threads::dsl;
        dsl::threads
            .filter(dsl::request_id.eq(request_id.to_string()))
            .order_by(dsl::created_at)
            .select(models::ThreadEntity::as_select())
            .load(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    fn threads_of_user(&self, user_id: &Id) -> Result<Vec<Thread>> {
        use schema::{thread_participants as p, threads as t};
        t::table
            .inner_join(p::table.on(p::thread_id.eq(t::id)))
            .filter(p::user_id.eq(user_id.to_string()))
            .order_by((t::updated_at.desc(), t::rowid.desc()))
            .select(models::ThreadEntity::as_select())
            .load(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    fn add_thread_participant(&self, participant: &ThreadParticipant) -> Result<()> {
        use schema::thread_participants::dsl;
        let entity = models::ThreadParticipantEntity {
            thread_id: participant.thread_id.to_string(),
            user_id: participant.user_id.to_string(),
            last_viewed_at: participant.last_viewed_at.map(Timestamp::as_millis),
        };
        diesel::insert_into(dsl::thread_participants)
            .values(entity)
            .on_conflict((dsl::thread_id, dsl::user_id))
            .do_nothing()
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?;
        Ok(())
    }

    fn thread_participants(&self, thread_id: &Id) -> Result<Vec<ThreadParticipant>> {
        use schema::thread_participants::dsl;
        dsl::thread_participants
            .filter(dsl::thread_id.eq(thread_id.to_string()))
            .select(models::ThreadParticipantEntity::as_select())
            .load(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .into_iter()
            .map(|entity| {
                let models::ThreadParticipantEntity {
                    thread_id,
                    user_id,
                    last_viewed_at,
                } = entity;
                Ok(ThreadParticipant {
                    thread_id: load_id(&thread_id)?,
                    user_id: load_id(&user_id)?,
                    last_viewed_at: last_viewed_at.map(Timestamp::from_millis),
                })
            })
            .collect()
    }

    fn set_last_viewed_at(
        &self,
        thread_id: &Id,
        user_id: &Id,
        viewed_at: Timestamp,
    ) -> Result<()> {
        use schema::thread_participants::dsl;
        let count = diesel::update(
            dsl::thread_participants
                .filter(dsl::thread_id.eq(thread_id.to_string()))
                .filter(dsl::user_id.eq(user_id.to_string())),
        )
        .set(dsl::last_viewed_at.eq(Some(viewed_at.as_millis())))
        .execute(&mut **self.conn.borrow_mut())
        .map_err(from_diesel_err)?;
        if count == 0 {
            return Err(repo::Error::NotFound);
        }
        Ok(())
    }
}

impl TryFrom<models::ThreadEntity> for Thread {
    type Error = repo::Error;
    fn try_from(from: models::ThreadEntity) -> Result<Self> {
        let models::ThreadEntity {
            id,
            request_id,
            created_at,
            updated_at,
        } = from;
        Ok(Self {
            id: load_id(&id)?,
            request_id: load_id(&request_id)?,
            created_at: Timestamp::from_millis(created_at),
            updated_at: Timestamp::from_millis(updated_at),
        })
    }
}

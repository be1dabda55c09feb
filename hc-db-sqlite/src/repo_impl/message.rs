use super::*;

impl<'a> MessageRepo for DbConnection<'a> {
    fn create_message(&self, message: &Message) -> Result<()> {
        let Message {
            id,
            thread_id,
            sender_id,
            content,
            created_at,
        } = message;
        let entity = models::MessageEntity {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.clone(),
            created_at: created_at.as_millis(),
        };
        diesel::insert_into(schema::messages::table)
            .values(entity)
            .execute(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?;
        Ok(())
    }

    fn messages_of_thread(&self, thread_id: &Id) -> Result<Vec<Message>> {
        use schema::messages::dsl;
        dsl::messages
            .filter(dsl::thread_id.eq(thread_id.to_string()))
            .order_by((dsl::created_at, dsl::rowid))
            .select(models::MessageEntity::as_select())
            .load(&mut **self.conn.borrow_mut())
            .map_err(from_diesel_err)?
            .into_iter()
            .map(|entity| {
                let models::MessageEntity {
                    id,
                    thread_id,
                    sender_id,
                    content,
                    created_at,
                } = entity;
                Ok(Message {
                    id: load_id(&id)?,
                    thread_id: load_id(&thread_id)?,
                    sender_id: load_id(&sender_id)?,
                    content,
                    created_at: Timestamp::from_millis(created_at),
                })
            })
            .collect()
    }

    fn count_unread_messages(&self, thread_id: &Id, user_id: &Id) -> Result<u64> {
        use schema::{messages as m, thread_participants as p};
        let mut conn = self.conn.borrow_mut();
        let conn = &mut **conn;
        let thread_id = thread_id.to_string();
        let last_viewed_at = p::table
            .filter(p::thread_id.eq(&thread_id))
            .filter(p::user_id.eq(user_id.to_string()))
            .select(p::last_viewed_at)
            .first::<Option<i64>>(conn)
            .optional()
            .map_err(from_diesel_err)?
            .flatten();
        let mut query = m::table
            .filter(m::thread_id.eq(&thread_id))
            .filter(m::sender_id.ne(user_id.to_string()))
            .into_boxed();
        if let Some(last_viewed_at) = last_viewed_at {
            query = query.filter(m::created_at.gt(last_viewed_at));
        }
        let count = query
            .count()
            .get_result::<i64>(conn)
            .map_err(from_diesel_err)?;
        Ok(count.try_into().unwrap_or_default())
    }
}

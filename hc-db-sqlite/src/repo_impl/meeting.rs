use super::{
    location::{insert_location, load_location},
    *,
};

impl<'a> MeetingRepo for DbConnection<'a> {
    fn create_meeting(&self, meeting: &Meeting) -> Result<()> {
        create_meeting(&mut self.conn.borrow_mut(), meeting)
    }
    fn get_meeting(&self, id: &Id) -> Result<Meeting> {
        get_meeting(&mut self.conn.borrow_mut(), id)
    }
    fn all_meetings(&self) -> Result<Vec<Meeting>> {
        all_meetings(&mut self.conn.borrow_mut())
    }

    fn add_meeting_participant(&self, participant: &MeetingParticipant) -> Result<()> {
        add_meeting_participant(&mut self.conn.borrow_mut(), participant)
    }
    fn meeting_participants(&self, meeting_id: &Id) -> Result<Vec<MeetingParticipant>> {
        meeting_participants(&mut self.conn.borrow_mut(), meeting_id)
    }

    fn create_meeting_invite(&self, invite: &MeetingInvite) -> Result<()> {
        create_meeting_invite(&mut self.conn.borrow_mut(), invite)
    }
    fn meeting_invites(&self, meeting_id: &Id) -> Result<Vec<MeetingInvite>> {
        meeting_invites(&mut self.conn.borrow_mut(), meeting_id)
    }
}

fn load_meeting(conn: &mut SqliteConnection, entity: models::MeetingEntity) -> Result<Meeting> {
    let models::MeetingEntity {
        id,
        name,
        description,
        start_date,
        end_date,
        creator_id,
        location_rowid,
        image_id,
        more_info_url,
        invite_code,
        created_at,
    } = entity;
    Ok(Meeting {
        id: load_id(&id)?,
        name,
        description,
        start_date: load_date(&start_date)?,
        end_date: load_date(&end_date)?,
        creator_id: load_id(&creator_id)?,
        location: load_location(conn, location_rowid)?,
        image_id: load_opt_id(image_id)?,
        more_info_url,
        invite_code,
        created_at: Timestamp::from_millis(created_at),
    })
}

fn create_meeting(conn: &mut SqliteConnection, meeting: &Meeting) -> Result<()> {
    let Meeting {
        id,
        name,
        description,
        start_date,
        end_date,
        creator_id,
        location,
        image_id,
        more_info_url,
        invite_code,
        created_at,
    } = meeting;
    let location_rowid = insert_location(conn, location)?;
    let new_meeting = models::NewMeeting {
        id: id.to_string(),
        name,
        description: description.as_deref(),
        start_date: format_date(*start_date),
        end_date: format_date(*end_date),
        creator_id: creator_id.to_string(),
        location_rowid,
        image_id: image_id.as_ref().map(ToString::to_string),
        more_info_url: more_info_url.as_deref(),
        invite_code: invite_code.as_deref(),
        created_at: created_at.as_millis(),
    };
    diesel::insert_into(schema::meetings::table)
        .values(new_meeting)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_meeting(conn: &mut SqliteConnection, id: &Id) -> Result<Meeting> {
    use schema::meetings::dsl;
    let entity = dsl::meetings
        .filter(dsl::id.eq(id.to_string()))
        .select(models::MeetingEntity::as_select())
        .first(conn)
        .map_err(from_diesel_err)?;
    load_meeting(conn, entity)
}

fn all_meetings(conn: &mut SqliteConnection) -> Result<Vec<Meeting>> {
    use schema::meetings::dsl;
    dsl::meetings
        .order_by(dsl::start_date)
        .select(models::MeetingEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| load_meeting(conn, entity))
        .collect()
}

fn add_meeting_participant(
    conn: &mut SqliteConnection,
    participant: &MeetingParticipant,
) -> Result<()> {
    use schema::meeting_participants::dsl;
    let entity = models::MeetingParticipantEntity {
        meeting_id: participant.meeting_id.to_string(),
        user_id: participant.user_id.to_string(),
        is_organizer: participant.is_organizer,
    };
    diesel::insert_into(dsl::meeting_participants)
        .values(&entity)
        .on_conflict((dsl::meeting_id, dsl::user_id))
        .do_update()
        .set(dsl::is_organizer.eq(entity.is_organizer))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn meeting_participants(conn: &mut SqliteConnection, meeting_id: &Id) -> Result<Vec<MeetingParticipant>> {
    use schema::meeting_participants::dsl;
    dsl::meeting_participants
        .filter(dsl::meeting_id.eq(meeting_id.to_string()))
        .select(models::MeetingParticipantEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| {
            Ok(MeetingParticipant {
                meeting_id: load_id(&entity.meeting_id)?,
                user_id: load_id(&entity.user_id)?,
                is_organizer: entity.is_organizer,
            })
        })
        .collect()
}

fn create_meeting_invite(conn: &mut SqliteConnection, invite: &MeetingInvite) -> Result<()> {
    let MeetingInvite {
        meeting_id,
        inviter_id,
        invitee_email,
        secret_token,
        created_at,
    } = invite;
    let new_invite = models::NewMeetingInvite {
        meeting_id: meeting_id.to_string(),
        inviter_id: inviter_id.to_string(),
        invitee_email: invitee_email.as_str(),
        secret_token,
        created_at: created_at.as_millis(),
    };
    diesel::insert_into(schema::meeting_invites::table)
        .values(new_invite)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn meeting_invites(conn: &mut SqliteConnection, meeting_id: &Id) -> Result<Vec<MeetingInvite>> {
    use schema::meeting_invites::dsl;
    dsl::meeting_invites
        .filter(dsl::meeting_id.eq(meeting_id.to_string()))
        .order_by(dsl::created_at)
        .select(models::MeetingInviteEntity::as_select())
        .load(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|entity| {
            let models::MeetingInviteEntity {
                meeting_id,
                inviter_id,
                invitee_email,
                secret_token,
                created_at,
            } = entity;
            Ok(MeetingInvite {
                meeting_id: load_id(&meeting_id)?,
                inviter_id: load_id(&inviter_id)?,
                invitee_email: load_email(&invitee_email)?,
                secret_token,
                created_at: Timestamp::from_millis(created_at),
            })
        })
        .collect()
}

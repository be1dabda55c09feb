use super::*;
use usecases::NewUser;

pub fn create_user(connections: &sqlite::Connections, new_user: NewUser) -> Result<User> {
    write(connections, Deadline::none(), |db| {
        usecases::create_user(db, new_user.clone(), Timestamp::now())
    })
}

pub fn find_user_by_email(connections: &sqlite::Connections, email: &str) -> Result<User> {
    let user = connections.shared()?.transaction(|db| {
        db.try_get_user_by_email(email)?
            .ok_or(usecases::Error::NotFound)
    })?;
    Ok(user)
}

pub fn update_preferences(
    connections: &sqlite::Connections,
    deadline: Deadline,
    user_id: &Id,
    preferences: Preferences,
) -> Result<User> {
    write_as_user(connections, deadline, user_id, |db, actor| {
        usecases::update_preferences(db, actor, preferences.clone())
    })
}

pub fn change_admin_role(
    connections: &sqlite::Connections,
    user_id: &Id,
    role: AdminRole,
) -> Result<User> {
    write(connections, Deadline::none(), |db| {
        usecases::change_admin_role(db, user_id, role)
    })
}

/// Issues a bearer token and returns it in plain text.
pub fn issue_access_token(
    connections: &sqlite::Connections,
    user_id: &Id,
    organization_id: Option<Id>,
    lifetime: Duration,
) -> Result<String> {
    let token = write(connections, Deadline::none(), |db| {
        usecases::issue_access_token(db, user_id, organization_id, lifetime, Timestamp::now())
    })?;
    log::info!("Issued access token for user {user_id}");
    Ok(token)
}

pub fn authenticate_access_token(
    connections: &sqlite::Connections,
    token: &str,
) -> Result<AccessToken> {
    let access_token = connections.shared()?.transaction(|db| {
        usecases::authenticate_access_token(db, token, Timestamp::now())
    })?;
    Ok(access_token)
}

pub fn revoke_access_token(connections: &sqlite::Connections, token: &str) -> Result<()> {
    write(connections, Deadline::none(), |db| {
        usecases::revoke_access_token(db, token)
    })
}

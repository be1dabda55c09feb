use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub home_location: Option<Location>,
    pub preferences: Preferences,
}

/// Creates a user and adds memberships in all organizations
/// that own the domain of the email address.
pub fn create_user<R: Db>(repo: &R, new_user: NewUser, now: Timestamp) -> Result<User> {
    let NewUser {
        email,
        nickname,
        first_name,
        last_name,
        home_location,
        preferences,
    } = new_user;
    let email: EmailAddress = email.parse()?;
    if !validate::is_valid_email(email.as_str()) {
        return Err(Error::Email);
    }
    let nickname = nickname.trim().to_owned();
    if !validate::is_valid_nickname(&nickname) {
        return Err(Error::Nickname);
    }
    if repo.try_get_user_by_email(email.as_str())?.is_some() {
        return Err(Error::UserExists);
    }
    if repo.try_get_user_by_nickname(&nickname)?.is_some() {
        return Err(Error::NicknameTaken);
    }
    let user = User {
        id: Id::new(),
        email,
        nickname,
        first_name,
        last_name,
        avatar: None,
        home_location: home_location.filter(|l| !l.is_empty()),
        admin_role: AdminRole::User,
        preferences,
        created_at: now,
    };
    repo.create_user(&user)?;
    if let Some(domain) = user.email.domain() {
        for org in repo.find_orgs_by_domain(&domain)? {
            log::debug!("Affiliating user {} with organization {}", user.id, org.id);
            repo.add_membership(&UserOrganization {
                user_id: user.id,
                organization_id: org.id,
                auth_id: None,
                auth_email: Some(user.email.as_str().to_owned()),
                role: OrgRole::User,
            })?;
        }
    }
    log::info!("Created user {} ({})", user.nickname, user.id);
    Ok(user)
}

pub fn update_preferences<R: Db>(repo: &R, actor: &Actor, preferences: Preferences) -> Result<User> {
    let mut user = repo.get_user(&actor.id())?;
    user.preferences = preferences;
    repo.update_user(&user)?;
    Ok(user)
}

pub fn change_admin_role<R: Db>(repo: &R, user_id: &Id, role: AdminRole) -> Result<User> {
    let mut user = repo.get_user(user_id)?;
    log::info!("Changing admin role of {} to {}", user.id, role.as_ref());
    user.admin_role = role;
    repo.update_user(&user)?;
    Ok(user)
}

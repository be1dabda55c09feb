use super::prelude::*;
use crate::util::token::{generate_token, hash_token};

/// Issues a new bearer token and returns it in plain text.
///
/// Only the hash of the token is stored.
pub fn issue_access_token<R: Db>(
    repo: &R,
    user_id: &Id,
    organization_id: Option<Id>,
    lifetime: Duration,
    now: Timestamp,
) -> Result<String> {
    repo.get_user(user_id)?;
    if let Some(org_id) = &organization_id {
        let is_member = repo
            .memberships_of_user(user_id)?
            .iter()
            .any(|m| &m.organization_id == org_id);
        if !is_member {
            return Err(Error::Forbidden);
        }
    }
    let token = generate_token();
    let access_token = AccessToken {
        token_hash: hash_token(&token),
        user_id: *user_id,
        organization_id,
        created_at: now,
        expires_at: now + lifetime,
    };
    repo.create_access_token(&access_token)?;
    Ok(token)
}

pub fn authenticate_access_token<R: AccessTokenRepo>(
    repo: &R,
    token: &str,
    now: Timestamp,
) -> Result<AccessToken> {
    let access_token = match repo.get_access_token(&hash_token(token.trim())) {
        Ok(access_token) => access_token,
        Err(RepoError::NotFound) => return Err(Error::TokenInvalid),
        Err(err) => return Err(err.into()),
    };
    if access_token.is_expired(now) {
        return Err(Error::TokenExpired);
    }
    Ok(access_token)
}

pub fn revoke_access_token<R: AccessTokenRepo>(repo: &R, token: &str) -> Result<()> {
    if repo.delete_access_token(&hash_token(token.trim()))? == 0 {
        return Err(Error::TokenInvalid);
    }
    Ok(())
}

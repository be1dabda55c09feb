use super::*;

/// Revokes the bearer tokens of the request.
#[get("/auth/logout")]
pub fn get_logout(connections: sqlite::Connections, auth: Auth) -> Result<()> {
    let access_token = auth.access_token(&connections)?;
    for token in auth.bearer_tokens() {
        flows::revoke_access_token(&connections, token)?;
    }
    info!("User {} logged out", access_token.user_id);
    Ok(Json(()))
}

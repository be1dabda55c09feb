use super::{authorize_on_request, load_request, prelude::*};

/// Deletes a request with everything it owns.
pub fn delete_request<R: Db>(repo: &R, actor: &Actor, id: &Id) -> Result<Request> {
    let request = load_request(repo, id)?;
    authorize_on_request(repo, actor, &request, Action::Delete)?;
    repo.delete_request(&request.id)?;
    log::info!("Deleted request {}", request.id);
    Ok(request)
}

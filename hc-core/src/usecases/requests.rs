use super::{authorize_on_request, filter_visible, prelude::*};

/// Loads a single request if the actor may see it.
pub fn get_request<R: Db>(repo: &R, actor: &Actor, id: &Id) -> Result<Request> {
    let request = load_request(repo, id)?;
    authorize_on_request(repo, actor, &request, Action::View)?;
    Ok(request)
}

/// Loads a request and reports a missing one as `NotFound`.
pub fn load_request<R: RequestRepo>(repo: &R, id: &Id) -> Result<Request> {
    repo.get_request(id).map_err(|err| match err {
        RepoError::NotFound => Error::NotFound,
        err => err.into(),
    })
}

/// All requests the actor has created or provides, as far as visible.
pub fn requests_of_actor<R: Db>(repo: &R, actor: &Actor) -> Result<Vec<Request>> {
    let requests = repo.requests_of_user(&actor.id())?;
    filter_visible(repo, actor, requests)
}

/// The accepted transitions of a request, newest first.
pub fn request_history<R: Db>(repo: &R, actor: &Actor, id: &Id) -> Result<Vec<RequestHistory>> {
    let request = get_request(repo, actor, id)?;
    Ok(repo.request_history(&request.id)?)
}

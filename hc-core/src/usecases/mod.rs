mod access_tokens;
mod actor;
mod create_request;
mod delete_request;
mod error;
mod files;
mod housekeeping;
mod meetings;
mod messages;
mod offers;
mod organizations;
mod requests;
mod transition_request;
mod update_request;
mod users;
mod watches;

#[cfg(test)]
pub mod tests;

pub use self::{
    access_tokens::*, actor::*, create_request::*, delete_request::*, error::*, files::*,
    housekeeping::*, meetings::*, messages::*, offers::*, organizations::*, requests::*,
    transition_request::*, update_request::*, users::*, watches::*,
};

mod prelude {
    pub use super::error::Error;
    pub use crate::repositories::Error as RepoError;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        authorization::{Action, Actor},
        db::*,
        entities::*,
        repositories::*,
    };
}

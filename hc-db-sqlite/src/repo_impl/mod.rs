// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use hc_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::{models, schema, util::*, DbConnection};

mod access_token;
mod file;
mod location;
mod meeting;
mod membership;
mod message;
mod organization;
mod potential_provider;
mod request;
mod thread;
mod user;
mod watch;

type Result<T> = std::result::Result<T, repo::Error>;

define_sql_function! {
    fn last_insert_rowid() -> BigInt;
}

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn inserted_rowid(conn: &mut SqliteConnection) -> Result<i64> {
    diesel::select(last_insert_rowid())
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)
}

fn ids_to_strings(ids: &[Id]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

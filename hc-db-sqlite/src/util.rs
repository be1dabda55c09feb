use anyhow::anyhow;
use hc_core::{entities::*, repositories as repo};
use std::str::FromStr;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn load_id(id: &str) -> Result<Id> {
    id.parse()
        .map_err(|err| anyhow!("Invalid id '{id}': {err}").into())
}

pub fn load_opt_id(id: Option<String>) -> Result<Option<Id>> {
    id.as_deref().map(load_id).transpose()
}

pub fn load_date(date: &str) -> Result<Date> {
    parse_date(date).map_err(|err| anyhow!("Invalid date '{date}': {err}").into())
}

pub fn load_opt_date(date: Option<String>) -> Result<Option<Date>> {
    date.as_deref().map(load_date).transpose()
}

pub fn load_email(email: &str) -> Result<EmailAddress> {
    email
        .parse()
        .map_err(|err| anyhow!("Invalid email address '{email}': {err}").into())
}

/// Parses enums that are stored by their name.
pub fn load_named<T>(name: &str) -> Result<T>
where
    T: FromStr,
{
    name.parse()
        .map_err(|_| anyhow!("Invalid value '{name}'").into())
}

pub fn load_primitive<T, P>(primitive: P) -> Result<T>
where
    T: TryFrom<P>,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    T::try_from(primitive).map_err(|err| anyhow::Error::from(err).into())
}

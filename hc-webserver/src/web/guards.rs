use std::{ops::Deref, sync::Arc};

use rocket::{
    self,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

use super::{sqlite, Cfg};
use crate::core::{prelude::*, usecases::Error as ParameterError};
use hc_application::{prelude as flows, visibility_cache::VisibilityCache};
use hc_core::gateways::object_store::ObjectStore;

type Result<T> = std::result::Result<T, AppError>;

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    let x: Vec<_> = auth_header_val.split(' ').collect();
    if x.len() == 2 && x[0] == "Bearer" {
        Some(x[1])
    } else {
        None
    }
}

#[derive(Debug)]
pub struct Auth {
    bearer_tokens: Vec<String>,
}

impl Auth {
    pub fn bearer_tokens(&self) -> &[String] {
        &self.bearer_tokens
    }

    /// The first valid access token of the request.
    pub fn access_token(&self, connections: &sqlite::Connections) -> Result<AccessToken> {
        let mut last_err = None;
        for token in &self.bearer_tokens {
            match flows::authenticate_access_token(connections, token) {
                Ok(access_token) => return Ok(access_token),
                Err(err) => {
                    debug!("Rejected bearer token: {err}");
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ParameterError::Unauthorized.into()))
    }

    pub fn user_id(&self, connections: &sqlite::Connections) -> Result<Id> {
        self.access_token(connections).map(|token| token.user_id)
    }

    /// Checks the shared secret of service integrations.
    pub fn service(&self, service_token: Option<&str>) -> Result<()> {
        match service_token {
            Some(expected) if self.bearer_tokens.iter().any(|t| t == expected) => Ok(()),
            _ => Err(ParameterError::Unauthorized.into()),
        }
    }

    fn bearer_tokens_from_header(request: &Request) -> Vec<String> {
        request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .map(ToOwned::to_owned)
            .collect()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let bearer_tokens = Self::bearer_tokens_from_header(request);
        Outcome::Success(Self { bearer_tokens })
    }
}

/// The deadline of the current request, counted from its arrival.
#[derive(Debug, Clone, Copy)]
pub struct HandlerDeadline(pub Deadline);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for HandlerDeadline {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cfg = try_outcome!(request.guard::<&State<Cfg>>().await);
        Outcome::Success(Self(Deadline::after(cfg.request_timeout)))
    }
}

pub struct Version(pub &'static str);

pub struct Cache(pub Arc<VisibilityCache>);

impl Deref for Cache {
    type Target = VisibilityCache;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct ObjectStorage(pub Box<dyn ObjectStore + Send + Sync>);

impl Deref for ObjectStorage {
    type Target = dyn ObjectStore + Send + Sync;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

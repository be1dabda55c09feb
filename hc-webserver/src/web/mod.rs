use std::{str::FromStr, sync::Arc, time::Duration};

use hc_application::{event_bus::EventBus, visibility_cache::VisibilityCache};
use hc_core::gateways::object_store::ObjectStore;
use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
mod guards;
mod sqlite;


/// Deployment environment of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Test,
    Staging,
    #[default]
    Production,
}

impl Environment {
    /// Whether internal error details may be sent to clients.
    pub fn exposes_error_details(self) -> bool {
        matches!(self, Self::Development | Self::Test)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown environment '{0}'")]
pub struct UnknownEnvironment(String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(UnknownEnvironment(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub environment: Environment,
    /// Shared secret of `POST /service`; the route is closed if missing.
    pub service_token: Option<String>,
    pub request_timeout: Duration,
    /// Messages to the same thread within this period are notified once.
    pub message_delay: Duration,
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            service_token: None,
            request_timeout: Duration::from_secs(30),
            message_delay: Duration::from_secs(60),
        }
    }
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Services {
    db: sqlite::Connections,
    events: EventBus,
    cache: Arc<VisibilityCache>,
    object_store: Box<dyn ObjectStore + Send + Sync>,
}

pub(crate) fn rocket_instance(options: InstanceOptions, services: Services) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Services {
        db,
        events,
        cache,
        object_store,
    } = services;

    info!("Starting web server in {:?} mode", cfg.environment);

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(db)
        .manage(events)
        .manage(guards::Cache(cache))
        .manage(guards::ObjectStorage(object_store))
        .manage(cfg)
        .manage(guards::Version(version));

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance.register("/", api::catchers())
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    events: EventBus,
    cache: Arc<VisibilityCache>,
    object_store: Box<dyn ObjectStore + Send + Sync>,
    enable_cors: bool,
    cfg: Cfg,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let services = Services {
        db,
        events,
        cache,
        object_store,
    };
    let instance = rocket_instance(options, services);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}

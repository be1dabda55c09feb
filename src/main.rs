//! # handcarry
//!
//! Back end of the hand-carry request platform.
//!
//! The configuration is read from `handcarry.toml` (or the file given
//! with `--config-file`). A `.env` file is loaded first and
//! `DATABASE_URL` overrides the configured SQLite database.

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use hc_application::{
    event_bus::EventBus,
    prelude as flows,
    sqlite::{run_embedded_database_migrations, Connections},
    subscribe_event_handlers,
    visibility_cache::VisibilityCache,
};
use hc_core::{
    entities::{Id, OrgRole},
    gateways::object_store::ObjectStore,
    usecases::{self, HousekeepingJob},
};
use hc_gateways::{
    email::{DummyEmailGateway, SendGrid, SendToJsonFile},
    kv::MemoryKvStore,
    notify::Notify,
    object_store::FsObjectStore,
    sendmail::Sendmail,
};

mod config;

use config::{Config, EmailGateway};

#[derive(Parser, Debug)]
#[command(name = "handcarry")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./handcarry.toml)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Allow requests from any origin
        #[arg(long)]
        enable_cors: bool,
    },
    /// Run a single housekeeping job
    Housekeeping {
        /// file_cleanup | location_cleanup | token_cleanup | outdated_requests
        job: String,
    },
    /// Issue a bearer token and print it
    IssueToken {
        #[arg(long)]
        email: String,
        /// Organization id of the membership the token acts for
        #[arg(long)]
        org: Option<String>,
    },
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        nickname: String,
    },
    CreateOrg {
        #[arg(long)]
        name: String,
        /// Email domain whose users join automatically
        #[arg(long)]
        domain: Vec<String>,
    },
    AddMember {
        #[arg(long)]
        email: String,
        /// Organization id
        #[arg(long)]
        org: String,
        #[arg(long)]
        admin: bool,
    },
    /// Create a mutual trust between two organizations
    Trust { org: String, other_org: String },
}

fn parse_id(s: &str) -> Result<Id> {
    s.parse().map_err(|_| anyhow!("Invalid id '{s}'"))
}

fn notification_gateway(cfg: &Config) -> Result<Notify> {
    let ui_url = cfg.webserver.ui_url.clone();
    let notify = match &cfg.email.gateway {
        EmailGateway::Ses { sender_address } => {
            Notify::new(Sendmail::new(sender_address.clone()), ui_url)
        }
        EmailGateway::SendGrid {
            api_key,
            api_url,
            sender_address,
        } => Notify::new(
            SendGrid {
                api_key: api_key.clone(),
                api_url: api_url.clone(),
                from_email: sender_address.clone(),
            },
            ui_url,
        ),
        EmailGateway::EmailToJsonFile { dir } => Notify::new(SendToJsonFile::try_new(dir)?, ui_url),
        EmailGateway::Dummy => {
            log::warn!("No email gateway configured, emails are only logged");
            Notify::new(DummyEmailGateway, ui_url)
        }
    };
    Ok(notify)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config_file.as_ref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size)?;
    log::info!("Running embedded database migrations");
    run_embedded_database_migrations(connections.exclusive()?)?;

    let events = EventBus::new(runtime.handle().clone());
    let cache = Arc::new(VisibilityCache::new(
        Arc::new(MemoryKvStore::new()),
        cfg.cache.clone(),
    ));
    subscribe_event_handlers(
        &events,
        &connections,
        cache.clone(),
        Arc::new(notification_gateway(&cfg)?),
        cfg.email.default_language,
    );

    let object_store = FsObjectStore::try_new(&cfg.object_store.dir, &cfg.object_store.base_url)?;
    if let Some(region) = &cfg.object_store.region {
        log::debug!("Object store region: {region}");
    }
    if cfg.object_store.credentials.is_some() {
        log::debug!("Object store credentials are configured");
    }

    match args.command.unwrap_or(Command::Serve { enable_cors: false }) {
        Command::Serve { enable_cors } => {
            if cfg.auth.session_secret.is_none() {
                log::warn!("No session secret configured");
            }
            for (name, idp) in &cfg.auth.identity_providers {
                log::info!(
                    "Identity provider '{name}' (client '{}', metadata {:?}, secret {})",
                    idp.client_id,
                    idp.metadata_url,
                    if idp.client_secret.is_some() { "set" } else { "missing" }
                );
            }
            let web_cfg = hc_webserver::Cfg {
                environment: cfg.webserver.environment,
                service_token: cfg.webserver.service_token.clone(),
                request_timeout: cfg.webserver.request_timeout,
                message_delay: cfg.notifications.message_delay,
            };
            runtime.block_on(hc_webserver::run(
                connections,
                events,
                cache,
                Box::new(object_store) as Box<dyn ObjectStore + Send + Sync>,
                enable_cors || cfg.webserver.enable_cors,
                web_cfg,
            ));
        }
        Command::Housekeeping { job } => {
            let job = job
                .parse::<HousekeepingJob>()
                .map_err(|_| anyhow!("Unknown housekeeping job '{job}'"))?;
            let count = flows::run_housekeeping_job(&connections, &events, &object_store, job)?;
            runtime.block_on(events.wait_idle());
            log::info!("Housekeeping job {} affected {count} entries", job.as_ref());
        }
        Command::IssueToken { email, org } => {
            let user = flows::find_user_by_email(&connections, &email)?;
            let org_id = org.as_deref().map(parse_id).transpose()?;
            let token =
                flows::issue_access_token(&connections, &user.id, org_id, cfg.auth.token_lifetime)?;
            println!("{token}");
        }
        Command::CreateUser { email, nickname } => {
            let user = flows::create_user(
                &connections,
                usecases::NewUser {
                    email,
                    nickname,
                    ..Default::default()
                },
            )?;
            println!("{}", user.id);
        }
        Command::CreateOrg { name, domain } => {
            let org = flows::create_organization(
                &connections,
                usecases::NewOrganization {
                    name,
                    domains: domain,
                    ..Default::default()
                },
            )?;
            println!("{}", org.id);
        }
        Command::AddMember { email, org, admin } => {
            let user = flows::find_user_by_email(&connections, &email)?;
            let role = if admin { OrgRole::Admin } else { OrgRole::User };
            flows::add_member(&connections, &user.id, &parse_id(&org)?, role)?;
            log::info!("Added {email} to organization {org}");
        }
        Command::Trust { org, other_org } => {
            flows::create_trust(&connections, &cache, &parse_id(&org)?, &parse_id(&other_org)?)?;
            log::info!("Organizations {org} and {other_org} trust each other");
        }
    }
    Ok(())
}

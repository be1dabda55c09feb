use anyhow::{anyhow, bail, Result};
use hc_application::visibility_cache::CacheConfig;
use hc_entities::{email::EmailAddress, user::Language};
use hc_webserver::Environment;
use std::{
    collections::BTreeMap,
    env, fs,
    io::ErrorKind,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "handcarry.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

/// The only key-value store that is bundled.
const IN_MEMORY_KV_ADDRESS: &str = "memory";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub auth: Auth,
    pub email: Email,
    pub object_store: ObjectStore,
    pub cache: CacheConfig,
    pub notifications: Notifications,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub environment: Environment,
    pub ui_url: String,
    pub service_token: Option<String>,
    pub request_timeout: Duration,
}

pub struct Auth {
    pub token_lifetime: time::Duration,
    pub session_secret: Option<String>,
    /// Stored for the identity provider handshake, not interpreted here.
    pub identity_providers: BTreeMap<String, IdentityProvider>,
}

pub struct IdentityProvider {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub metadata_url: Option<String>,
}

pub struct Email {
    pub gateway: EmailGateway,
    pub default_language: Language,
}

#[derive(Clone)]
pub enum EmailGateway {
    /// Relayed through the local `sendmail` that forwards to SES.
    Ses { sender_address: EmailAddress },
    SendGrid {
        api_key: String,
        api_url: String,
        sender_address: EmailAddress,
    },
    /// Only logs the emails
    Dummy,
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct ObjectStore {
    /// Public base URL of the stored files.
    pub base_url: String,
    pub region: Option<String>,
    pub credentials: Option<(String, String)>,
    /// Local directory of the bundled implementation.
    pub dir: PathBuf,
}

pub struct Notifications {
    pub message_delay: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            auth,
            email,
            gateway,
            object_store,
            cache,
            notifications,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            cors,
            environment,
            ui_url,
            service_token,
            request_timeout,
        } = webserver.unwrap_or_default();

        let webserver = WebServer {
            enable_cors: cors,
            environment: environment.parse()?,
            ui_url,
            service_token: service_token.filter(|t| !t.trim().is_empty()),
            request_timeout,
        };

        let raw::Auth {
            token_lifetime,
            session_secret,
            identity_providers,
        } = auth.unwrap_or_default();

        let auth = Auth {
            token_lifetime: token_lifetime.try_into()?,
            session_secret,
            identity_providers: identity_providers
                .into_iter()
                .map(|(name, idp)| {
                    let raw::IdentityProvider {
                        client_id,
                        client_secret,
                        metadata_url,
                    } = idp;
                    let idp = IdentityProvider {
                        client_id,
                        client_secret,
                        metadata_url,
                    };
                    (name, idp)
                })
                .collect(),
        };

        let raw::Email {
            service,
            from,
            default_locale,
        } = email.unwrap_or_default();

        let default_language = default_locale
            .parse::<Language>()
            .map_err(|_| anyhow!("Unsupported default locale '{default_locale}'"))?;
        let sender_address = || {
            from.parse::<EmailAddress>()
                .map_err(|_| anyhow!("Invalid sender address '{from}'"))
        };
        let gateway = gateway.unwrap_or_default();
        let email_gateway = match service {
            Some(raw::EmailService::Ses) => {
                log::info!("Use SES gateway via sendmail");
                EmailGateway::Ses {
                    sender_address: sender_address()?,
                }
            }
            Some(raw::EmailService::Sendgrid) => {
                let raw::SendGrid { api_key, api_url } = gateway
                    .sendgrid
                    .ok_or_else(|| anyhow!("Missing 'sendgrid' gateway configuration"))?;
                log::info!("Use SendGrid gateway");
                EmailGateway::SendGrid {
                    api_key,
                    api_url: api_url
                        .unwrap_or_else(|| hc_gateways::email::DEFAULT_API_URL.to_owned()),
                    sender_address: sender_address()?,
                }
            }
            Some(raw::EmailService::EmailToJsonFile) => {
                let raw::EmailToJsonFile { dir } = gateway
                    .email_to_json_file
                    .ok_or_else(|| anyhow!("Missing 'email-to-json-file' gateway configuration"))?;
                log::info!("Use JSON file email gateway ({})", dir.display());
                EmailGateway::EmailToJsonFile { dir }
            }
            Some(raw::EmailService::Dummy) | None => EmailGateway::Dummy,
        };

        let email = Email {
            gateway: email_gateway,
            default_language,
        };

        let raw::ObjectStore {
            endpoint,
            region,
            bucket,
            access_key,
            secret_key,
            dir,
        } = object_store.unwrap_or_default();

        let object_store = ObjectStore {
            base_url: format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            region,
            credentials: access_key.zip(secret_key),
            dir,
        };

        let raw::Cache {
            kv_address,
            ttl,
            local_capacity,
            local_ttl,
        } = cache.unwrap_or_default();

        if kv_address != IN_MEMORY_KV_ADDRESS {
            bail!("Unsupported key-value store '{kv_address}'");
        }
        let cache = CacheConfig {
            ttl,
            local_capacity: NonZeroUsize::new(local_capacity)
                .ok_or_else(|| anyhow!("The local cache capacity must not be zero"))?,
            local_ttl: local_ttl.unwrap_or(Duration::ZERO),
        };

        let raw::Notifications { message_delay } = notifications.unwrap_or_default();
        let notifications = Notifications { message_delay };

        Ok(Self {
            db,
            webserver,
            auth,
            email,
            object_store,
            cache,
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!(cfg.webserver.environment, Environment::Production);
        assert!(cfg.webserver.service_token.is_none());
        assert!(matches!(cfg.email.gateway, EmailGateway::Dummy));
        assert_eq!(cfg.email.default_language, Language::En);
        assert_eq!(cfg.object_store.base_url, "http://localhost:8000/files");
        assert_eq!(cfg.auth.token_lifetime, time::Duration::days(30));
    }

    #[test]
    fn reject_unknown_kv_store() {
        let raw: raw::Config = toml::from_str(
            r#"
            [cache]
            kv-address = "redis://localhost"
            ttl = "1h"
            local-capacity = 16
            "#,
        )
        .unwrap();
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn sendgrid_needs_gateway_config() {
        let raw: raw::Config = toml::from_str(
            r#"
            [email]
            service = "sendgrid"
            from = "no-reply@handcarry.test"
            default-locale = "fr"
            "#,
        )
        .unwrap();
        assert!(Config::try_from(raw).is_err());

        let raw: raw::Config = toml::from_str(
            r#"
            [email]
            service = "sendgrid"
            from = "no-reply@handcarry.test"
            default-locale = "fr"

            [gateway.sendgrid]
            api-key = "key"
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.email.default_language, Language::Fr);
        assert!(matches!(
            cfg.email.gateway,
            EmailGateway::SendGrid { ref api_url, .. } if api_url == hc_gateways::email::DEFAULT_API_URL
        ));
    }
}

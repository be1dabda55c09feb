use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("handcarry.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub auth: Option<Auth>,
    pub email: Option<Email>,
    pub gateway: Option<Gateway>,
    pub object_store: Option<ObjectStore>,
    pub cache: Option<Cache>,
    pub notifications: Option<Notifications>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u32,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    pub environment: String,
    pub ui_url: String,
    pub service_token: Option<String>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Auth {
    #[serde(deserialize_with = "deserialize_duration")]
    pub token_lifetime: Duration,
    pub session_secret: Option<String>,
    #[serde(default)]
    pub identity_providers: BTreeMap<String, IdentityProvider>,
}

impl Default for Auth {
    fn default() -> Self {
        Config::default().auth.expect("Auth configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IdentityProvider {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub metadata_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Email {
    pub service: Option<EmailService>,
    pub from: String,
    pub default_locale: String,
}

impl Default for Email {
    fn default() -> Self {
        Config::default().email.expect("Email configuration")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailService {
    Ses,
    Sendgrid,
    Dummy,
    EmailToJsonFile,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub sendgrid: Option<SendGrid>,
    pub email_to_json_file: Option<EmailToJsonFile>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SendGrid {
    pub api_key: String,
    pub api_url: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailToJsonFile {
    pub dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectStore {
    pub endpoint: String,
    pub region: Option<String>,
    pub bucket: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub dir: PathBuf,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Config::default()
            .object_store
            .expect("Object store configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cache {
    pub kv_address: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub ttl: Duration,
    pub local_capacity: usize,
    #[serde(deserialize_with = "deserialize_option_duration", default)]
    pub local_ttl: Option<Duration>,
}

impl Default for Cache {
    fn default() -> Self {
        Config::default().cache.expect("Cache configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Notifications {
    #[serde(deserialize_with = "deserialize_duration")]
    pub message_delay: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Config::default()
            .notifications
            .expect("Notifications configuration")
    }
}

use hc_core::{entities::Timestamp, gateways::email::EmailGateway};
use hc_entities::email::*;
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{io, path::Path};

/// Stores every email as a JSON file instead of sending it.
pub struct SendToJsonFile {
    json_store: Store,
}

impl SendToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailGateway for SendToJsonFile {
    fn compose_and_send(&self, recipients: &[EmailAddress], content: &EmailContent) {
        for (i, to) in recipients.iter().enumerate() {
            let now = Timestamp::now().as_millis();
            let key = format!("{now}-{i}-{}", to.as_str());
            let email = JsonEmail {
                to: to.as_str().to_owned(),
                subject: content.subject.clone(),
                body: content.body.clone(),
            };
            if let Err(err) = self.json_store.save_with_id(&email, &key) {
                log::warn!("Unable to save email in JSON file: {err}");
            }
        }
    }
}

use anyhow::Result;
use hc_entities::email::*;
use serde::Serialize;
use std::thread;

use super::EmailGateway;

pub const DEFAULT_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// An email gateway based on the SendGrid v3 API.
#[derive(Debug, Clone)]
pub struct SendGrid {
    pub api_key: String,
    pub api_url: String,
    pub from_email: EmailAddress,
}

#[derive(Debug, Serialize)]
struct Address {
    email: String,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Serialize)]
struct Content {
    r#type: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct Mail {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
}

impl SendGrid {
    fn mail(&self, to: &EmailAddress, email: &EmailContent) -> Mail {
        Mail {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: to.as_str().to_owned(),
                }],
            }],
            from: Address {
                email: self.from_email.as_str().to_owned(),
            },
            subject: email.subject.clone(),
            content: vec![Content {
                r#type: "text/plain",
                value: email.body.clone(),
            }],
        }
    }

    fn send(&self, mails: Vec<Mail>) {
        let url = self.api_url.clone();
        let key = self.api_key.clone();
        thread::spawn(move || {
            for mail in mails {
                if let Err(err) = send_raw(&url, &key, &mail) {
                    log::warn!("Could not send e-mail: {err}");
                }
            }
        });
    }
}

#[derive(Debug, serde::Deserialize, thiserror::Error)]
#[error("{errors:?}")]
struct JsonError {
    errors: Vec<JsonErrorMessage>,
}

#[derive(Debug, serde::Deserialize)]
#[allow(dead_code)]
struct JsonErrorMessage {
    message: String,
}

#[cfg(not(test))]
fn send_raw(url: &str, api_key: &str, mail: &Mail) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let response = client.post(url).bearer_auth(api_key).json(mail).send()?;
    if response.status().is_success() {
        log::debug!("Mail provider response: {:#?}", response);
        Ok(())
    } else {
        let json_error: JsonError = response.json()?;
        Err(json_error.into())
    }
}

/// Don't actually send emails while running the tests.
#[cfg(test)]
fn send_raw(_: &str, _: &str, mail: &Mail) -> Result<()> {
    log::debug!("Would send e-mail: {mail:?}");
    Ok(())
}

impl EmailGateway for SendGrid {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        if recipients.is_empty() {
            log::warn!("No valid email addresses specified");
            return;
        }
        log::debug!(
            "Sending e-mails from {} to: {:?}",
            self.from_email,
            recipients
        );
        // One mail per recipient to keep addresses private
        let mails = recipients.iter().map(|to| self.mail(to, email)).collect();
        self.send(mails);
    }
}

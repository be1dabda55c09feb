use std::sync::Arc;

use hc_core::gateways::notify::{Notification, NotificationGateway};

use crate::{email::EmailGateway, user_communication};

/// Renders notifications in the language of the recipient
/// and hands them over to an email gateway.
#[derive(Clone)]
pub struct Notify {
    email_gw: Arc<dyn EmailGateway + Send + Sync + 'static>,
    ui_url: String,
}

impl Notify {
    pub fn new<G>(gw: G, ui_url: impl Into<String>) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self {
            email_gw: Arc::new(gw),
            ui_url: ui_url.into(),
        }
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, notification: Notification) {
        let Notification {
            template,
            recipient,
            language,
            data,
        } = notification;
        match user_communication::notification_email(template, language, &data, &self.ui_url) {
            Ok(content) => {
                log::info!(
                    "Sending '{}' e-mail to {recipient}",
                    template.as_ref()
                );
                self.email_gw.compose_and_send(&[recipient], &content);
            }
            Err(err) => {
                log::warn!("Failed to render '{}' e-mail: {err}", template.as_ref());
            }
        }
    }
}

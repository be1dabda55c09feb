pub use hc_core::gateways::email::EmailGateway;
use hc_entities::email::*;

mod send_to_json_file;
mod sendgrid;

pub use self::{send_to_json_file::*, sendgrid::*};

/// Only logs the emails that would have been sent.
#[derive(Debug, Clone, Default)]
pub struct DummyEmailGateway;

impl EmailGateway for DummyEmailGateway {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        for to in recipients {
            log::info!("Would send e-mail to {to}: {}", email.subject);
            log::debug!("{}", email.body);
        }
    }
}

use hc_entities::email::*;

pub trait EmailGateway {
    // TODO: Make this async
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent);
}

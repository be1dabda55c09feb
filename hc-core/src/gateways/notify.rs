use hc_entities::{email::EmailAddress, id::Id, user::Language};

use crate::notification::Template;

/// Everything that is needed to render a message.
#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationData {
    pub request_id      : Option<Id>,
    pub request_title   : Option<String>,
    pub actor_name      : Option<String>,
    pub message_excerpt : Option<String>,
    pub meeting_id      : Option<Id>,
    pub meeting_name    : Option<String>,
    pub invite_token    : Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub template: Template,
    pub recipient: EmailAddress,
    pub language: Language,
    pub data: NotificationData,
}

pub trait NotificationGateway {
    fn notify(&self, notification: Notification);
}

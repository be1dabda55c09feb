//! Turns lifecycle events into notifications.

use std::{collections::HashMap, sync::Arc};

use hc_core::{
    events::LifecycleEvent,
    gateways::notify::{Notification, NotificationData, NotificationGateway},
    notification::{notification_plan, PlanContext, Recipient},
};

use super::*;
use crate::event_bus::EventHandler;

pub struct NotificationDispatcher {
    connections: sqlite::Connections,
    notify: Arc<dyn NotificationGateway + Send + Sync>,
    default_language: Language,
}

impl NotificationDispatcher {
    pub fn new(
        connections: sqlite::Connections,
        notify: Arc<dyn NotificationGateway + Send + Sync>,
        default_language: Language,
    ) -> Self {
        Self {
            connections,
            notify,
            default_language,
        }
    }

    /// Sends all planned notifications and returns their number.
    pub fn dispatch(&self, event: &LifecycleEvent) -> Result<usize> {
        let notifications = self
            .connections
            .shared()?
            .transaction(|db| prepare_notifications(db, event, self.default_language))?;
        let count = notifications.len();
        for notification in notifications {
            log::debug!(
                "Sending {} notification to {}",
                notification.template.as_ref(),
                notification.recipient
            );
            self.notify.notify(notification);
        }
        Ok(count)
    }
}

impl EventHandler for NotificationDispatcher {
    fn handle_event(&self, event: &LifecycleEvent) {
        if let Err(err) = self.dispatch(event) {
            log::error!(
                "Failed to send notifications for {} event of {}: {err}",
                event.kind().as_ref(),
                event.entity_id()
            );
        }
    }
}

fn plan_context<R: Db>(repo: &R, event: &LifecycleEvent) -> std::result::Result<PlanContext, usecases::Error> {
    let mut context = PlanContext::default();
    match event {
        LifecycleEvent::RequestCreated { request } => {
            context.watcher_ids = usecases::watchers_of_request(repo, request)?;
        }
        LifecycleEvent::MessageCreated { message, .. } => {
            context.thread_participant_ids = repo
                .thread_participants(&message.thread_id)?
                .into_iter()
                .map(|p| p.user_id)
                .collect();
        }
        _ => {}
    }
    Ok(context)
}

/// The user whose action caused the event.
fn acting_user_id(event: &LifecycleEvent) -> Option<Id> {
    use LifecycleEvent as E;
    match event {
        E::RequestCreated { request } | E::RequestUpdated { request } => Some(request.creator_id),
        E::RequestStatusChanged { change, .. } => Some(change.actor_id),
        E::MessageCreated { message, .. } => Some(message.sender_id),
        E::PotentialProviderAdded { user_id, .. } | E::PotentialProviderSelfRemoved { user_id, .. } => {
            Some(*user_id)
        }
        E::PotentialProviderRejected { request, .. } => Some(request.creator_id),
        E::MeetingInviteCreated { invite, .. } => Some(invite.inviter_id),
        E::RequestDeleted { .. } | E::RequestOutdated { .. } => None,
    }
}

fn notification_data(event: &LifecycleEvent, actor: Option<&User>) -> NotificationData {
    let mut data = NotificationData {
        actor_name: actor.map(User::display_name),
        ..Default::default()
    };
    if let Some(request) = event.request() {
        data.request_id = Some(request.id);
        data.request_title = Some(request.title.clone());
    }
    match event {
        LifecycleEvent::MessageCreated { message, .. } => {
            data.message_excerpt = Some(message.content.clone());
        }
        LifecycleEvent::MeetingInviteCreated { meeting, invite } => {
            data.meeting_id = Some(meeting.id);
            data.meeting_name = Some(meeting.name.clone());
            data.invite_token = Some(invite.secret_token.clone());
        }
        _ => {}
    }
    data
}

fn prepare_notifications<R: Db>(
    repo: &R,
    event: &LifecycleEvent,
    default_language: Language,
) -> std::result::Result<Vec<Notification>, usecases::Error> {
    let context = plan_context(repo, event)?;
    let messages = notification_plan(event, &context);
    if messages.is_empty() {
        return Ok(vec![]);
    }
    let actor_id = acting_user_id(event);
    let mut user_ids: Vec<_> = messages
        .iter()
        .filter_map(|m| match m.recipient {
            Recipient::User(id) => Some(id),
            Recipient::Email(_) => None,
        })
        .collect();
    user_ids.extend(actor_id);
    let users: HashMap<_, _> = repo
        .get_users(&user_ids)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let data = notification_data(event, actor_id.and_then(|id| users.get(&id)));
    let notifications = messages
        .into_iter()
        .filter_map(|message| {
            let (recipient, language) = match message.recipient {
                Recipient::User(id) => {
                    let Some(user) = users.get(&id) else {
                        log::warn!("Dropping notification for unknown user {id}");
                        return None;
                    };
                    (user.email.clone(), user.preferences.language)
                }
                Recipient::Email(email) => (email, default_language),
            };
            Some(Notification {
                template: message.template,
                recipient,
                language,
                data: data.clone(),
            })
        })
        .collect();
    Ok(notifications)
}

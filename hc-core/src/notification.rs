//! Maps lifecycle events to outbound messages.
//!
//! The plan only decides about templates and recipients. Rendering,
//! localization and transport are left to the notification gateway.

use strum::{AsRefStr, EnumIter};

use crate::{
    entities::*,
    events::{LifecycleEvent, StatusChange},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Template {
    RequestCreated,
    RequestAccepted,
    OfferDeclined,
    RequestReverted,
    RequestDelivered,
    RequestCompleted,
    RequestRemoved,
    RequestReturned,
    RequestNotReceived,
    RequestOutdated,
    MessageCreated,
    OfferAdded,
    OfferWithdrawn,
    OfferRejected,
    MeetingInvite,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    User(Id),
    Email(EmailAddress),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub template: Template,
    pub recipient: Recipient,
}

/// Recipients that cannot be derived from the event itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanContext {
    /// Owners of matching watches that may see the new request.
    pub watcher_ids: Vec<Id>,
    /// All participants of the thread of a new message.
    pub thread_participant_ids: Vec<Id>,
}

fn to_user(template: Template, user_id: Id) -> OutboundMessage {
    OutboundMessage {
        template,
        recipient: Recipient::User(user_id),
    }
}

fn status_change_plan(request: &Request, change: &StatusChange) -> Vec<OutboundMessage> {
    use RequestStatus as S;
    use Template as T;
    let creator = request.creator_id;
    let provider = change.new_provider_id.or(change.old_provider_id);
    let to_provider = |template| provider.map(|id| to_user(template, id));
    match (change.old_status, change.new_status) {
        (S::Open, S::Accepted) => to_provider(T::RequestAccepted)
            .into_iter()
            .chain(
                change
                    .rejected_potential_provider_ids
                    .iter()
                    .map(|id| to_user(T::OfferDeclined, *id)),
            )
            .collect(),
        (S::Accepted, S::Open) => change
            .old_provider_id
            .map(|id| to_user(T::RequestReverted, id))
            .into_iter()
            .collect(),
        (S::Accepted, S::Delivered) => vec![to_user(T::RequestDelivered, creator)],
        (S::Accepted, S::Received | S::Completed) | (S::Delivered, S::Completed) => {
            to_provider(T::RequestCompleted).into_iter().collect()
        }
        (S::Accepted, S::Removed) => change
            .old_provider_id
            .map(|id| to_user(T::RequestRemoved, id))
            .into_iter()
            .collect(),
        (S::Delivered, S::Accepted) => vec![to_user(T::RequestReturned, creator)],
        (S::Completed, S::Accepted | S::Delivered) => {
            to_provider(T::RequestNotReceived).into_iter().collect()
        }
        _ => vec![],
    }
}

pub fn notification_plan(event: &LifecycleEvent, context: &PlanContext) -> Vec<OutboundMessage> {
    use LifecycleEvent as E;
    use Template as T;
    let mut messages = match event {
        E::RequestCreated { request } => context
            .watcher_ids
            .iter()
            .filter(|id| **id != request.creator_id)
            .map(|id| to_user(T::RequestCreated, *id))
            .collect(),
        E::RequestStatusChanged { request, change } => status_change_plan(request, change),
        E::RequestOutdated { request } => vec![to_user(T::RequestOutdated, request.creator_id)],
        E::MessageCreated {
            message,
            coalesced_sender_ids,
            ..
        } => context
            .thread_participant_ids
            .iter()
            // Everyone who has not written all of the messages
            .filter(|id| **id != message.sender_id || coalesced_sender_ids.iter().any(|s| s != *id))
            .map(|id| to_user(T::MessageCreated, *id))
            .collect(),
        E::PotentialProviderAdded { request, .. } => {
            vec![to_user(T::OfferAdded, request.creator_id)]
        }
        E::PotentialProviderSelfRemoved { request, .. } => {
            vec![to_user(T::OfferWithdrawn, request.creator_id)]
        }
        E::PotentialProviderRejected { user_id, .. } => vec![to_user(T::OfferRejected, *user_id)],
        E::MeetingInviteCreated { invite, .. } => vec![OutboundMessage {
            template: T::MeetingInvite,
            recipient: Recipient::Email(invite.invitee_email.clone()),
        }],
        E::RequestUpdated { .. } | E::RequestDeleted { .. } => vec![],
    };
    // One message per recipient and template
    let mut seen = std::collections::HashSet::new();
    messages.retain(|m| seen.insert((m.template, m.recipient.clone())));
    messages
}

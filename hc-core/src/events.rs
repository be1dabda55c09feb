//! Typed lifecycle events that are published after a transaction
//! has been committed.

use strum::AsRefStr;

use crate::entities::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    RequestCreated,
    RequestUpdated,
    RequestStatusChanged,
    RequestDeleted,
    RequestOutdated,
    MessageCreated,
    PotentialProviderAdded,
    PotentialProviderSelfRemoved,
    PotentialProviderRejected,
    MeetingInviteCreated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub actor_id: Id,
    pub old_status: RequestStatus,
    pub new_status: RequestStatus,
    pub old_provider_id: Option<Id>,
    pub new_provider_id: Option<Id>,
    /// Potential providers that have been dropped when the
    /// request was accepted by someone else.
    pub rejected_potential_provider_ids: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    RequestCreated {
        request: Request,
    },
    RequestUpdated {
        request: Request,
    },
    RequestStatusChanged {
        request: Request,
        change: StatusChange,
    },
    RequestDeleted {
        request: Request,
    },
    RequestOutdated {
        request: Request,
    },
    MessageCreated {
        request: Request,
        message: Message,
        /// Senders of earlier messages that have been coalesced
        /// into this event.
        coalesced_sender_ids: Vec<Id>,
    },
    PotentialProviderAdded {
        request: Request,
        user_id: Id,
    },
    PotentialProviderSelfRemoved {
        request: Request,
        user_id: Id,
    },
    PotentialProviderRejected {
        request: Request,
        user_id: Id,
    },
    MeetingInviteCreated {
        meeting: Meeting,
        invite: MeetingInvite,
    },
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        use LifecycleEvent as E;
        match self {
            E::RequestCreated { .. } => EventKind::RequestCreated,
            E::RequestUpdated { .. } => EventKind::RequestUpdated,
            E::RequestStatusChanged { .. } => EventKind::RequestStatusChanged,
            E::RequestDeleted { .. } => EventKind::RequestDeleted,
            E::RequestOutdated { .. } => EventKind::RequestOutdated,
            E::MessageCreated { .. } => EventKind::MessageCreated,
            E::PotentialProviderAdded { .. } => EventKind::PotentialProviderAdded,
            E::PotentialProviderSelfRemoved { .. } => EventKind::PotentialProviderSelfRemoved,
            E::PotentialProviderRejected { .. } => EventKind::PotentialProviderRejected,
            E::MeetingInviteCreated { .. } => EventKind::MeetingInviteCreated,
        }
    }

    /// The entity that is used to coalesce delayed deliveries.
    ///
    /// Messages are coalesced per thread.
    pub fn entity_id(&self) -> Id {
        use LifecycleEvent as E;
        match self {
            E::RequestCreated { request }
            | E::RequestUpdated { request }
            | E::RequestStatusChanged { request, .. }
            | E::RequestDeleted { request }
            | E::RequestOutdated { request }
            | E::PotentialProviderAdded { request, .. }
            | E::PotentialProviderSelfRemoved { request, .. }
            | E::PotentialProviderRejected { request, .. } => request.id,
            E::MessageCreated { message, .. } => message.thread_id,
            E::MeetingInviteCreated { meeting, .. } => meeting.id,
        }
    }

    /// The request that has been changed, if any.
    pub fn request(&self) -> Option<&Request> {
        use LifecycleEvent as E;
        match self {
            E::RequestCreated { request }
            | E::RequestUpdated { request }
            | E::RequestStatusChanged { request, .. }
            | E::RequestDeleted { request }
            | E::RequestOutdated { request }
            | E::MessageCreated { request, .. }
            | E::PotentialProviderAdded { request, .. }
            | E::PotentialProviderSelfRemoved { request, .. }
            | E::PotentialProviderRejected { request, .. } => Some(request),
            E::MeetingInviteCreated { .. } => None,
        }
    }

    /// Merges a later event of the same kind and entity into this one.
    ///
    /// The later event wins, but the senders of coalesced messages
    /// are kept so that nobody misses a notification.
    pub fn coalesce(self, later: Self) -> Self {
        use LifecycleEvent as E;
        match (self, later) {
            (
                E::MessageCreated {
                    message: earlier,
                    coalesced_sender_ids: mut sender_ids,
                    ..
                },
                E::MessageCreated {
                    request,
                    message,
                    coalesced_sender_ids,
                },
            ) => {
                for id in std::iter::once(earlier.sender_id).chain(coalesced_sender_ids) {
                    if !sender_ids.contains(&id) {
                        sender_ids.push(id);
                    }
                }
                E::MessageCreated {
                    request,
                    message,
                    coalesced_sender_ids: sender_ids,
                }
            }
            (_, later) => later,
        }
    }

    /// Whether the event changes which requests an observer sees.
    pub fn affects_visibility(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::RequestCreated
                | EventKind::RequestUpdated
                | EventKind::RequestStatusChanged
                | EventKind::RequestDeleted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_entities::builders::*;

    #[test]
    fn messages_are_keyed_by_thread() {
        let request = Request::build().finish();
        let message = Message {
            id: Id::new(),
            thread_id: Id::new(),
            sender_id: Id::new(),
            content: "hi".into(),
            created_at: Timestamp::now(),
        };
        let thread_id = message.thread_id;
        let event = LifecycleEvent::MessageCreated {
            request,
            message,
            coalesced_sender_ids: vec![],
        };
        assert_eq!(event.kind(), EventKind::MessageCreated);
        assert_eq!(event.entity_id(), thread_id);
        assert!(!event.affects_visibility());
    }

    #[test]
    fn offers_do_not_affect_visibility() {
        let request = Request::build().finish();
        let event = LifecycleEvent::PotentialProviderAdded {
            request,
            user_id: Id::new(),
        };
        assert!(!event.affects_visibility());
        assert_eq!(event.kind().as_ref(), "potential_provider_added");
    }

    fn message(thread_id: Id, sender_id: Id) -> Message {
        Message {
            id: Id::new(),
            thread_id,
            sender_id,
            content: "hi".into(),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn coalesced_messages_keep_all_senders() {
        let request = Request::build().finish();
        let thread_id = Id::new();
        let (alice, bob) = (Id::new(), Id::new());
        let event = |sender_id| LifecycleEvent::MessageCreated {
            request: request.clone(),
            message: message(thread_id, sender_id),
            coalesced_sender_ids: vec![],
        };
        let merged = event(alice).coalesce(event(alice)).coalesce(event(bob));
        let LifecycleEvent::MessageCreated {
            message,
            coalesced_sender_ids,
            ..
        } = merged
        else {
            panic!("unexpected event");
        };
        assert_eq!(message.sender_id, bob);
        assert_eq!(coalesced_sender_ids, vec![alice]);
    }

    #[test]
    fn other_events_are_replaced() {
        let request = Request::build().finish();
        let updated = Request {
            title: "Updated".into(),
            ..request.clone()
        };
        let merged = LifecycleEvent::RequestUpdated { request }.coalesce(LifecycleEvent::RequestUpdated {
            request: updated.clone(),
        });
        assert_eq!(merged, LifecycleEvent::RequestUpdated { request: updated });
    }
}

// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.
//
// All repositories operate within the transaction of the
// handle they are implemented for.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The version of the object is invalid")]
    InvalidVersion,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &Id) -> Result<User>;
    fn get_users(&self, ids: &[Id]) -> Result<Vec<User>>;
    fn all_users(&self) -> Result<Vec<User>>;

    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // Case-insensitive
    fn try_get_user_by_nickname(&self, nickname: &str) -> Result<Option<User>>;
}

pub trait OrganizationRepo {
    fn create_org(&self, org: &Organization) -> Result<()>;
    fn get_org(&self, id: &Id) -> Result<Organization>;
    fn get_orgs(&self, ids: &[Id]) -> Result<Vec<Organization>>;
    fn all_orgs(&self) -> Result<Vec<Organization>>;

    fn add_org_domain(&self, domain: &OrganizationDomain) -> Result<()>;
    fn find_orgs_by_domain(&self, domain: &str) -> Result<Vec<Organization>>;

    // A single direction
    fn create_trust(&self, trust: &OrganizationTrust) -> Result<()>;
    fn delete_trust(&self, trust: &OrganizationTrust) -> Result<usize>;
    fn trusted_org_ids(&self, org_id: &Id) -> Result<Vec<Id>>;
}

pub trait MembershipRepo {
    fn add_membership(&self, membership: &UserOrganization) -> Result<()>;
    fn remove_membership(&self, user_id: &Id, org_id: &Id) -> Result<usize>;
    fn memberships_of_user(&self, user_id: &Id) -> Result<Vec<UserOrganization>>;
    fn memberships_of_orgs(&self, org_ids: &[Id]) -> Result<Vec<UserOrganization>>;
}

pub trait AccessTokenRepo {
    fn create_access_token(&self, token: &AccessToken) -> Result<()>;
    fn get_access_token(&self, token_hash: &str) -> Result<AccessToken>;
    fn delete_access_token(&self, token_hash: &str) -> Result<usize>;
    fn delete_expired_access_tokens(&self, expired_before: Timestamp) -> Result<usize>;
}

pub trait RequestRepo {
    fn create_request(&self, request: &Request) -> Result<()>;

    // Updates all fields except status, provider and completion date.
    fn update_request(&self, request: &Request) -> Result<()>;

    // Updates status, provider and completion date, but only if the
    // stored status still equals `expected_status`. Otherwise fails
    // with `Error::InvalidVersion`.
    fn update_request_status(&self, request: &Request, expected_status: RequestStatus)
        -> Result<()>;

    // Deletes the request and everything it owns.
    fn delete_request(&self, id: &Id) -> Result<()>;

    fn get_request(&self, id: &Id) -> Result<Request>;
    fn get_requests(&self, ids: &[Id]) -> Result<Vec<Request>>;
    fn all_requests(&self) -> Result<Vec<Request>>;

    // Neither completed nor removed and visible to all users.
    fn active_public_requests(&self) -> Result<Vec<Request>>;
    // Neither completed nor removed and restricted in visibility.
    fn active_private_requests_of_org(&self, org_id: &Id) -> Result<Vec<Request>>;
    // Neither completed nor removed and only visible by invitation.
    fn active_invite_only_requests(&self) -> Result<Vec<Request>>;
    // Created or provided by the user, in any status.
    fn requests_of_user(&self, user_id: &Id) -> Result<Vec<Request>>;
    // Open with a needed-before date before the given date.
    fn outdated_open_requests(&self, today: Date) -> Result<Vec<Request>>;
}

pub trait RequestHistoryRepo {
    fn add_request_history(&self, entry: &RequestHistory) -> Result<()>;
    // Newest first
    fn request_history(&self, request_id: &Id) -> Result<Vec<RequestHistory>>;
}

pub trait PotentialProviderRepo {
    // Fails with `Error::AlreadyExists` on duplicates.
    fn add_potential_provider(&self, potential_provider: &PotentialProvider) -> Result<()>;
    fn delete_potential_provider(&self, request_id: &Id, user_id: &Id) -> Result<usize>;
    fn delete_potential_providers(&self, request_id: &Id) -> Result<usize>;
    fn potential_providers(&self, request_id: &Id) -> Result<Vec<PotentialProvider>>;
}

pub trait ThreadRepo {
    fn create_thread(&self, thread: &Thread) -> Result<()>;
    fn touch_thread(&self, id: &Id, updated_at: Timestamp) -> Result<()>;
    fn get_thread(&self, id: &Id) -> Result<Thread>;
    fn threads_of_request(&self, request_id: &Id) -> Result<Vec<Thread>>;
    // Most recently updated first
    fn threads_of_user(&self, user_id: &Id) -> Result<Vec<Thread>>;

    // Does nothing if the user already participates.
    fn add_thread_participant(&self, participant: &ThreadParticipant) -> Result<()>;
    fn thread_participants(&self, thread_id: &Id) -> Result<Vec<ThreadParticipant>>;
    fn set_last_viewed_at(&self, thread_id: &Id, user_id: &Id, viewed_at: Timestamp)
        -> Result<()>;
}

pub trait MessageRepo {
    fn create_message(&self, message: &Message) -> Result<()>;
    // Oldest first
    fn messages_of_thread(&self, thread_id: &Id) -> Result<Vec<Message>>;
    // Messages of others newer than the last view of the user
    fn count_unread_messages(&self, thread_id: &Id, user_id: &Id) -> Result<u64>;
}

pub trait MeetingRepo {
    fn create_meeting(&self, meeting: &Meeting) -> Result<()>;
    fn get_meeting(&self, id: &Id) -> Result<Meeting>;
    fn all_meetings(&self) -> Result<Vec<Meeting>>;

    fn add_meeting_participant(&self, participant: &MeetingParticipant) -> Result<()>;
    fn meeting_participants(&self, meeting_id: &Id) -> Result<Vec<MeetingParticipant>>;

    fn create_meeting_invite(&self, invite: &MeetingInvite) -> Result<()>;
    fn meeting_invites(&self, meeting_id: &Id) -> Result<Vec<MeetingInvite>>;
}

pub trait WatchRepo {
    fn create_watch(&self, watch: &Watch) -> Result<()>;
    fn get_watch(&self, id: &Id) -> Result<Watch>;
    fn delete_watch(&self, id: &Id) -> Result<()>;
    fn watches_of_user(&self, owner_id: &Id) -> Result<Vec<Watch>>;
    fn all_watches(&self) -> Result<Vec<Watch>>;
}

pub trait FileRepo {
    fn create_file(&self, file: &File) -> Result<()>;
    fn get_file(&self, id: &Id) -> Result<File>;
    // Files that are neither a request photo nor a user avatar
    // nor a meeting image.
    fn unreferenced_files(&self, created_before: Timestamp) -> Result<Vec<File>>;
    fn delete_file(&self, id: &Id) -> Result<()>;
}

pub trait LocationRepo {
    // Removes locations that are no longer referenced by any entity.
    fn delete_orphaned_locations(&self) -> Result<usize>;
}

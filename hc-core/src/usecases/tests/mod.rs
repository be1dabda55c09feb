use std::cell::RefCell;

use super::prelude::*;


type RepoResult<T> = std::result::Result<T, RepoError>;

#[derive(Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub orgs: RefCell<Vec<Organization>>,
    pub org_domains: RefCell<Vec<OrganizationDomain>>,
    pub trusts: RefCell<Vec<OrganizationTrust>>,
    pub memberships: RefCell<Vec<UserOrganization>>,
    pub access_tokens: RefCell<Vec<AccessToken>>,
    pub requests: RefCell<Vec<Request>>,
    pub history: RefCell<Vec<RequestHistory>>,
    pub potential_providers: RefCell<Vec<PotentialProvider>>,
    pub threads: RefCell<Vec<Thread>>,
    pub thread_participants: RefCell<Vec<ThreadParticipant>>,
    pub messages: RefCell<Vec<Message>>,
    pub meetings: RefCell<Vec<Meeting>>,
    pub meeting_participants: RefCell<Vec<MeetingParticipant>>,
    pub meeting_invites: RefCell<Vec<MeetingInvite>>,
    pub watches: RefCell<Vec<Watch>>,
    pub files: RefCell<Vec<File>>,
}

fn get<T: Clone>(objects: &RefCell<Vec<T>>, f: impl Fn(&T) -> bool) -> RepoResult<T> {
    objects
        .borrow()
        .iter()
        .find(|x| f(x))
        .cloned()
        .ok_or(RepoError::NotFound)
}

fn filter<T: Clone>(objects: &RefCell<Vec<T>>, f: impl Fn(&T) -> bool) -> Vec<T> {
    objects.borrow().iter().filter(|x| f(x)).cloned().collect()
}

fn remove<T>(objects: &RefCell<Vec<T>>, f: impl Fn(&T) -> bool) -> usize {
    let mut objects = objects.borrow_mut();
    let len = objects.len();
    objects.retain(|x| !f(x));
    len - objects.len()
}

fn replace<T>(objects: &RefCell<Vec<T>>, f: impl Fn(&T) -> bool, new: T) -> RepoResult<()> {
    let mut objects = objects.borrow_mut();
    let pos = objects.iter().position(f).ok_or(RepoError::NotFound)?;
    objects[pos] = new;
    Ok(())
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        if self.users.borrow().iter().any(|u| u.id == user.id) {
            return Err(RepoError::AlreadyExists);
        }
        self.users.borrow_mut().push(user.clone());
        Ok(())
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        replace(&self.users, |u| u.id == user.id, user.clone())
    }
    fn get_user(&self, id: &Id) -> RepoResult<User> {
        get(&self.users, |u| &u.id == id)
    }
    fn get_users(&self, ids: &[Id]) -> RepoResult<Vec<User>> {
        Ok(filter(&self.users, |u| ids.contains(&u.id)))
    }
    fn all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }
    fn try_get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(get(&self.users, |u| u.email.as_str() == email).ok())
    }
    fn try_get_user_by_nickname(&self, nickname: &str) -> RepoResult<Option<User>> {
        Ok(get(&self.users, |u| u.nickname.eq_ignore_ascii_case(nickname)).ok())
    }
}

impl OrganizationRepo for MockDb {
    fn create_org(&self, org: &Organization) -> RepoResult<()> {
        self.orgs.borrow_mut().push(org.clone());
        Ok(())
    }
    fn get_org(&self, id: &Id) -> RepoResult<Organization> {
        get(&self.orgs, |o| &o.id == id)
    }
    fn get_orgs(&self, ids: &[Id]) -> RepoResult<Vec<Organization>> {
        Ok(filter(&self.orgs, |o| ids.contains(&o.id)))
    }
    fn all_orgs(&self) -> RepoResult<Vec<Organization>> {
        Ok(self.orgs.borrow().clone())
    }
    fn add_org_domain(&self, domain: &OrganizationDomain) -> RepoResult<()> {
        self.org_domains.borrow_mut().push(domain.clone());
        Ok(())
    }
    fn find_orgs_by_domain(&self, domain: &str) -> RepoResult<Vec<Organization>> {
        let org_ids: Vec<_> = filter(&self.org_domains, |d| d.domain == domain)
            .into_iter()
            .map(|d| d.organization_id)
            .collect();
        self.get_orgs(&org_ids)
    }
    fn create_trust(&self, trust: &OrganizationTrust) -> RepoResult<()> {
        if self.trusts.borrow().contains(trust) {
            return Err(RepoError::AlreadyExists);
        }
        self.trusts.borrow_mut().push(*trust);
        Ok(())
    }
    fn delete_trust(&self, trust: &OrganizationTrust) -> RepoResult<usize> {
        Ok(remove(&self.trusts, |t| t == trust))
    }
    fn trusted_org_ids(&self, org_id: &Id) -> RepoResult<Vec<Id>> {
        Ok(filter(&self.trusts, |t| &t.organization_id == org_id)
            .into_iter()
            .map(|t| t.trusted_organization_id)
            .collect())
    }
}

impl MembershipRepo for MockDb {
    fn add_membership(&self, membership: &UserOrganization) -> RepoResult<()> {
        self.memberships.borrow_mut().push(membership.clone());
        Ok(())
    }
    fn remove_membership(&self, user_id: &Id, org_id: &Id) -> RepoResult<usize> {
        Ok(remove(&self.memberships, |m| {
            &m.user_id == user_id && &m.organization_id == org_id
        }))
    }
    fn memberships_of_user(&self, user_id: &Id) -> RepoResult<Vec<UserOrganization>> {
        Ok(filter(&self.memberships, |m| &m.user_id == user_id))
    }
    fn memberships_of_orgs(&self, org_ids: &[Id]) -> RepoResult<Vec<UserOrganization>> {
        Ok(filter(&self.memberships, |m| org_ids.contains(&m.organization_id)))
    }
}

impl AccessTokenRepo for MockDb {
    fn create_access_token(&self, token: &AccessToken) -> RepoResult<()> {
        self.access_tokens.borrow_mut().push(token.clone());
        Ok(())
    }
    fn get_access_token(&self, token_hash: &str) -> RepoResult<AccessToken> {
        get(&self.access_tokens, |t| t.token_hash == token_hash)
    }
    fn delete_access_token(&self, token_hash: &str) -> RepoResult<usize> {
        Ok(remove(&self.access_tokens, |t| t.token_hash == token_hash))
    }
    fn delete_expired_access_tokens(&self, expired_before: Timestamp) -> RepoResult<usize> {
        Ok(remove(&self.access_tokens, |t| t.expires_at < expired_before))
    }
}

impl RequestRepo for MockDb {
    fn create_request(&self, request: &Request) -> RepoResult<()> {
        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
    fn update_request(&self, request: &Request) -> RepoResult<()> {
        let old = self.get_request(&request.id)?;
        let updated = Request {
            status: old.status,
            provider_id: old.provider_id,
            completed_on: old.completed_on,
            ..request.clone()
        };
        replace(&self.requests, |r| r.id == request.id, updated)
    }
    fn update_request_status(
        &self,
        request: &Request,
        expected_status: RequestStatus,
    ) -> RepoResult<()> {
        let old = self.get_request(&request.id)?;
        if old.status != expected_status {
            return Err(RepoError::InvalidVersion);
        }
        let updated = Request {
            status: request.status,
            provider_id: request.provider_id,
            completed_on: request.completed_on,
            updated_at: request.updated_at,
            ..old
        };
        replace(&self.requests, |r| r.id == request.id, updated)
    }
    fn delete_request(&self, id: &Id) -> RepoResult<()> {
        if remove(&self.requests, |r| &r.id == id) == 0 {
            return Err(RepoError::NotFound);
        }
        remove(&self.history, |h| &h.request_id == id);
        remove(&self.potential_providers, |pp| &pp.request_id == id);
        let thread_ids: Vec<_> = filter(&self.threads, |t| &t.request_id == id)
            .into_iter()
            .map(|t| t.id)
            .collect();
        remove(&self.threads, |t| thread_ids.contains(&t.id));
        remove(&self.thread_participants, |p| thread_ids.contains(&p.thread_id));
        remove(&self.messages, |m| thread_ids.contains(&m.thread_id));
        Ok(())
    }
    fn get_request(&self, id: &Id) -> RepoResult<Request> {
        get(&self.requests, |r| &r.id == id)
    }
    fn get_requests(&self, ids: &[Id]) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| ids.contains(&r.id)))
    }
    fn all_requests(&self) -> RepoResult<Vec<Request>> {
        Ok(self.requests.borrow().clone())
    }
    fn active_public_requests(&self) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| {
            !r.status.is_closed() && r.visibility == RequestVisibility::All
        }))
    }
    fn active_private_requests_of_org(&self, org_id: &Id) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| {
            !r.status.is_closed()
                && r.visibility != RequestVisibility::All
                && &r.organization_id == org_id
        }))
    }
    fn active_invite_only_requests(&self) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| {
            !r.status.is_closed() && r.visibility == RequestVisibility::InviteOnly
        }))
    }
    fn requests_of_user(&self, user_id: &Id) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| {
            &r.creator_id == user_id || r.provider_id.as_ref() == Some(user_id)
        }))
    }
    fn outdated_open_requests(&self, today: Date) -> RepoResult<Vec<Request>> {
        Ok(filter(&self.requests, |r| {
            r.status == RequestStatus::Open && r.needed_before.is_some_and(|d| d < today)
        }))
    }
}

impl RequestHistoryRepo for MockDb {
    fn add_request_history(&self, entry: &RequestHistory) -> RepoResult<()> {
        self.history.borrow_mut().push(entry.clone());
        Ok(())
    }
    fn request_history(&self, request_id: &Id) -> RepoResult<Vec<RequestHistory>> {
        let mut history = filter(&self.history, |h| &h.request_id == request_id);
        history.reverse();
        Ok(history)
    }
}

impl PotentialProviderRepo for MockDb {
    fn add_potential_provider(&self, potential_provider: &PotentialProvider) -> RepoResult<()> {
        if self.potential_providers.borrow().iter().any(|pp| {
            pp.request_id == potential_provider.request_id
                && pp.user_id == potential_provider.user_id
        }) {
            return Err(RepoError::AlreadyExists);
        }
        self.potential_providers
            .borrow_mut()
            .push(potential_provider.clone());
        Ok(())
    }
    fn delete_potential_provider(&self, request_id: &Id, user_id: &Id) -> RepoResult<usize> {
        Ok(remove(&self.potential_providers, |pp| {
            &pp.request_id == request_id && &pp.user_id == user_id
        }))
    }
    fn delete_potential_providers(&self, request_id: &Id) -> RepoResult<usize> {
        Ok(remove(&self.potential_providers, |pp| {
            &pp.request_id == request_id
        }))
    }
    fn potential_providers(&self, request_id: &Id) -> RepoResult<Vec<PotentialProvider>> {
        Ok(filter(&self.potential_providers, |pp| {
            &pp.request_id == request_id
        }))
    }
}

impl ThreadRepo for MockDb {
    fn create_thread(&self, thread: &Thread) -> RepoResult<()> {
        self.threads.borrow_mut().push(thread.clone());
        Ok(())
    }
    fn touch_thread(&self, id: &Id, updated_at: Timestamp) -> RepoResult<()> {
        let thread = self.get_thread(id)?;
        replace(&self.threads, |t| &t.id == id, Thread { updated_at, ..thread })
    }
    fn get_thread(&self, id: &Id) -> RepoResult<Thread> {
        get(&self.threads, |t| &t.id == id)
    }
    fn threads_of_request(&self, request_id: &Id) -> RepoResult<Vec<Thread>> {
        Ok(filter(&self.threads, |t| &t.request_id == request_id))
    }
    fn threads_of_user(&self, user_id: &Id) -> RepoResult<Vec<Thread>> {
        let thread_ids: Vec<_> = filter(&self.thread_participants, |p| &p.user_id == user_id)
            .into_iter()
            .map(|p| p.thread_id)
            .collect();
        let mut threads = filter(&self.threads, |t| thread_ids.contains(&t.id));
        threads.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(threads)
    }
    fn add_thread_participant(&self, participant: &ThreadParticipant) -> RepoResult<()> {
        let exists = self.thread_participants.borrow().iter().any(|p| {
            p.thread_id == participant.thread_id && p.user_id == participant.user_id
        });
        if !exists {
            self.thread_participants
                .borrow_mut()
                .push(participant.clone());
        }
        Ok(())
    }
    fn thread_participants(&self, thread_id: &Id) -> RepoResult<Vec<ThreadParticipant>> {
        Ok(filter(&self.thread_participants, |p| &p.thread_id == thread_id))
    }
    fn set_last_viewed_at(
        &self,
        thread_id: &Id,
        user_id: &Id,
        viewed_at: Timestamp,
    ) -> RepoResult<()> {
        replace(
            &self.thread_participants,
            |p| &p.thread_id == thread_id && &p.user_id == user_id,
            ThreadParticipant {
                thread_id: *thread_id,
                user_id: *user_id,
                last_viewed_at: Some(viewed_at),
            },
        )
    }
}

impl MessageRepo for MockDb {
    fn create_message(&self, message: &Message) -> RepoResult<()> {
        self.messages.borrow_mut().push(message.clone());
        Ok(())
    }
    fn messages_of_thread(&self, thread_id: &Id) -> RepoResult<Vec<Message>> {
        Ok(filter(&self.messages, |m| &m.thread_id == thread_id))
    }
    fn count_unread_messages(&self, thread_id: &Id, user_id: &Id) -> RepoResult<u64> {
        let last_viewed_at = get(&self.thread_participants, |p| {
            &p.thread_id == thread_id && &p.user_id == user_id
        })?
        .last_viewed_at;
        Ok(filter(&self.messages, |m| {
            &m.thread_id == thread_id
                && &m.sender_id != user_id
                && last_viewed_at.map_or(true, |at| m.created_at > at)
        })
        .len() as u64)
    }
}

impl MeetingRepo for MockDb {
    fn create_meeting(&self, meeting: &Meeting) -> RepoResult<()> {
        self.meetings.borrow_mut().push(meeting.clone());
        Ok(())
    }
    fn get_meeting(&self, id: &Id) -> RepoResult<Meeting> {
        get(&self.meetings, |m| &m.id == id)
    }
    fn all_meetings(&self) -> RepoResult<Vec<Meeting>> {
        Ok(self.meetings.borrow().clone())
    }
    fn add_meeting_participant(&self, participant: &MeetingParticipant) -> RepoResult<()> {
        self.meeting_participants
            .borrow_mut()
            .push(participant.clone());
        Ok(())
    }
    fn meeting_participants(&self, meeting_id: &Id) -> RepoResult<Vec<MeetingParticipant>> {
        Ok(filter(&self.meeting_participants, |p| {
            &p.meeting_id == meeting_id
        }))
    }
    fn create_meeting_invite(&self, invite: &MeetingInvite) -> RepoResult<()> {
        self.meeting_invites.borrow_mut().push(invite.clone());
        Ok(())
    }
    fn meeting_invites(&self, meeting_id: &Id) -> RepoResult<Vec<MeetingInvite>> {
        Ok(filter(&self.meeting_invites, |i| &i.meeting_id == meeting_id))
    }
}

impl WatchRepo for MockDb {
    fn create_watch(&self, watch: &Watch) -> RepoResult<()> {
        self.watches.borrow_mut().push(watch.clone());
        Ok(())
    }
    fn get_watch(&self, id: &Id) -> RepoResult<Watch> {
        get(&self.watches, |w| &w.id == id)
    }
    fn delete_watch(&self, id: &Id) -> RepoResult<()> {
        if remove(&self.watches, |w| &w.id == id) == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
    fn watches_of_user(&self, owner_id: &Id) -> RepoResult<Vec<Watch>> {
        Ok(filter(&self.watches, |w| &w.owner_id == owner_id))
    }
    fn all_watches(&self) -> RepoResult<Vec<Watch>> {
        Ok(self.watches.borrow().clone())
    }
}

impl FileRepo for MockDb {
    fn create_file(&self, file: &File) -> RepoResult<()> {
        self.files.borrow_mut().push(file.clone());
        Ok(())
    }
    fn get_file(&self, id: &Id) -> RepoResult<File> {
        get(&self.files, |f| &f.id == id)
    }
    fn unreferenced_files(&self, created_before: Timestamp) -> RepoResult<Vec<File>> {
        let requests = self.requests.borrow();
        let users = self.users.borrow();
        let meetings = self.meetings.borrow();
        Ok(filter(&self.files, |f| {
            f.created_at < created_before
                && !requests.iter().any(|r| r.photo_id == Some(f.id))
                && !users.iter().any(|u| u.avatar == Some(f.id))
                && !meetings.iter().any(|m| m.image_id == Some(f.id))
        }))
    }
    fn delete_file(&self, id: &Id) -> RepoResult<()> {
        remove(&self.files, |f| &f.id == id);
        Ok(())
    }
}

impl LocationRepo for MockDb {
    fn delete_orphaned_locations(&self) -> RepoResult<usize> {
        // Locations are embedded into their owners
        Ok(0)
    }
}

/// Creates an organization with a single member.
pub fn create_org_with_member(db: &MockDb, name: &str) -> (Organization, Actor) {
    let org = super::create_organization(
        db,
        super::NewOrganization {
            name: name.into(),
            ..Default::default()
        },
    )
    .unwrap();
    let actor = create_member(db, &org, name);
    (org, actor)
}

pub fn create_member(db: &MockDb, org: &Organization, nickname_prefix: &str) -> Actor {
    let nickname = format!(
        "{}{}",
        nickname_prefix.replace(char::is_whitespace, "_"),
        db.users.borrow().len()
    );
    let user = super::create_user(
        db,
        super::NewUser {
            email: format!("{nickname}@example.org"),
            nickname,
            ..Default::default()
        },
        Timestamp::now(),
    )
    .unwrap();
    super::add_member(db, &user.id, &org.id, OrgRole::User, None).unwrap();
    super::load_actor(db, &user.id).unwrap()
}

pub fn create_loner(db: &MockDb) -> Actor {
    let nickname = format!("loner{}", db.users.borrow().len());
    let user = super::create_user(
        db,
        super::NewUser {
            email: format!("{nickname}@example.com"),
            nickname,
            ..Default::default()
        },
        Timestamp::now(),
    )
    .unwrap();
    super::load_actor(db, &user.id).unwrap()
}

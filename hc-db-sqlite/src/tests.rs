use super::*;
use hc_core::{entities::*, repositories::*};
use hc_entities::builders::*;

fn connections() -> Connections {
    let connections = Connections::init(":memory:", 1).unwrap();
    run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    connections
}

fn org(name: &str) -> Organization {
    Organization {
        id: Id::new(),
        name: name.into(),
        url: None,
        auth_type: AuthType::None,
        auth_config: None,
    }
}

struct Fixture {
    connections: Connections,
    org: Organization,
    creator: User,
    provider: User,
}

impl Fixture {
    fn new() -> Self {
        let connections = connections();
        let org = org("Org");
        let creator = User::build().nickname("Creator").finish();
        let provider = User::build().nickname("Provider").finish();
        connections
            .exclusive()
            .unwrap()
            .transaction(|db| -> Result<(), uc::Error> {
                db.create_org(&org)?;
                db.create_user(&creator)?;
                db.create_user(&provider)?;
                Ok(())
            })
            .unwrap();
        Self {
            connections,
            org,
            creator,
            provider,
        }
    }

    fn request(&self) -> Request {
        Request::build()
            .creator(self.creator.id)
            .organization(self.org.id)
            .origin(Some(Location::build().city("Lyon").finish()))
            .finish()
    }

    fn write<T>(&self, f: impl FnMut(&DbConnection) -> Result<T, repo::Error>) -> Result<T, uc::Error> {
        self.connections.exclusive().unwrap().transaction(f)
    }

    fn read<T>(&self, f: impl FnMut(&DbConnection) -> Result<T, repo::Error>) -> Result<T, uc::Error> {
        self.connections.shared().unwrap().transaction(f)
    }
}

fn count_locations(fixture: &Fixture) -> i64 {
    use diesel::prelude::*;
    let db = fixture.connections.shared().unwrap();
    let mut conn = db.conn.borrow_mut();
    schema::locations::table
        .count()
        .get_result::<i64>(&mut **conn)
        .unwrap()
}

#[test]
fn create_and_load_request() {
    let fixture = Fixture::new();
    let request = Request {
        needed_before: Some(parse_date("2030-01-31").unwrap()),
        kilograms: Some(1.5),
        ..fixture.request()
    };
    fixture.write(|db| db.create_request(&request)).unwrap();
    let loaded = fixture.read(|db| db.get_request(&request.id)).unwrap();
    assert_eq!(loaded.title, request.title);
    assert_eq!(loaded.destination, request.destination);
    assert_eq!(loaded.origin, request.origin);
    assert_eq!(loaded.needed_before, request.needed_before);
    assert_eq!(loaded.kilograms, Some(1.5));
    assert_eq!(loaded.created_at.as_millis(), request.created_at.as_millis());
    assert!(matches!(
        fixture.read(|db| db.get_request(&Id::new())),
        Err(uc::Error::Repo(repo::Error::NotFound))
    ));
}

#[test]
fn guarded_status_update() {
    let fixture = Fixture::new();
    let request = fixture.request();
    fixture.write(|db| db.create_request(&request)).unwrap();

    let accepted = Request {
        status: RequestStatus::Accepted,
        provider_id: Some(fixture.provider.id),
        ..request.clone()
    };
    fixture
        .write(|db| db.update_request_status(&accepted, RequestStatus::Open))
        .unwrap();
    // The stored status is no longer open
    assert!(matches!(
        fixture.write(|db| db.update_request_status(&accepted, RequestStatus::Open)),
        Err(uc::Error::Repo(repo::Error::InvalidVersion))
    ));
    let missing = Request {
        id: Id::new(),
        ..accepted.clone()
    };
    assert!(matches!(
        fixture.write(|db| db.update_request_status(&missing, RequestStatus::Open)),
        Err(uc::Error::Repo(repo::Error::NotFound))
    ));
    let loaded = fixture.read(|db| db.get_request(&request.id)).unwrap();
    assert_eq!(loaded.status, RequestStatus::Accepted);
    assert_eq!(loaded.provider_id, Some(fixture.provider.id));
}

#[test]
fn status_without_provider_violates_constraint() {
    let fixture = Fixture::new();
    let request = fixture.request();
    fixture.write(|db| db.create_request(&request)).unwrap();
    let accepted = Request {
        status: RequestStatus::Accepted,
        ..request.clone()
    };
    assert!(fixture
        .write(|db| db.update_request_status(&accepted, RequestStatus::Open))
        .is_err());
    let loaded = fixture.read(|db| db.get_request(&request.id)).unwrap();
    assert_eq!(loaded.status, RequestStatus::Open);
}

#[test]
fn failed_transaction_is_rolled_back() {
    let fixture = Fixture::new();
    let request = fixture.request();
    let res = fixture.write(|db| {
        db.create_request(&request)?;
        Err::<(), _>(repo::Error::InvalidVersion)
    });
    assert!(res.is_err());
    assert!(fixture.read(|db| db.all_requests()).unwrap().is_empty());
    assert_eq!(count_locations(&fixture), 0);
}

#[test]
fn update_fields_replaces_locations() {
    let fixture = Fixture::new();
    let request = fixture.request();
    fixture.write(|db| db.create_request(&request)).unwrap();
    assert_eq!(count_locations(&fixture), 2);
    let updated = Request {
        title: "Updated".into(),
        destination: Location::build().city("Seoul").finish(),
        origin: None,
        size: RequestSize::Large,
        ..request.clone()
    };
    fixture.write(|db| db.update_request(&updated)).unwrap();
    let loaded = fixture.read(|db| db.get_request(&request.id)).unwrap();
    assert_eq!(loaded.title, "Updated");
    assert_eq!(loaded.destination.city.as_deref(), Some("Seoul"));
    assert_eq!(loaded.origin, None);
    assert_eq!(loaded.size, RequestSize::Large);
    assert_eq!(count_locations(&fixture), 1);
}

#[test]
fn clearing_the_home_location_deletes_it() {
    let fixture = Fixture::new();
    let user = User {
        home_location: Some(Location::build().city("Busan").finish()),
        ..User::build().nickname("Homebody").finish()
    };
    fixture.write(|db| db.create_user(&user)).unwrap();
    assert_eq!(count_locations(&fixture), 1);
    let moved = User {
        home_location: None,
        ..user.clone()
    };
    fixture.write(|db| db.update_user(&moved)).unwrap();
    let loaded = fixture.read(|db| db.get_user(&user.id)).unwrap();
    assert_eq!(loaded.home_location, None);
    assert_eq!(count_locations(&fixture), 0);
}

#[test]
fn delete_request_cascades() {
    let fixture = Fixture::new();
    let request = fixture.request();
    let now = Timestamp::now();
    let thread = Thread {
        id: Id::new(),
        request_id: request.id,
        created_at: now,
        updated_at: now,
    };
    fixture
        .write(|db| {
            db.create_request(&request)?;
            db.add_potential_provider(&PotentialProvider {
                request_id: request.id,
                user_id: fixture.provider.id,
                created_at: now,
            })?;
            db.add_request_history(&RequestHistory {
                request_id: request.id,
                actor_id: fixture.creator.id,
                old_status: RequestStatus::Open,
                new_status: RequestStatus::Removed,
                old_provider_id: None,
                new_provider_id: None,
                created_at: now,
            })?;
            db.create_thread(&thread)?;
            db.create_message(&Message {
                id: Id::new(),
                thread_id: thread.id,
                sender_id: fixture.provider.id,
                content: "Hi".into(),
                created_at: now,
            })
        })
        .unwrap();

    fixture.write(|db| db.delete_request(&request.id)).unwrap();
    fixture
        .read(|db| {
            assert!(db.potential_providers(&request.id)?.is_empty());
            assert!(db.request_history(&request.id)?.is_empty());
            assert!(db.messages_of_thread(&thread.id)?.is_empty());
            assert!(matches!(
                db.get_thread(&thread.id),
                Err(repo::Error::NotFound)
            ));
            Ok(())
        })
        .unwrap();
    assert_eq!(count_locations(&fixture), 0);
}

#[test]
fn offers_are_unique() {
    let fixture = Fixture::new();
    let request = fixture.request();
    let offer = PotentialProvider {
        request_id: request.id,
        user_id: fixture.provider.id,
        created_at: Timestamp::now(),
    };
    fixture.write(|db| db.create_request(&request)).unwrap();
    fixture.write(|db| db.add_potential_provider(&offer)).unwrap();
    assert!(matches!(
        fixture.write(|db| db.add_potential_provider(&offer)),
        Err(uc::Error::Repo(repo::Error::AlreadyExists))
    ));
    assert_eq!(
        fixture
            .write(|db| db.delete_potential_provider(&request.id, &fixture.provider.id))
            .unwrap(),
        1
    );

    fixture
        .write(|db| {
            db.add_potential_provider(&offer)?;
            db.add_potential_provider(&PotentialProvider {
                user_id: fixture.creator.id,
                ..offer.clone()
            })
        })
        .unwrap();
    let offers = fixture.read(|db| db.potential_providers(&request.id)).unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(
        fixture
            .write(|db| db.delete_potential_providers(&request.id))
            .unwrap(),
        2
    );
    assert!(fixture
        .read(|db| db.potential_providers(&request.id))
        .unwrap()
        .is_empty());
}

#[test]
fn nicknames_are_case_insensitive() {
    let fixture = Fixture::new();
    let found = fixture
        .read(|db| db.try_get_user_by_nickname("cReAtOr"))
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(fixture.creator.id));
    let duplicate = User::build().nickname("PROVIDER").finish();
    assert!(matches!(
        fixture.write(|db| db.create_user(&duplicate)),
        Err(uc::Error::Repo(repo::Error::AlreadyExists))
    ));
}

#[test]
fn visibility_queries() {
    let fixture = Fixture::new();
    let public = fixture.request();
    let private = Request {
        visibility: RequestVisibility::SameOrganization,
        ..fixture.request()
    };
    let removed = Request {
        status: RequestStatus::Removed,
        ..fixture.request()
    };
    fixture
        .write(|db| {
            db.create_request(&public)?;
            db.create_request(&private)?;
            db.create_request(&removed)
        })
        .unwrap();
    let ids = |requests: Vec<Request>| requests.into_iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(
        ids(fixture.read(|db| db.active_public_requests()).unwrap()),
        vec![public.id]
    );
    assert_eq!(
        ids(fixture
            .read(|db| db.active_private_requests_of_org(&fixture.org.id))
            .unwrap()),
        vec![private.id]
    );
    assert_eq!(
        fixture
            .read(|db| db.requests_of_user(&fixture.creator.id))
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn outdated_open_requests() {
    let fixture = Fixture::new();
    let outdated = Request {
        needed_before: Some(parse_date("2020-01-01").unwrap()),
        ..fixture.request()
    };
    let upcoming = Request {
        needed_before: Some(parse_date("2099-01-01").unwrap()),
        ..fixture.request()
    };
    let undated = fixture.request();
    fixture
        .write(|db| {
            db.create_request(&outdated)?;
            db.create_request(&upcoming)?;
            db.create_request(&undated)
        })
        .unwrap();
    let found = fixture
        .read(|db| db.outdated_open_requests(parse_date("2024-06-01").unwrap()))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, outdated.id);
}

#[test]
fn unread_messages() {
    let fixture = Fixture::new();
    let request = fixture.request();
    let t0 = Timestamp::from_millis(1_000);
    let thread = Thread {
        id: Id::new(),
        request_id: request.id,
        created_at: t0,
        updated_at: t0,
    };
    let message = |sender_id, at| Message {
        id: Id::new(),
        thread_id: thread.id,
        sender_id,
        content: "Hello".into(),
        created_at: Timestamp::from_millis(at),
    };
    fixture
        .write(|db| {
            db.create_request(&request)?;
            db.create_thread(&thread)?;
            for user_id in [fixture.creator.id, fixture.provider.id] {
                db.add_thread_participant(&ThreadParticipant {
                    thread_id: thread.id,
                    user_id,
                    last_viewed_at: None,
                })?;
            }
            // Participation is idempotent
            db.add_thread_participant(&ThreadParticipant {
                thread_id: thread.id,
                user_id: fixture.creator.id,
                last_viewed_at: Some(t0),
            })?;
            db.create_message(&message(fixture.provider.id, 2_000))?;
            db.create_message(&message(fixture.provider.id, 3_000))?;
            db.create_message(&message(fixture.creator.id, 4_000))
        })
        .unwrap();
    fixture
        .write(|db| {
            assert_eq!(db.thread_participants(&thread.id)?.len(), 2);
            assert_eq!(db.count_unread_messages(&thread.id, &fixture.creator.id)?, 2);
            assert_eq!(db.count_unread_messages(&thread.id, &fixture.provider.id)?, 1);
            db.set_last_viewed_at(&thread.id, &fixture.creator.id, Timestamp::from_millis(2_500))?;
            assert_eq!(db.count_unread_messages(&thread.id, &fixture.creator.id)?, 1);
            let messages = db.messages_of_thread(&thread.id)?;
            assert_eq!(messages.len(), 3);
            assert!(messages[0].created_at < messages[2].created_at);
            assert_eq!(db.threads_of_user(&fixture.provider.id)?.len(), 1);
            db.touch_thread(&thread.id, Timestamp::from_millis(5_000))?;
            let threads = db.threads_of_request(&request.id)?;
            assert_eq!(threads.len(), 1);
            assert_eq!(threads[0].updated_at, Timestamp::from_millis(5_000));
            assert_eq!(db.get_thread(&thread.id)?.id, thread.id);
            Ok(())
        })
        .unwrap();
}

#[test]
fn orphaned_locations_are_deleted() {
    let fixture = Fixture::new();
    let watch = Watch::build()
        .owner(fixture.creator.id)
        .destination(Location::build().city("Berlin").finish())
        .finish();
    fixture.write(|db| db.create_watch(&watch)).unwrap();
    assert_eq!(count_locations(&fixture), 1);
    fixture.write(|db| db.delete_watch(&watch.id)).unwrap();
    assert_eq!(count_locations(&fixture), 1);
    assert_eq!(
        fixture.write(|db| db.delete_orphaned_locations()).unwrap(),
        1
    );
    assert_eq!(count_locations(&fixture), 0);
}

#[test]
fn trust_is_stored_per_direction() {
    let fixture = Fixture::new();
    let other = org("Other");
    let trust = OrganizationTrust {
        organization_id: fixture.org.id,
        trusted_organization_id: other.id,
    };
    fixture
        .write(|db| {
            db.create_org(&other)?;
            db.create_trust(&trust)?;
            db.create_trust(&trust.reversed())
        })
        .unwrap();
    assert_eq!(
        fixture.read(|db| db.trusted_org_ids(&other.id)).unwrap(),
        vec![fixture.org.id]
    );
    assert_eq!(fixture.write(|db| db.delete_trust(&trust)).unwrap(), 1);
    assert!(fixture
        .read(|db| db.trusted_org_ids(&fixture.org.id))
        .unwrap()
        .is_empty());
}

#[test]
fn organizations_by_email_domain() {
    let fixture = Fixture::new();
    fixture
        .write(|db| {
            db.add_org_domain(&OrganizationDomain {
                organization_id: fixture.org.id,
                domain: "example.org".into(),
            })?;
            db.add_membership(&UserOrganization {
                user_id: fixture.creator.id,
                organization_id: fixture.org.id,
                auth_id: None,
                auth_email: None,
                role: OrgRole::Admin,
            })
        })
        .unwrap();
    let orgs = fixture
        .read(|db| db.find_orgs_by_domain("Example.ORG"))
        .unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(
        fixture
            .read(|db| db.memberships_of_user(&fixture.creator.id))
            .unwrap()[0]
            .role,
        OrgRole::Admin
    );
}

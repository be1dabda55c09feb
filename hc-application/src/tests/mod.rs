
pub mod prelude {
    use std::sync::Arc;

    pub use hc_core::{
        deadline::Deadline,
        entities::*,
        events::LifecycleEvent,
        gateways::notify::Notification,
        notification::Template,
        repositories::{Error as RepoError, *},
        usecases::{self, MessageTarget, NewMessage, NewRequest, TransitionParams},
    };
    use hc_core::gateways::{kv::KvStore as _, notify::NotificationGateway};
    use hc_gateways::kv::MemoryKvStore;
    use parking_lot::Mutex;

    pub use crate::{
        error::AppError,
        event_bus::EventBus,
        prelude as flows,
        sqlite,
        visibility_cache::{self, CacheConfig, Slice, VisibilityCache},
    };

    #[derive(Default)]
    pub struct RecordingNotifications(Mutex<Vec<Notification>>);

    impl NotificationGateway for RecordingNotifications {
        fn notify(&self, notification: Notification) {
            self.0.lock().push(notification);
        }
    }

    impl RecordingNotifications {
        pub fn sent_to(&self, user: &User) -> Vec<Template> {
            self.0
                .lock()
                .iter()
                .filter(|n| n.recipient == user.email)
                .map(|n| n.template)
                .collect()
        }

        pub fn all(&self) -> Vec<Notification> {
            self.0.lock().clone()
        }

        pub fn clear(&self) {
            self.0.lock().clear();
        }
    }

    pub fn paris() -> Location {
        Location {
            city: Some("Paris".into()),
            latitude: Some(48.8566),
            longitude: Some(2.3522),
            ..Default::default()
        }
    }

    pub fn new_request(org: &Organization, title: &str) -> NewRequest {
        NewRequest {
            organization_id: org.id,
            title: title.into(),
            destination: Some(paris()),
            ..Default::default()
        }
    }

    pub fn transition(target: RequestStatus, provider: Option<&User>) -> TransitionParams {
        TransitionParams {
            target,
            provider_id: provider.map(|u| u.id),
            expected_status: None,
        }
    }

    pub struct BackendFixture {
        pub runtime: tokio::runtime::Runtime,
        pub connections: sqlite::Connections,
        pub events: EventBus,
        pub kv: Arc<MemoryKvStore>,
        pub cache: Arc<VisibilityCache>,
        pub notifications: Arc<RecordingNotifications>,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            let connections = sqlite::Connections::init(":memory:", 1).unwrap();
            sqlite::run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
            let events = EventBus::new(runtime.handle().clone());
            let kv = Arc::new(MemoryKvStore::new());
            let cache = Arc::new(VisibilityCache::new(kv.clone(), CacheConfig::default()));
            let notifications = Arc::new(RecordingNotifications::default());
            crate::subscribe_event_handlers(
                &events,
                &connections,
                cache.clone(),
                notifications.clone(),
                Language::En,
            );
            Self {
                runtime,
                connections,
                events,
                kv,
                cache,
                notifications,
            }
        }

        /// Blocks until all events have been handled.
        pub fn wait_idle(&self) {
            self.runtime.block_on(self.events.wait_idle());
        }

        pub fn create_org(&self, name: &str, domain: &str) -> Organization {
            flows::create_organization(
                &self.connections,
                usecases::NewOrganization {
                    name: name.into(),
                    domains: vec![domain.into()],
                    ..Default::default()
                },
            )
            .unwrap()
        }

        pub fn create_user(&self, nickname: &str, email: &str) -> User {
            flows::create_user(
                &self.connections,
                usecases::NewUser {
                    email: email.into(),
                    nickname: nickname.into(),
                    ..Default::default()
                },
            )
            .unwrap()
        }

        pub fn trust(&self, a: &Organization, b: &Organization) {
            flows::create_trust(&self.connections, &self.cache, &a.id, &b.id).unwrap();
        }

        pub fn create_request(&self, user: &User, new_request: NewRequest) -> Request {
            flows::create_request(
                &self.connections,
                &self.events,
                Deadline::none(),
                &user.id,
                new_request,
            )
            .unwrap()
        }

        pub fn transition(
            &self,
            user: &User,
            request: &Request,
            params: TransitionParams,
        ) -> crate::Result<Request> {
            flows::transition_request(
                &self.connections,
                &self.events,
                Deadline::none(),
                &user.id,
                &request.id,
                params,
            )
        }

        pub fn add_offer(&self, user: &User, request: &Request) -> crate::Result<Request> {
            flows::add_offer(
                &self.connections,
                &self.events,
                Deadline::none(),
                &user.id,
                &request.id,
            )
        }

        pub fn list(&self, user: &User) -> Vec<Request> {
            flows::list_visible_requests(
                &self.connections,
                &self.cache,
                Deadline::none(),
                &user.id,
                &Default::default(),
            )
            .unwrap()
        }

        pub fn get(&self, user: &User, request: &Request) -> crate::Result<Request> {
            flows::get_request(&self.connections, Deadline::none(), &user.id, &request.id)
        }

        pub fn read<T>(
            &self,
            f: impl FnMut(&sqlite::DbConnection) -> Result<T, RepoError>,
        ) -> T {
            self.connections.shared().unwrap().transaction(f).unwrap()
        }

        pub fn potential_provider_ids(&self, request: &Request) -> Vec<Id> {
            self.read(|db| db.potential_providers(&request.id))
                .into_iter()
                .map(|pp| pp.user_id)
                .collect()
        }

        pub fn cached_slice(&self, key: &str) -> Option<Slice> {
            self.kv
                .get(key)
                .unwrap()
                .map(|json| serde_json::from_str(&json).unwrap())
        }
    }

    pub fn business_error(err: AppError) -> usecases::Error {
        match err {
            AppError::Business(err) => err,
            err => panic!("Unexpected error: {err}"),
        }
    }
}

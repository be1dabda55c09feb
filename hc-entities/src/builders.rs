pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{location_builder::*, request_builder::*, user_builder::*, watch_builder::*};

pub mod request_builder {

    use super::*;
    use crate::{id::*, location::*, request::*, time::*};

    #[derive(Debug)]
    pub struct RequestBuild {
        request: Request,
    }

    impl RequestBuild {
        pub fn id(mut self, id: Id) -> Self {
            self.request.id = id;
            self
        }
        pub fn creator(mut self, creator_id: Id) -> Self {
            self.request.creator_id = creator_id;
            self
        }
        pub fn organization(mut self, organization_id: Id) -> Self {
            self.request.organization_id = organization_id;
            self
        }
        pub fn status(mut self, status: RequestStatus) -> Self {
            self.request.status = status;
            self
        }
        pub fn provider(mut self, provider_id: Option<Id>) -> Self {
            self.request.provider_id = provider_id;
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.request.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.request.description = Some(desc.into());
            self
        }
        pub fn destination(mut self, destination: Location) -> Self {
            self.request.destination = destination;
            self
        }
        pub fn origin(mut self, origin: Option<Location>) -> Self {
            self.request.origin = origin;
            self
        }
        pub fn size(mut self, size: RequestSize) -> Self {
            self.request.size = size;
            self
        }
        pub fn visibility(mut self, visibility: RequestVisibility) -> Self {
            self.request.visibility = visibility;
            self
        }
        pub fn meeting(mut self, meeting_id: Option<Id>) -> Self {
            self.request.meeting_id = meeting_id;
            self
        }
        pub fn needed_before(mut self, date: Option<Date>) -> Self {
            self.request.needed_before = date;
            self
        }
        pub fn completed_on(mut self, date: Option<Date>) -> Self {
            self.request.completed_on = date;
            self
        }
        pub fn finish(self) -> Request {
            self.request
        }
    }

    impl Builder for Request {
        type Build = RequestBuild;
        fn build() -> RequestBuild {
            let now = Timestamp::now();
            RequestBuild {
                request: Request {
                    id: Id::new(),
                    creator_id: Id::new(),
                    organization_id: Id::new(),
                    status: RequestStatus::Open,
                    provider_id: None,
                    title: "A request".into(),
                    description: None,
                    destination: Location::build().city("Paris").pos(48.8566, 2.3522).finish(),
                    origin: None,
                    size: RequestSize::default(),
                    needed_before: None,
                    kilograms: None,
                    url: None,
                    photo_id: None,
                    meeting_id: None,
                    visibility: RequestVisibility::default(),
                    completed_on: None,
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod location_builder {

    use super::*;
    use crate::location::*;

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn description(mut self, description: &str) -> Self {
            self.location.description = Some(description.into());
            self
        }
        pub fn country(mut self, country: &str) -> Self {
            self.location.country = Some(country.into());
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.location.city = Some(city.into());
            self
        }
        pub fn pos(mut self, lat: f64, lng: f64) -> Self {
            self.location.latitude = Some(lat);
            self.location.longitude = Some(lng);
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> Self::Build {
            LocationBuild {
                location: Location::default(),
            }
        }
    }
}

pub mod user_builder {

    use super::*;
    use crate::{email::*, id::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: Id) -> Self {
            self.user.id = id;
            self
        }
        pub fn nickname(mut self, nickname: &str) -> Self {
            self.user.nickname = nickname.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = EmailAddress::new_unchecked(email.into());
            self
        }
        pub fn admin_role(mut self, role: AdminRole) -> Self {
            self.user.admin_role = role;
            self
        }
        pub fn language(mut self, language: Language) -> Self {
            self.user.preferences.language = language;
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> Self::Build {
            let id = Id::new();
            UserBuild {
                user: User {
                    id,
                    email: EmailAddress::new_unchecked(format!("{id}@example.org")),
                    nickname: id.to_string(),
                    first_name: None,
                    last_name: None,
                    avatar: None,
                    home_location: None,
                    admin_role: AdminRole::default(),
                    preferences: Preferences::default(),
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod watch_builder {

    use super::*;
    use crate::{id::*, location::*, request::*, time::*, watch::*};

    #[derive(Debug)]
    pub struct WatchBuild {
        watch: Watch,
    }

    impl WatchBuild {
        pub fn owner(mut self, owner_id: Id) -> Self {
            self.watch.owner_id = owner_id;
            self
        }
        pub fn destination(mut self, destination: Location) -> Self {
            self.watch.destination = Some(destination);
            self
        }
        pub fn origin(mut self, origin: Location) -> Self {
            self.watch.origin = Some(origin);
            self
        }
        pub fn meeting(mut self, meeting_id: Id) -> Self {
            self.watch.meeting_id = Some(meeting_id);
            self
        }
        pub fn search_text(mut self, text: &str) -> Self {
            self.watch.search_text = Some(text.into());
            self
        }
        pub fn size_floor(mut self, size: RequestSize) -> Self {
            self.watch.size_floor = Some(size);
            self
        }
        pub fn finish(self) -> Watch {
            self.watch
        }
    }

    impl Builder for Watch {
        type Build = WatchBuild;
        fn build() -> Self::Build {
            WatchBuild {
                watch: Watch {
                    id: Id::new(),
                    owner_id: Id::new(),
                    name: None,
                    destination: None,
                    origin: None,
                    meeting_id: None,
                    search_text: None,
                    size_floor: None,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

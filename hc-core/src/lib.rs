//! # hc-core
//!
//! Business rules of the hand-carry request platform: repository and
//! gateway ports, authorization, the request status machine, offers,
//! watch matching and the notification plan.

pub mod authorization;
pub mod deadline;
pub mod events;
pub mod gateways;
pub mod notification;
pub mod repositories;
pub mod status;
pub mod usecases;
pub mod util;
pub mod watch;

pub mod db {
    use crate::repositories::*;

    /// All repositories that are available within a single transaction.
    pub trait Db:
        UserRepo
        + OrganizationRepo
        + MembershipRepo
        + AccessTokenRepo
        + RequestRepo
        + RequestHistoryRepo
        + PotentialProviderRepo
        + ThreadRepo
        + MessageRepo
        + MeetingRepo
        + WatchRepo
        + FileRepo
        + LocationRepo
    {
    }

    impl<T> Db for T where
        T: UserRepo
            + OrganizationRepo
            + MembershipRepo
            + AccessTokenRepo
            + RequestRepo
            + RequestHistoryRepo
            + PotentialProviderRepo
            + ThreadRepo
            + MessageRepo
            + MeetingRepo
            + WatchRepo
            + FileRepo
            + LocationRepo
    {
    }
}

pub mod entities {
    pub use hc_entities::{
        email::*, file::*, geo::*, id::*, location::*, meeting::*, message::*, organization::*,
        request::*, time::*, user::*, watch::*,
    };
}

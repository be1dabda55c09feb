#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # hc-entities
//!
//! Reusable, agnostic domain entities of the hand-carry request platform.
//!
//! The entities are plain data. They only contain generic functionality
//! that does not reveal any application-specific business logic.

pub mod email;
pub mod file;
pub mod geo;
pub mod id;
pub mod location;
pub mod meeting;
pub mod message;
pub mod organization;
pub mod request;
pub mod time;
pub mod user;
pub mod watch;

#[cfg(any(test, feature = "builders"))]
pub mod builders;

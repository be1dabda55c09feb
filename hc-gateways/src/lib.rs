//! # hc-gateways
//!
//! Adapters for the gateway ports of `hc-core`: email transport,
//! notification rendering, a key-value store for cached request
//! lists and the object store for uploaded files.

pub mod email;
pub mod kv;
pub mod notify;
pub mod object_store;
pub mod sendmail;
pub mod user_communication;

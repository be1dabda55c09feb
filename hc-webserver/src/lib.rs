//! # hc-webserver
//!
//! JSON over HTTP interface of the hand-carry request platform.

#![allow(proc_macro_derive_resolution_fallback)]

#[macro_use]
extern crate log;

use std::sync::Arc;

use hc_application::{event_bus::EventBus, sqlite::Connections, visibility_cache::VisibilityCache};
use hc_core::gateways::object_store::ObjectStore;

mod adapters;
mod core;
mod web;

pub use web::{Cfg, Environment};

pub async fn run(
    connections: Connections,
    events: EventBus,
    cache: Arc<VisibilityCache>,
    object_store: Box<dyn ObjectStore + Send + Sync>,
    enable_cors: bool,
    cfg: Cfg,
) {
    web::run(
        connections.into(),
        events,
        cache,
        object_store,
        enable_cors,
        cfg,
        env!("CARGO_PKG_VERSION"),
    )
    .await;
}

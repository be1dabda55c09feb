//! Cached slices of the requests that are visible to the members
//! of an organization or to everyone.
//!
//! The slices live in a shared key-value store. A small local layer
//! with a very short lifetime sits in front of it. The cache is
//! advisory only, visibility is always checked again against the
//! database before anything is returned to a user.

use std::{
    collections::{BTreeMap, HashSet},
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use hc_core::{events::LifecycleEvent, gateways::kv::KvStore};
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::*;
use crate::event_bus::EventHandler;

pub const PUBLIC_KEY: &str = "public";

pub fn private_key(org_name: &str) -> String {
    format!("private:{org_name}")
}

/// Abridged request record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRequest {
    pub id: String,
    pub organization_id: String,
    pub status: String,
    pub visibility: String,
    pub title: String,
    pub created_at: i64,
}

impl From<&Request> for CachedRequest {
    fn from(from: &Request) -> Self {
        Self {
            id: from.id.to_string(),
            organization_id: from.organization_id.to_string(),
            status: from.status.as_ref().to_owned(),
            visibility: from.visibility.as_ref().to_owned(),
            title: from.title.clone(),
            created_at: from.created_at.as_millis(),
        }
    }
}

/// Cached requests keyed by their id.
pub type Slice = BTreeMap<String, CachedRequest>;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub local_capacity: NonZeroUsize,
    pub local_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            local_capacity: NonZeroUsize::new(256).unwrap_or(NonZeroUsize::MIN),
            local_ttl: Duration::from_millis(500),
        }
    }
}

struct LocalEntry {
    slice: Arc<Slice>,
    loaded_at: Instant,
}

pub struct VisibilityCache {
    kv: Arc<dyn KvStore + Send + Sync>,
    config: CacheConfig,
    local: Mutex<LruCache<String, LocalEntry>>,
}

/// Where a request belongs, relative to one organization of its trust circle.
fn belongs_to_private_slice(request: &Request, org_id: &Id) -> bool {
    match request.visibility {
        RequestVisibility::Trusted => true,
        RequestVisibility::SameOrganization => &request.organization_id == org_id,
        RequestVisibility::All | RequestVisibility::InviteOnly => false,
    }
}

impl VisibilityCache {
    pub fn new(kv: Arc<dyn KvStore + Send + Sync>, config: CacheConfig) -> Self {
        let local = Mutex::new(LruCache::new(config.local_capacity));
        Self { kv, config, local }
    }

    /// Loads a slice and rebuilds it on a miss.
    ///
    /// Failures of the store are reported and never treated as a miss.
    pub fn load_slice<F>(&self, key: &str, rebuild: F) -> Result<Arc<Slice>>
    where
        F: FnOnce() -> Result<Vec<Request>>,
    {
        if let Some(slice) = self.local_slice(key) {
            return Ok(slice);
        }
        let slice = match self.kv.get(key)? {
            Some(json) => match serde_json::from_str::<Slice>(&json) {
                Ok(slice) => Some(slice),
                Err(err) => {
                    log::warn!("Discarding corrupt cache entry {key}: {err}");
                    None
                }
            },
            None => None,
        };
        let slice = match slice {
            Some(slice) => slice,
            None => {
                log::debug!("Rebuilding cache entry {key}");
                let slice: Slice = rebuild()?
                    .iter()
                    .map(|r| (r.id.to_string(), CachedRequest::from(r)))
                    .collect();
                self.kv
                    .set(key, serde_json::to_string(&slice)?, self.config.ttl)?;
                slice
            }
        };
        let slice = Arc::new(slice);
        self.local.lock().put(
            key.to_owned(),
            LocalEntry {
                slice: Arc::clone(&slice),
                loaded_at: Instant::now(),
            },
        );
        Ok(slice)
    }

    fn local_slice(&self, key: &str) -> Option<Arc<Slice>> {
        let mut local = self.local.lock();
        let entry = local.get(key)?;
        if entry.loaded_at.elapsed() < self.config.local_ttl {
            return Some(Arc::clone(&entry.slice));
        }
        local.pop(key);
        None
    }

    /// Moves the request into the slices it belongs to after a change.
    ///
    /// `circle` contains the organization of the request and all
    /// organizations that trust it.
    pub fn apply_change(&self, request: &Request, circle: &[Organization], deleted: bool) -> Result<()> {
        let active = !deleted && !request.status.is_closed();
        let public = active && request.visibility == RequestVisibility::All;
        self.update_slice(PUBLIC_KEY, request, public)?;
        for org in circle {
            let private = active && belongs_to_private_slice(request, &org.id);
            self.update_slice(&private_key(&org.name), request, private)?;
        }
        Ok(())
    }

    fn update_slice(&self, key: &str, request: &Request, upsert: bool) -> Result<()> {
        self.local.lock().pop(key);
        // Missing slices are rebuilt on the next read
        let Some(json) = self.kv.get(key)? else {
            return Ok(());
        };
        let Ok(mut slice) = serde_json::from_str::<Slice>(&json) else {
            return self.invalidate(key);
        };
        let id = request.id.to_string();
        let changed = if upsert {
            let cached = CachedRequest::from(request);
            slice.insert(id, cached.clone()) != Some(cached)
        } else {
            slice.remove(&id).is_some()
        };
        if changed {
            self.kv
                .set(key, serde_json::to_string(&slice)?, self.config.ttl)?;
        }
        Ok(())
    }

    pub fn invalidate(&self, key: &str) -> Result<()> {
        self.local.lock().pop(key);
        self.kv.delete(key)?;
        Ok(())
    }

    /// Both private slices are stale after trust has been created or removed.
    pub fn invalidate_trust(&self, orgs: &[Organization]) -> Result<()> {
        for org in orgs {
            self.invalidate(&private_key(&org.name))?;
        }
        Ok(())
    }
}

pub fn rebuild_public_slice<R: Db>(repo: &R) -> std::result::Result<Vec<Request>, usecases::Error> {
    Ok(repo.active_public_requests()?)
}

pub fn rebuild_private_slice<R: Db>(
    repo: &R,
    org_id: &Id,
) -> std::result::Result<Vec<Request>, usecases::Error> {
    let mut requests = vec![];
    for circle_org_id in usecases::trust_circle(repo, org_id)? {
        requests.extend(
            repo.active_private_requests_of_org(&circle_org_id)?
                .into_iter()
                .filter(|r| belongs_to_private_slice(r, org_id)),
        );
    }
    Ok(requests)
}

/// Ids of all requests that the cache considers visible for the given
/// organizations or for everyone.
pub fn cached_request_ids(
    connections: &sqlite::Connections,
    cache: &VisibilityCache,
    orgs: &[Organization],
) -> Result<HashSet<Id>> {
    let mut slices = vec![cache.load_slice(PUBLIC_KEY, || {
        Ok(connections.shared()?.transaction(|db| rebuild_public_slice(db))?)
    })?];
    for org in orgs {
        slices.push(cache.load_slice(&private_key(&org.name), || {
            Ok(connections
                .shared()?
                .transaction(|db| rebuild_private_slice(db, &org.id))?)
        })?);
    }
    let ids = slices
        .iter()
        .flat_map(|slice| slice.keys())
        .filter_map(|id| {
            id.parse()
                .inspect_err(|_| log::warn!("Invalid request id in cache: {id}"))
                .ok()
        })
        .collect();
    Ok(ids)
}

/// Keeps the cached slices in line with request changes.
pub struct CacheMaintainer {
    connections: sqlite::Connections,
    cache: Arc<VisibilityCache>,
}

impl CacheMaintainer {
    pub fn new(connections: sqlite::Connections, cache: Arc<VisibilityCache>) -> Self {
        Self { connections, cache }
    }

    fn update(&self, request: &Request, deleted: bool) -> Result<()> {
        let circle = self.connections.shared()?.transaction(|db| {
            let org_ids: Vec<_> = usecases::trust_circle(db, &request.organization_id)?
                .into_iter()
                .collect();
            Ok::<_, usecases::Error>(db.get_orgs(&org_ids)?)
        })?;
        self.cache.apply_change(request, &circle, deleted)
    }
}

impl EventHandler for CacheMaintainer {
    fn handle_event(&self, event: &LifecycleEvent) {
        if !event.affects_visibility() {
            return;
        }
        let Some(request) = event.request() else {
            return;
        };
        let deleted = matches!(event, LifecycleEvent::RequestDeleted { .. });
        if let Err(err) = self.update(request, deleted) {
            log::warn!("Failed to update cached visibility of request {}: {err}", request.id);
        }
    }
}

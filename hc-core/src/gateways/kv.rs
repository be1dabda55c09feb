use std::time::Duration;

use anyhow::Result as Fallible;

/// A shared key-value store with expiring entries.
///
/// `Ok(None)` means the key is missing or expired. Errors of the
/// store itself are always reported as `Err`.
pub trait KvStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;
    fn set(&self, key: &str, value: String, ttl: Duration) -> Fallible<()>;
    fn delete(&self, key: &str) -> Fallible<()>;
}

use anyhow::Result as Fallible;
use hc_entities::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub url: String,
    pub url_expires_at: Option<Timestamp>,
}

/// Storage for binary file bodies.
pub trait ObjectStore {
    fn put_object(&self, key: &str, content_type: &str, body: &[u8]) -> Fallible<StoredObject>;
    fn delete_object(&self, key: &str) -> Fallible<()>;
}

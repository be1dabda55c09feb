use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result as Fallible};
use hc_core::gateways::object_store::{ObjectStore, StoredObject};

/// Stores objects as plain files below a local directory.
///
/// The files are expected to be served from `base_url`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    base_url: String,
}

impl FsObjectStore {
    pub fn try_new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            base_url: base_url.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Fallible<PathBuf> {
        // Keys are flat file names
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("Invalid object key '{key}'");
        }
        Ok(self.root.join(key))
    }
}

impl ObjectStore for FsObjectStore {
    fn put_object(&self, key: &str, content_type: &str, body: &[u8]) -> Fallible<StoredObject> {
        let path = self.path(key)?;
        fs::write(&path, body)?;
        log::debug!(
            "Stored object {key} ({content_type}, {} bytes) at {}",
            body.len(),
            path.display()
        );
        Ok(StoredObject {
            url: format!("{}/{key}", self.base_url.trim_end_matches('/')),
            url_expires_at: None,
        })
    }

    fn delete_object(&self, key: &str) -> Fallible<()> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("Object {key} has already been deleted");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::try_new(dir.path().join("files"), "http://files/").unwrap();
        let stored = store.put_object("abc.png", "image/png", b"png").unwrap();
        assert_eq!(stored.url, "http://files/abc.png");
        assert_eq!(fs::read(store.root().join("abc.png")).unwrap(), b"png");
        store.delete_object("abc.png").unwrap();
        assert!(!store.root().join("abc.png").exists());
        // Deleting twice is fine
        store.delete_object("abc.png").unwrap();
    }

    #[test]
    fn reject_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::try_new(dir.path(), "http://files").unwrap();
        assert!(store.put_object("../evil", "text/plain", b"").is_err());
        assert!(store.put_object("", "text/plain", b"").is_err());
    }
}

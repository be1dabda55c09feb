use crate::{id::Id, time::Timestamp};

/// Metadata of a binary object held by the object store.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id             : Id,
    pub name           : String,
    pub size           : u64,
    pub content_type   : String,
    pub url            : String,
    pub url_expires_at : Option<Timestamp>,
    pub created_at     : Timestamp,
}

impl File {
    /// The key of the body in the object store: `<file-id>.<ext>`.
    pub fn object_key(&self) -> String {
        object_key(self.id, &self.name)
    }
}

pub fn object_key(id: Id, file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains(['/', '\\']) => {
            format!("{id}.{}", ext.to_lowercase())
        }
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_the_extension() {
        let id = Id::new();
        assert_eq!(object_key(id, "photo.JPG"), format!("{id}.jpg"));
        assert_eq!(object_key(id, "archive.tar.gz"), format!("{id}.gz"));
        assert_eq!(object_key(id, "README"), id.to_string());
        assert_eq!(object_key(id, "trailing."), id.to_string());
    }
}

use hc_core::gateways::object_store::ObjectStore;

use super::*;

#[derive(Debug, Clone)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
}

/// Stores the body in the object store and records its metadata.
pub fn upload_file(
    connections: &sqlite::Connections,
    object_store: &dyn ObjectStore,
    deadline: Deadline,
    user_id: &Id,
    upload: Upload<'_>,
) -> Result<File> {
    let file_name = upload.file_name.trim();
    if file_name.is_empty() {
        return Err(usecases::Error::Name.into());
    }
    read_as_user(connections, deadline, user_id, |_, _| Ok(()))?;
    let id = Id::new();
    let key = object_key(id, file_name);
    let stored = object_store.put_object(&key, upload.content_type, upload.body)?;
    let file = File {
        id,
        name: file_name.to_owned(),
        size: upload.body.len() as u64,
        content_type: upload.content_type.to_owned(),
        url: stored.url,
        url_expires_at: stored.url_expires_at,
        created_at: Timestamp::now(),
    };
    let created = write(connections, deadline, |db| usecases::create_file(db, &file));
    if let Err(err) = created {
        if let Err(err) = object_store.delete_object(&key) {
            log::error!("Failed to delete uploaded object {key}: {err}");
        }
        return Err(err);
    }
    log::info!("User {user_id} uploaded file {} ({} bytes)", file.id, file.size);
    Ok(file)
}

use rocket::{
    form::Form,
    fs::TempFile,
    tokio::io::AsyncReadExt as _,
    FromForm,
};

use super::*;
use hc_application::prelude::Upload;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(FromForm)]
pub struct UploadForm<'r> {
    file: TempFile<'r>,
}

/// The name without any directory the client might have sent.
fn file_name(file: &TempFile<'_>) -> String {
    file.raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .unwrap_or_default()
        .to_owned()
}

#[post("/upload", data = "<form>")]
pub async fn post_upload(
    connections: sqlite::Connections,
    object_store: &State<ObjectStorage>,
    auth: Auth,
    deadline: HandlerDeadline,
    form: Form<UploadForm<'_>>,
) -> Result<json::UploadedFile> {
    let user_id = auth.user_id(&connections)?;
    let file = &form.file;
    let file_name = file_name(file);
    let content_type = file
        .content_type()
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());
    let mut body = Vec::with_capacity(file.len() as usize);
    let mut reader = std::pin::pin!(file.open().await?);
    reader.read_to_end(&mut body).await?;
    let upload = Upload {
        file_name: &file_name,
        content_type: &content_type,
        body: &body,
    };
    let file = flows::upload_file(&connections, &***object_store, deadline.0, &user_id, upload)?;
    debug!("User {user_id} uploaded file {} ({} bytes)", file.id, file.size);
    Ok(Json(file.into()))
}

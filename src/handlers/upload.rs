use crate::context::UserInfo;
use crate::core::ports::storer::FileStorer;
use crate::error::Error;
use actix_multipart::{Field, Multipart};
use actix_web::web::{Data, Json};
use futures_util::TryStreamExt;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn file_extension(field: &Field) -> Option<String> {
    field.content_type().map(|m| m.subtype().as_str().to_owned())
}

/// Drains a multipart field into memory, failing once it exceeds the upload
/// cap.
pub async fn read_capped(field: &mut Field, what: &str) -> Result<Vec<u8>, Error> {
    let mut content = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if content.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(Error::Validation(format!("{} exceeds the 5 MiB upload limit", what)));
        }
        content.extend_from_slice(&chunk);
    }
    Ok(content)
}

/// Generic authenticated upload (avatars, assignment submissions). Responds
/// with the stored names, servable under the static prefix.
pub async fn create<F>(user: UserInfo, mut payload: Multipart, storer: Data<F>) -> Result<Json<Vec<String>>, Error>
where
    F: FileStorer + 'static,
{
    let mut names = Vec::new();
    while let Some(mut field) = payload.try_next().await? {
        let ext = file_extension(&field);
        let content = read_capped(&mut field, "file").await?;
        let name = storer.write(&content, ext.as_deref())?;
        names.push(name);
    }
    log::info!("user {} uploaded {} file(s)", user.id, names.len());
    Ok(Json(names))
}

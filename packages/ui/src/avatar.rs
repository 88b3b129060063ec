//! Reading a picked image file into an upload for the profile avatar.

use api::ProfileImage;
use dioxus::prelude::*;

/// Largest avatar accepted before upload.
const MAX_AVATAR_BYTES: usize = 10 * 1024 * 1024;

/// MIME type from the file extension; the identity provider only takes images.
pub fn image_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// First file of a file-input change event, as an avatar upload.
/// `Ok(None)` when nothing was picked.
pub async fn read_avatar(evt: &FormEvent) -> Result<Option<ProfileImage>, String> {
    let Some(file) = evt.files().into_iter().next() else {
        return Ok(None);
    };
    let file_name = file.name();
    let content_type = file
        .content_type()
        .filter(|t| t.starts_with("image/"))
        .or_else(|| image_content_type(&file_name).map(str::to_string))
        .ok_or_else(|| "Please pick a PNG, JPEG, GIF or WebP image.".to_string())?;
    let bytes = file.read_bytes().await.map_err(|e| {
        tracing::error!("Failed to read {}: {}", file_name, e);
        "Failed to read the selected image.".to_string()
    })?;
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err("The selected image is larger than 10 MB.".to_string());
    }
    Ok(Some(ProfileImage {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

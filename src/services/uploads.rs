//! Storage of uploaded images under the configured upload directory.

use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;

use crate::forms::{FormError, image_extension};
use crate::services::{ServiceError, ServiceResult};

/// Copies an uploaded image into `upload_dir` under a fresh random name and
/// returns that name. An empty upload field yields `None`.
pub fn store_image(file: Option<TempFile>, upload_dir: &str) -> ServiceResult<Option<String>> {
    let Some(file) = file.filter(|f| f.size > 0) else {
        return Ok(None);
    };

    let original = file.file_name.clone().unwrap_or_default();
    let extension = image_extension(&original)
        .ok_or_else(|| ServiceError::from(FormError::UnsupportedImage(original.clone())))?;

    let name = format!("{}.{extension}", Uuid::new_v4().simple());
    let destination = Path::new(upload_dir).join(&name);

    std::fs::create_dir_all(upload_dir)
        .and_then(|()| std::fs::copy(file.file.path(), &destination))
        .map_err(|err| {
            log::error!("Failed to store upload `{original}`: {err}");
            ServiceError::Internal(format!("failed to store upload: {err}"))
        })?;

    log::info!("Stored upload `{original}` as `{name}`");
    Ok(Some(name))
}

/// Removes an image written by [`store_image`] whose record was never saved.
pub fn discard_image(name: Option<&str>, upload_dir: &str) {
    let Some(name) = name else {
        return;
    };
    match std::fs::remove_file(Path::new(upload_dir).join(name)) {
        Ok(()) => log::info!("Removed orphaned upload `{name}`"),
        Err(err) => log::warn!("Failed to remove orphaned upload `{name}`: {err}"),
    }
}

/// Multipart file field holding `body`, as the extractor would build it.
#[cfg(test)]
pub(crate) fn test_upload(name: &str, body: &[u8]) -> TempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body).unwrap();
    TempFile {
        file,
        content_type: None,
        file_name: Some(name.to_string()),
        size: body.len(),
    }
}

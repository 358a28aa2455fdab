// ==================== AVATAR UPLOADS ====================
// Images live in one flat directory shared by every user. Each profile
// update first clears all images from it, then stores the incoming files.

use crate::utils::AppError;
use actix_multipart::{Field, Multipart};
use futures::future::join_all;
use futures::StreamExt;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Text fields of the `PUT /api/update-user` form.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserForm {
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
}

impl UpdateUserForm {
    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "userId" => &mut self.user_id,
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "street" => &mut self.street,
            "country" => &mut self.country,
            "city" => &mut self.city,
            "bio" => &mut self.bio,
            other => {
                log::debug!("Ignoring unknown form field '{}'", other);
                return;
            }
        };
        *slot = Some(value);
    }
}

/// Parsed multipart body: the text fields plus the names of the stored files,
/// in the order they arrived.
#[derive(Debug, Default)]
pub struct UpdateUpload {
    pub form: UpdateUserForm,
    pub files: Vec<String>,
}

pub fn is_image_file(name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Deletes every image in `dir`, concurrently.
///
/// Never fails: a missing directory or a failed deletion is logged and the
/// caller carries on. Returns how many files were removed.
pub async fn purge_images(dir: &Path) -> usize {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("❌ Failed to list upload directory {}: {}", dir.display(), e);
            return 0;
        }
    };

    let mut targets: Vec<PathBuf> = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                if is_image_file(&entry.file_name().to_string_lossy()) {
                    targets.push(entry.path());
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("❌ Failed to read upload directory entry: {}", e);
                break;
            }
        }
    }

    let results = join_all(targets.iter().map(|path| async move {
        let result = fs::remove_file(path).await;
        match &result {
            Ok(_) => log::info!("🗑️ Deleted image: {}", path.display()),
            Err(e) => log::error!("❌ Failed to delete {}: {}", path.display(), e),
        }
        result
    }))
    .await;

    let removed = results.iter().filter(|r| r.is_ok()).count();
    log::info!("🧹 Upload purge finished: {}/{} images removed", removed, targets.len());
    removed
}

/// Strips any directory components a client put into the file name.
fn sanitize_file_name(raw: &str) -> Option<String> {
    Path::new(raw)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Streams one file part to `path`, returning the number of bytes written.
async fn write_file_part(field: &mut Field, path: &Path) -> Result<usize, AppError> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| AppError::UploadError(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut written = 0usize;
    while let Some(chunk) = field.next().await {
        let bytes = chunk?;
        written += bytes.len();
        file.write_all(&bytes)
            .await
            .map_err(|e| AppError::UploadError(format!("Failed to write {}: {}", path.display(), e)))?;
    }
    file.flush()
        .await
        .map_err(|e| AppError::UploadError(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(written)
}

/// Reads the multipart body, writing every file part into `upload_dir` under
/// its original name.
pub async fn receive_update(mut payload: Multipart, upload_dir: &Path) -> Result<UpdateUpload, AppError> {
    let mut upload = UpdateUpload::default();

    fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::UploadError(format!("Failed to create {}: {}", upload_dir.display(), e)))?;

    while let Some(item) = payload.next().await {
        let mut field = item?;

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            Some(raw) => {
                let Some(file_name) = sanitize_file_name(&raw) else {
                    log::warn!("⚠️ Skipping upload with unusable file name '{}'", raw);
                    while let Some(chunk) = field.next().await {
                        chunk?;
                    }
                    continue;
                };

                let path = upload_dir.join(&file_name);
                let written = match write_file_part(&mut field, &path).await {
                    Ok(written) => written,
                    Err(e) => {
                        if let Err(rm) = fs::remove_file(&path).await {
                            log::error!("❌ Failed to remove partial upload {}: {}", path.display(), rm);
                        }
                        return Err(e);
                    }
                };

                log::info!("📥 Stored upload {} ({} bytes)", path.display(), written);
                upload.files.push(file_name);
            }
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.next().await {
                    value.extend_from_slice(&chunk?);
                }
                let value = String::from_utf8(value)
                    .map_err(|_| AppError::InvalidRequest(format!("Field '{}' is not valid UTF-8", name)))?;
                upload.form.set(&name, value);
            }
        }
    }

    Ok(upload)
}

//! Local object storage for uploaded images, served under `/uploads`.

use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const PUBLIC_PREFIX: &str = "/uploads";
pub const FOLDERS: &[&str] = &["projects", "blog", "testimonials", "services"];
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub folder: String,
    pub url: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

/// Detect the image type from the leading bytes of a file.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Rejects names that could escape the upload folder.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains('\0')
}

/// Keep ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').replace("..", "_");
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

fn check_folder(folder: &str) -> AppResult<()> {
    if FOLDERS.contains(&folder) {
        Ok(())
    } else {
        Err(AppError::validation(format!("Unknown upload folder '{folder}'")))
    }
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_url(folder: &str, filename: &str) -> String {
        format!("{PUBLIC_PREFIX}/{folder}/{filename}")
    }

    /// Validate and write an uploaded image, returning where it can be fetched.
    pub async fn save(&self, folder: &str, original_name: &str, bytes: &[u8]) -> AppResult<StoredFile> {
        check_folder(folder)?;

        if !ALLOWED_EXTENSIONS.contains(&extension(original_name).as_str()) {
            return Err(AppError::validation(
                "Unsupported file type. Allowed: JPEG, PNG, WebP, GIF.",
            ));
        }
        if bytes.is_empty() {
            return Err(AppError::validation("Empty file"));
        }
        if bytes.len() > MAX_FILE_SIZE {
            return Err(AppError::PayloadTooLarge(
                "File too large. Maximum size is 5MB.".to_string(),
            ));
        }
        let mime_type = sniff_image_type(bytes).ok_or_else(|| {
            AppError::validation("File content does not match an allowed image type.")
        })?;

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_name)
        );
        tokio::fs::write(dir.join(&filename), bytes).await?;

        tracing::info!(folder, filename = %filename, size = bytes.len(), "Image uploaded");

        Ok(StoredFile {
            url: Self::public_url(folder, &filename),
            filename,
            folder: folder.to_string(),
            size: bytes.len() as u64,
            mime_type: Some(mime_type.to_string()),
            created_at: Utc::now().to_rfc3339(),
        })
    }

    pub async fn delete(&self, folder: &str, filename: &str) -> AppResult<()> {
        check_folder(folder)?;
        if !is_safe_filename(filename) {
            return Err(AppError::validation("Invalid filename"));
        }

        let path = self.root.join(folder).join(filename);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(AppError::not_found("File"));
        }
        tokio::fs::remove_file(&path).await?;
        tracing::info!(folder, filename, "Image deleted");
        Ok(())
    }

    /// Remove the file behind one of our public upload URLs. Anything else is ignored.
    pub async fn delete_by_url(&self, url: &str) -> bool {
        let Some(rest) = url.strip_prefix(PUBLIC_PREFIX).and_then(|r| r.strip_prefix('/')) else {
            return false;
        };
        let Some((folder, filename)) = rest.split_once('/') else {
            return false;
        };
        match self.delete(folder, filename).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(url, error = %e, "Could not remove uploaded file");
                false
            }
        }
    }

    /// Image files in a folder, newest first.
    pub async fn list(&self, folder: &str) -> AppResult<Vec<StoredFile>> {
        check_folder(folder)?;

        let dir = self.root.join(folder);
        if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !ALLOWED_EXTENSIONS.contains(&extension(&filename).as_str()) {
                continue;
            }

            let created_at = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map(|t| {
                    let dt: chrono::DateTime<Utc> = t.into();
                    dt.to_rfc3339()
                })
                .unwrap_or_default();

            files.push(StoredFile {
                url: Self::public_url(folder, &filename),
                filename,
                folder: folder.to_string(),
                size: metadata.len(),
                mime_type: None,
                created_at,
            });
        }

        // Names start with the upload timestamp, so they break ties.
        files.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(files)
    }
}

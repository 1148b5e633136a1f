use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::{AppError, AppResult};

/// Public path prefix under which stored files are served.
pub const MEDIA_ROUTE: &str = "/uploads";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "audio" => Ok(MediaKind::Audio),
            other => Err(AppError::ValidationError(format!(
                "Invalid media type '{}', expected 'image' or 'audio'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
        }
    }
}

/// Binary storage for question media. A stored blob is addressed by an opaque
/// media reference; `resolve` turns that reference into something a client can
/// fetch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, kind: MediaKind, original_name: &str, bytes: Vec<u8>) -> AppResult<String>;
    fn resolve(&self, media_ref: &str) -> String;
    async fn open(&self, file_name: &str) -> AppResult<Vec<u8>>;
}

/// Keeps uploads as plain files in one directory.
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn ensure_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).await?;
        log::info!("Media uploads stored in {}", self.root.display());
        Ok(())
    }

    async fn create_unique(&self, stem: &str, extension: &str) -> AppResult<(String, fs::File)> {
        let millis = Utc::now().timestamp_millis();

        for attempt in 0u32.. {
            let file_name = match attempt {
                0 => format!("{}-{}{}", stem, millis, extension),
                n => format!("{}-{}-{}{}", stem, millis, n, extension),
            };

            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&file_name))
                .await;

            match opened {
                Ok(file) => return Ok((file_name, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::StorageError("No free file name for upload".to_string()))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, kind: MediaKind, original_name: &str, bytes: Vec<u8>) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::ValidationError("No file uploaded".to_string()));
        }

        let (stem, extension) = split_file_name(original_name);
        let (file_name, file) = self.create_unique(&stem, &extension).await?;
        write_or_discard(&self.root.join(&file_name), file, &bytes).await?;

        log::info!(
            "Stored {} upload '{}' ({} bytes)",
            kind.as_str(),
            file_name,
            bytes.len()
        );

        Ok(format!("{}/{}", MEDIA_ROUTE, file_name))
    }

    fn resolve(&self, media_ref: &str) -> String {
        if media_ref.starts_with("http://") || media_ref.starts_with("https://") {
            return media_ref.to_string();
        }
        format!("{}{}", self.base_url, media_ref)
    }

    async fn open(&self, file_name: &str) -> AppResult<Vec<u8>> {
        if !is_plain_file_name(file_name) {
            return Err(AppError::NotFound(format!("Media '{}' not found", file_name)));
        }

        fs::read(self.root.join(file_name)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("Media '{}' not found", file_name))
            } else {
                e.into()
            }
        })
    }
}

/// Writes `bytes` into a freshly created file, removing it again if the write
/// fails part way.
async fn write_or_discard(path: &Path, mut file: fs::File, bytes: &[u8]) -> AppResult<()> {
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(err) = written {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path).await {
            log::warn!("Could not remove partial upload {}: {}", path.display(), remove_err);
        }
        return Err(err.into());
    }
    Ok(())
}

/// Safe stem and dotted extension from a client-supplied name. Directory parts
/// are discarded and anything outside `[A-Za-z0-9_-]` is replaced.
fn split_file_name(original_name: &str) -> (String, String) {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let path = Path::new(base);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "upload".to_string());

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(sanitize)
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    (stem, extension)
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn is_plain_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.starts_with('.')
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

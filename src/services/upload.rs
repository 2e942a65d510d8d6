//! File attachments for multipart uploads

use std::path::Path;

use reqwest::multipart::Part;

use super::ServiceError;

const OCTET_STREAM: &str = "application/octet-stream";

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// MIME type of an image, `image/{ext}` or `image/jpeg`
pub fn image_mime(file_name: &str) -> String {
    match extension(file_name) {
        Some(ext) => format!("image/{}", ext),
        None => "image/jpeg".to_string(),
    }
}

/// MIME type of an audio file.
///
/// A declared type is kept unless it is missing or `application/octet-stream`;
/// otherwise the extension decides, defaulting to `audio/mpeg`.
pub fn audio_mime(file_name: &str, declared: Option<&str>) -> String {
    if let Some(declared) = declared.filter(|d| !d.is_empty() && *d != OCTET_STREAM) {
        return declared.to_string();
    }

    let mime = match extension(file_name).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("aac") => "audio/aac",
        _ => "audio/mpeg",
    };
    mime.to_string()
}

/// In-memory file ready to be sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    async fn read(path: &Path, default_name: &str) -> Result<(String, Vec<u8>), ServiceError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ServiceError::Attachment(format!("{}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(default_name)
            .to_string();
        Ok((file_name, bytes))
    }

    /// Load an image; a path without a file name is sent as `photo.jpg`
    pub async fn image(path: &Path) -> Result<Self, ServiceError> {
        let (file_name, bytes) = Self::read(path, "photo.jpg").await?;
        let mime = image_mime(&file_name);
        Ok(Self::new(file_name, mime, bytes))
    }

    /// Load an audio file, keeping `declared` as its type when meaningful
    pub async fn audio(path: &Path, declared: Option<&str>) -> Result<Self, ServiceError> {
        let (file_name, bytes) = Self::read(path, "audio.mp3").await?;
        let mime = audio_mime(&file_name, declared);
        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn into_part(self) -> Result<Part, ServiceError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| ServiceError::Attachment(e.to_string()))
    }
}

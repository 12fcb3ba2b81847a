use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine};

use crate::error::AnalysisError;

/// A user-selected image held in memory: the preview reference for the
/// session plus the base64 form for transmission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    path: PathBuf,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk. Read failures surface as
    /// `AnalysisError::ImageRead`, distinct from any network error later in
    /// the pipeline.
    pub fn read(path: &Path) -> Result<Self, AnalysisError> {
        let bytes = fs::read(path).map_err(|source| AnalysisError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mime_type = mime_from_extension(path);
        log::debug!(
            "📸 Read image {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );

        Ok(Self {
            path: path.to_path_buf(),
            mime_type,
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Inline `data:` URL for the chat-completion image part.
    pub fn data_url(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        // jpeg covers jpg/jpeg and doubles as the fallback
        _ => "image/jpeg",
    }
}

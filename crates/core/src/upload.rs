//! Upload policy and the local-disk upload store.
//!
//! A single [`UploadPolicy`] decides what may be stored (size limit plus
//! extension and MIME allow-lists); [`UploadStore`] applies it, writes files
//! under a generated collision-resistant name, and serves them back by name.
//! Uploaded files are not linked to orders; callers keep the returned
//! filename themselves.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::CoreError;

/// Default maximum upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted by default.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "pdf", "doc", "docx"];

const MIME_JPEG: &str = "image/jpeg";
const MIME_PNG: &str = "image/png";
const MIME_PDF: &str = "application/pdf";
const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// MIME types accepted by default.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_PDF, MIME_DOC, MIME_DOCX];

/// What the upload endpoint accepts.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadPolicy {
    /// Default allow-lists with a custom size limit.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check a candidate upload, returning its lower-cased extension.
    ///
    /// Size is checked first so an oversized file is reported as such even
    /// when its type is also wrong.
    pub fn check(
        &self,
        original_name: &str,
        mime_type: Option<&str>,
        size: usize,
    ) -> Result<String, CoreError> {
        if size > self.max_bytes {
            return Err(CoreError::PayloadTooLarge(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_bytes
            )));
        }

        let ext = extension_of(original_name).unwrap_or_default();
        if !self.allowed_extensions.iter().any(|e| *e == ext) {
            return Err(CoreError::UnsupportedMediaType(format!(
                "Unsupported file type '.{ext}'. Allowed: {}",
                self.allowed_extensions.join(", ")
            )));
        }

        let mime = essence(mime_type.unwrap_or(MIME_OCTET_STREAM));
        if !self.allowed_mime_types.iter().any(|m| *m == mime) {
            return Err(CoreError::UnsupportedMediaType(format!(
                "Unsupported content type '{mime}'"
            )));
        }

        Ok(ext)
    }
}

/// Metadata returned after a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    /// Generated name on disk; also the retrieval key.
    pub filename: String,
    /// File name as sent by the client, without any directory part.
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Server-local storage path.
    pub path: String,
    /// Retrieval URL.
    pub url: String,
}

/// A stored file read back from disk.
#[derive(Debug)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Local-directory file store governed by an [`UploadPolicy`].
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    policy: UploadPolicy,
    url_prefix: String,
}

impl UploadStore {
    /// `url_prefix` is the public path files are served under, e.g. `/api/uploads`.
    pub fn new(root: impl Into<PathBuf>, policy: UploadPolicy, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            policy,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Validate and persist an uploaded file.
    pub async fn accept(
        &self,
        original_name: &str,
        mime_type: Option<&str>,
        data: &[u8],
    ) -> Result<UploadedFile, CoreError> {
        let ext = self.policy.check(original_name, mime_type, data.len())?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create upload directory: {e}")))?;

        let filename = generate_name(&ext);
        let path = self.root.join(&filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to write upload: {e}")))?;

        Ok(UploadedFile {
            url: format!("{}/{filename}", self.url_prefix),
            filename,
            original_name: base_name(original_name).to_string(),
            mime_type: essence(mime_type.unwrap_or(MIME_OCTET_STREAM)),
            size_bytes: data.len() as u64,
            path: path.to_string_lossy().to_string(),
        })
    }

    /// Read a stored file by its generated name.
    ///
    /// Names that could escape the upload directory are reported as missing.
    pub async fn open(&self, name: &str) -> Result<StoredFile, CoreError> {
        let not_found = || CoreError::ResourceNotFound(format!("File '{name}' not found"));

        if !is_safe_name(name) {
            return Err(not_found());
        }

        let bytes = tokio::fs::read(self.root.join(name))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => not_found(),
                _ => CoreError::Internal(format!("Failed to read upload '{name}': {e}")),
            })?;

        Ok(StoredFile {
            bytes,
            content_type: content_type_for(name),
        })
    }
}

/// Collision-resistant storage name: `<unix-millis>-<uuid>.<ext>`.
pub fn generate_name(ext: &str) -> String {
    format!(
        "{}-{}.{ext}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Lower-cased extension of a file name, if it has one.
pub fn extension_of(name: &str) -> Option<String> {
    let base = base_name(name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// `Content-Type` served for a stored file, based on its extension.
pub fn content_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("jpg" | "jpeg") => MIME_JPEG,
        Some("png") => MIME_PNG,
        Some("pdf") => MIME_PDF,
        Some("doc") => MIME_DOC,
        Some("docx") => MIME_DOCX,
        _ => MIME_OCTET_STREAM,
    }
}

/// Strip any client-side directory part (either separator style).
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// MIME type without parameters, lower-cased.
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_lowercase()
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

/**
 * Freelancer Uploads
 *
 * Allow-lists and size limits for the two optional freelancer files, and
 * the disk store that keeps accepted files under the upload directory.
 *
 * Files are checked before anything is written: a rejected file aborts the
 * registration with no identity, no profile and no file on disk.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::error::AuthError;

/// Per-file size limit (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored files are served
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Which file slot a multipart part fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    ProfilePicture,
    Resume,
}

impl UploadKind {
    /// Map a multipart field name to its slot
    pub fn from_field(name: &str) -> Option<Self> {
        match name {
            "profilePicture" => Some(UploadKind::ProfilePicture),
            "resume" => Some(UploadKind::Resume),
            _ => None,
        }
    }

    pub const fn field_name(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "profilePicture",
            UploadKind::Resume => "resume",
        }
    }

    pub const fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::ProfilePicture => IMAGE_EXTENSIONS,
            UploadKind::Resume => DOCUMENT_EXTENSIONS,
        }
    }

    pub const fn rejection_message(&self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "Only image files are allowed for profile picture!",
            UploadKind::Resume => "Only PDF and DOC files are allowed for resume!",
        }
    }

    /// Check the original file name against this slot's allow-list
    ///
    /// Matches the text after the last `.`, case-insensitively.
    pub fn check_file_name(&self, file_name: &str) -> Result<(), AuthError> {
        let accepted = file_name
            .rsplit_once('.')
            .map(|(_, ext)| {
                self.allowed_extensions()
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false);

        if accepted {
            Ok(())
        } else {
            Err(AuthError::UnsupportedFileType {
                kind: *self,
                file_name: file_name.to_string(),
            })
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadKind::ProfilePicture => f.write_str("profile picture"),
            UploadKind::Resume => f.write_str("resume"),
        }
    }
}

/// A validated file part held in memory until the registration is written
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub kind: UploadKind,
    pub original_name: String,
    pub data: Bytes,
}

impl IncomingFile {
    /// Validate name and size, then accept the part
    pub fn new(kind: UploadKind, original_name: String, data: Bytes) -> Result<Self, AuthError> {
        kind.check_file_name(&original_name)?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AuthError::FileTooLarge {
                kind,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        Ok(Self {
            kind,
            original_name,
            data,
        })
    }
}

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub kind: UploadKind,
    /// Path clients use, e.g. `/uploads/resume-1700000000000-<uuid>.pdf`
    pub public_path: String,
    pub disk_path: PathBuf,
}

/// Disk store for uploads
#[derive(Debug, Clone)]
pub struct UploadStore {
    base_dir: PathBuf,
}

impl UploadStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await
    }

    /// Stored name: `<field>-<unix millis>-<uuid><.ext>`
    fn stored_name(file: &IncomingFile) -> String {
        let extension = Path::new(&file.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        format!(
            "{}-{}-{}{}",
            file.kind.field_name(),
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }

    pub async fn store(&self, file: &IncomingFile) -> Result<StoredUpload, AuthError> {
        let name = Self::stored_name(file);
        let disk_path = self.base_dir.join(&name);

        tokio::fs::write(&disk_path, &file.data).await?;
        tracing::debug!(
            path = %disk_path.display(),
            bytes = file.data.len(),
            "Stored {}",
            file.kind
        );

        Ok(StoredUpload {
            kind: file.kind,
            public_path: format!("{PUBLIC_UPLOAD_PREFIX}/{name}"),
            disk_path,
        })
    }

    /// Store every file; on failure, remove the ones already written
    pub async fn store_all(&self, files: &[IncomingFile]) -> Result<Vec<StoredUpload>, AuthError> {
        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            match self.store(file).await {
                Ok(upload) => stored.push(upload),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal of stored files
    pub async fn discard(&self, uploads: &[StoredUpload]) {
        for upload in uploads {
            match tokio::fs::remove_file(&upload.disk_path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::error!(path = %upload.disk_path.display(), "Failed to remove upload: {:?}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_field_names() {
        assert_eq!(UploadKind::from_field("profilePicture"), Some(UploadKind::ProfilePicture));
        assert_eq!(UploadKind::from_field("resume"), Some(UploadKind::Resume));
        assert_eq!(UploadKind::from_field("portfolio"), None);
    }

    #[test]
    fn test_image_allow_list() {
        let kind = UploadKind::ProfilePicture;
        for name in ["me.jpg", "me.JPEG", "me.png", "anim.gif", "my.photo.Png"] {
            assert!(kind.check_file_name(name).is_ok(), "{name} should be accepted");
        }
        for name in ["me.bmp", "me", "me.png.exe", "resume.pdf"] {
            assert_matches!(
                kind.check_file_name(name),
                Err(AuthError::UnsupportedFileType { kind: UploadKind::ProfilePicture, .. }),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_document_allow_list() {
        let kind = UploadKind::Resume;
        for name in ["cv.pdf", "cv.DOC", "cv.docx"] {
            assert!(kind.check_file_name(name).is_ok(), "{name} should be accepted");
        }
        assert_matches!(
            kind.check_file_name("resume.exe"),
            Err(AuthError::UnsupportedFileType { kind: UploadKind::Resume, .. })
        );
    }

    #[test]
    fn test_size_limit() {
        let at_limit = Bytes::from(vec![0u8; MAX_UPLOAD_BYTES]);
        assert!(IncomingFile::new(UploadKind::Resume, "cv.pdf".into(), at_limit).is_ok());

        let over = Bytes::from(vec![0u8; MAX_UPLOAD_BYTES + 1]);
        assert_matches!(
            IncomingFile::new(UploadKind::Resume, "cv.pdf".into(), over),
            Err(AuthError::FileTooLarge { limit: MAX_UPLOAD_BYTES, .. })
        );
    }

    #[tokio::test]
    async fn test_store_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let file = IncomingFile::new(
            UploadKind::ProfilePicture,
            "avatar.PNG".into(),
            Bytes::from_static(b"\x89PNG"),
        )
        .unwrap();

        let stored = store.store_all(&[file]).await.unwrap();
        assert_eq!(stored.len(), 1);
        let upload = &stored[0];
        assert!(upload.public_path.starts_with("/uploads/profilePicture-"));
        assert!(upload.public_path.ends_with(".PNG"));
        assert_eq!(tokio::fs::read(&upload.disk_path).await.unwrap(), b"\x89PNG");

        store.discard(&stored).await;
        assert!(!upload.disk_path.exists());
    }

    #[tokio::test]
    async fn test_store_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("missing"));
        let file =
            IncomingFile::new(UploadKind::Resume, "cv.pdf".into(), Bytes::from_static(b"%PDF"))
                .unwrap();

        assert_matches!(store.store_all(&[file]).await, Err(AuthError::Storage(_)));
    }
}

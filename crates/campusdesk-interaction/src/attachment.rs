//! Loading files for the pro assistant.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use campusdesk_core::chat::{ALLOWED_ATTACHMENT_TYPES, FileData};
use campusdesk_core::{CampusError, Result};
use tracing::debug;

/// MIME type guessed from the file name, if it is one the assistant accepts.
pub fn accepted_mime_type(path: &Path) -> Option<&'static str> {
    let guessed = mime_guess::from_path(path).first_raw()?;
    ALLOWED_ATTACHMENT_TYPES
        .iter()
        .copied()
        .find(|allowed| *allowed == guessed)
}

/// Reads `path` into an inline attachment (base64 payload).
///
/// Fails with a validation error for anything but JPEG, PNG or PDF.
pub async fn load_attachment(path: &Path) -> Result<FileData> {
    let mime_type = accepted_mime_type(path).ok_or_else(|| {
        CampusError::validation(format!(
            "{}: please upload a valid Image (JPG/PNG) or PDF document",
            path.display()
        ))
    })?;

    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), mime_type, bytes = bytes.len(), "Loaded attachment");

    Ok(FileData {
        mime_type: mime_type.to_string(),
        data: BASE64_STANDARD.encode(bytes),
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_accepted_types() {
        assert_eq!(accepted_mime_type(Path::new("scan.JPG")), Some("image/jpeg"));
        assert_eq!(accepted_mime_type(Path::new("chart.png")), Some("image/png"));
        assert_eq!(accepted_mime_type(Path::new("paper.pdf")), Some("application/pdf"));
        assert_eq!(accepted_mime_type(Path::new("notes.txt")), None);
        assert_eq!(accepted_mime_type(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn test_load_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = load_attachment(&path).await.unwrap();

        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.data, "JVBERi0xLjQ=");
        assert_eq!(file.name.as_deref(), Some("notes.pdf"));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("essay.docx");
        std::fs::write(&path, b"PK").unwrap();

        let err = load_attachment(&path).await.unwrap_err();
        assert!(err.is_validation());
    }
}

//! Secret configuration file storage.
//!
//! Loads the Gemini API key from `secret.json` in the config directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use campusdesk_core::config::{GeminiConfig, SecretConfig};

/// Environment variable that takes precedence over `secret.json`.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Read-only access to `secret.json`.
///
/// Does NOT validate keys or write the file; `campusdesk init` writes the
/// template through [`SecretStorage::write_template`].
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads and parses the secret file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Resolves the API key: `GEMINI_API_KEY` first, then the file.
    ///
    /// A missing file is not an error here; it simply yields no key.
    pub fn resolve_api_key(&self) -> Result<Option<String>, SecretStorageError> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.resolve_with(from_env)
    }

    fn resolve_with(&self, from_env: Option<String>) -> Result<Option<String>, SecretStorageError> {
        if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
            return Ok(Some(key.trim().to_string()));
        }

        match self.load() {
            Ok(config) => Ok(config.gemini_api_key().map(str::to_string)),
            Err(SecretStorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates a template `secret.json` (mode 600 on Unix) unless one exists.
    ///
    /// Returns `true` when a file was written.
    pub fn write_template(&self) -> Result<bool, SecretStorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let json = serde_json::to_string_pretty(&template)?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(json.as_bytes())?;

        Ok(true)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        match storage.load() {
            Err(SecretStorageError::NotFound(path)) => assert_eq!(path, file_path),
            _ => panic!("Expected NotFound error"),
        }
        assert_eq!(storage.resolve_with(None).unwrap(), None);
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{ "gemini": { "api_key": "test-key-123", "model_name": "gemini-pro" } }"#,
        )
        .unwrap();

        let storage = SecretStorage::with_path(file_path);
        let gemini = storage.load().unwrap().gemini.unwrap();

        assert_eq!(gemini.api_key, "test-key-123");
        assert_eq!(gemini.model_name, Some("gemini-pro".to_string()));
        assert_eq!(storage.resolve_with(None).unwrap().as_deref(), Some("test-key-123"));
    }

    #[test]
    fn test_env_key_wins() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ "gemini": { "api_key": "from-file" } }"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let key = storage.resolve_with(Some("from-env".to_string())).unwrap();
        assert_eq!(key.as_deref(), Some("from-env"));

        let blank_env = storage.resolve_with(Some("   ".to_string())).unwrap();
        assert_eq!(blank_env.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{ invalid json").unwrap();

        let storage = SecretStorage::with_path(file_path);
        assert!(matches!(storage.load(), Err(SecretStorageError::ParseError(_))));
        assert!(storage.resolve_with(None).is_err());
    }

    #[test]
    fn test_write_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("cfg/secret.json"));

        assert!(storage.write_template().unwrap());
        assert!(!storage.write_template().unwrap());
        assert!(storage.load().unwrap().gemini.is_some());
        assert_eq!(storage.resolve_with(None).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_template_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        storage.write_template().unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

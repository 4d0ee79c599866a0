//! Unified path management for CampusDesk files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/campusdesk/        # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/campusdesk/   # Data directory
//! ├── state.json               # Key-value store (session, issues, pro chat)
//! └── logs/                    # Application logs
//!     └── campusdesk.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "campusdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved config and data directories.
///
/// Either directory can be overridden (CLI flags, tests); the other falls
/// back to the platform default from `dirs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl CampusPaths {
    /// Resolves both directories, honoring overrides.
    pub fn resolve(
        config_override: Option<&Path>,
        data_override: Option<&Path>,
    ) -> Result<Self, PathError> {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(APP_DIR),
        };
        let data_dir = match data_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs::data_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(APP_DIR),
        };
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Puts config and data under the same root (tests, portable installs).
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to secret.json.
    ///
    /// # Security Note
    ///
    /// Keep this file at mode 600; it holds the API key in plaintext.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

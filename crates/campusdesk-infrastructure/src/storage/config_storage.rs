//! `config.toml` loading.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

use campusdesk_core::config::AppConfig;
use campusdesk_core::{CampusError, Result};
use tracing::debug;

/// Reads and writes the application configuration file.
///
/// A missing or empty file yields [`AppConfig::default`]; any field left out
/// of the file takes its default value.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            CampusError::config(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Writes `config` atomically (temp file + rename).
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(config)?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CampusError::config("config path has no file name"))?;
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::issue::TransitionPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("config.toml"));
        assert_eq!(storage.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("config.toml"));

        let mut config = AppConfig::default();
        config.session.login_delay_ms = 10;
        config.issues.transition_policy = TransitionPolicy::ForwardOnly;
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), config);
        assert!(!temp_dir.path().join(".config.toml.tmp").exists());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[session\nlogin_delay_ms = ").unwrap();

        let err = ConfigStorage::new(path).load().unwrap_err();
        assert!(matches!(err, CampusError::Config(_)));
    }
}

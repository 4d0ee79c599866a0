use anyhow::{Context, Result};
use campusdesk_core::config::AppConfig;
use campusdesk_infrastructure::CampusPaths;
use campusdesk_infrastructure::storage::{API_KEY_ENV, ConfigStorage, SecretStorage};
use colored::Colorize;

pub fn run(paths: &CampusPaths, config_storage: &ConfigStorage, force: bool) -> Result<()> {
    println!("Initializing CampusDesk in {}", paths.config_dir().display());

    let config_path = config_storage.path();
    if config_path.exists() && !force {
        println!("  {} {} (use --force to overwrite)", "-".bright_black(), config_path.display());
    } else {
        config_storage
            .save(&AppConfig::default())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("  {} {}", "✓".green(), config_path.display());
    }

    let secrets = SecretStorage::with_path(paths.secret_file());
    let written = secrets
        .write_template()
        .with_context(|| format!("Failed to write {}", secrets.path().display()))?;
    if written {
        println!("  {} {}", "✓".green(), secrets.path().display());
    } else {
        println!("  {} {} (kept)", "-".bright_black(), secrets.path().display());
    }

    println!();
    println!(
        "Add your Gemini API key to {} or export {}.",
        secrets.path().display(),
        API_KEY_ENV
    );
    Ok(())
}

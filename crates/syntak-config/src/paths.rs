//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/syntak/config.toml`
//! - macOS: `~/Library/Application Support/syntak/config.toml`
//! - Windows: `%APPDATA%\syntak\config.toml`

use crate::ConfigError;
use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "syntak";

/// Config file name inside [`user_config_dir`].
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default config file path.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
    }

    #[test]
    fn test_config_file_inside_config_dir() {
        let file = user_config_file();
        assert_eq!(file.parent(), Some(user_config_dir().as_path()));
        assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("config.toml"));
    }
}

//! Centralized path resolution for platform-appropriate user directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Photomark\`
//! - macOS: `~/Library/Application Support/Photomark/`
//! - Linux: `~/.config/photomark/` (config), `~/.local/share/photomark/` (data)

use std::path::{Path, PathBuf};

const APP_DIR: &str = "photomark";

/// Returns true when running in development mode (cargo run or a debug build).
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/photomark/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join(APP_DIR))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory (dev mode: current directory).
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join(APP_DIR))
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Where the open dialog starts: the last used directory if it still exists,
/// otherwise the user's pictures folder, otherwise home.
pub fn image_dialog_dir(last_used: Option<&Path>) -> Option<PathBuf> {
    last_used
        .filter(|p| p.is_dir())
        .map(Path::to_path_buf)
        .or_else(dirs::picture_dir)
        .or_else(dirs::home_dir)
}

/// Ensure the config and data directories exist.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_has_json_extension() {
        let path = config_file();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_dev_mode_returns_local_paths() {
        // Tests are debug builds, so dev mode is on.
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(data_dir(), Some(PathBuf::from(".")));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_image_dialog_dir_prefers_existing_last_dir() {
        let here = std::env::current_dir().unwrap();
        assert_eq!(image_dialog_dir(Some(&here)), Some(here));
    }

    #[test]
    fn test_image_dialog_dir_skips_missing_last_dir() {
        let missing = Path::new("/definitely/not/a/real/dir/photomark");
        assert_ne!(image_dialog_dir(Some(missing)), Some(missing.to_path_buf()));
    }
}

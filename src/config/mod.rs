use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::common::Rgb;
use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::editor::{Brush, CanvasSettings, DoubleClickAction, SelectionPolicy};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_stroke_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_double_click_ms() -> u64 {
    400
}

fn default_true() -> bool {
    true
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Directory of the last opened image, used as the open dialog's start
    #[serde(default)]
    pub last_image_dir: Option<PathBuf>,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    /// Annotation font size in image pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub stroke_color: Rgb,

    #[serde(default)]
    pub text_color: Rgb,

    /// Let strokes be picked and dragged like text
    #[serde(default)]
    pub strokes_selectable: bool,

    /// Longest gap between the clicks of a double-click
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    /// Double-click flips the photo; when false it toggles annotation visibility
    #[serde(default = "default_true")]
    pub flip_on_double_click: bool,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            last_image_dir: None,
            stroke_width: default_stroke_width(),
            font_size: default_font_size(),
            stroke_color: Rgb::BLACK,
            text_color: Rgb::BLACK,
            strokes_selectable: false,
            double_click_ms: default_double_click_ms(),
            flip_on_double_click: true,
        }
    }
}

impl AppConfigData {
    pub fn canvas_settings(&self) -> CanvasSettings {
        CanvasSettings {
            brush: Brush {
                stroke_color: self.stroke_color,
                text_color: self.text_color,
                stroke_width: self.stroke_width.max(0.5),
            },
            font_size: self.font_size.max(1.0),
            policy: SelectionPolicy {
                strokes_selectable: self.strokes_selectable,
            },
            double_click: if self.flip_on_double_click {
                DoubleClickAction::Flip
            } else {
                DoubleClickAction::ToggleAnnotations
            },
        }
    }

    pub fn double_click_secs(&self) -> f64 {
        self.double_click_ms as f64 / 1000.0
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the directory of an opened image
#[derive(Message)]
pub struct RememberImageDirRequest {
    pub dir: PathBuf,
}

/// Parse config JSON, falling back to defaults with a reason on failure.
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: PathBuf) -> (AppConfig, Option<String>) {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    (
        AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    )
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (loaded, reset_reason) = load_config(crate::paths::config_file());
    *config = loaded;

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to remember the last image directory
fn remember_image_dir_system(
    mut events: MessageReader<RememberImageDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_image_dir.as_ref() == Some(&event.dir) {
            continue;
        }
        config.data.last_image_dir = Some(event.dir.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<RememberImageDirRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    remember_image_dir_system.run_if(on_message::<RememberImageDirRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.last_image_dir.is_none());
        assert_eq!(data.stroke_width, 2.0);
        assert_eq!(data.font_size, 12.0);
        assert_eq!(data.text_color, Rgb::BLACK);
        assert!(!data.strokes_selectable);
        assert_eq!(data.double_click_ms, 400);
        assert!(data.flip_on_double_click);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            last_image_dir: Some(PathBuf::from("/photos")),
            stroke_width: 4.0,
            stroke_color: Rgb::RED,
            strokes_selectable: true,
            ..AppConfigData::default()
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, data);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (data, reason) = parse_config(r#"{ "strokes_selectable": true }"#);
        assert!(reason.is_none());
        assert!(data.strokes_selectable);
        assert_eq!(data.stroke_width, 2.0);
        assert_eq!(data.double_click_ms, 400);
        assert!(data.flip_on_double_click);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let (data, reason) = parse_config("{ not json");
        assert_eq!(data, AppConfigData::default());
        assert!(reason.is_some_and(|r| r.contains("corrupted")));
    }

    #[test]
    fn test_canvas_settings_from_config() {
        let data = AppConfigData {
            flip_on_double_click: false,
            strokes_selectable: true,
            stroke_width: 0.0,
            ..AppConfigData::default()
        };
        let settings = data.canvas_settings();
        assert_eq!(settings.double_click, DoubleClickAction::ToggleAnnotations);
        assert!(settings.policy.strokes_selectable);
        assert_eq!(settings.brush.stroke_width, 0.5);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let (config, reason) = load_config(PathBuf::from("/no/such/dir/config.json"));
        assert!(reason.is_none());
        assert_eq!(config.data, AppConfigData::default());
        assert!(!config.dirty);
    }
}

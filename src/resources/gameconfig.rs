//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [scene]
//! width = 160
//! height = 120
//!
//! [time]
//! target_fps = 30
//!
//! [behavior]
//! move_interval_ms = 100
//! attack_interval_ms = 60
//! attack_offset_px = 0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_SCENE_WIDTH: u32 = 160;
const DEFAULT_SCENE_HEIGHT: u32 = 120;
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_MOVE_INTERVAL_MS: f32 = 100.0;
const DEFAULT_ATTACK_INTERVAL_MS: f32 = 60.0;
const DEFAULT_ATTACK_OFFSET_PX: f32 = 0.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the scene size, tick rate and the default animation cadence used
/// by the demo when wiring behaviors.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Scene width in pixels.
    pub scene_width: u32,
    /// Scene height in pixels.
    pub scene_height: u32,
    /// Ticks per second for headless runs.
    pub target_fps: u32,
    /// Default walk-cycle interval.
    pub move_interval_ms: f32,
    /// Default attack frame interval.
    pub attack_interval_ms: f32,
    /// Default gap between an owner and its weapon.
    pub attack_offset_px: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            scene_width: DEFAULT_SCENE_WIDTH,
            scene_height: DEFAULT_SCENE_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            move_interval_ms: DEFAULT_MOVE_INTERVAL_MS,
            attack_interval_ms: DEFAULT_ATTACK_INTERVAL_MS,
            attack_offset_px: DEFAULT_ATTACK_OFFSET_PX,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} scene, fps={}, move={}ms, attack={}ms offset={}px",
            self.scene_width,
            self.scene_height,
            self.target_fps,
            self.move_interval_ms,
            self.attack_interval_ms,
            self.attack_offset_px
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [scene] section
        if let Some(width) = config.getuint("scene", "width").ok().flatten() {
            self.scene_width = width as u32;
        }
        if let Some(height) = config.getuint("scene", "height").ok().flatten() {
            self.scene_height = height as u32;
        }

        // [time] section
        if let Some(fps) = config.getuint("time", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }

        // [behavior] section
        if let Some(ms) = config.getfloat("behavior", "move_interval_ms").ok().flatten() {
            self.move_interval_ms = ms as f32;
        }
        if let Some(ms) = config.getfloat("behavior", "attack_interval_ms").ok().flatten() {
            self.attack_interval_ms = ms as f32;
        }
        if let Some(px) = config.getfloat("behavior", "attack_offset_px").ok().flatten() {
            self.attack_offset_px = px as f32;
        }
    }

    /// Seconds per tick at the configured rate.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.target_fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_arcade_sized() {
        let config = GameConfig::new();
        assert_eq!((config.scene_width, config.scene_height), (160, 120));
        assert!((config.tick_seconds() - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[scene]\nwidth = 320\n\n[behavior]\nattack_offset_px = 2.5\n")
            .unwrap();
        assert_eq!(config.scene_width, 320);
        assert_eq!(config.scene_height, 120);
        assert_eq!(config.attack_offset_px, 2.5);
        assert_eq!(config.move_interval_ms, 100.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.target_fps, 30);
    }

    #[test]
    fn zero_fps_is_clamped() {
        let mut config = GameConfig::new();
        config.load_from_str("[time]\ntarget_fps = 0\n").unwrap();
        assert_eq!(config.target_fps, 1);
    }
}

//! Tunable game parameters.
//!
//! Defaults come from [`crate::core::constants`]; a `config.json` in the data
//! directory may override any subset of fields.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Rejected configuration. Raised once at startup, never per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Viewport width or height is zero, negative or not finite.
    InvalidViewport { width: f64, height: f64 },
    /// The gap plus both margins leaves no room for a random offset.
    GapDoesNotFit { height: f64, gap: f64, margin: f64 },
    /// Entity box is empty or starts outside the viewport.
    InvalidEntity,
    /// Obstacle width or speed is not positive.
    InvalidObstacle,
    /// Obstacles would never spawn.
    ZeroSpawnInterval,
    /// The overrides file exists but could not be read or parsed.
    Malformed { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport must be positive, got {}x{}", width, height)
            }
            ConfigError::GapDoesNotFit {
                height,
                gap,
                margin,
            } => write!(
                f,
                "gap {} with margin {} does not fit a viewport of height {}",
                gap, margin, height
            ),
            ConfigError::InvalidEntity => write!(f, "entity box must fit inside the viewport"),
            ConfigError::InvalidObstacle => {
                write!(f, "obstacle width and speed must be positive")
            }
            ConfigError::ZeroSpawnInterval => write!(f, "spawn interval must be non-zero"),
            ConfigError::Malformed { path, message } => write!(f, "{}: {}", path, message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Game configuration. Every field falls back to its default when absent
/// from the JSON overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub entity_x: f64,
    pub entity_width: f64,
    pub entity_height: f64,
    pub gravity: f64,
    pub jump_force: f64,
    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub pipe_speed: f64,
    pub pipe_frequency_ms: u64,
    pub pipe_margin: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            entity_x: ENTITY_X,
            entity_width: ENTITY_WIDTH,
            entity_height: ENTITY_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            pipe_frequency_ms: PIPE_FREQUENCY_MS,
            pipe_margin: PIPE_MARGIN,
        }
    }
}

impl GameConfig {
    /// Read overrides from `path` and validate the result.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// an error rather than a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let malformed = |message: String| ConfigError::Malformed {
            path: path.display().to_string(),
            message,
        };

        let config = match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| malformed(e.to_string()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(malformed(e.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the preconditions the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.viewport_width) || !positive(self.viewport_height) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.pipe_margin.is_nan()
            || self.pipe_margin < 0.0
            || !positive(self.pipe_gap)
            || !positive(self.offset_span())
        {
            return Err(ConfigError::GapDoesNotFit {
                height: self.viewport_height,
                gap: self.pipe_gap,
                margin: self.pipe_margin,
            });
        }
        if !positive(self.entity_width)
            || !positive(self.entity_height)
            || self.entity_x < 0.0
            || self.entity_x + self.entity_width > self.viewport_width
            || self.entity_height > self.viewport_height
        {
            return Err(ConfigError::InvalidEntity);
        }
        if !positive(self.pipe_width) || !positive(self.pipe_speed) {
            return Err(ConfigError::InvalidObstacle);
        }
        if self.pipe_frequency_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    /// Width of the range the random gap offset is drawn from.
    pub fn offset_span(&self) -> f64 {
        self.viewport_height - self.pipe_gap - 2.0 * self.pipe_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert!((config.gravity - 0.25).abs() < f64::EPSILON);
        assert!((config.jump_force - (-5.0)).abs() < f64::EPSILON);
        assert!((config.pipe_gap - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.pipe_frequency_ms, 1500);
        assert!((config.offset_span() - 260.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_positive_viewport_rejected() {
        let config = GameConfig {
            viewport_height: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));

        let config = GameConfig {
            viewport_width: -10.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_gap_too_large_rejected() {
        let config = GameConfig {
            viewport_height: 200.0,
            pipe_gap: 120.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let config = GameConfig {
            pipe_frequency_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_entity_outside_viewport_rejected() {
        let config = GameConfig {
            entity_x: 300.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidEntity));
    }

    #[test]
    fn test_partial_json_overrides_keep_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "pipe_gap": 150.0 }"#).unwrap();
        assert!((config.pipe_gap - 150.0).abs() < f64::EPSILON);
        assert!((config.viewport_height - VIEWPORT_HEIGHT).abs() < f64::EPSILON);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "gravity": 0.3 }"#).unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert!((config.gravity - 0.3).abs() < f64::EPSILON);
        assert!((config.pipe_gap - PIPE_GAP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "pipe_gap": "wide", "viewport_height": -5 }"#).unwrap();
        match GameConfig::load(&path) {
            Err(ConfigError::Malformed { path: shown, .. }) => {
                assert!(shown.ends_with("config.json"));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "viewport_height": -5 }"#).unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_load_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        assert!(matches!(
            GameConfig::load(dir.path()),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_error_messages_mention_values() {
        let err = ConfigError::InvalidViewport {
            width: 0.0,
            height: 480.0,
        };
        assert!(err.to_string().contains("0x480"));
    }
}

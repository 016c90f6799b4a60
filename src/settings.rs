//! Simulation settings
//!
//! Loaded from a JSON file on native hosts. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::SoundCatalog;
use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Arena, CueLatch, StepRules};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Side length of the square arena
    pub arena_size: f32,

    // === Scheduling ===
    /// Fixed tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Maximum ticks per `advance` call
    pub max_catch_up: u32,

    // === Spawning ===
    /// Smallest orb diameter (inclusive)
    pub min_size: f32,
    /// Largest orb diameter (exclusive)
    pub max_size: f32,
    /// Spawn positions are drawn from [0, spawn_extent)
    pub spawn_extent: f32,
    /// Speed parameter at startup
    pub initial_speed: f32,
    /// Upper bound of the speed control
    pub max_speed: f32,

    // === Audio ===
    /// Cue volume = orb size / volume_divisor
    pub volume_divisor: f32,
    /// Number of cue sounds in the catalog
    pub sound_count: u32,
    /// Directory or URL prefix holding `sound{n}.wav`
    pub sound_base_path: String,
    /// Cues per orb per tick
    pub cue_latch: CueLatch,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_size: ARENA_SIZE,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_catch_up: MAX_CATCH_UP,

            min_size: MIN_ORB_SIZE,
            max_size: MAX_ORB_SIZE,
            spawn_extent: SPAWN_EXTENT,
            initial_speed: DEFAULT_SPEED,
            max_speed: MAX_SPEED,

            volume_divisor: VOLUME_DIVISOR,
            sound_count: SOUND_COUNT,
            sound_base_path: "sounds".to_string(),
            cue_latch: CueLatch::PerKind,
            master_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_size > 0.0) {
            return Err(ConfigError::invalid("arena_size must be positive"));
        }
        if !(self.min_size > 0.0) || !(self.min_size < self.max_size) {
            return Err(ConfigError::invalid(format!(
                "orb size range [{}, {}) is empty or non-positive",
                self.min_size, self.max_size
            )));
        }
        if self.max_size > self.arena_size {
            return Err(ConfigError::invalid(format!(
                "max_size {} exceeds arena_size {}",
                self.max_size, self.arena_size
            )));
        }
        if !(self.spawn_extent > 0.0) {
            return Err(ConfigError::invalid("spawn_extent must be positive"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("tick_interval_ms must be non-zero"));
        }
        if self.sound_count == 0 {
            return Err(ConfigError::invalid("sound_count must be non-zero"));
        }
        if !(self.volume_divisor > 0.0) {
            return Err(ConfigError::invalid("volume_divisor must be positive"));
        }
        if !(self.max_speed >= 0.0) {
            return Err(ConfigError::invalid("max_speed must be non-negative"));
        }

        // Orbs spawned near the far edge get pushed back by the first tick
        if self.spawn_extent + self.max_size > self.arena_size {
            log::warn!(
                "spawn_extent {} + max_size {} exceeds arena {}; orbs may spawn against the wall",
                self.spawn_extent,
                self.max_size,
                self.arena_size
            );
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn step_rules(&self) -> StepRules {
        StepRules {
            latch: self.cue_latch,
            volume_divisor: self.volume_divisor,
        }
    }

    pub fn catalog(&self) -> SoundCatalog {
        SoundCatalog::new(self.sound_base_path.clone(), self.sound_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena().size, 800.0);
        assert_eq!(settings.tick_interval(), Duration::from_millis(16));
        assert_eq!(settings.catalog().count(), 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "sound_count": 8, "cue_latch": "single" }"#).unwrap();
        assert_eq!(settings.sound_count, 8);
        assert_eq!(settings.cue_latch, CueLatch::Single);
        assert_eq!(settings.max_size, MAX_ORB_SIZE);
    }

    #[test]
    fn test_invalid_size_range_rejected() {
        let err = Settings::from_json(r#"{ "min_size": 60, "max_size": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_sound_count_rejected() {
        let err = Settings::from_json(r#"{ "sound_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

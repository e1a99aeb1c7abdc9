//! Session configuration
//!
//! Loaded once at startup from JSON; every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Failure to obtain a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playfield and presentation settings for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,
    /// Seed for power-up rolls and particle jitter
    pub seed: u64,

    // === Visual Effects ===
    /// Screen shake on solid brick hits
    pub screen_shake: bool,
    /// Ball trail particles
    pub particles: bool,
    /// Size of the particle pool
    pub particle_pool: usize,

    // === Accessibility ===
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            seed: 0,
            screen_shake: true,
            particles: true,
            particle_pool: 500,
            reduced_motion: false,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.particle_pool
        }
    }

    /// Level area: full width, top half of the playfield
    pub fn level_size(&self) -> (f32, f32) {
        (self.width, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "reduced_motion": true }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.width, SCREEN_WIDTH);
        assert!(config.screen_shake);
        assert!(!config.effective_screen_shake());
    }

    #[test]
    fn test_particles_off_means_empty_pool() {
        let config = GameConfig {
            particles: false,
            ..Default::default()
        };
        assert_eq!(config.max_particles(), 0);
        assert_eq!(GameConfig::default().max_particles(), 500);
    }

    #[test]
    fn test_particle_pool_from_json() {
        let config = GameConfig::from_json(r#"{ "particle_pool": 64 }"#).unwrap();
        assert_eq!(config.max_particles(), 64);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert!(matches!(
            GameConfig::from_json("{ width: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/nonexistent/breakout.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

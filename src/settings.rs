//! Game settings
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in pixels
    pub width: u32,
    /// Playfield height in pixels (bricks occupy the top half)
    pub height: u32,
    /// Level layout files, in selection order
    pub levels: Vec<PathBuf>,
    /// Capacity of the ball-trail particle pool
    pub particle_capacity: usize,
    /// Seed for power-up rolls and particle jitter
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            levels: ["one", "two", "three", "four"]
                .iter()
                .map(|name| PathBuf::from(format!("levels/{name}.lvl")))
                .collect(),
            particle_capacity: DEFAULT_PARTICLE_CAPACITY,
            seed: 0x0b1e_c7ed,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Settings(format!(
                "playfield must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if (self.width as f32) < PLAYER_SIZE.x {
            return Err(Error::Settings(format!(
                "playfield width {} is narrower than the paddle",
                self.width
            )));
        }
        if self.levels.is_empty() {
            return Err(Error::Settings("at least one level is required".into()));
        }
        if self.particle_capacity == 0 {
            return Err(Error::Settings("particle_capacity must be > 0".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.levels.len(), 4);
        assert_eq!(settings.levels[3], PathBuf::from("levels/four.lvl"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "width": 1024 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.height, SCREEN_HEIGHT);
        assert_eq!(settings.particle_capacity, DEFAULT_PARTICLE_CAPACITY);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 42,
            levels: vec![PathBuf::from("a.lvl")],
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "particle_capacity": 0 }"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "levels": [] }"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "width": 50 }"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(Settings::from_json("not json"), Err(Error::Settings(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/breakout.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

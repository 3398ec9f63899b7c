//! Course and arena settings
//!
//! Loaded from a JSON file. Missing fields fall back to the built-in course
//! and arena, so a file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::{ArenaSettings, Course};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub course: Course,
    pub arena: ArenaSettings,
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.course.validate()?;
        self.arena.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FallDistance;

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "course": { "resistance": -35.0, "fall_distance": "ball_edge" },
            "arena": { "restitution": 0.8 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.course.resistance, -35.0);
        assert_eq!(settings.course.fall_distance, FallDistance::BallEdge);
        assert_eq!(settings.arena.restitution, 0.8);
        assert_eq!(settings.arena.gravity, crate::consts::GRAVITY);
    }

    #[test]
    fn test_degenerate_green_rejected() {
        let json = r#"{ "course": { "green": [[0, 0], [10, 0]] } }"#;
        assert!(matches!(Settings::from_json(json), Err(SimError::Json(_))));
    }

    #[test]
    fn test_invalid_value_rejected() {
        let json = r#"{ "arena": { "restitution": 1.5 } }"#;
        assert!(matches!(Settings::from_json(json), Err(SimError::InvalidSetting(_))));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("putt-sim-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.course.boost_factor = 2.5;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.course.boost_factor, 2.5);
        assert_eq!(loaded.course.green, settings.course.green);
        assert_eq!(loaded.course.hole, settings.course.hole);
        assert!((loaded.arena.restitution - settings.arena.restitution).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}

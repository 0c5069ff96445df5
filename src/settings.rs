//! Round settings
//!
//! Stored as JSON. Missing fields take their defaults, so older files keep
//! loading as fields are added.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{COURSE_COUNT, MAX_HOLES, MAX_PLAYERS};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Holes in the round (1-18)
    pub hole_count: usize,
    /// Players taking turns (1-4)
    pub player_count: usize,
    /// First hole played (1-9); later holes follow in order and wrap
    pub starting_hole: usize,
    /// Seed for tee placement scatter
    pub seed: u64,
    /// Autoplay gives up on a hole after this many strokes per player
    pub max_strokes_per_hole: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hole_count: COURSE_COUNT,
            player_count: 1,
            starting_hole: 1,
            seed: 0x601f,
            max_strokes_per_hole: 12,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Copy with every count pulled into its valid range
    pub fn clamped(&self) -> Self {
        Self {
            hole_count: self.hole_count.clamp(1, MAX_HOLES),
            player_count: self.player_count.clamp(1, MAX_PLAYERS),
            starting_hole: self.starting_hole.clamp(1, COURSE_COUNT),
            seed: self.seed,
            max_strokes_per_hole: self.max_strokes_per_hole.max(1),
        }
    }
}

//! Game configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command line flags are applied on top by `main`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::scenario::START_YEAR;

/// Upper bound on the share of the field covered by stars.
pub const MAX_STAR_DENSITY: f64 = 0.33;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scheduler tick interval in milliseconds
    pub tick_ms: u64,
    /// Ticks each rocket animation frame is held for
    pub rocket_frame_ticks: u32,
    /// Ticks per in-game year
    pub ticks_per_year: u32,
    /// Year the clock starts from
    pub start_year: u32,
    /// Share of the play field covered by stars
    pub star_density: f64,
    /// Directory holding the frame files
    pub assets_dir: PathBuf,
    /// Draw obstacle outlines (debugging aid)
    pub show_obstacles: bool,
    /// Fire one shot from the centre of the field at start-up
    pub opening_shot: bool,
    /// Fixed RNG seed, random when absent
    pub seed: Option<u64>,
    /// Where log output goes; logging is off without it
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            rocket_frame_ticks: 1,
            ticks_per_year: 15,
            start_year: START_YEAR,
            star_density: 0.04,
            assets_dir: PathBuf::from("assets"),
            show_obstacles: false,
            opening_shot: true,
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig("tick_ms must be positive".into()));
        }
        if self.rocket_frame_ticks == 0 {
            return Err(GameError::InvalidConfig(
                "rocket_frame_ticks must be positive".into(),
            ));
        }
        if self.ticks_per_year == 0 {
            return Err(GameError::InvalidConfig(
                "ticks_per_year must be positive".into(),
            ));
        }
        if self.start_year < START_YEAR {
            return Err(GameError::InvalidConfig(format!(
                "start_year must be at least {START_YEAR}, got {}",
                self.start_year
            )));
        }
        if !(self.star_density > 0.0 && self.star_density <= MAX_STAR_DENSITY) {
            return Err(GameError::InvalidConfig(format!(
                "star_density must be in (0, {MAX_STAR_DENSITY}], got {}",
                self.star_density
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

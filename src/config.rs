use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::snake::{Cell, Direction};

const APP_DIR_NAME: &str = "tick-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Playfield size in pixels the default grid is derived from.
pub const SCREEN_WIDTH_PX: u16 = 800;
pub const SCREEN_HEIGHT_PX: u16 = 600;

/// Pixel edge of one grid unit.
pub const BLOCK_SIZE_PX: u16 = 20;

pub const DEFAULT_GRID_WIDTH: u16 = SCREEN_WIDTH_PX / BLOCK_SIZE_PX;
pub const DEFAULT_GRID_HEIGHT: u16 = SCREEN_HEIGHT_PX / BLOCK_SIZE_PX;

/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Maximum number of body segments the snake can hold.
pub const DEFAULT_BODY_CAPACITY: usize = 300;

/// Segment count every game starts with. Score is measured against it.
pub const INITIAL_LENGTH: usize = 3;

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Starting segments, head first.
pub const INITIAL_SEGMENTS: [Cell; INITIAL_LENGTH] = [
    Cell { x: 5, y: 5 },
    Cell { x: 4, y: 5 },
    Cell { x: 3, y: 5 },
];

/// Logical grid dimensions in grid units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Runtime configuration for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridSize,
    pub ticks_per_second: u32,
    pub capacity: usize,
    /// Fixed food seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Keep the final board on screen until a key is pressed.
    pub linger_on_game_over: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            capacity: DEFAULT_BODY_CAPACITY,
            seed: None,
            linger_on_game_over: true,
        }
    }
}

impl Config {
    /// Loads configuration from an explicit JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the per-user config file, falling back to defaults when absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads `path`, treating a missing file as the default configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Rejects values the simulation cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be positive"));
        }

        if self.capacity < INITIAL_LENGTH {
            return Err(ConfigError::Invalid(
                "capacity must hold at least the initial snake",
            ));
        }

        if self.capacity > self.grid.total_cells() {
            return Err(ConfigError::Invalid(
                "capacity cannot exceed the number of grid cells",
            ));
        }

        if !INITIAL_SEGMENTS.iter().all(|cell| self.grid.contains(*cell)) {
            return Err(ConfigError::Invalid(
                "grid is too small for the initial snake",
            ));
        }

        Ok(())
    }

    /// Time between two simulation steps.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.ticks_per_second.max(1)))
    }
}

/// Returns the platform-correct config file path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

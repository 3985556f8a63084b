use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::theme::{Palette, PaletteFile, PaletteParseError};

const CONFIG_APP_DIR: &str = "arcade-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Square grid with `cells` cells on each side.
    #[must_use]
    pub fn square(cells: u16) -> Self {
        Self {
            width: cells,
            height: cells,
        }
    }
}

/// Window edge in pixels of the classic layout; with 20 px cells this is 40 cells.
pub const CLASSIC_WINDOW_SIZE: u16 = 800;

/// Cell edge in pixels of the classic layout.
pub const CLASSIC_CELL_SIZE: u16 = 20;

/// Default grid edge in cells.
pub const DEFAULT_GRID_CELLS: u16 = CLASSIC_WINDOW_SIZE / CLASSIC_CELL_SIZE;

/// Largest grid edge accepted from configuration.
pub const MAX_GRID_CELLS: u16 = 200;

/// Target rendered frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Food items kept on the board at all times.
pub const FOOD_CAPACITY: usize = 3;

/// Power-ups allowed on the board at once.
pub const POWER_UP_CAPACITY: usize = 1;

/// Points for one food item.
pub const FOOD_POINTS: u32 = 10;

/// Points for running over an enemy while invincible.
pub const ENEMY_KILL_POINTS: u32 = 50;

/// Lifetime of SPEED and INVINCIBILITY, in ticks.
pub const POWER_UP_DURATION_TICKS: u32 = 300;

/// Segments added by a GROWTH power-up.
pub const GROWTH_SEGMENTS: usize = 3;

/// Per-tick chance of a power-up appearing while none is on the board.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.05;

/// Per-tick chance of an extra enemy appearing in survival mode.
pub const ENEMY_SPAWN_CHANCE: f64 = 0.001;

/// Speed multiplier while the SPEED effect is active.
pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;

/// Base speed of the player snake.
pub const PLAYER_BASE_SPEED: f32 = 1.0;

/// Base speed of enemy snakes, relative to the player.
pub const ENEMY_BASE_SPEED: f32 = 0.5;

/// Ticks per second at base speed are `frame_rate / TICK_DIVISOR`.
pub const TICK_DIVISOR: f32 = 4.0;

/// Immutable settings handed to [`crate::game::GameWorld`] at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub frame_rate: u32,
    pub palette: Palette,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::square(DEFAULT_GRID_CELLS),
            frame_rate: DEFAULT_FRAME_RATE,
            palette: Palette::default(),
            seed: None,
        }
    }
}

/// Values that may override the defaults, from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub grid_cells: Option<u16>,
    pub frame_rate: Option<u32>,
    pub seed: Option<u64>,
}

/// Errors raised while assembling a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid size must be between 1 and {max} cells, got {0}", max = MAX_GRID_CELLS)]
    GridSize(u16),
    #[error("frame rate must be at least 1")]
    FrameRate,
    #[error(transparent)]
    Palette(#[from] PaletteParseError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    grid_size: Option<u16>,
    #[serde(default)]
    frame_rate: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    palette: Option<PaletteFile>,
}

impl GameConfig {
    /// Builds the configuration from defaults, the config file, then CLI overrides.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file
    /// is read when present and skipped otherwise.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => read_config_file(&path)?,
                _ => ConfigFile::default(),
            },
        };

        let mut config = Self::default();
        config.apply_file(file)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(cells) = file.grid_size {
            self.grid = GridSize::square(cells);
        }
        if let Some(frame_rate) = file.frame_rate {
            self.frame_rate = frame_rate;
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
        if let Some(palette) = file.palette {
            self.palette = palette.resolve(&self.palette)?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(cells) = overrides.grid_cells {
            self.grid = GridSize::square(cells);
        }
        if let Some(frame_rate) = overrides.frame_rate {
            self.frame_rate = frame_rate;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Rejects grids and frame rates the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for edge in [self.grid.width, self.grid.height] {
            if edge == 0 || edge > MAX_GRID_CELLS {
                return Err(ConfigError::GridSize(edge));
            }
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::FrameRate);
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config_str(raw: &str) -> Result<ConfigFile, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Per-user config file location, when the platform has a config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_APP_DIR).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use ratatui::style::Color;

    use super::{ConfigError, ConfigOverrides, GameConfig, GridSize, parse_config_str};

    #[test]
    fn default_grid_matches_classic_window() {
        let config = GameConfig::default();
        assert_eq!(config.grid, GridSize::square(40));
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn file_values_are_applied_then_overridden() {
        let path = unique_test_path("layered");
        write_file(
            &path,
            r##"{ "grid_size": 12, "frame_rate": 30, "palette": { "food": "#010203" } }"##,
        );

        let overrides = ConfigOverrides {
            grid_cells: Some(20),
            frame_rate: None,
            seed: Some(9),
        };
        let config =
            GameConfig::load(Some(path.as_path()), &overrides).expect("config should load");

        assert_eq!(config.grid, GridSize::square(20));
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.palette.food, Color::Rgb(1, 2, 3));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = unique_test_path("missing");
        let result = GameConfig::load(Some(path.as_path()), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = unique_test_path("malformed");
        write_file(&path, "not-json");

        let result = GameConfig::load(Some(path.as_path()), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        cleanup_test_path(&path);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_config_str(r#"{ "difficulty": 3 }"#).is_err());
    }

    #[test]
    fn zero_grid_and_frame_rate_are_rejected() {
        let mut config = GameConfig::default();
        config.grid = GridSize::square(0);
        assert!(matches!(config.validate(), Err(ConfigError::GridSize(0))));

        let mut config = GameConfig::default();
        config.frame_rate = 0;
        assert!(matches!(config.validate(), Err(ConfigError::FrameRate)));
    }

    fn write_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("arcade-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}

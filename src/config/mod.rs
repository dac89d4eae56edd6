pub mod loader;
pub mod sections;

use serde::{Deserialize, Serialize};

pub use loader::ConfigError;
pub use sections::{BoardConfig, DisplayConfig, SpawnConfig, TimingConfig};

use crate::game::MIN_BOARD_WIDTH;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KretConfig {
    // Fixed seed for reproducible sessions; random when absent
    pub seed: Option<u64>,
    pub board: BoardConfig,
    pub spawn: SpawnConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

impl KretConfig {
    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width < MIN_BOARD_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "board.width must be at least {MIN_BOARD_WIDTH}, got {}",
                self.board.width
            )));
        }
        if self.board.height == 0 {
            return Err(ConfigError::Invalid("board.height must be nonzero".into()));
        }
        if self.spawn.shapes.is_empty() {
            return Err(ConfigError::Invalid(
                "spawn.shapes must name at least one shape".into(),
            ));
        }
        if self.timing.fps == 0 || self.timing.speed_multiplier == 0 {
            return Err(ConfigError::Invalid(
                "timing.fps and timing.speed_multiplier must be nonzero".into(),
            ));
        }
        if self.timing.frames_per_new_block == 0 || self.timing.frames_until_player_fall == 0 {
            return Err(ConfigError::Invalid(
                "timing frame intervals must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

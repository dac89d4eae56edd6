use serde::{Deserialize, Serialize};

use crate::components::BlockKind;
use crate::game;

// Board geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize, // Visible rows only
    pub upper_lines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: game::BOARD_WIDTH,
            height: game::BOARD_HEIGHT,
            upper_lines: game::UPPER_LINES,
        }
    }
}

impl BoardConfig {
    // Total rows in the grid, hidden spawn buffer included
    #[must_use]
    pub fn total_height(&self) -> usize {
        self.height + self.upper_lines
    }
}

// Block spawning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub max_attempts: usize,
    pub shapes: Vec<BlockKind>,
    pub populate: bool, // Pre-fill the board before play starts
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_attempts: game::SPAWN_ATTEMPTS,
            shapes: BlockKind::DEFAULT_ENABLED.to_vec(),
            populate: true,
        }
    }
}

// Frame pacing for the host loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u64,
    pub speed_multiplier: u64,
    pub frames_per_new_block: u64,
    pub speed_change_iterations: u64,
    pub frames_until_player_fall: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: game::FPS,
            speed_multiplier: game::GAME_SPEED_MULTIPLIER,
            frames_per_new_block: game::FRAMES_PER_NEW_BLOCK,
            speed_change_iterations: game::SPEED_CHANGE_ITERATIONS,
            frames_until_player_fall: game::FRAMES_UNTIL_PLAYER_FALL,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn frames_per_iteration(&self) -> u64 {
        (self.fps / self.speed_multiplier.max(1)).max(1)
    }
}

// Terminal view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub double_width: bool,
    pub show_debug: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            double_width: true,
            show_debug: false,
        }
    }
}

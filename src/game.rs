#![warn(clippy::all, clippy::pedantic)]

// Visible board dimensions
pub const BOARD_WIDTH: usize = 16;
pub const BOARD_HEIGHT: usize = 16;

// Hidden rows above the visible board where new blocks appear
pub const UPPER_LINES: usize = 4;

// Narrowest board every shape still fits on (the horizontal bar)
pub const MIN_BOARD_WIDTH: usize = 4;

// Spawning
pub const SPAWN_ATTEMPTS: usize = 5;

// Frame pacing
pub const FPS: u64 = 100;
pub const GAME_SPEED_MULTIPLIER: u64 = 1;
pub const FRAMES_PER_NEW_BLOCK: u64 = 6;
pub const SPEED_CHANGE_ITERATIONS: u64 = 3; // Speed doubles every this many initial iteration lengths
pub const FRAMES_UNTIL_PLAYER_FALL: u64 = 100;

pub const OBITUARY: &str = "Ś.P. Kret zdechł";

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Frame counters stay far below i64::MAX
    clippy::cast_possible_wrap
)]

use crate::config::TimingConfig;

/// What the host loop should do on the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameActions {
    pub iterate: bool,
    pub spawn: bool,
    pub player_fall: bool,
}

/// Frame-counting pacer with a single speed ramp: the iteration interval
/// halves every `speed_change_iterations` initial iteration lengths.
///
/// Any player input pushes the next iteration a full interval away, and
/// moving up postpones the forced fall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSchedule {
    frame: u64,
    frames_per_iteration: u64,
    frames_per_new_block: u64,
    frames_per_speed_change: u64,
    frames_until_player_fall: u64,
    last_movement_frame: u64,
    last_up_movement_frame: u64,
}

impl FrameSchedule {
    #[must_use]
    pub fn new(timing: &TimingConfig) -> Self {
        let frames_per_iteration = timing.frames_per_iteration();
        Self {
            frame: 0,
            frames_per_iteration,
            frames_per_new_block: timing.frames_per_new_block.max(1),
            frames_per_speed_change: (timing.speed_change_iterations * frames_per_iteration)
                .max(1),
            frames_until_player_fall: timing.frames_until_player_fall.max(1),
            last_movement_frame: 0,
            last_up_movement_frame: 0,
        }
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn frames_per_iteration(&self) -> u64 {
        self.frames_per_iteration
    }

    fn elapsed_since(&self, mark: u64, period: u64) -> bool {
        (self.frame as i64 - mark as i64).rem_euclid(period as i64) == 0
    }

    /// Moves to the next frame and reports what is due on it.
    pub fn advance(&mut self) -> FrameActions {
        self.frame += 1;

        let iterate = self.elapsed_since(self.last_movement_frame, self.frames_per_iteration);
        let spawn =
            iterate && (self.frame / self.frames_per_iteration) % self.frames_per_new_block != 0;
        let player_fall =
            self.elapsed_since(self.last_up_movement_frame, self.frames_until_player_fall);

        if self.frame % self.frames_per_speed_change == 0 {
            let faster = self.frames_per_iteration / 2;
            if faster > 0 {
                self.frames_per_iteration = faster;
            }
        }

        FrameActions {
            iterate,
            spawn,
            player_fall,
        }
    }

    /// Records player input on the current frame.
    pub fn note_movement(&mut self, upward: bool) {
        self.last_movement_frame = self.frame + 1;
        if upward {
            self.last_up_movement_frame = self.frame;
        }
    }
}

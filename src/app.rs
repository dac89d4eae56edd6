#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::{Block, BlockKind, Catalog, Cell, Coord, GameState, SimRng};
use crate::config::KretConfig;
use crate::grid::Grid;
use crate::{player, systems};

/// What the renderer sees in a visible cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Block(BlockKind),
    Player,
}

/// One play-through: the world holding the grid, its occupants and counters.
pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub config: KretConfig,
    player: Option<Entity>,
}

impl App {
    /// Starts a session seeded from the config, or randomly when it has no seed.
    #[must_use]
    pub fn new(config: KretConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SimRng::with_seed(seed),
            None => SimRng::default(),
        };
        Self::with_rng(config, rng)
    }

    #[must_use]
    pub fn with_seed(config: KretConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::with_seed(seed))
    }

    fn with_rng(config: KretConfig, rng: SimRng) -> Self {
        let mut app = Self {
            world: World::new(),
            should_quit: false,
            config,
            player: None,
        };
        app.world.insert_resource(rng);
        app.start();
        app
    }

    fn start(&mut self) {
        let board = &self.config.board;
        self.world
            .insert_resource(Grid::new(board.width, board.total_height()));
        self.world.insert_resource(GameState::default());
        self.world
            .insert_resource(Catalog::new(self.config.spawn.shapes.clone()));

        let start = self.player_start();
        if self.config.spawn.populate {
            systems::populate_board(&mut self.world, start);
        }

        self.player = match systems::spawn_player(&mut self.world, start) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!("Could not place the player: {err}");
                None
            }
        };
        info!(
            "New game on a {}x{} board",
            self.config.board.width, self.config.board.height
        );
    }

    /// Middle column of the bottom row.
    #[must_use]
    pub fn player_start(&self) -> Coord {
        let board = &self.config.board;
        Coord::new(
            (board.width / 2) as i32,
            board.total_height() as i32 - 1,
        )
    }

    /// Throws the current play-through away and starts a new one. The random
    /// source carries on, so a seeded session stays reproducible.
    pub fn reset(&mut self) {
        self.world.clear_entities();
        self.start();
    }

    pub fn tick(&mut self) {
        systems::tick_system(&mut self.world);
    }

    pub fn spawn_block(&mut self) -> Option<Entity> {
        systems::spawn_block(&mut self.world, self.config.spawn.max_attempts, None)
    }

    pub fn erode_once(&mut self) -> Option<Entity> {
        systems::erode_system(&mut self.world)
    }

    /// One game iteration: optional spawn, one erosion attempt, one tick.
    pub fn step(&mut self, spawn: bool) {
        if spawn {
            self.spawn_block();
        }
        self.erode_once();
        self.tick();
    }

    pub fn move_horizontal(&mut self, dx: i32) -> bool {
        player::move_horizontal(&mut self.world, dx)
    }

    pub fn move_vertical(&mut self, dy: i32) -> bool {
        player::move_vertical(&mut self.world, dy)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        player::is_dead(&self.world)
    }

    #[must_use]
    pub fn blocks_eaten(&self) -> u32 {
        self.world.resource::<GameState>().blocks_eaten
    }

    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<GameState>().tick
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.config.board.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.config.board.height
    }

    #[must_use]
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    #[must_use]
    pub fn tile(&self, cell: Cell) -> Tile {
        match cell {
            Cell::Empty => Tile::Empty,
            Cell::Player(_) => Tile::Player,
            Cell::Block(id) => self
                .world
                .get::<Block>(id)
                .map_or(Tile::Empty, |block| Tile::Block(block.kind)),
        }
    }

    /// Cells below the hidden spawn buffer, row-major, with `y` counted from
    /// the top of the visible area.
    pub fn visible_cells(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        let upper = self.config.board.upper_lines as i32;
        self.world
            .resource::<Grid>()
            .iter()
            .filter(move |&(_, y, _)| y >= upper)
            .map(move |(x, y, cell)| (x, y - upper, self.tile(cell)))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(KretConfig::default())
    }
}

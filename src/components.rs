#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// A cell address on the grid. `y` grows downwards, row 0 is the top of the
/// hidden spawn buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Point,
    HorizontalLine,
    VerticalLine,
    T,
    SHorizontal,
    SVertical,
    ZHorizontal,
    ZVertical,
}

// Offsets from the spawn origin, one row per shape.
const SHAPE_OFFSETS: [&[(i32, i32)]; 8] = [
    &[(0, 0)],
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
    &[(0, 0), (1, 0), (2, 0), (1, 1)],
    &[(1, 0), (2, 0), (0, 1), (1, 1)],
    &[(0, 0), (0, 1), (1, 1), (1, 2)],
    &[(0, 0), (1, 0), (1, 1), (2, 1)],
    &[(1, 0), (0, 1), (1, 1), (0, 2)],
];

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Point,
        BlockKind::HorizontalLine,
        BlockKind::VerticalLine,
        BlockKind::T,
        BlockKind::SHorizontal,
        BlockKind::SVertical,
        BlockKind::ZHorizontal,
        BlockKind::ZVertical,
    ];

    /// Shapes that spawn when the configuration does not say otherwise.
    pub const DEFAULT_ENABLED: [BlockKind; 6] = [
        BlockKind::T,
        BlockKind::VerticalLine,
        BlockKind::SHorizontal,
        BlockKind::SVertical,
        BlockKind::ZHorizontal,
        BlockKind::ZVertical,
    ];

    #[must_use]
    pub fn offsets(self) -> &'static [(i32, i32)] {
        SHAPE_OFFSETS[self as usize]
    }

    /// Absolute cells occupied by this shape when spawned at `origin`.
    #[must_use]
    pub fn cells_at(self, origin: Coord) -> Vec<Coord> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| origin.offset(dx, dy))
            .collect()
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            BlockKind::Point => 'P',
            BlockKind::HorizontalLine | BlockKind::VerticalLine => 'L',
            BlockKind::T => 'R',
            BlockKind::SHorizontal | BlockKind::SVertical => 'S',
            BlockKind::ZHorizontal | BlockKind::ZVertical => 'Z',
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            BlockKind::Point => ratatui::style::Color::Magenta,
            BlockKind::HorizontalLine | BlockKind::VerticalLine => ratatui::style::Color::Blue,
            BlockKind::T => ratatui::style::Color::Red,
            BlockKind::SHorizontal | BlockKind::SVertical => ratatui::style::Color::Green,
            BlockKind::ZHorizontal | BlockKind::ZVertical => ratatui::style::Color::Yellow,
        }
    }
}

/// What a single grid cell refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(Entity),
    Player(Entity),
}

impl Cell {
    #[must_use]
    pub fn entity(self) -> Option<Entity> {
        match self {
            Cell::Empty => None,
            Cell::Block(entity) | Cell::Player(entity) => Some(entity),
        }
    }

    #[must_use]
    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block(_))
    }
}

/// Anything that occupies a set of cells and can be displaced as a unit.
pub trait Movable {
    fn cells(&self) -> &[Coord];

    /// The grid value written into every cell this entity occupies.
    fn occupant(&self, entity: Entity) -> Cell;

    fn shift(&mut self, dx: i32, dy: i32);
}

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub cells: Vec<Coord>,
    /// Last tick this block was placed or processed by the simulation clock.
    pub age: u64,
    /// Consecutive ticks the block failed to move down.
    pub stillness_age: u32,
}

impl Block {
    #[must_use]
    pub fn new(kind: BlockKind, origin: Coord, tick: u64) -> Self {
        Self {
            kind,
            cells: kind.cells_at(origin),
            age: tick,
            stillness_age: 0,
        }
    }
}

impl Movable for Block {
    fn cells(&self) -> &[Coord] {
        &self.cells
    }

    fn occupant(&self, entity: Entity) -> Cell {
        Cell::Block(entity)
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            *cell = cell.offset(dx, dy);
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub cell: Coord,
}

impl Player {
    #[must_use]
    pub fn new(cell: Coord) -> Self {
        Self { cell }
    }
}

impl Movable for Player {
    fn cells(&self) -> &[Coord] {
        std::slice::from_ref(&self.cell)
    }

    fn occupant(&self, entity: Entity) -> Cell {
        Cell::Player(entity)
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        self.cell = self.cell.offset(dx, dy);
    }
}

/// Handle to the session's single player entity.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle(pub Entity);

/// Per-session counters.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub tick: u64,
    pub blocks_eaten: u32,
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shapes the spawner may pick from.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kinds: Vec<BlockKind>,
}

impl Catalog {
    #[must_use]
    pub fn new(kinds: Vec<BlockKind>) -> Self {
        Self { kinds }
    }

    #[must_use]
    pub fn kinds(&self) -> &[BlockKind] {
        &self.kinds
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(BlockKind::DEFAULT_ENABLED.to_vec())
    }
}

/// Seedable random source shared by the spawner and eroder.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub fastrand::Rng);

impl SimRng {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    #[must_use]
    pub fn pick(&mut self, kinds: &[BlockKind]) -> Option<BlockKind> {
        if kinds.is_empty() {
            return None;
        }
        Some(kinds[self.0.usize(..kinds.len())])
    }

    /// Uniform coordinate in `[0, width) x [0, height)`.
    pub fn coord_in(&mut self, width: usize, height: usize) -> Coord {
        Coord::new(
            self.0.usize(..width.max(1)) as i32,
            self.0.usize(..height.max(1)) as i32,
        )
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

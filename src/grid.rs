#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use thiserror::Error;

use crate::components::{Cell, Coord, Movable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("there is no ({x}, {y}) cell in the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cannot place an entity over the occupied cell ({x}, {y})")]
    CellOccupied { x: i32, y: i32 },
}

/// The single source of truth for who occupies which cell.
///
/// Cells are stored row-major. Every occupant's cell list must agree with the
/// cells referencing it; the helpers below preserve that as long as callers
/// go through `place`, `release` and `move_entity`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn read(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        self.index(x, y)
            .map(|i| self.cells[i])
            .ok_or(GridError::OutOfBounds { x, y })
    }

    pub(crate) fn write(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
        let i = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Empty cells and the player's cell are free; anything out of bounds is not.
    #[must_use]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.read(x, y), Ok(Cell::Empty | Cell::Player(_)))
    }

    #[must_use]
    pub fn can_move<M: Movable + ?Sized>(&self, entity: &M, dx: i32, dy: i32) -> bool {
        let cells = entity.cells();
        cells.iter().all(|c| {
            let target = c.offset(dx, dy);
            cells.contains(&target) || self.is_free(target.x, target.y)
        })
    }

    /// Writes `entity` into all of its cells, or nothing at all.
    pub fn place<M: Movable + ?Sized>(&mut self, id: Entity, entity: &M) -> Result<(), GridError> {
        if let Some(c) = entity.cells().iter().find(|c| !self.is_free(c.x, c.y)) {
            return Err(GridError::CellOccupied { x: c.x, y: c.y });
        }
        let occupant = entity.occupant(id);
        for c in entity.cells() {
            self.write(c.x, c.y, occupant)?;
        }
        Ok(())
    }

    /// Clears the listed cells that still reference `id`.
    pub fn release(&mut self, id: Entity, cells: &[Coord]) {
        for c in cells {
            if let Some(i) = self.index(c.x, c.y) {
                if self.cells[i].entity() == Some(id) {
                    self.cells[i] = Cell::Empty;
                }
            }
        }
    }

    /// Shifts `entity` by `(dx, dy)`. Does not check for collisions; call
    /// `can_move` first. Fails without mutating if any target is out of bounds.
    pub fn move_entity<M: Movable + ?Sized>(
        &mut self,
        id: Entity,
        entity: &mut M,
        dx: i32,
        dy: i32,
    ) -> Result<(), GridError> {
        if let Some(c) = entity
            .cells()
            .iter()
            .map(|c| c.offset(dx, dy))
            .find(|c| !self.contains(c.x, c.y))
        {
            return Err(GridError::OutOfBounds { x: c.x, y: c.y });
        }

        self.release(id, entity.cells());
        entity.shift(dx, dy);
        let occupant = entity.occupant(id);
        for c in entity.cells() {
            self.write(c.x, c.y, occupant)?;
        }
        Ok(())
    }

    /// One row of cells, left to right.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = (y * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// All cells in row-major order as `(x, y, cell)`.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i % width) as i32, (i / width) as i32, cell))
    }

    /// Bottom row first, rightmost cell first.
    pub fn iter_rev(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.iter().rev()
    }

    /// Every cell currently referencing `id`.
    #[must_use]
    pub fn cells_of(&self, id: Entity) -> Vec<Coord> {
        self.iter()
            .filter(|&(_, _, cell)| cell.entity() == Some(id))
            .map(|(x, y, _)| Coord::new(x, y))
            .collect()
    }
}

#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{Block, BlockKind, Cell, Coord, Movable, Player};
    use crate::grid::{Grid, GridError};
    use bevy_ecs::prelude::*;

    // Spawns entity ids for grid tests that don't need any components
    fn ids(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_read_bounds() {
        let grid = Grid::new(4, 3);

        assert_eq!(grid.read(0, 0), Ok(Cell::Empty));
        assert_eq!(grid.read(3, 2), Ok(Cell::Empty));
        assert_eq!(grid.read(4, 0), Err(GridError::OutOfBounds { x: 4, y: 0 }));
        assert_eq!(grid.read(0, 3), Err(GridError::OutOfBounds { x: 0, y: 3 }));
        assert_eq!(grid.read(-1, 1), Err(GridError::OutOfBounds { x: -1, y: 1 }));
    }

    #[test]
    fn test_is_free() {
        let id = ids(2);
        let mut grid = Grid::new(4, 4);
        grid.place(id[0], &Block::new(BlockKind::Point, Coord::new(1, 1), 0))
            .unwrap();
        grid.place(id[1], &Player::new(Coord::new(2, 2))).unwrap();

        assert!(grid.is_free(0, 0));
        assert!(!grid.is_free(1, 1), "blocks are not free");
        assert!(grid.is_free(2, 2), "the player's cell counts as free");
        assert!(!grid.is_free(-1, 0));
        assert!(!grid.is_free(0, 4));
    }

    #[test]
    fn test_can_move_ignores_own_cells() {
        let id = ids(1);
        let mut grid = Grid::new(4, 8);
        let bar = Block::new(BlockKind::VerticalLine, Coord::new(0, 0), 0);
        grid.place(id[0], &bar).unwrap();

        // Three of the four shifted cells overlap the bar itself
        assert!(grid.can_move(&bar, 0, 1));
        assert!(grid.can_move(&bar, 1, 0));
        assert!(!grid.can_move(&bar, -1, 0), "left edge");
        assert!(!grid.can_move(&bar, 0, -1), "top edge");
    }

    #[test]
    fn test_can_move_blocked_by_other_block() {
        let id = ids(2);
        let mut grid = Grid::new(4, 4);
        let upper = Block::new(BlockKind::Point, Coord::new(1, 1), 0);
        let lower = Block::new(BlockKind::Point, Coord::new(1, 2), 0);
        grid.place(id[0], &upper).unwrap();
        grid.place(id[1], &lower).unwrap();

        assert!(!grid.can_move(&upper, 0, 1));
        assert!(grid.can_move(&lower, 0, 1));
    }

    #[test]
    fn test_place_is_all_or_nothing() {
        let id = ids(2);
        let mut grid = Grid::new(5, 5);
        grid.place(id[0], &Block::new(BlockKind::Point, Coord::new(2, 1), 0))
            .unwrap();
        let before = grid.clone();

        // T covers (1,0) (2,0) (3,0) (2,1); the last one is taken
        let t = Block::new(BlockKind::T, Coord::new(1, 0), 0);
        assert_eq!(
            grid.place(id[1], &t),
            Err(GridError::CellOccupied { x: 2, y: 1 })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_place_partially_out_of_bounds() {
        let id = ids(1);
        let mut grid = Grid::new(5, 5);
        let bar = Block::new(BlockKind::HorizontalLine, Coord::new(3, 0), 0);

        assert!(matches!(
            grid.place(id[0], &bar),
            Err(GridError::CellOccupied { .. })
        ));
        assert!(grid.iter().all(|(_, _, cell)| cell == Cell::Empty));
    }

    #[test]
    fn test_place_over_player() {
        let id = ids(2);
        let mut grid = Grid::new(3, 3);
        grid.place(id[0], &Player::new(Coord::new(1, 1))).unwrap();

        grid.place(id[1], &Block::new(BlockKind::Point, Coord::new(1, 1), 0))
            .unwrap();
        assert_eq!(grid.read(1, 1), Ok(Cell::Block(id[1])));
    }

    #[test]
    fn test_move_entity() {
        let id = ids(1);
        let mut grid = Grid::new(6, 6);
        let mut s = Block::new(BlockKind::SHorizontal, Coord::new(0, 0), 0);
        grid.place(id[0], &s).unwrap();

        grid.move_entity(id[0], &mut s, 1, 2).unwrap();

        let expected = BlockKind::SHorizontal.cells_at(Coord::new(1, 2));
        assert_eq!(s.cells(), expected.as_slice());
        let mut on_grid = grid.cells_of(id[0]);
        let mut expected_sorted = expected.clone();
        on_grid.sort_by_key(|c| (c.y, c.x));
        expected_sorted.sort_by_key(|c| (c.y, c.x));
        assert_eq!(on_grid, expected_sorted);
    }

    #[test]
    fn test_move_entity_out_of_bounds_changes_nothing() {
        let id = ids(1);
        let mut grid = Grid::new(3, 3);
        let mut block = Block::new(BlockKind::Point, Coord::new(0, 2), 0);
        grid.place(id[0], &block).unwrap();
        let before = grid.clone();

        assert_eq!(
            grid.move_entity(id[0], &mut block, 0, 1),
            Err(GridError::OutOfBounds { x: 0, y: 3 })
        );
        assert_eq!(grid, before);
        assert_eq!(block.cells, vec![Coord::new(0, 2)]);
    }

    #[test]
    fn test_release_only_clears_own_cells() {
        let id = ids(2);
        let mut grid = Grid::new(3, 3);
        grid.place(id[0], &Block::new(BlockKind::Point, Coord::new(0, 0), 0))
            .unwrap();
        grid.place(id[1], &Block::new(BlockKind::Point, Coord::new(1, 0), 0))
            .unwrap();

        grid.release(id[0], &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(9, 9)]);

        assert_eq!(grid.read(0, 0), Ok(Cell::Empty));
        assert_eq!(grid.read(1, 0), Ok(Cell::Block(id[1])));
    }

    #[test]
    fn test_traversal_order() {
        let grid = Grid::new(3, 2);

        let forward: Vec<(i32, i32)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(forward, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

        let backward: Vec<(i32, i32)> = grid.iter_rev().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(backward, vec![(2, 1), (1, 1), (0, 1), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_row_and_clear() {
        let id = ids(1);
        let mut grid = Grid::new(4, 2);
        grid.place(id[0], &Block::new(BlockKind::HorizontalLine, Coord::new(0, 1), 0))
            .unwrap();

        assert!(grid.row(0).iter().all(|&c| c == Cell::Empty));
        assert!(grid.row(1).iter().all(|&c| c == Cell::Block(id[0])));

        grid.clear();
        assert!(grid.iter().all(|(_, _, cell)| cell == Cell::Empty));
    }
}

#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::{App, Tile};
    use crate::components::{BlockKind, Cell, Coord, GameState};
    use crate::grid::Grid;
    use crate::systems::place_block;
    use crate::tests::test_utils::{TEST_SEED, assert_grid_consistent, test_config};

    fn empty_board_app() -> App {
        let mut config = test_config();
        config.spawn.populate = false;
        App::new(config)
    }

    fn tiles(app: &App) -> Vec<(i32, i32, Tile)> {
        app.visible_cells().collect()
    }

    #[test]
    fn test_app_creation() {
        let mut app = App::new(test_config());

        assert!(!app.should_quit);
        assert!(!app.is_game_over());
        assert_eq!(app.blocks_eaten(), 0);
        assert_eq!(app.current_tick(), 0);
        assert!(app.world.contains_resource::<GameState>());
        assert!(app.world.contains_resource::<Grid>());

        let grid = app.world.resource::<Grid>();
        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 20);
        assert_grid_consistent(&mut app.world);
    }

    #[test]
    fn test_player_starts_bottom_middle() {
        let app = App::new(test_config());

        assert_eq!(app.player_start(), Coord::new(8, 19));
        let player = app.player().expect("player was placed");
        assert_eq!(
            app.world.resource::<Grid>().read(8, 19),
            Ok(Cell::Player(player))
        );
    }

    #[test]
    fn test_visible_cells_hide_upper_lines() {
        let app = empty_board_app();
        let cells = tiles(&app);

        assert_eq!(cells.len(), 16 * 16);
        assert_eq!(cells.first().map(|&(x, y, _)| (x, y)), Some((0, 0)));
        assert_eq!(cells.last().map(|&(x, y, _)| (x, y)), Some((15, 15)));
        assert!(cells.contains(&(8, 15, Tile::Player)));
        assert_eq!(
            cells.iter().filter(|&&(_, _, t)| t != Tile::Empty).count(),
            1
        );
    }

    #[test]
    fn test_visible_cells_report_block_kind() {
        let mut app = empty_board_app();
        place_block(&mut app.world, BlockKind::ZHorizontal, Coord::new(0, 4)).unwrap();
        // Blocks in the upper lines stay hidden
        place_block(&mut app.world, BlockKind::Point, Coord::new(10, 0)).unwrap();

        let cells = tiles(&app);
        assert!(cells.contains(&(0, 0, Tile::Block(BlockKind::ZHorizontal))));
        assert!(cells.contains(&(2, 1, Tile::Block(BlockKind::ZHorizontal))));
        assert!(!cells.contains(&(10, 0, Tile::Block(BlockKind::Point))));
    }

    #[test]
    fn test_step_advances_tick() {
        let mut app = App::new(test_config());

        app.step(true);
        app.step(false);

        assert_eq!(app.current_tick(), 2);
        assert_grid_consistent(&mut app.world);
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let mut a = App::with_seed(test_config(), TEST_SEED);
        let mut b = App::with_seed(test_config(), TEST_SEED);
        assert_eq!(tiles(&a), tiles(&b));

        for i in 0..40 {
            a.step(i % 6 != 0);
            b.step(i % 6 != 0);
        }
        assert_eq!(tiles(&a), tiles(&b));
        assert_eq!(a.blocks_eaten(), b.blocks_eaten());
    }

    #[test]
    fn test_reset() {
        let mut app = empty_board_app();
        place_block(&mut app.world, BlockKind::Point, Coord::new(8, 18)).unwrap();
        app.move_vertical(-1);
        assert_eq!(app.blocks_eaten(), 1);
        app.tick();

        app.reset();

        assert_eq!(app.blocks_eaten(), 0);
        assert_eq!(app.current_tick(), 0);
        assert!(!app.is_game_over());
        assert_eq!(
            tiles(&app)
                .iter()
                .filter(|&&(_, _, t)| t != Tile::Empty)
                .count(),
            1
        );
        assert_grid_consistent(&mut app.world);
    }

    #[test]
    fn test_game_over_when_block_lands_on_player() {
        let mut app = empty_board_app();
        place_block(&mut app.world, BlockKind::VerticalLine, Coord::new(8, 15)).unwrap();
        assert!(!app.is_game_over());

        app.tick();

        assert!(app.is_game_over());
        assert!(!app.move_horizontal(1));
    }
}

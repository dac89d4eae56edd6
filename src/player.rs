use bevy_ecs::prelude::*;
use log::debug;

use crate::components::{Cell, GameState, Player, PlayerHandle};
use crate::grid::Grid;
use crate::systems::remove_at;

fn player_entity(world: &World) -> Option<Entity> {
    world.get_resource::<PlayerHandle>().map(|handle| handle.0)
}

/// The player is dead once its cell holds anything other than the player
/// itself, i.e. a falling block landed on it.
#[must_use]
pub fn is_dead(world: &World) -> bool {
    let Some(id) = player_entity(world) else {
        return true;
    };
    let Some(player) = world.get::<Player>(id) else {
        return true;
    };
    world.resource::<Grid>().read(player.cell.x, player.cell.y) != Ok(Cell::Player(id))
}

/// Moves sideways, eating any block in the way.
pub fn move_horizontal(world: &mut World, dx: i32) -> bool {
    step(world, dx, 0, true)
}

/// Moves up or down. Only upward moves eat; falling onto a block never does.
pub fn move_vertical(world: &mut World, dy: i32) -> bool {
    step(world, 0, dy, dy < 0)
}

fn step(world: &mut World, dx: i32, dy: i32, eats: bool) -> bool {
    if is_dead(world) {
        return false;
    }
    let Some(id) = player_entity(world) else {
        return false;
    };
    let Some(target) = world.get::<Player>(id).map(|player| player.cell.offset(dx, dy)) else {
        return false;
    };
    let Ok(cell) = world.resource::<Grid>().read(target.x, target.y) else {
        return false;
    };

    if eats && cell.is_block() {
        if let Ok(Some(eaten)) = remove_at(world, target) {
            let mut game_state = world.resource_mut::<GameState>();
            game_state.blocks_eaten += 1;
            debug!(
                "Ate block {eaten:?} at ({}, {}), {} eaten so far",
                target.x, target.y, game_state.blocks_eaten
            );
        }
    }

    world.resource_scope(|world, mut grid: Mut<Grid>| {
        let Some(mut player) = world.get_mut::<Player>(id) else {
            return false;
        };
        if !grid.can_move(&*player, dx, dy) {
            return false;
        }
        grid.move_entity(id, &mut *player, dx, dy).is_ok()
    })
}

use bevy_ecs::prelude::*;
use log::{debug, trace, warn};

use crate::components::{
    Block, BlockKind, Catalog, Cell, Coord, GameState, Movable, Player, PlayerHandle, SimRng,
};
use crate::grid::{Grid, GridError};

/// Spawns a block of `kind` at `origin`, stamped with the current tick.
/// Nothing is spawned when any of its cells is taken.
pub fn place_block(
    world: &mut World,
    kind: BlockKind,
    origin: Coord,
) -> Result<Entity, GridError> {
    let tick = world.resource::<GameState>().tick;
    let block = Block::new(kind, origin, tick);

    let id = world.spawn_empty().id();
    let placed = world.resource_mut::<Grid>().place(id, &block);
    if let Err(err) = placed {
        world.despawn(id);
        return Err(err);
    }
    world.entity_mut(id).insert(block);
    Ok(id)
}

pub fn spawn_player(world: &mut World, at: Coord) -> Result<Entity, GridError> {
    let player = Player::new(at);

    let id = world.spawn_empty().id();
    let placed = world.resource_mut::<Grid>().place(id, &player);
    if let Err(err) = placed {
        world.despawn(id);
        return Err(err);
    }
    world.entity_mut(id).insert(player);
    world.insert_resource(PlayerHandle(id));
    Ok(id)
}

/// Removes the whole occupant found at `at`. Blocks are despawned; the player
/// only loses its grid cells. Returns the entity that was removed.
pub fn remove_at(world: &mut World, at: Coord) -> Result<Option<Entity>, GridError> {
    let cell = world.resource::<Grid>().read(at.x, at.y)?;
    match cell {
        Cell::Empty => Ok(None),
        Cell::Block(id) => {
            let cells = world
                .get::<Block>(id)
                .map(|block| block.cells.clone())
                .unwrap_or_else(|| vec![at]);
            world.resource_mut::<Grid>().release(id, &cells);
            world.despawn(id);
            Ok(Some(id))
        }
        Cell::Player(id) => {
            let cells = world
                .get::<Player>(id)
                .map(|player| player.cells().to_vec())
                .unwrap_or_else(|| vec![at]);
            world.resource_mut::<Grid>().release(id, &cells);
            Ok(Some(id))
        }
    }
}

/// Advances the simulation by one tick: every block gets at most one step down.
///
/// Rows are visited bottom-up and right-to-left so that lower blocks vacate
/// their cells before the ones stacked above test against them. Each row is
/// snapshotted when its walk begins; blocks already stamped with this tick
/// were handled earlier in the pass and are skipped.
pub fn tick_system(world: &mut World) {
    let tick = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.tick += 1;
        game_state.tick
    };

    world.resource_scope(|world, mut grid: Mut<Grid>| {
        for y in (0..grid.height()).rev() {
            let row = grid.row(y).to_vec();
            for (x, cell) in row.into_iter().enumerate().rev() {
                let Cell::Block(id) = cell else {
                    continue;
                };
                let Some(mut block) = world.get_mut::<Block>(id) else {
                    warn!("Grid cell ({x}, {y}) references a missing block {id:?}");
                    continue;
                };
                if block.age == tick {
                    continue;
                }

                if grid.can_move(&*block, 0, 1) {
                    match grid.move_entity(id, &mut *block, 0, 1) {
                        Ok(()) => trace!("Block {id:?} fell from row {y}"),
                        Err(err) => warn!("Block {id:?} could not fall: {err}"),
                    }
                    block.stillness_age = 0;
                } else {
                    block.stillness_age += 1;
                }
                block.age = tick;
            }
        }
    });
}

/// Best-effort spawn of a random shape. Without a `location` the block
/// appears at a random column on the top row of the spawn buffer.
pub fn spawn_block(
    world: &mut World,
    max_attempts: usize,
    location: Option<Coord>,
) -> Option<Entity> {
    let kinds = world.resource::<Catalog>().kinds().to_vec();
    let width = world.resource::<Grid>().width();

    let (kind, origin) = {
        let mut rng = world.resource_mut::<SimRng>();
        let kind = rng.pick(&kinds)?;
        let origin = location.unwrap_or_else(|| Coord::new(rng.coord_in(width, 1).x, 0));
        (kind, origin)
    };

    for attempt in 1..=max_attempts {
        match place_block(world, kind, origin) {
            Ok(id) => {
                debug!("Spawned {kind:?} at ({}, {})", origin.x, origin.y);
                return Some(id);
            }
            Err(err) => trace!("Spawn attempt {attempt}/{max_attempts} failed: {err}"),
        }
    }
    None
}

/// Removes the block at `at` if it has been still for at least one tick.
pub fn erode_at(world: &mut World, at: Coord) -> Option<Entity> {
    let Ok(Cell::Block(id)) = world.resource::<Grid>().read(at.x, at.y) else {
        return None;
    };
    let still = world
        .get::<Block>(id)
        .is_some_and(|block| block.stillness_age != 0);
    if !still {
        return None;
    }

    let removed = remove_at(world, at).ok().flatten();
    if removed.is_some() {
        debug!("Eroded block {id:?} at ({}, {})", at.x, at.y);
    }
    removed
}

/// Erodes at a uniformly random coordinate anywhere on the grid.
pub fn erode_system(world: &mut World) -> Option<Entity> {
    let (width, height) = {
        let grid = world.resource::<Grid>();
        (grid.width(), grid.height())
    };
    let at = world.resource_mut::<SimRng>().coord_in(width, height);
    erode_at(world, at)
}

/// Fills the board with partially settled blocks before play starts, keeping
/// `player_start` clear. The tick counter is reset afterwards.
pub fn populate_board(world: &mut World, player_start: Coord) {
    let (width, height) = {
        let grid = world.resource::<Grid>();
        (grid.width(), grid.height())
    };

    let rounds = width * height / 3;
    for _ in 0..rounds {
        let at = world.resource_mut::<SimRng>().coord_in(width, height);
        spawn_block(world, 1, Some(at));
        tick_system(world);
        if let Err(err) = remove_at(world, player_start) {
            warn!("Player start is outside the board: {err}");
        }
    }

    world.resource_mut::<GameState>().tick = 0;
    debug!("Populated board in {rounds} rounds");
}

//! Spawner - entry placement of new pieces

use tetris_reconciler_types::{ActivePiece, Coord, Grid, SPAWN_ROW};

use crate::catalog::Catalog;
use crate::piece::fits;
use crate::rng::SimpleRng;

/// Entry position for a board of the given width
pub fn spawn_center(width: i32) -> Coord {
    Coord::new((width - 1) / 2, SPAWN_ROW)
}

/// Try to place a new piece at the entry position
///
/// Picks a definition uniformly at random from the catalog. Returns `None`
/// when the chosen piece does not fit at the entry position; the caller
/// flips the board to game over and does not retry within the pass. Spawning
/// never writes grid cells; occupancy is materialized only when a piece
/// locks.
pub fn spawn_piece(grid: &Grid, catalog: &Catalog, rng: &mut SimpleRng) -> Option<ActivePiece> {
    let index = rng.next_range(catalog.len() as u32) as usize;
    let def = &catalog.pieces()[index];

    let piece = ActivePiece::new(def.id, spawn_center(grid.width()), def.coords.clone());
    if fits(grid, &piece.absolute_coords) {
        Some(piece)
    } else {
        None
    }
}

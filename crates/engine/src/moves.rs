//! Command processor - applies one operation to the falling piece
//!
//! Every operation works on a copy of the active piece: the copy is moved,
//! its absolute coordinates recomputed, and the result committed only if it
//! fits. Illegal moves are defined outcomes, never errors.
//!
//! `down` is the only operation that locks: on collision the piece's
//! previous cells are written into the grid and line clearing runs. `drop`
//! materializes the piece at its resting position but leaves it active, so
//! it stays visible for one more pass; the next `down` performs the actual
//! lock. The reconciliation pass skips this module entirely while the board
//! is game over.

use tetris_reconciler_types::{ActivePiece, Grid, Op};

use crate::lines::clear_full_rows;
use crate::piece::{fits, rotated};

/// What applying one operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move committed
    Moved,
    /// The move was illegal and discarded; nothing changed
    Rejected,
    /// The piece rests at the bottom of its fall with its cells written,
    /// still active until the next `down` locks it
    Dropped,
    /// The piece locked into the grid
    Locked { rows_cleared: u32 },
    /// There was no active piece to act on
    NoPiece,
}

/// Apply one operation to the board's active piece
pub fn apply_op(grid: &mut Grid, active: &mut Option<ActivePiece>, op: Op) -> MoveOutcome {
    let Some(current) = active.clone() else {
        return MoveOutcome::NoPiece;
    };
    let mut moved = current.clone();

    match op {
        Op::Left => {
            moved.center.x -= 1;
            try_commit(grid, active, moved)
        }
        Op::Right => {
            moved.center.x += 1;
            try_commit(grid, active, moved)
        }
        Op::Rotate => {
            moved.relative_coords = rotated(&moved.relative_coords);
            try_commit(grid, active, moved)
        }
        Op::Down => {
            moved.center.y += 1;
            moved.recompute_absolute();
            if fits(grid, &moved.absolute_coords) {
                *active = Some(moved);
                MoveOutcome::Moved
            } else {
                // Lock at the previous position.
                for cell in &current.absolute_coords {
                    grid.set(cell.x, cell.y, current.piece_id);
                }
                let rows_cleared = clear_full_rows(grid, &current.absolute_coords);
                *active = None;
                MoveOutcome::Locked { rows_cleared }
            }
        }
        Op::Drop => {
            let mut resting = current;
            loop {
                let mut next = resting.clone();
                next.center.y += 1;
                next.recompute_absolute();
                if fits(grid, &next.absolute_coords) {
                    resting = next;
                } else {
                    break;
                }
            }
            // Materialize the cells but keep the piece active; the next
            // `down` collides with them, locks, and runs line clearing.
            for cell in &resting.absolute_coords {
                grid.set(cell.x, cell.y, resting.piece_id);
            }
            *active = Some(resting);
            MoveOutcome::Dropped
        }
    }
}

fn try_commit(grid: &Grid, active: &mut Option<ActivePiece>, mut moved: ActivePiece) -> MoveOutcome {
    moved.recompute_absolute();
    if fits(grid, &moved.absolute_coords) {
        *active = Some(moved);
        MoveOutcome::Moved
    } else {
        MoveOutcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_reconciler_types::Coord;

    fn bar(id: i32, center: Coord) -> ActivePiece {
        ActivePiece::new(
            id,
            center,
            vec![
                Coord::new(-1, 0),
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
            ],
        )
    }

    #[test]
    fn test_left_right_commit() {
        let mut grid = Grid::new(10, 20);
        let mut active = Some(bar(1, Coord::new(4, 5)));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Left), MoveOutcome::Moved);
        assert_eq!(active.as_ref().unwrap().center, Coord::new(3, 5));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Right), MoveOutcome::Moved);
        assert_eq!(active.as_ref().unwrap().center, Coord::new(4, 5));
    }

    #[test]
    fn test_left_rejected_at_wall() {
        let mut grid = Grid::new(10, 20);
        // Leftmost cell already at x=0.
        let mut active = Some(bar(1, Coord::new(1, 5)));
        let before = active.clone();

        assert_eq!(apply_op(&mut grid, &mut active, Op::Left), MoveOutcome::Rejected);
        assert_eq!(active, before);
    }

    #[test]
    fn test_rotate_commits_and_reverts_nothing_on_reject() {
        let mut grid = Grid::new(10, 20);
        let mut active = Some(bar(1, Coord::new(4, 10)));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Rotate), MoveOutcome::Moved);
        assert_eq!(
            active.as_ref().unwrap().relative_coords,
            vec![
                Coord::new(0, 1),
                Coord::new(0, 0),
                Coord::new(0, -1),
                Coord::new(0, -2),
            ]
        );

        // Rotating this domino at the top row would poke above the grid:
        // (-1, 0) maps to (0, 1), one cell upward.
        let mut high = Some(ActivePiece::new(
            1,
            Coord::new(4, 0),
            vec![Coord::new(-1, 0), Coord::new(0, 0)],
        ));
        let before = high.clone();
        assert_eq!(apply_op(&mut grid, &mut high, Op::Rotate), MoveOutcome::Rejected);
        assert_eq!(high, before);
    }

    #[test]
    fn test_down_moves_without_locking() {
        let mut grid = Grid::new(10, 20);
        let mut active = Some(bar(1, Coord::new(3, 5)));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Down), MoveOutcome::Moved);

        let piece = active.unwrap();
        assert_eq!(piece.center, Coord::new(3, 6));
        assert_eq!(
            piece.absolute_coords,
            vec![
                Coord::new(2, 6),
                Coord::new(3, 6),
                Coord::new(4, 6),
                Coord::new(5, 6),
            ]
        );
        // Nothing was written while falling.
        assert!(grid.cells().iter().all(|row| row.iter().all(|&c| c == 0)));
    }

    #[test]
    fn test_down_locks_and_clears_full_row() {
        let mut grid = Grid::new(6, 3);
        for y in [1, 2] {
            grid.set(0, y, 1);
            grid.set(5, y, 1);
        }
        let mut active = Some(bar(2, Coord::new(2, 2)));

        let outcome = apply_op(&mut grid, &mut active, Op::Down);
        assert_eq!(outcome, MoveOutcome::Locked { rows_cleared: 1 });
        assert!(active.is_none());
        assert_eq!(
            grid.cells(),
            &[
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0, 1],
            ]
        );
    }

    #[test]
    fn test_down_locks_without_clear_when_row_not_full() {
        let mut grid = Grid::new(6, 3);
        let mut active = Some(bar(2, Coord::new(2, 2)));

        let outcome = apply_op(&mut grid, &mut active, Op::Down);
        assert_eq!(outcome, MoveOutcome::Locked { rows_cleared: 0 });
        assert!(active.is_none());
        assert_eq!(grid.get(1, 2), Some(2));
        assert_eq!(grid.get(4, 2), Some(2));
        assert_eq!(grid.get(0, 2), Some(0));
    }

    #[test]
    fn test_drop_materializes_but_keeps_piece() {
        let mut grid = Grid::new(10, 20);
        let mut active = Some(bar(3, Coord::new(3, 5)));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Drop), MoveOutcome::Dropped);

        let piece = active.as_ref().unwrap();
        assert_eq!(piece.center, Coord::new(3, 19));
        for x in 2..=5 {
            assert_eq!(grid.get(x, 19), Some(3));
        }

        // Frozen in place: sideways moves now collide with its own cells.
        assert_eq!(apply_op(&mut grid, &mut active, Op::Left), MoveOutcome::Rejected);

        // The next down performs the real lock.
        assert_eq!(
            apply_op(&mut grid, &mut active, Op::Down),
            MoveOutcome::Locked { rows_cleared: 0 }
        );
        assert!(active.is_none());
    }

    #[test]
    fn test_drop_then_down_equals_repeated_down() {
        let run = |use_drop: bool| {
            let mut grid = Grid::new(10, 20);
            grid.set(4, 19, 9);
            let mut active = Some(bar(5, Coord::new(3, 5)));
            if use_drop {
                apply_op(&mut grid, &mut active, Op::Drop);
                apply_op(&mut grid, &mut active, Op::Down);
            } else {
                while !matches!(
                    apply_op(&mut grid, &mut active, Op::Down),
                    MoveOutcome::Locked { .. }
                ) {}
            }
            (grid, active)
        };

        let (dropped_grid, dropped_active) = run(true);
        let (stepped_grid, stepped_active) = run(false);
        assert_eq!(dropped_grid, stepped_grid);
        assert_eq!(dropped_active, stepped_active);
        assert!(dropped_active.is_none());
    }

    #[test]
    fn test_drop_on_resting_piece_writes_in_place() {
        let mut grid = Grid::new(10, 20);
        let mut active = Some(bar(4, Coord::new(3, 19)));

        assert_eq!(apply_op(&mut grid, &mut active, Op::Drop), MoveOutcome::Dropped);
        assert_eq!(active.as_ref().unwrap().center, Coord::new(3, 19));
        assert_eq!(grid.get(2, 19), Some(4));
    }

    #[test]
    fn test_no_active_piece() {
        let mut grid = Grid::new(10, 20);
        let mut active = None;
        assert_eq!(apply_op(&mut grid, &mut active, Op::Down), MoveOutcome::NoPiece);
        assert!(active.is_none());
    }
}

//! One reconciliation pass over a board snapshot
//!
//! [`reconcile`] is the whole game as a pure function: snapshot in,
//! recomputed status out. The caller owns reading the snapshot, committing
//! the result under a version check, and re-running on conflict. Because the
//! function never touches anything but its arguments, re-running it from the
//! same snapshot is free of side effects.
//!
//! Pass order, fixed:
//!
//! 1. allocate the grid on first contact, copying the initial state from the spec
//! 2. apply at most one pending operation (skipped while game over)
//! 3. spawn a replacement piece if the board is playing with none falling;
//!    a blocked spawn flips the board to game over
//! 4. derive whether the board's ticker should exist
//!
//! Spawning after command application means a pass that locks a piece also
//! spawns its successor, and a command that arrives while no piece is
//! falling is consumed without effect.

use tetris_reconciler_types::{BoardSpec, BoardState, BoardStatus, Grid, Op};

use crate::catalog::Catalog;
use crate::moves::{apply_op, MoveOutcome};
use crate::rng::SimpleRng;
use crate::spawn::spawn_piece;

/// Everything one pass produces
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    /// The recomputed status to persist
    pub status: BoardStatus,
    /// `Some(period)` while the board should keep ticking, `None` once over
    pub ticker_period: Option<u64>,
    /// The operation that reached the piece, if any
    pub applied: Option<Op>,
    /// Rows removed by a lock during this pass
    pub rows_cleared: u32,
}

/// Run one reconciliation pass
///
/// `op` is the raw operation string of the selected command, if one was
/// pending. Unrecognized strings are a no-op, not an error.
pub fn reconcile(
    spec: &BoardSpec,
    status: &BoardStatus,
    op: Option<&str>,
    catalog: &Catalog,
    rng: &mut SimpleRng,
) -> PassOutcome {
    let mut status = status.clone();

    // One-time grid allocation; the initial state comes from the spec and
    // the dimensions are never revisited afterwards.
    let mut grid = match status.grid.take() {
        Some(grid) => grid,
        None => {
            status.state = spec.state;
            Grid::new(spec.width as usize, spec.height as usize)
        }
    };

    let mut applied = None;
    let mut rows_cleared = 0;

    if status.state == BoardState::Playing {
        if let Some(op) = op.and_then(Op::from_str) {
            match apply_op(&mut grid, &mut status.active, op) {
                MoveOutcome::NoPiece => {}
                MoveOutcome::Locked { rows_cleared: n } => {
                    applied = Some(op);
                    rows_cleared = n;
                }
                _ => applied = Some(op),
            }
        }

        if status.active.is_none() {
            match spawn_piece(&grid, catalog, rng) {
                Some(piece) => status.active = Some(piece),
                None => status.state = BoardState::GameOver,
            }
        }
    }

    status.grid = Some(grid);
    let ticker_period = (status.state == BoardState::Playing).then_some(spec.tick_ms);

    PassOutcome {
        status,
        ticker_period,
        applied,
        rows_cleared,
    }
}

/// Action needed to converge the board's ticker onto the desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerPlan {
    Create(u64),
    Update(u64),
    Remove,
    Keep,
}

/// Idempotent ensure step for the ticker object
///
/// Compares desired existence and period against what was observed and names
/// the single action that converges them. An already-converged pair plans
/// [`TickerPlan::Keep`], so running the plan repeatedly is harmless.
pub fn plan_ticker(desired: Option<u64>, observed: Option<u64>) -> TickerPlan {
    match (desired, observed) {
        (Some(period), None) => TickerPlan::Create(period),
        (Some(period), Some(current)) if current != period => TickerPlan::Update(period),
        (Some(_), Some(_)) => TickerPlan::Keep,
        (None, Some(_)) => TickerPlan::Remove,
        (None, None) => TickerPlan::Keep,
    }
}

//! Reconciliation core - pure, deterministic, and testable
//!
//! This crate holds the entire game logic as pure functions over the object
//! model. It has **zero dependencies** on the store, async runtime, or I/O,
//! making it:
//!
//! - **Deterministic**: same snapshot + same RNG state always produce the same pass
//! - **Idempotent**: re-running a pass from an unchanged snapshot changes nothing
//! - **Testable**: every rule is exercised without a store or runtime
//!
//! # Module Structure
//!
//! - [`piece`]: rotation transform and legality checks
//! - [`spawn`]: entry-position placement and the game-over probe
//! - [`moves`]: per-operation command processing, including locking
//! - [`lines`]: full-row detection and grid compaction after a lock
//! - [`pass`]: one whole reconciliation pass plus ticker planning
//! - [`catalog`]: validated piece-definition sets
//! - [`rng`]: seedable LCG used for piece selection
//!
//! # Reconciliation model
//!
//! A pass is a function of a freshly read board snapshot: allocate the grid
//! if this is the first pass, apply at most one pending command, spawn a
//! replacement piece if none is falling, and report whether the board's
//! ticker should exist. The caller owns persistence: it commits the returned
//! status under a version check and re-runs the whole pass from a fresh read
//! when the commit conflicts. Nothing in here suspends, retries, or sleeps.
//!
//! # Example
//!
//! ```
//! use tetris_reconciler_engine::{reconcile, Catalog, SimpleRng};
//! use tetris_reconciler_types::{BoardSpec, BoardState, BoardStatus};
//!
//! let spec = BoardSpec {
//!     state: BoardState::Playing,
//!     ..BoardSpec::default()
//! };
//! let catalog = Catalog::standard();
//! let mut rng = SimpleRng::new(42);
//!
//! // First pass: allocates the grid and spawns a piece.
//! let outcome = reconcile(&spec, &BoardStatus::default(), None, &catalog, &mut rng);
//! assert!(outcome.status.grid.is_some());
//! assert!(outcome.status.active.is_some());
//! assert_eq!(outcome.ticker_period, Some(spec.tick_ms));
//! ```

pub mod catalog;
pub mod lines;
pub mod moves;
pub mod pass;
pub mod piece;
pub mod rng;
pub mod spawn;

pub use tetris_reconciler_types as types;

// Re-export commonly used items for convenience
pub use catalog::{Catalog, CatalogError};
pub use lines::clear_full_rows;
pub use moves::{apply_op, MoveOutcome};
pub use pass::{plan_ticker, reconcile, PassOutcome, TickerPlan};
pub use piece::{fits, rotated};
pub use rng::SimpleRng;
pub use spawn::{spawn_center, spawn_piece};

//! Object model for the reconciliation control plane
//!
//! This crate defines the persisted objects the controllers read and write,
//! plus the small pure value types they are built from. Everything here is
//! plain data with serde derives; no I/O, no logging, no async.
//!
//! # Objects
//!
//! | Object | Role |
//! |--------|------|
//! | [`Board`] | The game: desired configuration (`spec`) and observed state (`status`) |
//! | [`Command`] | One requested operation against a board; deleted after the pass that observed it |
//! | [`Ticker`] | Desired existence of the gravity tick source for one board |
//!
//! # Coordinate conventions
//!
//! Cell coordinates are `(x, y)` with `x` growing rightward and `y` growing
//! **downward** (row 0 is the top row). Piece shapes are relative offsets
//! around a center in a Y-up convention: the absolute cell of an offset is
//! `(center.x + dx, center.y - dy)`. The subtraction is deliberate and every
//! transform in the engine relies on it; see [`ActivePiece`].
//!
//! # Examples
//!
//! ```
//! use tetris_reconciler_types::{Grid, Op, DEFAULT_WIDTH, DEFAULT_HEIGHT};
//!
//! // Operations parse from their lowercase wire strings.
//! assert_eq!(Op::from_str("down"), Some(Op::Down));
//! assert_eq!(Op::from_str("teleport"), None);
//!
//! // Grids start empty at the configured dimensions.
//! let grid = Grid::new(DEFAULT_WIDTH as usize, DEFAULT_HEIGHT as usize);
//! assert_eq!(grid.width(), DEFAULT_WIDTH);
//! assert_eq!(grid.height(), DEFAULT_HEIGHT);
//! assert!(grid.cells().iter().all(|row| row.iter().all(|&c| c == 0)));
//! ```

pub mod board;
pub mod command;
pub mod grid;
pub mod piece;
pub mod snapshot;
pub mod ticker;

pub use board::{Board, BoardSpec, BoardState, BoardStatus, SpecError};
pub use command::{Command, Op};
pub use grid::Grid;
pub use piece::{absolute_coords, ActivePiece, Coord, PieceDef};
pub use snapshot::{BoardSnapshot, SnapshotPiece};
pub use ticker::Ticker;

/// Default board width in cells
pub const DEFAULT_WIDTH: i32 = 11;

/// Default board height in cells
pub const DEFAULT_HEIGHT: i32 = 20;

/// Smallest width/height accepted by [`BoardSpec::validate`]
pub const MIN_DIMENSION: i32 = 3;

/// Default gravity period in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Row where newly spawned pieces are centered
pub const SPAWN_ROW: i32 = 2;

/// Well-known object name of the singleton board
pub const BOARD_NAME: &str = "board";

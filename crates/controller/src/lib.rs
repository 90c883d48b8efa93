//! Controller module - reconciliation loops over the object store
//!
//! Two loops cooperate through the store and never call each other:
//!
//! - [`BoardController`] watches one board and reruns a reconcile pass
//!   whenever the board or its commands may have changed. A pass is a
//!   fresh read, a pure computation, and conditional writes; a revision
//!   conflict reruns the whole pass.
//! - [`TickerRunner`] watches ticker objects and runs one task per
//!   ticker, filing a generated `down` command every period.
//!
//! Gravity flows through the store like any player input: the runner
//! files a command, the controller consumes it. Either loop can be
//! restarted at any point without losing state, because all state lives
//! in the store.
//!
//! # Structure
//!
//! - [`board`]: the reconcile pass and its watch loop
//! - [`ticker`]: tick loops that file gravity commands
//! - [`retry`]: conflict retry driver shared by pass call sites
//! - [`config`]: environment-derived settings and catalog loading

pub mod board;
pub mod config;
pub mod retry;
pub mod ticker;

pub use board::{BoardController, PassReport};
pub use config::{load_catalog, RunConfig};
pub use retry::{with_conflict_retry, DEFAULT_ATTEMPTS};
pub use ticker::TickerRunner;

//! Reconciling Tetris (workspace facade crate).
//!
//! This package keeps the public `tetris_reconciler::{types,engine,store,controller}`
//! API in one place while the implementation lives in dedicated crates under
//! `crates/`.

pub use tetris_reconciler_controller as controller;
pub use tetris_reconciler_engine as engine;
pub use tetris_reconciler_store as store;
pub use tetris_reconciler_types as types;

//! Versioned in-memory object store with watch
//!
//! The controllers never share game state directly; everything goes through
//! this store. Objects are kept serialized at rest, every successful write
//! bumps an opaque revision token, and conditional updates reject writes
//! whose expected revision is stale. Watchers receive change notifications
//! over a broadcast channel; a watcher that lags re-lists and reconciles
//! from the fresh read, so missed events are never replayed.
//!
//! Purely in-memory: nothing here persists across process restarts.

pub mod error;
pub mod memory;
pub mod object;

pub use error::StoreError;
pub use memory::{Event, EventAction, MemoryStore};
pub use object::{Object, Stored};

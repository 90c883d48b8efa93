//! Storable object kinds
//!
//! Anything kept in the store serializes to JSON at rest and names its kind
//! with a static string. The kind doubles as the key of the per-kind
//! collection inside [`MemoryStore`](crate::MemoryStore).

use serde::de::DeserializeOwned;
use serde::Serialize;

use tetris_reconciler_types::{Board, Command, Ticker};

/// A type the store knows how to keep
pub trait Object: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Collection name, unique per type
    const KIND: &'static str;
}

impl Object for Board {
    const KIND: &'static str = "board";
}

impl Object for Command {
    const KIND: &'static str = "command";
}

impl Object for Ticker {
    const KIND: &'static str = "ticker";
}

/// An object read back from the store, paired with its name and the
/// revision token required for a conditional update
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub name: String,
    pub revision: u64,
    pub obj: T,
}

impl<T> Stored<T> {
    pub fn new(name: impl Into<String>, revision: u64, obj: T) -> Self {
        Stored {
            name: name.into(),
            revision,
            obj,
        }
    }
}

//! Ticker object - desired existence of a board's gravity source
//!
//! The board controller creates, updates, or deletes this object every pass
//! so that it exists with the configured period exactly while the board is
//! `Playing`. The ticker runner watches these objects and emits one `down`
//! command per period for each one that exists.

use serde::{Deserialize, Serialize};

/// Gravity tick source for one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub board: String,
    pub period_ms: u64,
}

impl Ticker {
    pub fn new(board: impl Into<String>, period_ms: u64) -> Self {
        Self {
            board: board.into(),
            period_ms,
        }
    }

    /// Conventional object name for the ticker of `board`
    pub fn name_for(board: &str) -> String {
        format!("{board}-ticker")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_name() {
        assert_eq!(Ticker::name_for("board"), "board-ticker");
    }
}

//! Command object - ephemeral move requests

use serde::{Deserialize, Serialize};

/// Operations a command may carry
///
/// The wire form is the string from [`Op::as_str`]; commands at rest never
/// hold an `Op` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
}

impl Op {
    /// Parse an operation from its wire string
    ///
    /// Matching is exact; anything else yields `None` and is treated by the
    /// command processor as a no-op, never an error.
    ///
    /// ```
    /// use tetris_reconciler_types::Op;
    ///
    /// assert_eq!(Op::from_str("left"), Some(Op::Left));
    /// assert_eq!(Op::from_str("drop"), Some(Op::Drop));
    /// assert_eq!(Op::from_str("Left"), None);
    /// assert_eq!(Op::from_str(""), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Op::Left),
            "right" => Some(Op::Right),
            "down" => Some(Op::Down),
            "rotate" => Some(Op::Rotate),
            "drop" => Some(Op::Drop),
            _ => None,
        }
    }

    /// The wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Left => "left",
            Op::Right => "right",
            Op::Down => "down",
            Op::Rotate => "rotate",
            Op::Drop => "drop",
        }
    }
}

/// One requested operation against one board
///
/// Commands are created by external actors (user input, the ticker) and
/// deleted by the board controller at the end of the pass that observed
/// them, applied or not. `op` stays a free-form string at this layer so an
/// unrecognized operation survives until the processor ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub board: String,
    pub op: String,
}

impl Command {
    pub fn new(board: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            op: op.into(),
        }
    }
}

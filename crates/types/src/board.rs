//! Board object - desired configuration and observed game state

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::{DEFAULT_HEIGHT, DEFAULT_TICK_MS, DEFAULT_WIDTH, MIN_DIMENSION};

/// Lifecycle state of a board
///
/// `GameOver` is terminal: no spawns, no command application, and the board's
/// ticker must not exist. There is no transition back to `Playing`; starting
/// over means deleting and recreating the board object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardState {
    Playing,
    #[default]
    GameOver,
}

impl BoardState {
    /// Parse from the persisted string form
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Playing" => Some(BoardState::Playing),
            "GameOver" => Some(BoardState::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardState::Playing => "Playing",
            BoardState::GameOver => "GameOver",
        }
    }
}

/// Desired configuration of a board
///
/// `state` is only the *initial* state, copied into the status once when the
/// grid is first allocated. Dimensions never change after that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSpec {
    pub width: i32,
    pub height: i32,
    pub tick_ms: u64,
    pub state: BoardState,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            state: BoardState::GameOver,
        }
    }
}

impl BoardSpec {
    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.width < MIN_DIMENSION {
            return Err(SpecError::DimensionTooSmall {
                axis: "width",
                value: self.width,
            });
        }
        if self.height < MIN_DIMENSION {
            return Err(SpecError::DimensionTooSmall {
                axis: "height",
                value: self.height,
            });
        }
        if self.tick_ms == 0 {
            return Err(SpecError::ZeroTick);
        }
        Ok(())
    }
}

/// Rejected board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    DimensionTooSmall { axis: &'static str, value: i32 },
    ZeroTick,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::DimensionTooSmall { axis, value } => {
                write!(f, "board {axis} must be at least {MIN_DIMENSION}, got {value}")
            }
            SpecError::ZeroTick => write!(f, "tick period must be at least 1ms"),
        }
    }
}

impl std::error::Error for SpecError {}

/// Observed state of a board, recomputed by every reconciliation pass
///
/// `grid` stays `None` until the first pass allocates it; its presence is the
/// initialized flag, and dimensions are immutable from then on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardStatus {
    pub grid: Option<Grid>,
    pub active: Option<ActivePiece>,
    pub state: BoardState,
}

/// The persisted game object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    pub spec: BoardSpec,
    #[serde(default)]
    pub status: BoardStatus,
}

impl Board {
    /// Fresh board with the given spec and an untouched status
    pub fn new(spec: BoardSpec) -> Self {
        Self {
            spec,
            status: BoardStatus::default(),
        }
    }
}

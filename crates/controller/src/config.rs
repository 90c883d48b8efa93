//! Runtime configuration
//!
//! Everything the binary needs is read from the environment once at
//! startup. Unset or unparsable variables fall back to defaults rather
//! than failing, matching the rest of the env surface:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_BOARD_WIDTH` | 11 | Board width in cells |
//! | `TETRIS_BOARD_HEIGHT` | 20 | Board height in cells |
//! | `TETRIS_TICK_MS` | 1000 | Gravity period in milliseconds |
//! | `TETRIS_SEED` | wall clock | Seed for the spawn sequence |
//! | `TETRIS_INITIAL_STATE` | `Playing` | State the board is created in |
//! | `TETRIS_CATALOG` | built-in set | Path to a JSON piece catalog |

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use tetris_reconciler_engine::Catalog;
use tetris_reconciler_types::{BoardSpec, BoardState, PieceDef};

/// Settings assembled from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: i32,
    pub height: i32,
    pub tick_ms: u64,
    pub seed: u32,
    pub initial_state: BoardState,
    pub catalog_path: Option<PathBuf>,
}

impl RunConfig {
    /// Read all `TETRIS_*` variables, falling back per field
    pub fn from_env() -> Self {
        use std::env;

        let width = env::var("TETRIS_BOARD_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(tetris_reconciler_types::DEFAULT_WIDTH);

        let height = env::var("TETRIS_BOARD_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(tetris_reconciler_types::DEFAULT_HEIGHT);

        let tick_ms = env::var("TETRIS_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(tetris_reconciler_types::DEFAULT_TICK_MS);

        let seed = env::var("TETRIS_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(seed_from_clock);

        let initial_state = env::var("TETRIS_INITIAL_STATE")
            .ok()
            .and_then(|s| BoardState::from_str(&s))
            .unwrap_or(BoardState::Playing);

        let catalog_path = env::var("TETRIS_CATALOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            width,
            height,
            tick_ms,
            seed,
            initial_state,
            catalog_path,
        }
    }

    /// The board spec this configuration asks for
    pub fn board_spec(&self) -> BoardSpec {
        BoardSpec {
            width: self.width,
            height: self.height,
            tick_ms: self.tick_ms,
            state: self.initial_state,
        }
    }
}

/// Resolve the piece catalog: a JSON file when a path was configured,
/// the built-in tetromino set otherwise
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::standard());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading piece catalog {}", path.display()))?;
    let pieces: Vec<PieceDef> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing piece catalog {}", path.display()))?;
    Catalog::new(pieces).with_context(|| format!("validating piece catalog {}", path.display()))
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

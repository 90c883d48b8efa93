//! Catalog module - validated piece definition sets
//!
//! The spawner draws from a [`Catalog`], which can only be constructed from
//! a non-empty list of well-formed definitions. Configuration problems are
//! rejected here, at startup; they never surface as game events.

use std::fmt;

use tetris_reconciler_types::{Coord, PieceDef};

/// A non-empty, validated set of piece definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pieces: Vec<PieceDef>,
}

impl Catalog {
    /// Validate and wrap a list of definitions
    pub fn new(pieces: Vec<PieceDef>) -> Result<Self, CatalogError> {
        if pieces.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, def) in pieces.iter().enumerate() {
            if def.id < 1 {
                return Err(CatalogError::BadId { index, id: def.id });
            }
            if def.coords.is_empty() {
                return Err(CatalogError::NoCells { id: def.id });
            }
        }
        Ok(Self { pieces })
    }

    /// The seven conventional tetrominoes, ids 1 through 7
    ///
    /// Shapes are in the relative Y-up convention (positive dy reaches
    /// upward once mapped onto the board).
    pub fn standard() -> Self {
        let defs = vec![
            def(1, "#a0d8ef", &[(-1, 0), (0, 0), (1, 0), (2, 0)]), // I
            def(2, "#f7e26b", &[(0, 0), (1, 0), (0, 1), (1, 1)]),  // O
            def(3, "#b57edc", &[(-1, 0), (0, 0), (1, 0), (0, 1)]), // T
            def(4, "#7ddc7d", &[(-1, 0), (0, 0), (0, 1), (1, 1)]), // S
            def(5, "#e88686", &[(0, 0), (1, 0), (-1, 1), (0, 1)]), // Z
            def(6, "#7d9ddc", &[(-1, 1), (-1, 0), (0, 0), (1, 0)]), // J
            def(7, "#e8b86d", &[(1, 1), (-1, 0), (0, 0), (1, 0)]), // L
        ];
        Self { pieces: defs }
    }

    pub fn pieces(&self) -> &[PieceDef] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

fn def(id: i32, color: &str, coords: &[(i32, i32)]) -> PieceDef {
    PieceDef {
        id,
        coords: coords.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        color: color.to_string(),
    }
}

/// Rejected catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    BadId { index: usize, id: i32 },
    NoCells { id: i32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "piece catalog is empty"),
            CatalogError::BadId { index, id } => {
                write!(f, "piece at index {index} has id {id}; ids must be positive")
            }
            CatalogError::NoCells { id } => write!(f, "piece {id} has no cells"),
        }
    }
}

impl std::error::Error for CatalogError {}

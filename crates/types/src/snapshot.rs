//! Snapshot module - flattened board view for external consumers
//!
//! A renderer or front end reads this instead of the raw object: the grid
//! rows plus the active piece's cells, without the piece being baked into
//! the grid.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState};
use crate::piece::Coord;

/// Self-contained view of one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    pub grid: Vec<Vec<i32>>,
    /// Zero or one entries
    pub active: Vec<SnapshotPiece>,
    pub state: BoardState,
}

/// The active piece as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPiece {
    pub piece_id: i32,
    pub coords: Vec<Coord>,
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let grid = board
            .status
            .grid
            .as_ref()
            .map(|g| g.cells().to_vec())
            .unwrap_or_default();
        let active = board
            .status
            .active
            .iter()
            .map(|piece| SnapshotPiece {
                piece_id: piece.piece_id,
                coords: piece.absolute_coords.clone(),
            })
            .collect();
        Self {
            width: board.spec.width,
            height: board.spec.height,
            grid,
            active,
            state: board.status.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSpec, BoardStatus};
    use crate::grid::Grid;
    use crate::piece::ActivePiece;

    #[test]
    fn test_snapshot_of_uninitialized_board() {
        let board = Board::new(BoardSpec::default());
        let snap = BoardSnapshot::from(&board);
        assert_eq!(snap.width, board.spec.width);
        assert!(snap.grid.is_empty());
        assert!(snap.active.is_empty());
        assert_eq!(snap.state, BoardState::GameOver);
    }

    #[test]
    fn test_snapshot_carries_active_piece() {
        let mut board = Board::new(BoardSpec {
            width: 4,
            height: 4,
            ..BoardSpec::default()
        });
        board.status = BoardStatus {
            grid: Some(Grid::new(4, 4)),
            active: Some(ActivePiece::new(3, Coord::new(1, 2), vec![Coord::new(0, 0)])),
            state: BoardState::Playing,
        };

        let snap = BoardSnapshot::from(&board);
        assert_eq!(snap.grid.len(), 4);
        assert_eq!(snap.active.len(), 1);
        assert_eq!(snap.active[0].piece_id, 3);
        assert_eq!(snap.active[0].coords, vec![Coord::new(1, 2)]);
        assert_eq!(snap.state, BoardState::Playing);
    }
}

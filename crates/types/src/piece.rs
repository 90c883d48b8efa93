//! Piece shapes and the falling piece
//!
//! A piece shape is an ordered list of offsets around the piece's own center.
//! Offsets use a Y-up convention while board rows grow downward, so mapping
//! an offset to a board cell subtracts its `y` component.

use serde::{Deserialize, Serialize};

/// Integer cell coordinate
///
/// On the board, `y` grows downward (row 0 is the top). Inside a piece shape
/// the same struct holds a relative offset in the Y-up convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Catalog entry describing one piece
///
/// `id` must be positive; cell value `0` is reserved for empty grid cells.
/// `color` is cosmetic and only carried through to snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDef {
    pub id: i32,
    pub coords: Vec<Coord>,
    #[serde(default)]
    pub color: String,
}

/// The single falling piece of a board, or absent
///
/// `absolute_coords` is always derived:
/// `absolute_coords[i] = (center.x + relative_coords[i].x, center.y - relative_coords[i].y)`.
/// The vertical offset is subtracted, never added. Mutation paths change
/// `center` or `relative_coords` and then call [`ActivePiece::recompute_absolute`];
/// the absolute list is never edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    pub piece_id: i32,
    pub center: Coord,
    pub relative_coords: Vec<Coord>,
    pub absolute_coords: Vec<Coord>,
}

impl ActivePiece {
    /// Build a piece at `center` with the given shape, absolute coords filled in
    pub fn new(piece_id: i32, center: Coord, relative_coords: Vec<Coord>) -> Self {
        let mut piece = Self {
            piece_id,
            center,
            relative_coords,
            absolute_coords: Vec::new(),
        };
        piece.recompute_absolute();
        piece
    }

    /// Re-derive `absolute_coords` from `center` and `relative_coords`
    pub fn recompute_absolute(&mut self) {
        self.absolute_coords = absolute_coords(self.center, &self.relative_coords);
    }
}

/// Map a center plus relative offsets to absolute board cells
///
/// ```
/// use tetris_reconciler_types::{absolute_coords, Coord};
///
/// let center = Coord::new(3, 5);
/// let shape = vec![Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
/// let abs = absolute_coords(center, &shape);
/// assert_eq!(abs, vec![
///     Coord::new(2, 5),
///     Coord::new(3, 5),
///     Coord::new(4, 5),
///     Coord::new(5, 5),
/// ]);
/// ```
pub fn absolute_coords(center: Coord, relative: &[Coord]) -> Vec<Coord> {
    relative
        .iter()
        .map(|rel| Coord::new(center.x + rel.x, center.y - rel.y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_coords_subtracts_y() {
        let center = Coord::new(4, 6);
        let shape = vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];

        let abs = absolute_coords(center, &shape);

        // Positive y offsets reach upward (smaller row index).
        assert_eq!(abs[0], Coord::new(4, 6));
        assert_eq!(abs[1], Coord::new(4, 5));
        assert_eq!(abs[2], Coord::new(5, 5));
    }

    #[test]
    fn test_active_piece_new_fills_absolute() {
        let piece = ActivePiece::new(
            2,
            Coord::new(2, 2),
            vec![
                Coord::new(-1, 0),
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
            ],
        );

        assert_eq!(
            piece.absolute_coords,
            vec![
                Coord::new(1, 2),
                Coord::new(2, 2),
                Coord::new(3, 2),
                Coord::new(4, 2),
            ]
        );
    }

    #[test]
    fn test_recompute_follows_center() {
        let mut piece = ActivePiece::new(1, Coord::new(3, 5), vec![Coord::new(0, 0)]);
        piece.center.y += 1;
        piece.recompute_absolute();
        assert_eq!(piece.absolute_coords, vec![Coord::new(3, 6)]);
    }
}

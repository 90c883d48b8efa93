//! Collision and transform primitives
//!
//! Pure functions over shapes and the grid. Nothing here mutates the board;
//! legality is always checked on a candidate before anything commits.

use tetris_reconciler_types::{Coord, Grid};

/// Rotate a shape 90 degrees: (dx, dy) becomes (dy, -dx)
///
/// No wall kicks. Applying this four times returns the original shape.
pub fn rotated(relative: &[Coord]) -> Vec<Coord> {
    relative
        .iter()
        .map(|offset| Coord::new(offset.y, -offset.x))
        .collect()
}

/// True iff every coordinate is inside the grid and its cell is empty
pub fn fits(grid: &Grid, coords: &[Coord]) -> bool {
    coords.iter().all(|c| grid.get(c.x, c.y) == Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Vec<Coord> {
        vec![
            Coord::new(-1, 0),
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(2, 0),
        ]
    }

    #[test]
    fn test_rotated_single_step() {
        let shape = vec![Coord::new(1, 0), Coord::new(0, 2)];
        let turned = rotated(&shape);
        assert_eq!(turned, vec![Coord::new(0, -1), Coord::new(2, 0)]);
    }

    #[test]
    fn test_rotated_four_times_is_identity() {
        let shapes = [
            bar(),
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)],
            vec![Coord::new(-1, 0), Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)],
            vec![Coord::new(0, 0)],
        ];
        for shape in shapes {
            let mut current = shape.clone();
            for _ in 0..4 {
                current = rotated(&current);
            }
            assert_eq!(current, shape);
        }
    }

    #[test]
    fn test_fits_empty_grid() {
        let grid = Grid::new(10, 20);
        assert!(fits(&grid, &[Coord::new(0, 0), Coord::new(9, 19)]));
    }

    #[test]
    fn test_fits_rejects_out_of_bounds() {
        let grid = Grid::new(10, 20);
        assert!(!fits(&grid, &[Coord::new(-1, 0)]));
        assert!(!fits(&grid, &[Coord::new(10, 0)]));
        assert!(!fits(&grid, &[Coord::new(0, -1)]));
        assert!(!fits(&grid, &[Coord::new(0, 20)]));
        // One bad coordinate poisons the whole set.
        assert!(!fits(&grid, &[Coord::new(5, 5), Coord::new(10, 5)]));
    }

    #[test]
    fn test_fits_rejects_occupied_cells() {
        let mut grid = Grid::new(10, 20);
        grid.set(4, 10, 7);
        assert!(!fits(&grid, &[Coord::new(4, 10)]));
        assert!(fits(&grid, &[Coord::new(3, 10), Coord::new(5, 10)]));
    }
}

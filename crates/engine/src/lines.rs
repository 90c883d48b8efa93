//! Line clearing after a lock

use tetris_reconciler_types::{Coord, Grid};

/// Clear any full rows among those touched by freshly locked cells
///
/// Collects the distinct rows the lock wrote to, keeps the ones that are now
/// completely occupied, and compacts the grid over them. Returns the number
/// of rows removed.
pub fn clear_full_rows(grid: &mut Grid, locked: &[Coord]) -> u32 {
    let mut full: Vec<i32> = Vec::new();
    for cell in locked {
        if !full.contains(&cell.y) && grid.is_full_row(cell.y) {
            full.push(cell.y);
        }
    }
    if full.is_empty() {
        return 0;
    }
    grid.compact(&full);
    full.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_full_rows() {
        let mut grid = Grid::new(4, 4);
        grid.set(0, 3, 1);
        let before = grid.clone();

        let cleared = clear_full_rows(&mut grid, &[Coord::new(0, 3)]);
        assert_eq!(cleared, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_single_full_row() {
        let mut grid = Grid::new(3, 3);
        for x in 0..3 {
            grid.set(x, 2, 5);
        }
        grid.set(0, 1, 1);

        let cleared = clear_full_rows(&mut grid, &[Coord::new(0, 2), Coord::new(1, 2)]);
        assert_eq!(cleared, 1);
        assert_eq!(grid.cells(), &[vec![0, 0, 0], vec![0, 0, 0], vec![1, 0, 0]]);
    }

    #[test]
    fn test_only_touched_rows_are_considered() {
        let mut grid = Grid::new(2, 3);
        // Row 0 is full but the lock only touched row 2.
        grid.set(0, 0, 1);
        grid.set(1, 0, 1);
        grid.set(0, 2, 2);

        let cleared = clear_full_rows(&mut grid, &[Coord::new(0, 2)]);
        assert_eq!(cleared, 0);
        assert!(grid.is_full_row(0));
    }

    #[test]
    fn test_duplicate_touched_rows_counted_once() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 1, 3);
        grid.set(1, 1, 3);

        let cleared = clear_full_rows(
            &mut grid,
            &[Coord::new(0, 1), Coord::new(1, 1)],
        );
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_two_rows_cleared_at_once() {
        let mut grid = Grid::new(2, 4);
        for x in 0..2 {
            grid.set(x, 2, 4);
            grid.set(x, 3, 4);
        }
        grid.set(0, 1, 6);

        let touched = [
            Coord::new(0, 2),
            Coord::new(1, 2),
            Coord::new(0, 3),
            Coord::new(1, 3),
        ];
        let cleared = clear_full_rows(&mut grid, &touched);
        assert_eq!(cleared, 2);
        assert_eq!(
            grid.cells(),
            &[vec![0, 0], vec![0, 0], vec![0, 0], vec![6, 0]]
        );
    }
}

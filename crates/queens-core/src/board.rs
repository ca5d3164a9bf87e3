use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Mutable N×N occupancy grid the search works on.
///
/// During a search at most one cell per processed column is occupied, and
/// every occupied cell is mutually non-attacking with all others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    /// Mark a cell as holding a queen
    pub fn place(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] = true;
    }

    /// Clear a single cell
    pub fn remove(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] = false;
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// All occupied cells, in row-major order
    pub fn queens(&self) -> Vec<Position> {
        let mut queens = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_occupied(row, col) {
                    queens.push(Position::new(row, col));
                }
            }
        }
        queens
    }

    /// Check whether a queen at (row, col) would conflict with any queen
    /// already placed in columns left of `col`.
    ///
    /// Scans the row and both left-pointing diagonals in O(N). Columns at
    /// or right of `col` are never inspected, so the search can call this
    /// before placing into a fresh column.
    pub fn is_safe(&self, row: usize, col: usize) -> bool {
        for c in 0..col {
            if self.is_occupied(row, c) {
                return false;
            }
        }

        let (mut r, mut c) = (row, col);
        while r > 0 && c > 0 {
            r -= 1;
            c -= 1;
            if self.is_occupied(r, c) {
                return false;
            }
        }

        let (mut r, mut c) = (row, col);
        while r + 1 < self.size && c > 0 {
            r += 1;
            c -= 1;
            if self.is_occupied(r, c) {
                return false;
            }
        }

        true
    }

    /// Capture an independent snapshot of the current occupancy
    pub fn snapshot(&self) -> Solution {
        Solution {
            size: self.size,
            cells: self.cells.clone(),
        }
    }
}

/// Immutable snapshot of a full valid placement.
///
/// Captured the moment the search fills the last column; later board
/// mutation never alters a stored solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    size: usize,
    cells: Vec<bool>,
}

impl Solution {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    /// All occupied cells, in row-major order
    pub fn queens(&self) -> Vec<Position> {
        let mut queens = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_occupied(row, col) {
                    queens.push(Position::new(row, col));
                }
            }
        }
        queens
    }

    /// Check the full N-Queens constraint: exactly N queens, one per row,
    /// one per column, no two on a shared diagonal.
    pub fn is_valid(&self) -> bool {
        let queens = self.queens();
        if queens.len() != self.size {
            return false;
        }
        for (i, a) in queens.iter().enumerate() {
            for b in &queens[i + 1..] {
                if a.row == b.row || a.col == b.col {
                    return false;
                }
                let dr = a.row.abs_diff(b.row);
                let dc = a.col.abs_diff(b.col);
                if dr == dc {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if self.is_occupied(row, col) { 'Q' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_on_empty_board() {
        let board = Board::new(4);
        for row in 0..4 {
            for col in 0..4 {
                assert!(board.is_safe(row, col));
            }
        }
    }

    #[test]
    fn test_row_conflict() {
        let mut board = Board::new(4);
        board.place(1, 0);
        assert!(!board.is_safe(1, 2));
        assert!(board.is_safe(3, 2));
    }

    #[test]
    fn test_diagonal_conflicts() {
        let mut board = Board::new(5);
        board.place(2, 1);
        // Upper-left diagonal from (4, 3) passes through (2, 1)
        assert!(!board.is_safe(4, 3));
        // Lower-left diagonal from (0, 3) passes through (2, 1)
        assert!(!board.is_safe(0, 3));
        // Knight's-move cell is fine
        assert!(board.is_safe(4, 2));
    }

    #[test]
    fn test_safe_ignores_columns_to_the_right() {
        let mut board = Board::new(4);
        board.place(0, 3);
        assert!(board.is_safe(0, 1));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::new(4);
        board.place(1, 0);
        let snapshot = board.snapshot();
        board.remove(1, 0);
        board.place(2, 2);
        assert!(snapshot.is_occupied(1, 0));
        assert!(!snapshot.is_occupied(2, 2));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new(3);
        board.place(0, 0);
        board.place(2, 1);
        board.clear();
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_solution_validity() {
        // The classic N=4 solution: rows 1, 3, 0, 2 by column
        let mut board = Board::new(4);
        board.place(1, 0);
        board.place(3, 1);
        board.place(0, 2);
        board.place(2, 3);
        assert!(board.snapshot().is_valid());

        // Two queens on a diagonal
        let mut board = Board::new(4);
        board.place(0, 0);
        board.place(1, 1);
        board.place(3, 2);
        board.place(2, 3);
        assert!(!board.snapshot().is_valid());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2);
        board.place(0, 1);
        let rendered = board.snapshot().to_string();
        assert_eq!(rendered, ". Q\n. .\n");
    }
}

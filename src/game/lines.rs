//! Line analysis for a single Notakto board

use super::Cell;

/// Line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing lines on a Notakto board
///
/// Notakto has a single shared mark, so a line is complete as soon as all
/// three of its cells are marked, regardless of who marked them.
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if any row, column or diagonal is fully marked
    pub fn has_line(cells: &[Cell; 9]) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == Cell::Marked))
    }

    /// Empty cells that would complete a line if marked
    ///
    /// In misère play these are the cells a player must avoid.
    pub fn losing_cells(cells: &[Cell; 9]) -> Vec<usize> {
        let mut cells_out: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::completing_cell(cells, line))
            .collect();
        cells_out.sort_unstable();
        cells_out.dedup();
        cells_out
    }

    /// Find the single empty cell of a line whose other two cells are marked
    fn completing_cell(cells: &[Cell; 9], line: &[usize; 3]) -> Option<usize> {
        let mut empty_pos = None;

        for &idx in line {
            if cells[idx] == Cell::Empty {
                if empty_pos.is_some() {
                    return None;
                }
                empty_pos = Some(idx);
            }
        }

        empty_pos
    }
}

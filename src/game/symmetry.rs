//! D4 symmetry group operations on a single board

use serde::{Deserialize, Serialize};

use super::board::Cell;

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply reflection
    pub reflection: bool,
}

impl D4Transform {
    /// Get all 8 D4 transforms
    pub fn all() -> Vec<D4Transform> {
        let mut transforms = Vec::with_capacity(8);
        for rotation in [0, 90, 180, 270] {
            for reflection in [false, true] {
                transforms.push(D4Transform {
                    rotation,
                    reflection,
                });
            }
        }
        transforms
    }

    /// Map a cell index (0-8) to its image under the transform
    ///
    /// Reflection (mirror across the vertical axis) is applied before the
    /// clockwise rotation.
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.reflection {
            col = 2 - col;
        }

        for _ in 0..(self.rotation / 90) {
            (row, col) = (col, 2 - row);
        }

        row * 3 + col
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}

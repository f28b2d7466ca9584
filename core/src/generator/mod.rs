use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a mine mask for a config. Implementations must keep every mine out of `zone`.
pub trait MineGenerator {
    fn generate(self, config: GameConfig, zone: &ExclusionZone) -> Result<Array2<bool>>;
}

/// How the first-reveal target is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionRule {
    /// Only the target tile itself.
    #[default]
    Point,
    /// The target's whole row and whole column, matching the historical smines behavior.
    RowAndColumn,
}

/// Tiles that must stay mine-free: the 3x3 block around the cursor plus the first-reveal target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionZone {
    cursor: Coord2,
    target: Coord2,
    rule: ExclusionRule,
}

impl ExclusionZone {
    pub const fn new(cursor: Coord2, target: Coord2, rule: ExclusionRule) -> Self {
        Self {
            cursor,
            target,
            rule,
        }
    }

    pub const fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub const fn target(&self) -> Coord2 {
        self.target
    }

    pub const fn rule(&self) -> ExclusionRule {
        self.rule
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let near_cursor = row.abs_diff(self.cursor.0) <= 1 && col.abs_diff(self.cursor.1) <= 1;
        let (target_row, target_col) = self.target;
        let at_target = match self.rule {
            ExclusionRule::Point => row == target_row && col == target_col,
            ExclusionRule::RowAndColumn => row == target_row || col == target_col,
        };
        near_cursor || at_target
    }

    /// Number of tiles of a `size` board that may hold a mine.
    pub fn free_tiles(&self, (rows, cols): Coord2) -> CellCount {
        let mut free = 0;
        for row in 0..rows {
            for col in 0..cols {
                if !self.contains((row, col)) {
                    free += 1;
                }
            }
        }
        free
    }
}

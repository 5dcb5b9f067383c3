//! Grid distance measurement
//!
//! Distances are whole grid units (feet, meters, squares - whatever the
//! table uses). A missing position on either side measures as 0.

use crate::types::GridPosition;
use serde::{Deserialize, Serialize};

/// Measures the distance between two tokens
pub trait GridMeasure: Send + Sync {
    fn measure_distance(&self, a: Option<GridPosition>, b: Option<GridPosition>) -> u32;
}

impl<T: GridMeasure + ?Sized> GridMeasure for &T {
    fn measure_distance(&self, a: Option<GridPosition>, b: Option<GridPosition>) -> u32 {
        (**self).measure_distance(a, b)
    }
}

/// How diagonal steps are counted on a square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalRule {
    /// Every diagonal step costs one square
    #[default]
    Equidistant,
    /// Diagonals alternate between one and two squares (5-10-5)
    Alternating,
}

/// A square grid where each square spans `unit` distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareGrid {
    #[serde(default = "default_unit")]
    pub unit: u32,
    #[serde(default)]
    pub diagonals: DiagonalRule,
}

fn default_unit() -> u32 {
    1
}

impl Default for SquareGrid {
    fn default() -> Self {
        SquareGrid {
            unit: default_unit(),
            diagonals: DiagonalRule::default(),
        }
    }
}

impl SquareGrid {
    pub fn new(unit: u32, diagonals: DiagonalRule) -> Self {
        SquareGrid { unit, diagonals }
    }

    /// Number of squares between two positions
    pub fn squares_between(&self, a: GridPosition, b: GridPosition) -> u32 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        let diagonal = dx.min(dy);
        let straight = dx.max(dy) - diagonal;

        match self.diagonals {
            DiagonalRule::Equidistant => diagonal.saturating_add(straight),
            DiagonalRule::Alternating => diagonal
                .saturating_add(diagonal / 2)
                .saturating_add(straight),
        }
    }
}

impl GridMeasure for SquareGrid {
    fn measure_distance(&self, a: Option<GridPosition>, b: Option<GridPosition>) -> u32 {
        match (a, b) {
            (Some(a), Some(b)) => self.squares_between(a, b).saturating_mul(self.unit),
            _ => 0,
        }
    }
}

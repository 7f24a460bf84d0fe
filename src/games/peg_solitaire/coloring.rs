//! Initial peg coloring policies.
//!
//! A board is colored once, right after construction. Bands are the
//! horizontal lines of the triangle: every slot with the same column index
//! sits at the same height.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::{Coord, PegColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ColoringStyle {
    /// Paint each band with the next color, bottom band first, cycling.
    RowByRow {
        #[serde(default = "default_row_colors")]
        colors: Vec<PegColor>,
    },
    /// Paint every peg the same color.
    SingleColor {
        #[serde(default = "default_single_color")]
        color: PegColor,
    },
}

fn default_row_colors() -> Vec<PegColor> {
    vec![PegColor::BLUE, PegColor::RED, PegColor::WHITE]
}

fn default_single_color() -> PegColor {
    PegColor::RED
}

impl Default for ColoringStyle {
    fn default() -> Self {
        ColoringStyle::SingleColor {
            color: default_single_color(),
        }
    }
}

impl ColoringStyle {
    pub fn row_by_row() -> Self {
        ColoringStyle::RowByRow {
            colors: default_row_colors(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColoringStyle::RowByRow { .. } => "Row By Row",
            ColoringStyle::SingleColor { .. } => "Single Color",
        }
    }

    /// Color for the slot at `coord`, `None` when the policy has no colors.
    pub fn color_for(&self, coord: Coord) -> Option<PegColor> {
        match self {
            ColoringStyle::RowByRow { colors } if colors.is_empty() => None,
            ColoringStyle::RowByRow { colors } => Some(colors[coord.col % colors.len()]),
            ColoringStyle::SingleColor { color } => Some(*color),
        }
    }

    /// Repaint every occupied slot. Empty slots stay empty.
    pub fn assign(&self, board: &mut Board) {
        board.repaint(|coord| self.color_for(coord));
    }
}

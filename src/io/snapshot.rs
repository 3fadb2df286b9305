//! Renderer-facing view of a grid
//!
//! A snapshot is a plain copy of every cell's state. Renderers turn the
//! variant ids into visuals; the solver never does.

use std::fmt::Write;

use crate::spatial::grid::{CellState, Grid};
use crate::spatial::tiles::{TileCatalog, VariantId};

/// State of one cell at the time of the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSnapshot {
    /// Resolved to a single variant
    Collapsed(VariantId),
    /// Still choosing between these variants, in ascending id order
    Undetermined(Vec<VariantId>),
    /// No variant remains
    Contradiction,
}

/// Row-major copy of every cell's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    width: usize,
    height: usize,
    cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    /// Capture the current state of a grid
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid
            .iter()
            .map(|(_, cell)| match cell.state() {
                CellState::Collapsed(variant) => CellSnapshot::Collapsed(variant),
                CellState::Contradictory => CellSnapshot::Contradiction,
                CellState::Undetermined => CellSnapshot::Undetermined(cell.domain().to_vec()),
            })
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            cells,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Cell at `[row, col]`
    pub fn get(&self, row: usize, col: usize) -> Option<&CellSnapshot> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellSnapshot]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Whether every cell is collapsed
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| matches!(cell, CellSnapshot::Collapsed(_)))
    }

    /// Whether any cell is contradictory
    pub fn has_contradiction(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| matches!(cell, CellSnapshot::Contradiction))
    }

    /// Plain-text rendering, one line per row
    ///
    /// Collapsed cells show their variant name, undetermined cells the number
    /// of remaining candidates in braces, and contradictions `!`. Columns are
    /// padded to a common width.
    pub fn to_text(&self, catalog: &TileCatalog) -> String {
        let label = |cell: &CellSnapshot| match cell {
            CellSnapshot::Collapsed(variant) => catalog.name(*variant).unwrap_or("?").to_string(),
            CellSnapshot::Undetermined(candidates) => format!("{{{}}}", candidates.len()),
            CellSnapshot::Contradiction => "!".to_string(),
        };

        let column_width = self.cells.iter().map(|cell| label(cell).len()).max().unwrap_or(0);

        let mut text = String::new();
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| format!("{:<column_width$}", label(cell)))
                .collect();
            let _ = writeln!(text, "{}", line.join(" | ").trim_end());
        }
        text
    }
}

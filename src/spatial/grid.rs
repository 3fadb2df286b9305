//! Grid of cells, each holding the set of variants still possible there
//!
//! Cells are addressed by `[row, col]` positions into a single owned array.
//! Propagation queues hold positions only and re-resolve them against the
//! grid on every access.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::side::Side;
use crate::spatial::tiles::VariantId;

/// Grid position as `[row, col]`
pub type Position = [usize; 2];

/// Derived state of a cell's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// More than one variant remains
    Undetermined,
    /// Exactly one variant remains
    Collapsed(VariantId),
    /// No variant remains
    Contradictory,
}

/// One grid position and its domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    domain: TileBitset,
}

impl Cell {
    /// Create a cell where every variant is possible
    pub fn new(variant_count: usize) -> Self {
        Self {
            domain: TileBitset::all(variant_count),
        }
    }

    /// Variants still possible here
    pub const fn domain(&self) -> &TileBitset {
        &self.domain
    }

    /// Remove every variant not in `allowed`
    ///
    /// Returns the number of variants removed. The domain never grows.
    pub fn restrict(&mut self, allowed: &TileBitset) -> usize {
        self.domain.intersect_with(allowed)
    }

    /// Number of variants still possible
    pub fn len(&self) -> usize {
        self.domain.count()
    }

    /// Whether no variant remains
    pub fn is_contradictory(&self) -> bool {
        self.domain.is_empty()
    }

    /// Whether exactly one variant remains
    pub fn is_collapsed(&self) -> bool {
        self.domain.count() == 1
    }

    /// Whether more than one variant remains
    pub fn is_undetermined(&self) -> bool {
        self.domain.count() > 1
    }

    /// The remaining variant when collapsed
    pub fn collapsed_variant(&self) -> Option<VariantId> {
        if self.is_collapsed() {
            self.domain.first()
        } else {
            None
        }
    }

    /// Classify the domain
    pub fn state(&self) -> CellState {
        match self.domain.count() {
            0 => CellState::Contradictory,
            1 => self
                .domain
                .first()
                .map_or(CellState::Contradictory, CellState::Collapsed),
            _ => CellState::Undetermined,
        }
    }
}

/// Fixed-size grid owning all cells
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<Cell>,
    variant_count: usize,
}

impl Grid {
    /// Allocate `width` x `height` cells, each able to hold every variant
    pub fn initialize(width: usize, height: usize, variant_count: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), Cell::new(variant_count)),
            variant_count,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Size of the variant universe every domain is drawn from
    pub const fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Whether a position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position[0] < self.height() && position[1] < self.width()
    }

    /// Cell at a position
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Mutable cell at a position
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position)
    }

    /// Neighbouring position on `side`, if inside the grid
    pub fn neighbor(&self, position: Position, side: Side) -> Option<Position> {
        let [dr, dc] = side.offset();
        let row = position[0].checked_add_signed(dr)?;
        let col = position[1].checked_add_signed(dc)?;
        let neighbor = [row, col];
        self.contains(neighbor).then_some(neighbor)
    }

    /// All in-bounds neighbours with the side they lie on
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Side, Position)> + '_ {
        Side::ALL
            .into_iter()
            .filter_map(move |side| self.neighbor(position, side).map(|n| (side, n)))
    }

    /// Cells with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// First contradictory cell in row-major order
    pub fn find_contradiction(&self) -> Option<Position> {
        self.iter()
            .find(|(_, cell)| cell.is_contradictory())
            .map(|(position, _)| position)
    }

    /// Number of undetermined cells
    pub fn undetermined_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_undetermined()).count()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Collapsed variant at every position, or `None` where undetermined
    pub fn assignment(&self) -> Array2<Option<VariantId>> {
        self.cells.map(Cell::collapsed_variant)
    }
}

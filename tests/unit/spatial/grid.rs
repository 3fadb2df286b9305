//! Tests for cells, domains and grid neighbourhoods

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::spatial::grid::{Cell, CellState, Grid};
    use tilecollapse::spatial::side::Side;

    fn set(capacity: usize, ids: &[usize]) -> TileBitset {
        let mut bitset = TileBitset::new(capacity);
        for &id in ids {
            bitset.insert(id);
        }
        bitset
    }

    // Tests a new cell can hold every variant
    // Verified by starting cells empty
    #[test]
    fn test_new_cell_full_domain() {
        let cell = Cell::new(5);
        assert_eq!(cell.len(), 5);
        assert!(cell.is_undetermined());
        assert_eq!(cell.state(), CellState::Undetermined);
        assert_eq!(cell.collapsed_variant(), None);
    }

    // Tests restriction narrows the domain through each state
    // Verified by replacing the domain instead of intersecting
    #[test]
    fn test_restrict_states() {
        let mut cell = Cell::new(4);
        assert_eq!(cell.restrict(&set(4, &[1, 3])), 2);
        assert_eq!(cell.domain().to_vec(), vec![1, 3]);

        assert_eq!(cell.restrict(&set(4, &[0, 1, 2, 3])), 0);
        assert_eq!(cell.len(), 2);

        assert_eq!(cell.restrict(&set(4, &[3])), 1);
        assert!(cell.is_collapsed());
        assert_eq!(cell.state(), CellState::Collapsed(3));
        assert_eq!(cell.collapsed_variant(), Some(3));

        assert_eq!(cell.restrict(&set(4, &[0])), 1);
        assert!(cell.is_contradictory());
        assert_eq!(cell.state(), CellState::Contradictory);
    }

    // Tests a restricted domain never grows back
    // Verified by uniting domains on restrict
    #[test]
    fn test_domain_monotone() {
        let mut cell = Cell::new(6);
        cell.restrict(&set(6, &[0, 2, 4]));
        let before = cell.domain().clone();
        cell.restrict(&set(6, &[1, 2, 3, 4, 5]));
        assert!(cell.domain().is_subset(&before));
        assert_eq!(cell.domain().to_vec(), vec![2, 4]);
    }

    // Tests grid dimensions and row-major addressing
    // Verified by swapping width and height
    #[test]
    fn test_dimensions() {
        let grid = Grid::initialize(4, 2, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.variant_count(), 3);
        assert!(!grid.is_empty());
        assert!(grid.contains([1, 3]));
        assert!(!grid.contains([2, 0]));
        assert!(!grid.contains([0, 4]));
        assert!(grid.get([1, 3]).is_some());
        assert!(grid.get([3, 1]).is_none());

        let positions: Vec<_> = grid.iter().map(|(position, _)| position).take(5).collect();
        assert_eq!(positions, vec![[0, 0], [0, 1], [0, 2], [0, 3], [1, 0]]);
    }

    // Tests neighbours stop at the grid boundary without wrapping
    // Verified by wrapping around the edges
    #[test]
    fn test_neighbors_bounded() {
        let grid = Grid::initialize(3, 3, 2);
        assert_eq!(grid.neighbor([0, 0], Side::Top), None);
        assert_eq!(grid.neighbor([0, 0], Side::Left), None);
        assert_eq!(grid.neighbor([0, 0], Side::Right), Some([0, 1]));
        assert_eq!(grid.neighbor([0, 0], Side::Bottom), Some([1, 0]));
        assert_eq!(grid.neighbor([2, 2], Side::Right), None);

        let corner: Vec<_> = grid.neighbors([0, 0]).collect();
        assert_eq!(corner, vec![(Side::Right, [0, 1]), (Side::Bottom, [1, 0])]);
        assert_eq!(grid.neighbors([1, 1]).count(), 4);
    }

    // Tests counts and contradiction lookup reflect cell states
    // Verified by counting contradictions as collapsed
    #[test]
    fn test_counts_and_assignment() {
        let mut grid = Grid::initialize(2, 2, 3);
        assert!(!grid.is_fully_collapsed());
        assert_eq!(grid.undetermined_count(), 4);

        for (position, id) in [([0, 0], 0), ([0, 1], 1), ([1, 0], 2)] {
            if let Some(cell) = grid.get_mut(position) {
                cell.restrict(&set(3, &[id]));
            }
        }
        assert_eq!(grid.collapsed_count(), 3);
        assert_eq!(grid.undetermined_count(), 1);
        assert_eq!(grid.find_contradiction(), None);

        let assignment = grid.assignment();
        assert_eq!(assignment[[0, 1]], Some(1));
        assert_eq!(assignment[[1, 1]], None);

        if let Some(cell) = grid.get_mut([1, 1]) {
            cell.restrict(&set(3, &[]));
        }
        assert_eq!(grid.find_contradiction(), Some([1, 1]));
        assert!(!grid.is_fully_collapsed());
    }

    // Tests an empty grid is trivially collapsed
    // Verified by requiring at least one cell
    #[test]
    fn test_empty_grid() {
        let grid = Grid::initialize(0, 5, 2);
        assert!(grid.is_empty());
        assert!(grid.is_fully_collapsed());
        assert_eq!(grid.iter().count(), 0);
    }
}

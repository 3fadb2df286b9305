//! Tests for the solver state machine, pre-seeding and run statistics

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::executor::{Solver, SolverState};
    use tilecollapse::analysis::validation::find_adjacency_violations;
    use tilecollapse::io::configuration::MAX_GRID_DIMENSION;
    use tilecollapse::spatial::adjacency::AdjacencyIndex;
    use tilecollapse::spatial::tiles::{BaseTile, TileCatalog};

    fn two_colour_catalog() -> TileCatalog {
        TileCatalog::expand(&[
            BaseTile::new("a", "X").with_edges(["x"; 4]),
            BaseTile::new("b", "X").with_edges(["y"; 4]),
        ])
        .expect("valid catalog")
    }

    fn road_catalog() -> TileCatalog {
        TileCatalog::expand(&[
            BaseTile::new("grass", "X").with_edges(["grass"; 4]),
            BaseTile::new("cross", "X").with_edges(["road"; 4]),
            BaseTile::new("straight", "L").with_edges(["road", "grass", "road", "grass"]),
            BaseTile::new("corner", "L").with_edges(["road", "road", "grass", "grass"]),
            BaseTile::new("tee", "T").with_edges(["road", "road", "grass", "road"]),
            BaseTile::new("end", "T").with_edges(["road", "grass", "grass", "grass"]),
        ])
        .expect("valid catalog")
    }

    // Tests a single self-compatible tile fills the grid
    // Verified by marking the solver complete before every cell is collapsed
    #[test]
    fn test_single_tile_completes() {
        let catalog = TileCatalog::expand(&[BaseTile::new("only", "X").with_edges(["e"; 4])])
            .expect("valid catalog");
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 3, 3, 1).expect("valid dimensions");

        assert_eq!(solver.run_to_completion(), SolverState::Complete);
        assert!(solver.grid().is_fully_collapsed());
        assert_eq!(solver.grid().collapsed_count(), 9);
    }

    // Tests a grid with no cells is complete on the first step
    // Verified by returning Running when the selection scan is exhausted
    #[test]
    fn test_empty_grid_completes_immediately() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 0, 4, 1).expect("valid dimensions");

        assert_eq!(solver.state(), SolverState::Running);
        assert_eq!(solver.step(), SolverState::Complete);
        assert_eq!(solver.stats().collapses, 0);
    }

    // Tests completed runs never contain mismatched neighbours
    // Verified by skipping propagation after a collapse
    #[test]
    fn test_complete_grid_respects_adjacency() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);

        for seed in 0..10 {
            let mut solver =
                Solver::with_seed(&catalog, &adjacency, 12, 9, seed).expect("valid dimensions");
            assert_eq!(solver.run_to_completion(), SolverState::Complete);
            assert!(find_adjacency_violations(solver.grid(), &adjacency).is_empty());
            assert!(solver.snapshot().is_complete());
        }
    }

    // Tests the same seed reproduces the same grid and an injected rng matches
    // Verified by seeding the selector from system entropy
    #[test]
    fn test_seeded_runs_are_reproducible() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);

        let mut first =
            Solver::with_seed(&catalog, &adjacency, 8, 8, 99).expect("valid dimensions");
        let mut second = Solver::new(&catalog, &adjacency, 8, 8, StdRng::seed_from_u64(99))
            .expect("valid dimensions");
        first.run_to_completion();
        second.run_to_completion();

        assert_eq!(first.grid().assignment(), second.grid().assignment());
        assert_eq!(first.stats(), second.stats());
    }

    // Tests stepping after a terminal state changes nothing
    // Verified by letting step run the selection scan in any state
    #[test]
    fn test_step_after_terminal_is_idempotent() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 4, 4, 3).expect("valid dimensions");
        let state = solver.run_to_completion();
        assert!(state.is_terminal());

        let assignment = solver.grid().assignment();
        let stats = solver.stats();
        assert_eq!(solver.step(), state);
        assert_eq!(solver.grid().assignment(), assignment);
        assert_eq!(solver.stats(), stats);
    }

    // Tests each productive step collapses a cell and records it
    // Verified by not recording the last collapse
    #[test]
    fn test_step_collapses_one_cell() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 6, 6, 5).expect("valid dimensions");

        assert_eq!(solver.last_collapse(), None);
        solver.step();
        let (position, variant) = solver.last_collapse().expect("a cell was collapsed");
        assert_eq!(
            solver.grid().get(position).and_then(|c| c.collapsed_variant()),
            Some(variant)
        );
        assert_eq!(solver.stats().collapses, 1);
        assert!(solver.grid().collapsed_count() >= 1);
    }

    // Tests the run terminates within one step per cell plus one
    // Verified by collapsing cells without removing them from selection
    #[test]
    fn test_step_count_bounded() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 10, 10, 8).expect("valid dimensions");
        solver.run_to_completion();

        let stats = solver.stats();
        assert!(stats.steps <= 101);
        assert!(stats.collapses <= 100);
    }

    // Tests pre-seeding a cell propagates to its neighbours
    // Verified by skipping propagation in constrain
    #[test]
    fn test_constrain_named_propagates() {
        let catalog = two_colour_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 3, 3, 0).expect("valid dimensions");

        let state = solver.constrain_named([1, 1], "b").expect("valid constraint");
        assert_eq!(state, SolverState::Complete);
        let b = catalog.id_of("b").expect("b exists");
        assert!(solver.grid().iter().all(|(_, c)| c.collapsed_variant() == Some(b)));
    }

    // Tests an emptied domain ends the run in a contradiction
    // Verified by treating an emptied domain as still running
    #[test]
    fn test_empty_constraint_contradicts() {
        let catalog = two_colour_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 3, 1, 0).expect("valid dimensions");

        let nothing = TileBitset::new(catalog.len());
        assert_eq!(
            solver.constrain([0, 1], &nothing).expect("valid"),
            SolverState::Contradiction
        );
        assert_eq!(solver.contradiction(), Some([0, 1]));
        assert_eq!(solver.step(), SolverState::Contradiction);
    }

    // Tests constraints after the run has finished are ignored
    // Verified by applying constraints in any state
    #[test]
    fn test_constrain_after_completion_is_ignored() {
        let catalog = two_colour_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 3, 1, 0).expect("valid dimensions");

        let a = TileBitset::singleton(catalog.len(), 0);
        let b = TileBitset::singleton(catalog.len(), 1);
        assert_eq!(solver.constrain([0, 0], &a).expect("valid"), SolverState::Complete);
        assert_eq!(solver.constrain([0, 2], &b).expect("valid"), SolverState::Complete);
        assert_eq!(solver.grid().get([0, 2]).and_then(|c| c.collapsed_variant()), Some(0));
    }

    // Tests constraints outside the grid or of the wrong size are rejected
    // Verified by removing the bounds check
    #[test]
    fn test_constrain_rejects_invalid_input() {
        let catalog = two_colour_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 2, 2, 0).expect("valid dimensions");

        let allowed = TileBitset::all(catalog.len());
        assert!(matches!(
            solver.constrain([2, 0], &allowed),
            Err(AlgorithmError::InvalidParameter { parameter: "position", .. })
        ));
        assert!(matches!(
            solver.constrain([0, 0], &TileBitset::all(5)),
            Err(AlgorithmError::InvalidParameter { parameter: "allowed", .. })
        ));
        assert!(matches!(
            solver.constrain_named([0, 0], "missing"),
            Err(AlgorithmError::UnknownTile { .. })
        ));
        assert_eq!(solver.state(), SolverState::Running);
    }

    // Tests oversized grids and foreign adjacency indexes are rejected
    // Verified by removing dimension validation
    #[test]
    fn test_construction_validation() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        assert!(
            Solver::with_seed(&catalog, &adjacency, MAX_GRID_DIMENSION + 1, 1, 0).is_err()
        );
        assert!(
            Solver::with_seed(&catalog, &adjacency, 1, MAX_GRID_DIMENSION + 1, 0).is_err()
        );

        let other = two_colour_catalog();
        let other_adjacency = AdjacencyIndex::build(&other);
        assert!(Solver::with_seed(&catalog, &other_adjacency, 2, 2, 0).is_err());
    }

    // Tests re-initializing discards progress and statistics
    // Verified by keeping the old grid in initialize
    #[test]
    fn test_initialize_and_reset() {
        let catalog = road_catalog();
        let adjacency = AdjacencyIndex::build(&catalog);
        let mut solver =
            Solver::with_seed(&catalog, &adjacency, 4, 4, 2).expect("valid dimensions");
        solver.run_to_completion();

        solver.initialize(5, 3).expect("valid dimensions");
        assert_eq!(solver.state(), SolverState::Running);
        assert_eq!(solver.grid().width(), 5);
        assert_eq!(solver.grid().height(), 3);
        assert_eq!(solver.grid().undetermined_count(), 15);
        assert_eq!(solver.stats().steps, 0);
        assert_eq!(solver.contradiction(), None);

        solver.run_to_completion();
        solver.reset();
        assert_eq!(solver.grid().undetermined_count(), 15);
        assert_eq!(solver.last_collapse(), None);

        assert!(solver.initialize(MAX_GRID_DIMENSION + 1, 1).is_err());
    }
}

//! Tests for the generation session loop and its report

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;
    use wavetile::algorithm::executor::{GenerationSession, SessionConfig};
    use wavetile::algorithm::propagation::ContradictionPolicy;
    use wavetile::analysis::patterns::{ExamplePattern, SampleDefinition};
    use wavetile::spatial::TileCatalog;
    use wavetile::AlgorithmError;

    fn session(
        tiles: &[(&str, u32)],
        rows: &[Vec<&str>],
        size: [usize; 2],
        policy: ContradictionPolicy,
    ) -> GenerationSession {
        let catalog = TileCatalog::new(tiles.iter().copied()).unwrap();
        let pattern = ExamplePattern::from_rows(rows, &catalog).unwrap();
        let config = SessionConfig {
            rows: size[0],
            cols: size[1],
            seed: 5,
            policy,
        };
        GenerationSession::new(config, catalog, &pattern).unwrap()
    }

    fn checkerboard(size: [usize; 2]) -> GenerationSession {
        session(
            &[("a", 1), ("b", 1)],
            &[vec!["a", "b"], vec!["b", "a"]],
            size,
            ContradictionPolicy::Abort,
        )
    }

    // Tests a 3x3 checkerboard resolves without any violation
    // Verified by skipping propagation after each collapse
    #[test]
    fn test_checkerboard_end_to_end() {
        let mut session = checkerboard([3, 3]);
        assert_eq!(session.policy(), ContradictionPolicy::Abort);
        assert_eq!(session.catalog().len(), 2);
        let report = session.run().unwrap();

        assert!(report.is_clean());
        assert_eq!(report.steps, 9);
        assert_eq!(report.skipped, 0);
        assert!(session.grid().is_fully_resolved());
        assert!(session.constraints().violations(session.grid()).is_empty());
        assert!(session.is_finished());
    }

    // Tests a single-tile pattern fills the grid with that tile
    // Verified by drawing from the full catalog instead of the domain
    #[test]
    fn test_single_tile_convergence() {
        let mut session = session(
            &[("x", 2)],
            &[vec!["x", "x"], vec!["x", "x"]],
            [5, 4],
            ContradictionPolicy::Abort,
        );
        let report = session.run().unwrap();

        assert!(report.is_clean());
        assert!(
            session
                .grid()
                .cells()
                .all(|(_, cell)| cell.resolved() == Some(0))
        );
    }

    // Tests domains never grow between steps
    // Verified by resetting neighbor domains before each restriction
    #[test]
    fn test_domains_only_shrink() {
        let mut session = session(
            &[("a", 1), ("b", 2), ("c", 1)],
            &[vec!["a", "b", "c"]],
            [6, 6],
            ContradictionPolicy::Abort,
        );
        let mut previous: Vec<usize> = session.grid().cells().map(|(_, c)| c.entropy()).collect();

        let report = session
            .run_with(|grid, _| {
                let current: Vec<usize> = grid.cells().map(|(_, c)| c.entropy()).collect();
                assert!(previous.iter().zip(&current).all(|(before, after)| after <= before));
                previous = current;
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(report.resolved, 36);
    }

    // Tests step events count iterations from one and stop at exhaustion
    // Verified by incrementing the iteration after building the event
    #[test]
    fn test_step_events() {
        let mut session = checkerboard([2, 2]);

        let first = session.step().unwrap().unwrap();
        assert_eq!(first.iteration, 1);
        assert_eq!(first.position, [0, 0]);
        assert!(!first.reseeded);
        assert_eq!(first.propagation.narrowed, 3);

        let mut last = first.iteration;
        while let Some(event) = session.step().unwrap() {
            assert_eq!(event.iteration, last + 1);
            last = event.iteration;
        }
        assert_eq!(last, 4);
        assert!(session.step().unwrap().is_none());
        assert_eq!(session.iteration(), 4);
    }

    // Tests the running resolved count tracks the grid and the step counter
    // Verified by counting a step before the collapse outcome is known
    #[test]
    fn test_resolved_cells_and_iteration_agree() {
        let mut session = session(&[("a", 1)], &[vec!["a"]], [3, 3], ContradictionPolicy::Reseed);

        while let Some(event) = session.step().unwrap() {
            assert_eq!(session.resolved_cells(), session.grid().resolved_count());
            assert_eq!(session.resolved_cells(), event.iteration);
        }

        let report = session.report();
        assert_eq!(session.iteration(), report.steps);
        assert_eq!(report.skipped, 0);
        assert_eq!(session.resolved_cells(), 9);
    }

    // Tests an aborted step leaves the counter at the failing step
    // Verified by incrementing the counter after the contradiction check
    #[test]
    fn test_abort_iteration_matches_session() {
        let mut session = session(&[("a", 1)], &[vec!["a"]], [1, 3], ContradictionPolicy::Abort);

        let Err(AlgorithmError::Contradiction { iteration, .. }) = session.run() else {
            panic!("a lone tile without neighbors must contradict");
        };
        assert_eq!(iteration, session.iteration());
    }

    // Tests the observer can cancel between steps
    // Verified by ignoring the observer's Break
    #[test]
    fn test_run_with_cancel() {
        let mut session = checkerboard([4, 4]);
        let mut seen = 0;

        let report = session
            .run_with(|_, _| {
                seen += 1;
                if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.steps, 3);
        assert_eq!(report.resolved, 3);
        assert_eq!(session.remaining(), 13);
    }

    // Tests Abort surfaces the contradiction with its step number
    // Verified by dropping the iteration context in step
    #[test]
    fn test_abort_reports_contradiction() {
        let mut session = session(&[("a", 1)], &[vec!["a"]], [2, 2], ContradictionPolicy::Abort);

        let err = session.run().unwrap_err();
        assert!(matches!(
            err,
            AlgorithmError::Contradiction {
                position: [1, 0],
                iteration: 1,
            }
        ));
    }

    // Tests Reseed resolves every cell and lists what went wrong
    // Verified by skipping reseeded cells in the report
    #[test]
    fn test_reseed_report() {
        let mut session = session(&[("a", 1)], &[vec!["a"]], [2, 2], ContradictionPolicy::Reseed);

        let report = session.run().unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.resolved, 4);
        assert_eq!(report.steps, 4);
        assert_eq!(report.reseeded, vec![[0, 1], [1, 0], [1, 1]]);
        assert_eq!(report.contradictions, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
        assert!(session.grid().is_fully_resolved());
    }

    // Tests invalid dimensions are rejected before generation
    // Verified by allocating the grid without validation
    #[test]
    fn test_invalid_dimensions() {
        let catalog = TileCatalog::new([("a", 1)]).unwrap();
        let pattern = ExamplePattern::from_rows(&[vec!["a"]], &catalog).unwrap();
        let config = SessionConfig {
            rows: 0,
            ..SessionConfig::default()
        };

        let result = GenerationSession::new(config, catalog, &pattern);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "rows",
                ..
            })
        ));
    }

    // Tests a pattern built against a larger catalog is rejected
    // Verified by removing the tile id bounds check
    #[test]
    fn test_pattern_outside_catalog() {
        let wide = TileCatalog::new([("a", 1), ("b", 1), ("c", 1)]).unwrap();
        let pattern = ExamplePattern::from_rows(&[vec!["a", "c"]], &wide).unwrap();
        let narrow = TileCatalog::new([("a", 1), ("b", 1)]).unwrap();

        let result = GenerationSession::new(SessionConfig::default(), narrow, &pattern);
        assert!(matches!(
            result,
            Err(AlgorithmError::UnknownTile { symbol }) if symbol == "#2"
        ));
    }

    // Tests identical seeds give identical maps
    // Verified by seeding the selector from the clock
    #[test]
    fn test_seed_determinism() {
        let sample = SampleDefinition::reference().unwrap();
        let config = SessionConfig {
            rows: 12,
            cols: 12,
            seed: 2024,
            policy: ContradictionPolicy::Reseed,
        };

        let mut first = GenerationSession::from_sample(config, &sample).unwrap();
        let mut second = GenerationSession::from_sample(config, &sample).unwrap();
        first.run().unwrap();
        second.run().unwrap();

        assert_eq!(first.grid(), second.grid());
    }

    // Tests a custom queue key still visits every cell
    // Verified by leaving the queue empty after re-keying
    #[test]
    fn test_custom_queue_key() {
        let mut session = checkerboard([3, 3]).with_queue_key(|_| 0);
        assert_eq!(session.remaining(), 9);

        let report = session.run().unwrap();
        assert!(report.is_clean());
    }
}

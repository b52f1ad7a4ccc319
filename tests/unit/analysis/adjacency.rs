//! Tests for learning adjacency rules from an example pattern

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::TileSet;
    use wavetile::analysis::adjacency::AdjacencyConstraints;
    use wavetile::analysis::patterns::ExamplePattern;
    use wavetile::spatial::{Grid, TileCatalog};

    fn learn(tiles: &[(&str, u32)], rows: &[Vec<&str>]) -> AdjacencyConstraints {
        let catalog = TileCatalog::new(tiles.iter().copied()).unwrap();
        let pattern = ExamplePattern::from_rows(rows, &catalog).unwrap();
        AdjacencyConstraints::from_pattern(&pattern, catalog.len())
    }

    // Tests a checkerboard only allows the opposite tile
    // Verified by including diagonal offsets in the scan
    #[test]
    fn test_checkerboard_constraints() {
        let constraints = learn(&[("a", 1), ("b", 1)], &[vec!["a", "b"], vec!["b", "a"]]);

        assert_eq!(constraints.tile_count(), 2);
        assert_eq!(constraints.allowed(0).to_vec(), vec![1]);
        assert_eq!(constraints.allowed(1).to_vec(), vec![0]);
        assert!(constraints.permits(0, 1));
        assert!(!constraints.permits(0, 0));
    }

    // Tests tiles missing from the pattern get an empty entry
    // Verified by seeding every entry with the full set
    #[test]
    fn test_unobserved_tile_has_no_neighbors() {
        let constraints = learn(&[("a", 1), ("b", 1), ("c", 1)], &[vec!["a", "b"]]);

        assert_eq!(constraints.allowed(0).to_vec(), vec![1]);
        assert_eq!(constraints.allowed(1).to_vec(), vec![0]);
        assert!(constraints.allowed(2).is_empty());
        assert!(constraints.allowed(9).is_empty());
    }

    // Tests edges of the pattern do not wrap around
    // Verified by taking neighbor offsets modulo the pattern size
    #[test]
    fn test_no_wraparound() {
        let constraints = learn(&[("a", 1), ("b", 1), ("c", 1)], &[vec!["a", "b", "c"]]);

        assert!(!constraints.permits(0, 2));
        assert!(!constraints.permits(2, 0));
        assert_eq!(constraints.allowed(1).to_vec(), vec![0, 2]);
    }

    // Tests repeated tiles may sit next to themselves
    // Verified by skipping neighbors equal to the scanned tile
    #[test]
    fn test_self_adjacency() {
        let constraints = learn(&[("a", 1), ("b", 1)], &[vec!["a", "a"], vec!["b", "b"]]);

        assert_eq!(constraints.allowed(0).to_vec(), vec![0, 1]);
        assert_eq!(constraints.allowed(1).to_vec(), vec![0, 1]);
    }

    // Tests the union over a domain covers every member's entry
    // Verified by returning only the first member's entry
    #[test]
    fn test_allowed_by_domain() {
        let constraints = learn(&[("a", 1), ("b", 1), ("c", 1)], &[vec!["a", "b", "c"]]);

        let both_ends = TileSet::from_tiles(&[0, 2], 3);
        assert_eq!(constraints.allowed_by(&both_ends).to_vec(), vec![1]);
        assert!(constraints.allowed_by(&TileSet::new(3)).is_empty());
    }

    // Tests violations list ordered pairs of resolved neighbors
    // Verified by checking unresolved cells as well
    #[test]
    fn test_violations() {
        let constraints = learn(&[("a", 1), ("b", 1)], &[vec!["a", "b"], vec!["b", "a"]]);
        let mut grid = Grid::new(2, 2, 2).unwrap();
        grid.get_mut([0, 0]).unwrap().resolve(0, &constraints);
        grid.get_mut([0, 1]).unwrap().resolve(0, &constraints);
        grid.get_mut([1, 0]).unwrap().resolve(1, &constraints);

        assert_eq!(constraints.violations(&grid), vec![([0, 0], [0, 1]), ([0, 1], [0, 0])]);
    }
}

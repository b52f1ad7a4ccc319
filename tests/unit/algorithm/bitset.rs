//! Tests for `TileSet` operations used by domains and neighbor sets

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::TileSet;

    // Verifies a new set is empty with count 0
    // Verified by initializing the bitset with all bits set
    #[test]
    fn test_new_set_is_empty() {
        let set = TileSet::new(5);
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 5);
    }

    // Verifies the full set holds every id below the capacity
    // Verified by building `all` with one bit too few
    #[test]
    fn test_all_contains_every_tile() {
        let set = TileSet::all(4);
        assert_eq!(set.to_vec(), vec![0, 1, 2, 3]);
        assert!(!set.contains(4));
    }

    // Tests insertion ignores ids beyond the capacity
    // Verified by removing the bounds check from insert
    #[test]
    fn test_insert_out_of_range_is_ignored() {
        let mut set = TileSet::new(3);
        set.insert(1);
        set.insert(7);
        assert!(set.contains(1));
        assert!(!set.contains(7));
        assert_eq!(set.count(), 1);
    }

    // Tests intersection keeps only shared ids
    // Verified by changing intersection to union
    #[test]
    fn test_intersection() {
        let a = TileSet::from_tiles(&[0, 2, 4], 6);
        let b = TileSet::from_tiles(&[2, 3, 4], 6);

        assert_eq!(a.intersection(&b).to_vec(), vec![2, 4]);

        let mut c = a.clone();
        c.intersect_with(&TileSet::from_tiles(&[1, 3], 6));
        assert!(c.is_empty());
    }

    // Tests in-place union merges both sets
    // Verified by changing union_with to intersect
    #[test]
    fn test_union_with() {
        let mut a = TileSet::from_tiles(&[0], 4);
        a.union_with(&TileSet::from_tiles(&[2, 3], 4));
        assert_eq!(a.to_vec(), vec![0, 2, 3]);
    }

    // Tests singleton construction and equality
    // Verified by inserting the tile twice at different offsets
    #[test]
    fn test_singleton_equality() {
        let single = TileSet::singleton(5, 3);
        assert_eq!(single, TileSet::from_tiles(&[3], 5));
        assert_ne!(single, TileSet::from_tiles(&[2], 5));
    }

    // Tests display lists count and members
    // Verified by omitting the member list from the format string
    #[test]
    fn test_display() {
        let set = TileSet::from_tiles(&[1, 2], 3);
        assert_eq!(set.to_string(), "TileSet(2 tiles: [1, 2])");
    }
}

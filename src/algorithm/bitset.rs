use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of tile ids, used for cell domains and neighbor sets
///
/// Tile ids are 0-based catalog indices. Every set built for one catalog
/// has the same capacity, so set operations never need to resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    bits: BitVec,
    max_tiles: usize,
}

impl TileSet {
    /// Create a set with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a set containing every tile of the catalog
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a set holding exactly one tile
    pub fn singleton(max_tiles: usize, tile: usize) -> Self {
        let mut set = Self::new(max_tiles);
        set.insert(tile);
        set
    }

    /// Insert a tile id; ids beyond the capacity are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Union this set with another in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity of the set (size of the catalog it was built for)
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Iterate tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Build a set from tile ids
    pub fn from_tiles(tiles: &[usize], max_tiles: usize) -> Self {
        let mut set = Self::new(max_tiles);
        for &tile in tiles {
            set.insert(tile);
        }
        set
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} tiles: {:?})", self.count(), self.to_vec())
    }
}

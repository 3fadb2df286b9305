use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile variant ids
///
/// Used both as a cell's domain and as the per-side entries of the adjacency
/// index. Variant ids are dense 0-based indices into the tile catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no variants present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
        }
    }

    /// Create a bitset containing every variant
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
        }
    }

    /// Create a bitset holding exactly one variant
    pub fn singleton(max_tiles: usize, tile: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Number of variants the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a variant id; ids beyond the capacity are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Remove a variant id
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Test variant membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    ///
    /// Returns the number of variants removed.
    pub fn intersect_with(&mut self, other: &Self) -> usize {
        let before = self.count();
        self.bits &= &other.bits;
        before - self.count()
    }

    /// Add every variant of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test whether every variant here is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.bits.iter_ones().all(|tile| other.contains(tile))
    }

    /// Test if no variants are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count variants in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The lowest variant id present, if any
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate present variant ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all variant ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl FromIterator<usize> for TileBitset {
    /// Collect ids into a bitset just large enough to hold the largest one
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let tiles: Vec<usize> = iter.into_iter().collect();
        let capacity = tiles.iter().max().map_or(0, |&max| max + 1);
        let mut bitset = Self::new(capacity);
        for tile in tiles {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}

//! Capacity ranges of sub tiles.

use serde::{Deserialize, Serialize};

/// A closed interval `[low, high]` of capacity locations occupied by the
/// instances of one sub tile.
///
/// Capacity locations are numbered across the whole physical tile, so the
/// second sub tile of a tile may start at a non-zero `low`. The instance
/// number of a location within its own sub tile is `location - low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapacityRange {
    /// First capacity location (inclusive).
    pub low: usize,
    /// Last capacity location (inclusive).
    pub high: usize,
}

impl CapacityRange {
    /// Creates a new capacity range. `low` must not exceed `high`.
    pub fn new(low: usize, high: usize) -> Self {
        debug_assert!(low <= high, "capacity range [{low}, {high}] is inverted");
        Self { low, high }
    }

    /// Returns the number of instances in the range, or zero if the range
    /// is inverted.
    pub fn total(&self) -> usize {
        self.high.checked_sub(self.low).map_or(0, |span| span + 1)
    }

    /// Returns whether `low` exceeds `high`.
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Returns whether `location` lies within the range.
    pub fn contains(&self, location: usize) -> bool {
        location >= self.low && location <= self.high
    }

    /// Returns the 0-based instance number of `location`, if it is in range.
    pub fn relative(&self, location: usize) -> Option<usize> {
        self.contains(location).then(|| location - self.low)
    }

    /// Returns whether two ranges share at least one location.
    pub fn overlaps(&self, other: &CapacityRange) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl std::fmt::Display for CapacityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

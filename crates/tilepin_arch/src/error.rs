//! Error types for architecture table validation.

use crate::capacity::CapacityRange;

/// A consistency violation found by [`DeviceTypes::validate`](crate::DeviceTypes::validate).
///
/// Every variant points at an architecture-description bug; the tables
/// cannot be indexed reliably until it is fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A table entry's ID does not match its position in the table.
    #[error("{table} entry at position {position} carries ID {id}")]
    IdMismatch {
        /// Which table ("physical tile" or "logical block").
        table: &'static str,
        /// Position in the table.
        position: usize,
        /// The ID stored in the entry.
        id: u32,
    },

    /// A sub tile's index does not match its position in the tile.
    #[error("sub tile '{sub_tile}' of tile '{tile}' is at position {position} but has index {index}")]
    SubTileIndexMismatch {
        /// Tile type name.
        tile: String,
        /// Sub tile name.
        sub_tile: String,
        /// Position in the tile.
        position: usize,
        /// Index stored in the sub tile.
        index: usize,
    },

    /// A sub tile's pins cannot be split evenly across its instances.
    #[error("sub tile '{sub_tile}' of tile '{tile}' has {num_phy_pins} pins for {capacity} instances")]
    UnevenInstancePins {
        /// Tile type name.
        tile: String,
        /// Sub tile name.
        sub_tile: String,
        /// Pins contributed by the sub tile.
        num_phy_pins: usize,
        /// Number of instances.
        capacity: usize,
    },

    /// The tile's root pin count is not the sum of its sub tiles' pins.
    #[error("tile '{tile}' declares {declared} root pins but its sub tiles provide {computed}")]
    PinCountMismatch {
        /// Tile type name.
        tile: String,
        /// The declared pin count.
        declared: usize,
        /// The sum over sub tiles.
        computed: usize,
    },

    /// A per-pin table does not have one entry per pin.
    #[error("{what} of tile '{tile}' has {actual} entries, expected {expected}")]
    TableLength {
        /// Tile type name.
        tile: String,
        /// The offending table.
        what: &'static str,
        /// Number of entries expected.
        expected: usize,
        /// Number of entries found.
        actual: usize,
    },

    /// A pin refers to a class that does not exist.
    #[error("root pin {pin} of tile '{tile}' refers to missing class {class}")]
    DanglingClass {
        /// Tile type name.
        tile: String,
        /// Root pin number.
        pin: usize,
        /// Class number.
        class: usize,
    },

    /// An ID refers to a table entry that does not exist.
    #[error("{owner} refers to unknown {what} {id}")]
    UnknownReference {
        /// Description of the referencing entry.
        owner: String,
        /// Kind of the referenced entry.
        what: &'static str,
        /// The dangling ID.
        id: u32,
    },

    /// Equivalent-site and equivalent-tile lists disagree.
    #[error("tile '{tile}' and logical block '{block}' do not list each other as equivalent")]
    AsymmetricEquivalence {
        /// Tile type name.
        tile: String,
        /// Logical block name.
        block: String,
    },

    /// A sub tile's capacity range ends before it starts.
    #[error("sub tile '{sub_tile}' of tile '{tile}' has inverted capacity range {range}")]
    InvertedCapacity {
        /// Tile type name.
        tile: String,
        /// Sub tile name.
        sub_tile: String,
        /// The offending range.
        range: CapacityRange,
    },

    /// Two sub tiles of a tile claim the same capacity location.
    #[error("capacity ranges {first} and {second} of tile '{tile}' overlap")]
    OverlappingCapacity {
        /// Tile type name.
        tile: String,
        /// Range of the earlier sub tile.
        first: CapacityRange,
        /// Range of the later sub tile.
        second: CapacityRange,
    },
}

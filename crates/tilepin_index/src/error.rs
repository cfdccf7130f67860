//! Error types for pin and class lookups and for indexer configuration.

use tilepin_arch::{LogicalBlockId, PbPinId, PhysicalTileId, PinType};

/// The result type of every fail-fast lookup.
pub type LookupResult<T> = Result<T, LookupError>;

/// Broad classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested combination of identifiers has no match in the tables.
    NotFound,
    /// A pin, class or capacity number exceeds the declared range.
    OutOfRange,
    /// A pin class cannot be flattened into contiguous port ranges.
    MalformedGrouping,
}

/// A failed pin or class lookup.
///
/// Lookups fail only when the caller passes identifiers that do not belong
/// together or when the architecture tables are inconsistent. Neither can be
/// recovered from at this layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The tile ID is not in the tables.
    #[error("unknown physical tile type {tile}")]
    UnknownTile {
        /// The dangling ID.
        tile: PhysicalTileId,
    },

    /// The block ID is not in the tables.
    #[error("unknown logical block type {block}")]
    UnknownBlock {
        /// The dangling ID.
        block: LogicalBlockId,
    },

    /// The tile has no sub tile at the given index.
    #[error("physical tile type '{tile}' has no sub tile {sub_tile}")]
    UnknownSubTile {
        /// Tile type name.
        tile: String,
        /// The requested sub tile index.
        sub_tile: usize,
    },

    /// No sub tile of the tile lists the block as an equivalent site.
    #[error("found no instances of logical block type '{block}' within physical tile type '{tile}'")]
    BlockNotInTile {
        /// Tile type name.
        tile: String,
        /// Logical block name.
        block: String,
    },

    /// No sub tile hosts the block at the given capacity location.
    #[error("no sub tile of physical tile type '{tile}' hosts logical block type '{block}' at capacity location {location}")]
    BlockNotAtLocation {
        /// Tile type name.
        tile: String,
        /// Logical block name.
        block: String,
        /// The requested capacity location.
        location: usize,
    },

    /// The (sub tile, instance, block) triple does not occur in the tile.
    #[error("logical block type '{block}' is not an equivalent site of instance {relative_cap} of sub tile {sub_tile} in physical tile type '{tile}'")]
    NoSiteInstance {
        /// Tile type name.
        tile: String,
        /// Sub tile index.
        sub_tile: usize,
        /// Instance number within the sub tile.
        relative_cap: usize,
        /// Logical block name.
        block: String,
    },

    /// A logical pin has no physical pin in the sub tile.
    #[error("couldn't find the physical pin of logical pin {pin} of logical block type '{block}' in sub tile {sub_tile} of physical tile type '{tile}'")]
    UnmappedLogicalPin {
        /// Tile type name.
        tile: String,
        /// Logical block name.
        block: String,
        /// Sub tile index.
        sub_tile: usize,
        /// Logical pin number.
        pin: usize,
    },

    /// A physical pin has no logical pin or port behind it.
    #[error("physical pin {pin} of physical tile type '{tile}' is not mapped to any logical pin or port")]
    UnmappedPhysicalPin {
        /// Tile type name.
        tile: String,
        /// Physical pin number.
        pin: usize,
    },

    /// A pin-graph pin does not belong to the block.
    #[error("pin-graph pin {pin} is not part of logical block type '{block}'")]
    UnknownPbPin {
        /// Logical block name.
        block: String,
        /// The pin handle.
        pin: PbPinId,
    },

    /// A primitive pin-graph pin has no primitive class.
    #[error("pin-graph pin {pin} of logical block type '{block}' belongs to no primitive class")]
    UnclassifiedPbPin {
        /// Logical block name.
        block: String,
        /// The pin handle.
        pin: PbPinId,
    },

    /// The block has no primitive at the given index.
    #[error("logical block type '{block}' has no primitive {primitive}")]
    UnknownPrimitive {
        /// Logical block name.
        block: String,
        /// The requested primitive index.
        primitive: usize,
    },

    /// The block lists no equivalent physical tile.
    #[error("logical block type '{block}' has no equivalent physical tile")]
    NoEquivalentTile {
        /// Logical block name.
        block: String,
    },

    /// The tile or sub tile lists no equivalent logical block.
    #[error("'{tile}' has no equivalent logical block")]
    NoEquivalentSite {
        /// Tile or sub tile name.
        tile: String,
    },

    /// The class resolved from a port pin has another direction.
    #[error("class {class} of physical tile type '{tile}' is a {actual:?} class, expected {expected:?}")]
    PinTypeMismatch {
        /// Tile type name.
        tile: String,
        /// Class number.
        class: usize,
        /// The requested pin type.
        expected: PinType,
        /// The pin type of the class.
        actual: PinType,
    },

    /// A pin number exceeds the pins of its numbering space.
    #[error("pin {pin} is out of range for '{tile}' ({limit} pins)")]
    PinOutOfRange {
        /// Tile or sub tile name.
        tile: String,
        /// The requested pin number.
        pin: usize,
        /// Number of pins in the space.
        limit: usize,
    },

    /// A class number exceeds the classes of its numbering space.
    #[error("class {class} is out of range for '{tile}' ({limit} classes)")]
    ClassOutOfRange {
        /// Tile or block name.
        tile: String,
        /// The requested class number.
        class: usize,
        /// Number of classes in the space.
        limit: usize,
    },

    /// No sub tile covers the capacity location.
    #[error("capacity location {location} is not covered by any sub tile of physical tile type '{tile}'")]
    CapacityOutOfRange {
        /// Tile type name.
        tile: String,
        /// The requested capacity location.
        location: usize,
    },

    /// A class interleaves pins that cannot form contiguous ranges.
    #[error("class {class} of physical tile type '{tile}' is not contiguous: {detail}")]
    MalformedClass {
        /// Tile type name.
        tile: String,
        /// Class number.
        class: usize,
        /// Which pins break the run.
        detail: String,
    },
}

impl LookupError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::PinOutOfRange { .. }
            | LookupError::ClassOutOfRange { .. }
            | LookupError::CapacityOutOfRange { .. } => ErrorKind::OutOfRange,
            LookupError::MalformedClass { .. } => ErrorKind::MalformedGrouping,
            _ => ErrorKind::NotFound,
        }
    }
}

/// Errors that can occur when loading indexer options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read index options: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse index options: {0}")]
    Parse(String),
}

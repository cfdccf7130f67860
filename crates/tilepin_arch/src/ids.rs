//! Opaque ID newtypes for architecture type tables.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Ord`, `Hash`, and
//! `Serialize`/`Deserialize`. An ID is the position of its entity in the
//! owning table of [`DeviceTypes`](crate::DeviceTypes), or, for
//! [`PbPinId`], the position of a pin-graph pin within its logical block.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the ID as a table offset.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a physical tile type.
    PhysicalTileId
);

define_id!(
    /// Opaque, copyable ID for a logical block type.
    LogicalBlockId
);

define_id!(
    /// Opaque, copyable handle for a pin-graph pin inside a logical block.
    PbPinId
);

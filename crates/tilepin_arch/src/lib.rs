//! Architecture type tables for FPGA tile pin indexing.
//!
//! This crate holds the read-only description of an FPGA architecture that
//! the `tilepin_index` translators resolve pin and class numbers against:
//! [`PhysicalTileType`]s with their [`SubTile`] slots and ports,
//! [`LogicalBlockType`]s with their pin graph and primitive classes, and the
//! [`DeviceTypes`] container that owns both tables.
//!
//! The tables are built once by the architecture loader. Nothing in this
//! workspace mutates them afterwards.
//!
//! # Usage
//!
//! ```
//! use tilepin_arch::{CapacityRange, DeviceTypes};
//!
//! let cap = CapacityRange::new(0, 3);
//! assert_eq!(cap.total(), 4);
//!
//! let device = DeviceTypes::default();
//! assert!(device.validate().is_ok());
//! ```

#![warn(missing_docs)]

pub mod capacity;
pub mod device;
pub mod error;
pub mod ids;
pub mod types;

pub use capacity::CapacityRange;
pub use device::DeviceTypes;
pub use error::ValidationError;
pub use ids::{LogicalBlockId, PbPinId, PhysicalTileId};
pub use types::{
    BlockPort, LogicalBlockType, PbPin, PhysicalTileType, PinClass, PinDirectMap, PinOwner,
    PinType, PortKind, Primitive, SubTile, TilePort,
};

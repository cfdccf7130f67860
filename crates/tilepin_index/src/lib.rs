//! Pin and class index translation for FPGA tiles.
//!
//! A physical tile exposes root pins to the routing grid. Each of its sub
//! tiles holds one or more instances, and each instance can host any of
//! several logical blocks. This crate translates between the numbering
//! systems involved:
//!
//! - tile root pins and sub-tile relative pins ([`pin`])
//! - logical block pins, root and internal, and the flat pin range that
//!   numbers internal pins of every site after the root pins
//! - root pin classes and tile-wide primitive classes ([`class`])
//!
//! It also formats pins and classes for reports ([`naming`]) and answers
//! port-name, type-picking and compatibility queries ([`query`]).
//!
//! All translations go through a [`PinIndexer`], which borrows the
//! immutable [`tilepin_arch::DeviceTypes`] tables.
//!
//! # Usage
//!
//! ```
//! use tilepin_arch::{DeviceTypes, PhysicalTileId};
//! use tilepin_index::{ErrorKind, PinIndexer};
//!
//! let types = DeviceTypes::default();
//! let indexer = PinIndexer::new(&types);
//! let err = indexer.pin_name(PhysicalTileId::from_raw(0), 0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod config;
pub mod error;
pub mod indexer;
pub mod layout;
pub mod naming;
pub mod pin;
pub mod query;

#[cfg(test)]
pub(crate) mod fixtures;

pub use class::{ClassLocation, ClassMap, ClassRef};
pub use config::{load_options, load_options_from_str, IndexOptions};
pub use error::{ConfigError, ErrorKind, LookupError, LookupResult};
pub use indexer::PinIndexer;
pub use layout::{SiteSpan, TileLayout};
pub use naming::PinInstancePort;
pub use pin::PinLocation;

//! Read-only architecture type tables.
//!
//! This module defines the shapes the pin translators resolve indices
//! against: physical tile types with their sub tiles and ports, logical
//! block types with their pin graph and primitive classes, and the pin
//! equivalence classes of both. The tables are produced once by the
//! architecture loader and are never mutated afterwards.
//!
//! Pin numbering at the tile root is contiguous: sub tiles in declaration
//! order, then capacity instances, then ports, then pins within a port.

use crate::capacity::CapacityRange;
use crate::ids::{LogicalBlockId, PbPinId, PhysicalTileId};
use bimap::BiBTreeMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bidirectional map between logical block pins (left) and sub-tile
/// relative physical pins (right) for one logical block in one sub tile.
pub type PinDirectMap = BiBTreeMap<usize, usize>;

/// Direction of the pins in an equivalence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinType {
    /// The class drives a net (output pins).
    Driver,
    /// The class receives from a net (input and clock pins).
    Receiver,
}

/// The kind of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// An input port.
    Input,
    /// An output port.
    Output,
    /// A clock input port.
    Clock,
}

impl PortKind {
    /// Returns the pin type of the classes formed from pins of this kind.
    pub fn pin_type(self) -> PinType {
        match self {
            PortKind::Output => PinType::Driver,
            PortKind::Input | PortKind::Clock => PinType::Receiver,
        }
    }
}

/// A group of functionally interchangeable pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinClass {
    /// Whether the class drives or receives.
    pub pin_type: PinType,
    /// Member pin numbers, in the numbering space of the owner.
    pub pins: Vec<usize>,
}

impl PinClass {
    /// Creates a new pin class.
    pub fn new(pin_type: PinType, pins: Vec<usize>) -> Self {
        Self { pin_type, pins }
    }

    /// Returns the number of pins in the class.
    pub fn num_pins(&self) -> usize {
        self.pins.len()
    }
}

/// A named group of contiguous pins on a sub tile.
///
/// Pin numbers are relative to one capacity instance of the sub tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePort {
    /// Port name (e.g. "I", "O", "clk").
    pub name: String,
    /// Declaration index within the sub tile.
    pub index: usize,
    /// Direction of the port.
    pub kind: PortKind,
    /// First pin of the port within one sub tile instance.
    pub absolute_first_pin_index: usize,
    /// Number of pins in the port.
    pub num_pins: usize,
}

impl TilePort {
    /// Returns whether `pin` (instance relative) belongs to this port.
    pub fn contains(&self, pin: usize) -> bool {
        pin >= self.absolute_first_pin_index && pin < self.absolute_first_pin_index + self.num_pins
    }
}

/// A placement slot within a physical tile.
///
/// A sub tile holds `capacity.total()` identical instances, and each
/// instance can host any one of the logical blocks in `equivalent_sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTile {
    /// Position of this sub tile within its tile.
    pub index: usize,
    /// Sub tile name.
    pub name: String,
    /// Capacity locations covered by the instances of this sub tile.
    pub capacity: CapacityRange,
    /// Logical blocks that can be placed here, in preference order.
    pub equivalent_sites: Vec<LogicalBlockId>,
    /// Ports of one instance, in declaration order.
    pub ports: Vec<TilePort>,
    /// Root pins contributed by all instances together.
    pub num_phy_pins: usize,
    /// Tile root pin for every sub-tile relative pin (all instances).
    pub sub_tile_to_tile_pin_indices: Vec<usize>,
    /// Logical pin to sub-tile pin maps, one per hosted logical block.
    pub pin_directs: BTreeMap<LogicalBlockId, PinDirectMap>,
}

impl SubTile {
    /// Returns the number of root pins of a single instance.
    ///
    /// A sub tile without instances has none.
    pub fn pins_per_instance(&self) -> usize {
        self.num_phy_pins
            .checked_div(self.capacity.total())
            .unwrap_or(0)
    }

    /// Returns whether `block` is one of the equivalent sites.
    pub fn hosts(&self, block: LogicalBlockId) -> bool {
        self.equivalent_sites.contains(&block)
    }

    /// Returns the direct pin map for `block`, if it has one here.
    pub fn pin_direct_map(&self, block: LogicalBlockId) -> Option<&PinDirectMap> {
        self.pin_directs.get(&block)
    }

    /// Returns the port with the given name.
    pub fn port_by_name(&self, name: &str) -> Option<&TilePort> {
        self.ports.iter().find(|port| port.name == name)
    }

    /// Returns the port containing the instance-relative `pin`.
    pub fn port_by_pin(&self, pin: usize) -> Option<&TilePort> {
        self.ports.iter().find(|port| port.contains(pin))
    }
}

/// A physical tile archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalTileType {
    /// The ID of this tile type.
    pub id: PhysicalTileId,
    /// Tile type name (e.g. "CLB", "IO").
    pub name: String,
    /// Number of root pins exposed to the routing grid.
    pub num_pins: usize,
    /// Sub tiles in declaration order.
    pub sub_tiles: Vec<SubTile>,
    /// Root-level pin equivalence classes.
    pub class_inf: Vec<PinClass>,
    /// Class index of every root pin.
    pub pin_class: Vec<usize>,
    /// Whether the tile is an input pad type.
    pub is_input_type: bool,
    /// Whether the tile is an output pad type.
    pub is_output_type: bool,
}

impl PhysicalTileType {
    /// Returns whether the tile is an input pad type.
    pub fn is_input_type(&self) -> bool {
        self.is_input_type
    }

    /// Returns whether the tile is an output pad type.
    pub fn is_output_type(&self) -> bool {
        self.is_output_type
    }

    /// Returns whether the tile is an input or output pad type.
    pub fn is_io_type(&self) -> bool {
        self.is_input_type || self.is_output_type
    }

    /// Returns the sub tile at `index`.
    pub fn sub_tile(&self, index: usize) -> Option<&SubTile> {
        self.sub_tiles.get(index)
    }
}

/// The owner of a pin-graph pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinOwner {
    /// A pin on the root block boundary.
    Root,
    /// A pin on the primitive at this index of [`LogicalBlockType::primitives`].
    Primitive(usize),
}

/// A port of a logical block or of one of its primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPort {
    /// Port name.
    pub name: String,
    /// Declaration index within the owner.
    pub index: usize,
    /// Direction of the port.
    pub kind: PortKind,
    /// First pin of the port in the owner's pin numbering.
    pub absolute_first_pin_index: usize,
    /// Number of pins in the port.
    pub num_pins: usize,
    /// Pin-graph pins of the port, in pin order.
    pub pins: Vec<PbPinId>,
}

impl BlockPort {
    /// Returns whether `pin` belongs to this port.
    pub fn contains(&self, pin: usize) -> bool {
        pin >= self.absolute_first_pin_index && pin < self.absolute_first_pin_index + self.num_pins
    }
}

/// A pin-graph pin of a logical block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbPin {
    /// Root block or primitive that carries the pin.
    pub owner: PinOwner,
    /// Index of the port within the owner.
    pub port: usize,
    /// Index of the pin within the port.
    pub pin_number: usize,
}

impl PbPin {
    /// Returns whether the pin sits on the root block boundary.
    pub fn is_root_block_pin(&self) -> bool {
        self.owner == PinOwner::Root
    }
}

/// A leaf sub-block of a logical block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    /// Primitive instance name (e.g. "lut[0]").
    pub name: String,
    /// Ports of the primitive.
    pub ports: Vec<BlockPort>,
}

/// A placeable logical block definition.
///
/// Logical pins `0..num_pins` are the root pins of the block; internal
/// primitive pins continue the same numbering after them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalBlockType {
    /// The ID of this logical block type.
    pub id: LogicalBlockId,
    /// Block type name.
    pub name: String,
    /// Number of root pins.
    pub num_pins: usize,
    /// Root ports in declaration order.
    pub ports: Vec<BlockPort>,
    /// Leaf primitives nested inside the block.
    pub primitives: Vec<Primitive>,
    /// Every pin-graph pin, indexed by [`PbPinId`].
    pub pb_pins: Vec<PbPin>,
    /// Logical pin number to pin-graph pin.
    pub pin_ids: BiBTreeMap<usize, PbPinId>,
    /// Primitive class of every classified pin-graph pin.
    pub pb_pin_class: BTreeMap<PbPinId, usize>,
    /// Equivalence classes of the primitive pins.
    pub primitive_class_inf: Vec<PinClass>,
    /// Physical tiles that can host this block, in preference order.
    pub equivalent_tiles: Vec<PhysicalTileId>,
}

impl LogicalBlockType {
    /// Returns the total number of logical pins, root and internal.
    pub fn total_pins(&self) -> usize {
        self.pin_ids.len()
    }

    /// Returns the logical pin number of a pin-graph pin.
    pub fn logical_pin_num(&self, pin: PbPinId) -> Option<usize> {
        self.pin_ids.get_by_right(&pin).copied()
    }

    /// Returns the pin-graph pin with logical number `logical_pin`.
    pub fn pb_pin_at(&self, logical_pin: usize) -> Option<PbPinId> {
        self.pin_ids.get_by_left(&logical_pin).copied()
    }

    /// Returns the pin-graph pin data for a handle.
    pub fn pb_pin(&self, pin: PbPinId) -> Option<&PbPin> {
        self.pb_pins.get(pin.index())
    }

    /// Returns the root port with the given name.
    pub fn port_by_name(&self, name: &str) -> Option<&BlockPort> {
        self.ports.iter().find(|port| port.name == name)
    }

    /// Returns the root port containing root pin `pin`.
    pub fn port_by_pin(&self, pin: usize) -> Option<&BlockPort> {
        self.ports.iter().find(|port| port.contains(pin))
    }

    /// Returns the port, root or primitive, carrying a pin-graph pin.
    pub fn port_of(&self, pin: PbPinId) -> Option<&BlockPort> {
        let pb_pin = self.pb_pin(pin)?;
        match pb_pin.owner {
            PinOwner::Root => self.ports.get(pb_pin.port),
            PinOwner::Primitive(idx) => self.primitives.get(idx)?.ports.get(pb_pin.port),
        }
    }

    /// Returns the port carrying the pin with logical number `logical_pin`.
    pub fn port_by_logical_pin_num(&self, logical_pin: usize) -> Option<&BlockPort> {
        self.port_of(self.pb_pin_at(logical_pin)?)
    }

    /// Returns the primitive class of a pin-graph pin.
    pub fn pb_pin_class(&self, pin: PbPinId) -> Option<usize> {
        self.pb_pin_class.get(&pin).copied()
    }
}

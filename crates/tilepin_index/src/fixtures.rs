//! Architecture tables shared by the unit and integration tests.
//!
//! Tile classes are one per port per instance. Block primitive classes are
//! one per primitive port. Logical pins are numbered root ports first, then
//! primitive ports in declaration order.

#![allow(dead_code)]

use bimap::BiBTreeMap;
use std::collections::BTreeMap;
use tilepin_arch::{
    BlockPort, CapacityRange, DeviceTypes, LogicalBlockId, LogicalBlockType, PbPin, PbPinId,
    PhysicalTileId, PhysicalTileType, PinClass, PinDirectMap, PinOwner, PortKind, Primitive,
    SubTile, TilePort,
};

/// (name, kind, width)
pub type PortSpec = (&'static str, PortKind, usize);

/// One placement slot of a fixture tile.
pub struct SlotSpec {
    pub name: &'static str,
    pub capacity: CapacityRange,
    pub sites: Vec<u32>,
    pub ports: Vec<PortSpec>,
}

pub const CLB_TILE: u32 = 0;
pub const IO_TILE: u32 = 1;

pub const CLB_A: u32 = 0;
pub const CLB_B: u32 = 1;
pub const MEM: u32 = 2;
pub const PAD: u32 = 3;

pub fn tile_id(raw: u32) -> PhysicalTileId {
    PhysicalTileId::from_raw(raw)
}

pub fn block_id(raw: u32) -> LogicalBlockId {
    LogicalBlockId::from_raw(raw)
}

fn block_ports(
    specs: &[PortSpec],
    pb_pins: &mut Vec<PbPin>,
    pin_ids: &mut BiBTreeMap<usize, PbPinId>,
    owner: PinOwner,
) -> Vec<BlockPort> {
    let mut ports = Vec::new();
    let mut first = 0;
    for (index, &(name, kind, width)) in specs.iter().enumerate() {
        let mut pins = Vec::new();
        for pin_number in 0..width {
            let id = PbPinId::from_raw(pb_pins.len() as u32);
            pin_ids.insert(pb_pins.len(), id);
            pb_pins.push(PbPin {
                owner,
                port: index,
                pin_number,
            });
            pins.push(id);
        }
        ports.push(BlockPort {
            name: name.to_string(),
            index,
            kind,
            absolute_first_pin_index: first,
            num_pins: width,
            pins,
        });
        first += width;
    }
    ports
}

/// Builds a logical block whose primitives each get one class per port.
pub fn build_block(
    id: u32,
    name: &str,
    ports: Vec<PortSpec>,
    primitives: Vec<(&'static str, Vec<PortSpec>)>,
    tiles: Vec<u32>,
) -> LogicalBlockType {
    let mut pb_pins = Vec::new();
    let mut pin_ids = BiBTreeMap::new();
    let mut pb_pin_class = BTreeMap::new();
    let mut primitive_class_inf = Vec::new();

    let root_ports = block_ports(&ports, &mut pb_pins, &mut pin_ids, PinOwner::Root);
    let num_pins = pb_pins.len();

    let mut prims = Vec::new();
    for (prim_index, (prim_name, prim_ports)) in primitives.into_iter().enumerate() {
        let prim_ports = block_ports(
            &prim_ports,
            &mut pb_pins,
            &mut pin_ids,
            PinOwner::Primitive(prim_index),
        );
        for port in &prim_ports {
            let class = primitive_class_inf.len();
            let logical = port.pins.iter().map(|pin| pin.index()).collect();
            for &pin in &port.pins {
                pb_pin_class.insert(pin, class);
            }
            primitive_class_inf.push(PinClass::new(port.kind.pin_type(), logical));
        }
        prims.push(Primitive {
            name: prim_name.to_string(),
            ports: prim_ports,
        });
    }

    LogicalBlockType {
        id: block_id(id),
        name: name.to_string(),
        num_pins,
        ports: root_ports,
        primitives: prims,
        pb_pins,
        pin_ids,
        pb_pin_class,
        primitive_class_inf,
        equivalent_tiles: tiles.into_iter().map(tile_id).collect(),
    }
}

/// Builds a tile whose direct maps connect block and tile ports by name.
pub fn build_tile(
    id: u32,
    name: &str,
    slots: Vec<SlotSpec>,
    blocks: &[LogicalBlockType],
) -> PhysicalTileType {
    let mut sub_tiles = Vec::new();
    let mut class_inf = Vec::new();
    let mut pin_class = Vec::new();
    let mut tile_base = 0;

    for (index, slot) in slots.into_iter().enumerate() {
        let mut ports = Vec::new();
        let mut first = 0;
        for (port_index, &(port_name, kind, width)) in slot.ports.iter().enumerate() {
            ports.push(TilePort {
                name: port_name.to_string(),
                index: port_index,
                kind,
                absolute_first_pin_index: first,
                num_pins: width,
            });
            first += width;
        }
        let per_instance = first;
        let num_phy_pins = per_instance * slot.capacity.total();

        let mut pin_directs = BTreeMap::new();
        for &site in &slot.sites {
            let block = &blocks[site as usize];
            let mut map = PinDirectMap::new();
            for block_port in &block.ports {
                if let Some(tile_port) = ports.iter().find(|p| p.name == block_port.name) {
                    for i in 0..block_port.num_pins.min(tile_port.num_pins) {
                        map.insert(
                            block_port.absolute_first_pin_index + i,
                            tile_port.absolute_first_pin_index + i,
                        );
                    }
                }
            }
            pin_directs.insert(block.id, map);
        }

        for instance in 0..slot.capacity.total() {
            for port in &ports {
                let first_pin = tile_base + instance * per_instance + port.absolute_first_pin_index;
                pin_class.extend(std::iter::repeat(class_inf.len()).take(port.num_pins));
                class_inf.push(PinClass::new(
                    port.kind.pin_type(),
                    (first_pin..first_pin + port.num_pins).collect(),
                ));
            }
        }

        sub_tiles.push(SubTile {
            index,
            name: slot.name.to_string(),
            capacity: slot.capacity,
            equivalent_sites: slot.sites.into_iter().map(block_id).collect(),
            ports,
            num_phy_pins,
            sub_tile_to_tile_pin_indices: (tile_base..tile_base + num_phy_pins).collect(),
            pin_directs,
        });
        tile_base += num_phy_pins;
    }

    PhysicalTileType {
        id: tile_id(id),
        name: name.to_string(),
        num_pins: tile_base,
        sub_tiles,
        class_inf,
        pin_class,
        is_input_type: false,
        is_output_type: false,
    }
}

fn pad_block(id: u32, tiles: Vec<u32>) -> LogicalBlockType {
    build_block(
        id,
        "PAD",
        vec![("outpad", PortKind::Input, 1), ("inpad", PortKind::Output, 1)],
        Vec::new(),
        tiles,
    )
}

fn io_tile(id: u32, capacity: CapacityRange, pad: u32, blocks: &[LogicalBlockType]) -> PhysicalTileType {
    let mut tile = build_tile(
        id,
        "IO",
        vec![SlotSpec {
            name: "io",
            capacity,
            sites: vec![pad],
            ports: vec![("outpad", PortKind::Input, 1), ("inpad", PortKind::Output, 1)],
        }],
        blocks,
    );
    tile.is_input_type = true;
    tile.is_output_type = true;
    tile
}

/// Tile "T" with one instance hosting block "B" through port `A[4]`.
pub fn single_instance() -> DeviceTypes {
    let blocks = vec![build_block(
        0,
        "B",
        vec![("A", PortKind::Input, 4)],
        Vec::new(),
        vec![0],
    )];
    let tile = build_tile(
        0,
        "T",
        vec![SlotSpec {
            name: "T",
            capacity: CapacityRange::new(0, 0),
            sites: vec![0],
            ports: vec![("A", PortKind::Input, 4)],
        }],
        &blocks,
    );
    DeviceTypes::new(vec![tile], blocks)
}

/// Tile "IO" with four pad instances, two pins each.
pub fn multi_instance() -> DeviceTypes {
    let blocks = vec![pad_block(0, vec![0])];
    let tile = io_tile(0, CapacityRange::new(0, 3), 0, &blocks);
    DeviceTypes::new(vec![tile], blocks)
}

/// Tile "CLB_TILE" with a two-instance CLB slot (sites CLB_A and CLB_B) and
/// a single-instance MEM slot at capacity 2, plus a two-pad "IO" tile.
///
/// Root pins: CLB instance 0 is 0..7, instance 1 is 7..14, MEM is 14..19.
pub fn heterogeneous() -> DeviceTypes {
    let blocks = vec![
        build_block(
            CLB_A,
            "CLB_A",
            vec![
                ("I", PortKind::Input, 4),
                ("O", PortKind::Output, 2),
                ("clk", PortKind::Clock, 1),
            ],
            vec![
                (
                    "lut",
                    vec![("in", PortKind::Input, 4), ("out", PortKind::Output, 1)],
                ),
                (
                    "ff",
                    vec![
                        ("D", PortKind::Input, 1),
                        ("Q", PortKind::Output, 1),
                        ("clk", PortKind::Clock, 1),
                    ],
                ),
            ],
            vec![CLB_TILE],
        ),
        build_block(
            CLB_B,
            "CLB_B",
            vec![("I", PortKind::Input, 2), ("O", PortKind::Output, 1)],
            vec![(
                "lut2",
                vec![("in", PortKind::Input, 2), ("out", PortKind::Output, 1)],
            )],
            vec![CLB_TILE],
        ),
        build_block(
            MEM,
            "MEM",
            vec![("addr", PortKind::Input, 3), ("data", PortKind::Output, 2)],
            vec![(
                "ram",
                vec![("addr", PortKind::Input, 3), ("dout", PortKind::Output, 2)],
            )],
            vec![CLB_TILE],
        ),
        pad_block(PAD, vec![IO_TILE]),
    ];

    let clb_tile = build_tile(
        CLB_TILE,
        "CLB_TILE",
        vec![
            SlotSpec {
                name: "CLB",
                capacity: CapacityRange::new(0, 1),
                sites: vec![CLB_A, CLB_B],
                ports: vec![
                    ("I", PortKind::Input, 4),
                    ("O", PortKind::Output, 2),
                    ("clk", PortKind::Clock, 1),
                ],
            },
            SlotSpec {
                name: "MEM",
                capacity: CapacityRange::new(2, 2),
                sites: vec![MEM],
                ports: vec![("addr", PortKind::Input, 3), ("data", PortKind::Output, 2)],
            },
        ],
        &blocks,
    );
    let io = io_tile(IO_TILE, CapacityRange::new(0, 1), PAD, &blocks);

    DeviceTypes::new(vec![clb_tile, io], blocks)
}

//! The immutable container of all architecture type tables.

use crate::error::ValidationError;
use crate::ids::{LogicalBlockId, PhysicalTileId};
use crate::types::{LogicalBlockType, PhysicalTileType};
use serde::{Deserialize, Serialize};

/// All physical tile types and logical block types of an architecture.
///
/// Entries are indexed by their IDs: `tiles[id.index()]` is the tile with
/// that ID, and likewise for blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceTypes {
    /// Physical tile types, indexed by [`PhysicalTileId`].
    pub tiles: Vec<PhysicalTileType>,
    /// Logical block types, indexed by [`LogicalBlockId`].
    pub blocks: Vec<LogicalBlockType>,
}

impl DeviceTypes {
    /// Creates a table container from fully built tables.
    pub fn new(tiles: Vec<PhysicalTileType>, blocks: Vec<LogicalBlockType>) -> Self {
        Self { tiles, blocks }
    }

    /// Returns the tile type with the given ID.
    pub fn tile(&self, id: PhysicalTileId) -> Option<&PhysicalTileType> {
        self.tiles.get(id.index())
    }

    /// Returns the logical block type with the given ID.
    pub fn block(&self, id: LogicalBlockId) -> Option<&LogicalBlockType> {
        self.blocks.get(id.index())
    }

    /// Returns the tile type with the given name.
    pub fn tile_by_name(&self, name: &str) -> Option<&PhysicalTileType> {
        self.tiles.iter().find(|tile| tile.name == name)
    }

    /// Returns the logical block type with the given name.
    pub fn block_by_name(&self, name: &str) -> Option<&LogicalBlockType> {
        self.blocks.iter().find(|block| block.name == name)
    }

    /// Returns the number of tile types.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the number of logical block types.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Checks the consistency preconditions the pin translators rely on.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = self.check_all();
        match &result {
            Ok(()) => tracing::debug!(
                tiles = self.tiles.len(),
                blocks = self.blocks.len(),
                "architecture tables validated"
            ),
            Err(err) => tracing::warn!(%err, "architecture tables rejected"),
        }
        result
    }

    fn check_all(&self) -> Result<(), ValidationError> {
        for (position, tile) in self.tiles.iter().enumerate() {
            if tile.id.index() != position {
                return Err(ValidationError::IdMismatch {
                    table: "physical tile",
                    position,
                    id: tile.id.as_raw(),
                });
            }
            self.check_tile(tile)?;
        }
        for (position, block) in self.blocks.iter().enumerate() {
            if block.id.index() != position {
                return Err(ValidationError::IdMismatch {
                    table: "logical block",
                    position,
                    id: block.id.as_raw(),
                });
            }
            self.check_block(block)?;
        }
        Ok(())
    }

    fn check_tile(&self, tile: &PhysicalTileType) -> Result<(), ValidationError> {
        let mut computed = 0;
        for (position, sub_tile) in tile.sub_tiles.iter().enumerate() {
            if sub_tile.index != position {
                return Err(ValidationError::SubTileIndexMismatch {
                    tile: tile.name.clone(),
                    sub_tile: sub_tile.name.clone(),
                    position,
                    index: sub_tile.index,
                });
            }
            if sub_tile.capacity.is_inverted() {
                return Err(ValidationError::InvertedCapacity {
                    tile: tile.name.clone(),
                    sub_tile: sub_tile.name.clone(),
                    range: sub_tile.capacity,
                });
            }
            let capacity = sub_tile.capacity.total();
            if sub_tile.num_phy_pins % capacity != 0 {
                return Err(ValidationError::UnevenInstancePins {
                    tile: tile.name.clone(),
                    sub_tile: sub_tile.name.clone(),
                    num_phy_pins: sub_tile.num_phy_pins,
                    capacity,
                });
            }
            if sub_tile.sub_tile_to_tile_pin_indices.len() != sub_tile.num_phy_pins {
                return Err(ValidationError::TableLength {
                    tile: tile.name.clone(),
                    what: "sub tile pin index table",
                    expected: sub_tile.num_phy_pins,
                    actual: sub_tile.sub_tile_to_tile_pin_indices.len(),
                });
            }
            for earlier in &tile.sub_tiles[..position] {
                if earlier.capacity.overlaps(&sub_tile.capacity) {
                    return Err(ValidationError::OverlappingCapacity {
                        tile: tile.name.clone(),
                        first: earlier.capacity,
                        second: sub_tile.capacity,
                    });
                }
            }
            for &site in &sub_tile.equivalent_sites {
                let block = self.block(site).ok_or_else(|| ValidationError::UnknownReference {
                    owner: format!("sub tile '{}' of tile '{}'", sub_tile.name, tile.name),
                    what: "logical block",
                    id: site.as_raw(),
                })?;
                if !block.equivalent_tiles.contains(&tile.id) {
                    return Err(ValidationError::AsymmetricEquivalence {
                        tile: tile.name.clone(),
                        block: block.name.clone(),
                    });
                }
            }
            computed += sub_tile.num_phy_pins;
        }

        if computed != tile.num_pins {
            return Err(ValidationError::PinCountMismatch {
                tile: tile.name.clone(),
                declared: tile.num_pins,
                computed,
            });
        }
        if tile.pin_class.len() != tile.num_pins {
            return Err(ValidationError::TableLength {
                tile: tile.name.clone(),
                what: "pin class table",
                expected: tile.num_pins,
                actual: tile.pin_class.len(),
            });
        }
        for (pin, &class) in tile.pin_class.iter().enumerate() {
            if class >= tile.class_inf.len() {
                return Err(ValidationError::DanglingClass {
                    tile: tile.name.clone(),
                    pin,
                    class,
                });
            }
        }
        Ok(())
    }

    fn check_block(&self, block: &LogicalBlockType) -> Result<(), ValidationError> {
        for &tile_id in &block.equivalent_tiles {
            let tile = self.tile(tile_id).ok_or_else(|| ValidationError::UnknownReference {
                owner: format!("logical block '{}'", block.name),
                what: "physical tile",
                id: tile_id.as_raw(),
            })?;
            if !tile.sub_tiles.iter().any(|sub_tile| sub_tile.hosts(block.id)) {
                return Err(ValidationError::AsymmetricEquivalence {
                    tile: tile.name.clone(),
                    block: block.name.clone(),
                });
            }
        }
        Ok(())
    }
}

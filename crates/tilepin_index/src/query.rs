//! Port-name lookups, type picking and compatibility checks.

use crate::error::{LookupError, LookupResult};
use crate::indexer::PinIndexer;
use tilepin_arch::{LogicalBlockId, PhysicalTileId, PinType};

impl PinIndexer<'_> {
    /// Returns the root pin of pin `index` of the first port named
    /// `port_name`, searching sub tiles in order.
    ///
    /// Only the first instance of a sub tile is addressed.
    pub fn pin_by_port_name(
        &self,
        tile: PhysicalTileId,
        port_name: &str,
        index: usize,
    ) -> Option<usize> {
        let tile_type = self.tile(tile).ok()?;
        let mut sub_tile_base = 0;
        for sub_tile in &tile_type.sub_tiles {
            if let Some(port) = sub_tile.port_by_name(port_name) {
                return (index < port.num_pins)
                    .then(|| sub_tile_base + port.absolute_first_pin_index + index);
            }
            sub_tile_base += sub_tile.num_phy_pins;
        }
        None
    }

    /// Returns the root class of a port pin, or `None` if there is no such
    /// pin.
    ///
    /// Fails if the class exists but is not of `pin_type`.
    pub fn class_by_port_pin(
        &self,
        tile: PhysicalTileId,
        port_name: &str,
        index: usize,
        pin_type: PinType,
    ) -> LookupResult<Option<usize>> {
        let tile_type = self.tile(tile)?;
        let Some(pin) = self.pin_by_port_name(tile, port_name, index) else {
            return Ok(None);
        };
        let class = tile_type.pin_class.get(pin).copied().ok_or_else(|| {
            LookupError::PinOutOfRange {
                tile: tile_type.name.clone(),
                pin,
                limit: tile_type.pin_class.len(),
            }
        })?;
        let info = tile_type
            .class_inf
            .get(class)
            .ok_or_else(|| LookupError::ClassOutOfRange {
                tile: tile_type.name.clone(),
                class,
                limit: tile_type.class_inf.len(),
            })?;
        if info.pin_type != pin_type {
            return Err(LookupError::PinTypeMismatch {
                tile: tile_type.name.clone(),
                class,
                expected: pin_type,
                actual: info.pin_type,
            });
        }
        Ok(Some(class))
    }

    /// Returns the preferred physical tile of a block.
    pub fn pick_physical_type(&self, block: LogicalBlockId) -> LookupResult<PhysicalTileId> {
        let block_type = self.block(block)?;
        block_type
            .equivalent_tiles
            .first()
            .copied()
            .ok_or_else(|| LookupError::NoEquivalentTile {
                block: block_type.name.clone(),
            })
    }

    /// Returns the preferred logical block of a tile: the first equivalent
    /// site of its first sub tile.
    pub fn pick_logical_type(&self, tile: PhysicalTileId) -> LookupResult<LogicalBlockId> {
        let tile_type = self.tile(tile)?;
        tile_type
            .sub_tiles
            .first()
            .and_then(|sub_tile| sub_tile.equivalent_sites.first())
            .copied()
            .ok_or_else(|| LookupError::NoEquivalentSite {
                tile: tile_type.name.clone(),
            })
    }

    /// Returns whether `tile` is one of the block's equivalent tiles.
    pub fn is_tile_compatible(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
    ) -> LookupResult<bool> {
        self.tile(tile)?;
        Ok(self.block(block)?.equivalent_tiles.contains(&tile))
    }

    /// Returns whether `block` can be placed at `capacity_location` of
    /// `tile`.
    pub fn is_sub_tile_compatible(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
        capacity_location: usize,
    ) -> LookupResult<bool> {
        if !self.is_tile_compatible(tile, block)? {
            return Ok(false);
        }
        let tile_type = self.tile(tile)?;
        Ok(tile_type.sub_tiles.iter().any(|sub_tile| {
            sub_tile.hosts(block) && sub_tile.capacity.contains(capacity_location)
        }))
    }

    /// Returns whether the tile is an input pad type.
    pub fn is_input_type(&self, tile: PhysicalTileId) -> LookupResult<bool> {
        self.tile(tile).map(|t| t.is_input_type())
    }

    /// Returns whether the tile is an output pad type.
    pub fn is_output_type(&self, tile: PhysicalTileId) -> LookupResult<bool> {
        self.tile(tile).map(|t| t.is_output_type())
    }

    /// Returns whether the tile is an input or output pad type.
    pub fn is_io_type(&self, tile: PhysicalTileId) -> LookupResult<bool> {
        self.tile(tile).map(|t| t.is_io_type())
    }
}

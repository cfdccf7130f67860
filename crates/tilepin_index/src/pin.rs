//! Translation between physical, sub-tile and logical pin numbers.
//!
//! Root pins (`0..num_pins` of a tile) are the pins the routing grid sees.
//! Flat pins continue the numbering past the root pins and address the
//! internal primitive pins of every placement site; see
//! [`layout`](crate::layout) for how they are laid out.

use crate::error::{LookupError, LookupResult};
use crate::indexer::PinIndexer;
use crate::layout::{SiteSpan, TileLayout};
use tilepin_arch::{
    LogicalBlockId, PbPinId, PhysicalTileId, PhysicalTileType, PinType, SubTile,
};

/// The placement site a physical pin belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinLocation {
    /// Sub tile index.
    pub sub_tile: usize,
    /// Instance number within the sub tile.
    pub relative_cap: usize,
    /// The logical block the pin is resolved against.
    ///
    /// Root pins resolve to the first equivalent site of their sub tile.
    pub block: LogicalBlockId,
}

/// Returns the sub tile owning root pin `pin` and the pin's offset from the
/// sub tile's first root pin.
///
/// A sub tile with fewer pins than instances owns no pins.
pub(crate) fn root_sub_tile(tile: &PhysicalTileType, pin: usize) -> Option<(&SubTile, usize)> {
    let mut base = 0;
    for sub_tile in &tile.sub_tiles {
        if pin < base + sub_tile.num_phy_pins {
            return (sub_tile.pins_per_instance() > 0).then(|| (sub_tile, pin - base));
        }
        base += sub_tile.num_phy_pins;
    }
    None
}

/// Returns the span of a flat pin, rejecting the reserved pins that mirror
/// a block's root pins.
fn internal_span(
    tile: &PhysicalTileType,
    layout: &TileLayout,
    pin: usize,
) -> LookupResult<SiteSpan> {
    let span = layout
        .span_for_pin(pin)
        .copied()
        .ok_or_else(|| LookupError::PinOutOfRange {
            tile: tile.name.clone(),
            pin,
            limit: layout.flat_pin_end(),
        })?;
    if !span.internal_pin_range().contains(&pin) {
        return Err(LookupError::UnmappedPhysicalPin {
            tile: tile.name.clone(),
            pin,
        });
    }
    Ok(span)
}

fn sub_tile_label(tile: &PhysicalTileType, sub_tile: &SubTile) -> String {
    format!("{}.{}", tile.name, sub_tile.name)
}

impl<'a> PinIndexer<'a> {
    /// Returns the first sub tile listing `block` as an equivalent site.
    pub fn sub_tile_index_for(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        self.hosting_sub_tile(tile_type, block, None)
            .map(|sub_tile| sub_tile.index)
    }

    /// Returns the sub tile hosting `block` whose capacity range covers
    /// `capacity_location`.
    pub fn sub_tile_index_at(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
        capacity_location: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        self.hosting_sub_tile(tile_type, block, Some(capacity_location))
            .map(|sub_tile| sub_tile.index)
    }

    fn hosting_sub_tile(
        &self,
        tile: &'a PhysicalTileType,
        block: LogicalBlockId,
        capacity_location: Option<usize>,
    ) -> LookupResult<&'a SubTile> {
        let found = tile.sub_tiles.iter().find(|sub_tile| {
            sub_tile.hosts(block)
                && capacity_location.map_or(true, |loc| sub_tile.capacity.contains(loc))
        });
        found.ok_or_else(|| match capacity_location {
            None => LookupError::BlockNotInTile {
                tile: tile.name.clone(),
                block: self.block_name(block),
            },
            Some(location) => LookupError::BlockNotAtLocation {
                tile: tile.name.clone(),
                block: self.block_name(block),
                location,
            },
        })
    }

    fn direct_pin(
        &self,
        tile: &PhysicalTileType,
        sub_tile: &SubTile,
        block: LogicalBlockId,
        logical_pin: usize,
    ) -> LookupResult<usize> {
        sub_tile
            .pin_direct_map(block)
            .and_then(|map| map.get_by_left(&logical_pin))
            .copied()
            .ok_or_else(|| LookupError::UnmappedLogicalPin {
                tile: tile.name.clone(),
                block: self.block_name(block),
                sub_tile: sub_tile.index,
                pin: logical_pin,
            })
    }

    fn tile_pin_of(
        tile: &PhysicalTileType,
        sub_tile: &SubTile,
        sub_tile_pin: usize,
    ) -> LookupResult<usize> {
        sub_tile
            .sub_tile_to_tile_pin_indices
            .get(sub_tile_pin)
            .copied()
            .ok_or_else(|| LookupError::PinOutOfRange {
                tile: sub_tile_label(tile, sub_tile),
                pin: sub_tile_pin,
                limit: sub_tile.sub_tile_to_tile_pin_indices.len(),
            })
    }

    /// Maps a logical pin of `block` to its sub-tile relative pin in the
    /// given sub tile.
    pub fn sub_tile_physical_pin(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        logical_pin: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let sub_tile = self.sub_tile(tile_type, sub_tile)?;
        self.direct_pin(tile_type, sub_tile, block, logical_pin)
    }

    /// Maps a logical pin to the root pin of the first instance of the first
    /// sub tile hosting `block`.
    pub fn physical_pin(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
        logical_pin: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let sub_tile = self.hosting_sub_tile(tile_type, block, None)?;
        let sub_tile_pin = self.direct_pin(tile_type, sub_tile, block, logical_pin)?;
        Self::tile_pin_of(tile_type, sub_tile, sub_tile_pin)
    }

    /// Maps a logical pin to the root pin of the instance at
    /// `capacity_location`.
    pub fn physical_pin_at_capacity_location(
        &self,
        tile: PhysicalTileId,
        block: LogicalBlockId,
        capacity_location: usize,
        logical_pin: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let sub_tile = self.hosting_sub_tile(tile_type, block, Some(capacity_location))?;
        let relative_cap = capacity_location - sub_tile.capacity.low;
        let sub_tile_pin = self.direct_pin(tile_type, sub_tile, block, logical_pin)?;
        let first_instance_pin = Self::tile_pin_of(tile_type, sub_tile, sub_tile_pin)?;
        Ok(relative_cap * sub_tile.pins_per_instance() + first_instance_pin)
    }

    /// Maps a root logical pin of `block` in an explicit sub tile instance
    /// to its root physical pin.
    pub fn root_pin_physical_num(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
        logical_pin: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let sub_tile = self.sub_tile(tile_type, sub_tile)?;
        if relative_cap >= sub_tile.capacity.total() {
            return Err(LookupError::CapacityOutOfRange {
                tile: tile_type.name.clone(),
                location: sub_tile.capacity.low + relative_cap,
            });
        }
        let sub_tile_pin = self.direct_pin(tile_type, sub_tile, block, logical_pin)?
            + relative_cap * sub_tile.pins_per_instance();
        Self::tile_pin_of(tile_type, sub_tile, sub_tile_pin)
    }

    /// Returns the first flat pin reserved for the internal pins of `block`
    /// in one sub tile instance.
    pub fn internal_pin_base(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let layout = self.layout(tile)?;
        layout
            .span_at(sub_tile, relative_cap, block)
            .map(|span| span.pin_base)
            .ok_or_else(|| self.no_site_instance(tile_type, sub_tile, relative_cap, block))
    }

    /// Maps a pin-graph pin of `block` placed in one sub tile instance to
    /// its physical pin: root pins through the direct map, internal pins
    /// into the flat range.
    pub fn pb_pin_physical_num(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
        pb_pin: PbPinId,
    ) -> LookupResult<usize> {
        let block_type = self.block(block)?;
        let unknown = || LookupError::UnknownPbPin {
            block: block_type.name.clone(),
            pin: pb_pin,
        };
        let pin = block_type.pb_pin(pb_pin).ok_or_else(unknown)?;
        let logical_pin = block_type.logical_pin_num(pb_pin).ok_or_else(unknown)?;

        if pin.is_root_block_pin() {
            self.root_pin_physical_num(tile, sub_tile, block, relative_cap, logical_pin)
        } else {
            Ok(self.internal_pin_base(tile, sub_tile, block, relative_cap)? + logical_pin)
        }
    }

    /// Returns the capacity location of a root pin and its pin number
    /// relative to that instance.
    pub fn pin_to_capacity_location(
        &self,
        tile: PhysicalTileId,
        pin: usize,
    ) -> LookupResult<(usize, usize)> {
        let tile_type = self.tile(tile)?;
        let (sub_tile, offset) =
            root_sub_tile(tile_type, pin).ok_or_else(|| LookupError::PinOutOfRange {
                tile: tile_type.name.clone(),
                pin,
                limit: tile_type.num_pins,
            })?;
        let per_instance = sub_tile.pins_per_instance();
        Ok((
            sub_tile.capacity.low + offset / per_instance,
            offset % per_instance,
        ))
    }

    /// Returns the root pin at `relative_pin` of the instance at
    /// `capacity_location`.
    pub fn capacity_location_to_pin(
        &self,
        tile: PhysicalTileId,
        relative_pin: usize,
        capacity_location: usize,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let mut base = 0;
        for sub_tile in &tile_type.sub_tiles {
            if let Some(relative_cap) = sub_tile.capacity.relative(capacity_location) {
                let per_instance = sub_tile.pins_per_instance();
                if relative_pin >= per_instance {
                    return Err(LookupError::PinOutOfRange {
                        tile: sub_tile_label(tile_type, sub_tile),
                        pin: relative_pin,
                        limit: per_instance,
                    });
                }
                return Ok(base + relative_cap * per_instance + relative_pin);
            }
            base += sub_tile.num_phy_pins;
        }
        Err(LookupError::CapacityOutOfRange {
            tile: tile_type.name.clone(),
            location: capacity_location,
        })
    }

    /// Resolves the placement site of a root or flat pin.
    pub fn pin_location(&self, tile: PhysicalTileId, pin: usize) -> LookupResult<PinLocation> {
        let tile_type = self.tile(tile)?;
        if let Some((sub_tile, offset)) = root_sub_tile(tile_type, pin) {
            let block = sub_tile.equivalent_sites.first().copied().ok_or_else(|| {
                LookupError::NoEquivalentSite {
                    tile: sub_tile_label(tile_type, sub_tile),
                }
            })?;
            return Ok(PinLocation {
                sub_tile: sub_tile.index,
                relative_cap: offset / sub_tile.pins_per_instance(),
                block,
            });
        }

        let layout = self.layout(tile)?;
        let span = internal_span(tile_type, &layout, pin)?;
        Ok(PinLocation {
            sub_tile: span.sub_tile,
            relative_cap: span.relative_cap,
            block: span.block,
        })
    }

    /// Returns the sub tile of a root or flat pin.
    pub fn sub_tile_from_pin(&self, tile: PhysicalTileId, pin: usize) -> LookupResult<usize> {
        self.pin_location(tile, pin).map(|loc| loc.sub_tile)
    }

    /// Returns the sub tile instance of a root or flat pin.
    pub fn capacity_from_pin(&self, tile: PhysicalTileId, pin: usize) -> LookupResult<usize> {
        self.pin_location(tile, pin).map(|loc| loc.relative_cap)
    }

    /// Returns the logical block a root or flat pin resolves against.
    pub fn logical_block_from_pin(
        &self,
        tile: PhysicalTileId,
        pin: usize,
    ) -> LookupResult<LogicalBlockId> {
        self.pin_location(tile, pin).map(|loc| loc.block)
    }

    /// Maps a physical pin to the logical pin of the block it resolves
    /// against.
    ///
    /// Pins past the root pins are only accepted when `flat` is set.
    pub fn pin_to_logical_num(
        &self,
        tile: PhysicalTileId,
        pin: usize,
        flat: bool,
    ) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        if pin < tile_type.num_pins {
            let location = self.pin_location(tile, pin)?;
            let sub_tile = self.sub_tile(tile_type, location.sub_tile)?;
            let unmapped = || LookupError::UnmappedPhysicalPin {
                tile: tile_type.name.clone(),
                pin,
            };
            let position = sub_tile
                .sub_tile_to_tile_pin_indices
                .iter()
                .position(|&p| p == pin)
                .ok_or_else(unmapped)?;
            let sub_tile_pin = position
                .checked_sub(location.relative_cap * sub_tile.pins_per_instance())
                .ok_or_else(unmapped)?;
            return sub_tile
                .pin_direct_map(location.block)
                .and_then(|map| map.get_by_right(&sub_tile_pin))
                .copied()
                .ok_or_else(unmapped);
        }

        if !flat {
            return Err(LookupError::PinOutOfRange {
                tile: tile_type.name.clone(),
                pin,
                limit: tile_type.num_pins,
            });
        }
        let layout = self.layout(tile)?;
        let span = internal_span(tile_type, &layout, pin)?;
        Ok(pin - span.pin_base)
    }

    /// Resolves a root or flat pin to the pin-graph pin behind it.
    pub fn pb_pin_from_physical_pin(
        &self,
        tile: PhysicalTileId,
        pin: usize,
    ) -> LookupResult<(LogicalBlockId, PbPinId)> {
        let tile_type = self.tile(tile)?;
        let location = self.pin_location(tile, pin)?;
        let logical_pin = self.pin_to_logical_num(tile, pin, true)?;
        let block_type = self.block(location.block)?;
        let pb_pin = block_type.pb_pin_at(logical_pin).ok_or_else(|| {
            LookupError::UnmappedLogicalPin {
                tile: tile_type.name.clone(),
                block: block_type.name.clone(),
                sub_tile: location.sub_tile,
                pin: logical_pin,
            }
        })?;
        Ok((location.block, pb_pin))
    }

    /// Returns the flat pins all sites of one sub tile reserve together.
    pub fn total_sub_tile_pins(&self, tile: PhysicalTileId, sub_tile: usize) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let sub_tile = self.sub_tile(tile_type, sub_tile)?;
        let mut per_instance = 0;
        for &site in &sub_tile.equivalent_sites {
            per_instance += self.block(site)?.total_pins();
        }
        Ok(per_instance * sub_tile.capacity.total())
    }

    /// Returns the flat pins all sites of a tile reserve together.
    pub fn total_tile_pins(&self, tile: PhysicalTileId) -> LookupResult<usize> {
        let tile_type = self.tile(tile)?;
        let layout = self.layout(tile)?;
        Ok(layout.flat_pin_end() - tile_type.num_pins)
    }

    /// Returns the number of pin numbers in use by a tile: the root pins,
    /// plus the flat pins when `flat` is set.
    pub fn tile_max_ptc(&self, tile: PhysicalTileId, flat: bool) -> LookupResult<usize> {
        if flat {
            Ok(self.layout(tile)?.flat_pin_end())
        } else {
            Ok(self.tile(tile)?.num_pins)
        }
    }

    /// Returns the largest root pin count among the tiles that can host
    /// `block`.
    pub fn max_num_pins(&self, block: LogicalBlockId) -> LookupResult<usize> {
        let block_type = self.block(block)?;
        let mut max = 0;
        for &tile in &block_type.equivalent_tiles {
            max = max.max(self.tile(tile)?.num_pins);
        }
        Ok(max)
    }

    /// Returns whether a root pin drives a net.
    ///
    /// Flat pins are not root pins and report `false`.
    pub fn is_opin(&self, tile: PhysicalTileId, pin: usize) -> LookupResult<bool> {
        let tile_type = self.tile(tile)?;
        if pin >= tile_type.num_pins {
            return Ok(false);
        }
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
        Ok(info.pin_type == PinType::Driver)
    }
}

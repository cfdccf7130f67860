//! Translation between tile-wide and block-local pin class numbers.
//!
//! Root classes are the tile's own `class_inf`. Primitive classes of every
//! placement site are numbered tile-wide in walk order; a site's logical
//! class `c` is tile class `class_base + c`.

use crate::error::{LookupError, LookupResult};
use crate::indexer::PinIndexer;
use crate::layout::SiteSpan;
use std::collections::BTreeMap;
use tilepin_arch::{LogicalBlockId, PhysicalTileId, PinClass, PinType, PortKind};

/// The placement site a tile-wide primitive class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassLocation {
    /// Sub tile index.
    pub sub_tile: usize,
    /// Instance number within the sub tile.
    pub relative_cap: usize,
    /// The logical block owning the class.
    pub block: LogicalBlockId,
    /// Class number within the block's primitive classes.
    pub logical_class: usize,
}

/// A primitive class together with the block it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRef<'a> {
    /// The logical block owning the class.
    pub block: LogicalBlockId,
    /// Class number within the block's primitive classes.
    pub logical_class: usize,
    /// The class itself.
    pub class: &'a PinClass,
}

/// Tile-wide class number to class.
pub type ClassMap<'a> = BTreeMap<usize, ClassRef<'a>>;

impl<'a> PinIndexer<'a> {
    /// Returns the tile-wide number of a block's primitive class in one sub
    /// tile instance, or `None` if the site or class does not exist.
    ///
    /// Tables whose layout cannot be built also yield `None`; the failure is
    /// logged.
    pub fn primitive_class_physical_num(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
        logical_class: usize,
    ) -> Option<usize> {
        let layout = match self.layout(tile) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!(%err, tile = %tile, "no layout for primitive class lookup");
                return None;
            }
        };
        let span = layout.span_at(sub_tile, relative_cap, block)?;
        (logical_class < span.num_classes).then(|| span.class_base + logical_class)
    }

    /// Resolves the placement site of a tile-wide primitive class.
    pub fn class_location(
        &self,
        tile: PhysicalTileId,
        class: usize,
    ) -> LookupResult<ClassLocation> {
        let tile_type = self.tile(tile)?;
        let layout = self.layout(tile)?;
        layout
            .span_for_class(class)
            .map(|span| ClassLocation {
                sub_tile: span.sub_tile,
                relative_cap: span.relative_cap,
                block: span.block,
                logical_class: class - span.class_base,
            })
            .ok_or_else(|| LookupError::ClassOutOfRange {
                tile: tile_type.name.clone(),
                class,
                limit: layout.num_classes(),
            })
    }

    /// Returns the sub tile of a tile-wide primitive class.
    pub fn sub_tile_from_class(&self, tile: PhysicalTileId, class: usize) -> LookupResult<usize> {
        self.class_location(tile, class).map(|loc| loc.sub_tile)
    }

    /// Returns the sub tile instance of a tile-wide primitive class.
    pub fn capacity_from_class(&self, tile: PhysicalTileId, class: usize) -> LookupResult<usize> {
        self.class_location(tile, class).map(|loc| loc.relative_cap)
    }

    /// Returns the logical block owning a tile-wide primitive class.
    pub fn logical_block_from_class(
        &self,
        tile: PhysicalTileId,
        class: usize,
    ) -> LookupResult<LogicalBlockId> {
        self.class_location(tile, class).map(|loc| loc.block)
    }

    /// Returns the block-local number of a tile-wide primitive class.
    pub fn class_logical_num(&self, tile: PhysicalTileId, class: usize) -> LookupResult<usize> {
        self.class_location(tile, class).map(|loc| loc.logical_class)
    }

    /// Returns a class: a primitive class when `flat` is set, otherwise a
    /// root class of the tile.
    pub fn class_info(
        &self,
        tile: PhysicalTileId,
        class: usize,
        flat: bool,
    ) -> LookupResult<&'a PinClass> {
        let tile_type = self.tile(tile)?;
        if flat {
            let location = self.class_location(tile, class)?;
            let block = self.block(location.block)?;
            block
                .primitive_class_inf
                .get(location.logical_class)
                .ok_or_else(|| LookupError::ClassOutOfRange {
                    tile: block.name.clone(),
                    class: location.logical_class,
                    limit: block.primitive_class_inf.len(),
                })
        } else {
            tile_type
                .class_inf
                .get(class)
                .ok_or_else(|| LookupError::ClassOutOfRange {
                    tile: tile_type.name.clone(),
                    class,
                    limit: tile_type.class_inf.len(),
                })
        }
    }

    /// Returns the pin type of a class.
    pub fn class_type(&self, tile: PhysicalTileId, class: usize, flat: bool) -> LookupResult<PinType> {
        self.class_info(tile, class, flat).map(|info| info.pin_type)
    }

    /// Returns the number of pins in a class.
    pub fn class_num_pins(
        &self,
        tile: PhysicalTileId,
        class: usize,
        flat: bool,
    ) -> LookupResult<usize> {
        self.class_info(tile, class, flat).map(PinClass::num_pins)
    }

    /// Returns the number of primitive classes across all sites of a tile.
    pub fn tile_num_primitive_classes(&self, tile: PhysicalTileId) -> LookupResult<usize> {
        self.layout(tile).map(|layout| layout.num_classes())
    }

    fn collect_classes<'s>(
        &self,
        spans: impl IntoIterator<Item = &'s SiteSpan>,
    ) -> LookupResult<ClassMap<'a>> {
        let mut classes = BTreeMap::new();
        for span in spans {
            let block = self.block(span.block)?;
            for (logical_class, class) in block.primitive_class_inf.iter().enumerate() {
                classes.insert(
                    span.class_base + logical_class,
                    ClassRef {
                        block: span.block,
                        logical_class,
                        class,
                    },
                );
            }
        }
        Ok(classes)
    }

    /// Returns every primitive class of a tile.
    pub fn tile_primitive_classes(&self, tile: PhysicalTileId) -> LookupResult<ClassMap<'a>> {
        let layout = self.layout(tile)?;
        self.collect_classes(layout.spans())
    }

    /// Returns the primitive classes of all equivalent sites of one sub tile
    /// instance.
    pub fn sub_tile_primitive_classes(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        relative_cap: usize,
    ) -> LookupResult<ClassMap<'a>> {
        let tile_type = self.tile(tile)?;
        let sub_tile_type = self.sub_tile(tile_type, sub_tile)?;
        if relative_cap >= sub_tile_type.capacity.total() {
            return Err(LookupError::CapacityOutOfRange {
                tile: tile_type.name.clone(),
                location: sub_tile_type.capacity.low + relative_cap,
            });
        }
        let layout = self.layout(tile)?;
        self.collect_classes(layout.instance_spans(sub_tile, relative_cap))
    }

    /// Returns the primitive classes of one block in one sub tile instance.
    pub fn block_primitive_classes(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
    ) -> LookupResult<ClassMap<'a>> {
        let tile_type = self.tile(tile)?;
        let layout = self.layout(tile)?;
        let span = layout
            .span_at(sub_tile, relative_cap, block)
            .ok_or_else(|| self.no_site_instance(tile_type, sub_tile, relative_cap, block))?;
        self.collect_classes(std::iter::once(span))
    }

    /// Returns the classes of one primitive's pins, visiting its input, then
    /// output, then clock ports.
    pub fn primitive_block_classes(
        &self,
        tile: PhysicalTileId,
        sub_tile: usize,
        block: LogicalBlockId,
        relative_cap: usize,
        primitive: usize,
    ) -> LookupResult<ClassMap<'a>> {
        let tile_type = self.tile(tile)?;
        let block_type = self.block(block)?;
        let layout = self.layout(tile)?;
        let span = layout
            .span_at(sub_tile, relative_cap, block)
            .ok_or_else(|| self.no_site_instance(tile_type, sub_tile, relative_cap, block))?;
        let prim = block_type
            .primitives
            .get(primitive)
            .ok_or_else(|| LookupError::UnknownPrimitive {
                block: block_type.name.clone(),
                primitive,
            })?;

        let mut classes = BTreeMap::new();
        for kind in [PortKind::Input, PortKind::Output, PortKind::Clock] {
            for port in prim.ports.iter().filter(|port| port.kind == kind) {
                for &pin in &port.pins {
                    let logical_class = block_type.pb_pin_class(pin).ok_or_else(|| {
                        LookupError::UnclassifiedPbPin {
                            block: block_type.name.clone(),
                            pin,
                        }
                    })?;
                    let class = block_type.primitive_class_inf.get(logical_class).ok_or_else(
                        || LookupError::ClassOutOfRange {
                            tile: block_type.name.clone(),
                            class: logical_class,
                            limit: block_type.primitive_class_inf.len(),
                        },
                    )?;
                    classes
                        .entry(span.class_base + logical_class)
                        .or_insert(ClassRef {
                            block,
                            logical_class,
                            class,
                        });
                }
            }
        }
        Ok(classes)
    }
}

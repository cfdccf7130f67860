//! The cumulative walk over a tile's placement sites.
//!
//! Flat pin and class numbering lays out every (sub tile, capacity
//! instance, equivalent site) triple of a tile one after the other: sub
//! tiles in declaration order, then instances, then equivalent sites. Flat
//! pins start after the tile's root pins and each site reserves its block's
//! full logical pin count. Primitive classes start at zero and each site
//! reserves its block's primitive class count.
//!
//! [`TileLayout`] records that walk once per tile as a list of
//! [`SiteSpan`]s. Every offset query is a search over those spans.

use crate::error::{LookupError, LookupResult};
use std::ops::Range;
use tilepin_arch::{DeviceTypes, LogicalBlockId, PhysicalTileType};

/// One visited (sub tile, capacity instance, equivalent site) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSpan {
    /// Sub tile index.
    pub sub_tile: usize,
    /// Instance number within the sub tile.
    pub relative_cap: usize,
    /// Position of the block in the sub tile's equivalent sites.
    pub site: usize,
    /// The logical block occupying this site.
    pub block: LogicalBlockId,
    /// First flat pin reserved for the site.
    pub pin_base: usize,
    /// Number of flat pins reserved.
    pub num_pins: usize,
    /// Leading flat pins that mirror the block's root pins. Root pins are
    /// only reachable through the tile's root numbering, never here.
    pub num_root_pins: usize,
    /// First tile-wide primitive class reserved for the site.
    pub class_base: usize,
    /// Number of primitive classes reserved.
    pub num_classes: usize,
}

impl SiteSpan {
    /// Flat pins reserved for this site.
    pub fn pin_range(&self) -> Range<usize> {
        self.pin_base..self.pin_base + self.num_pins
    }

    /// Flat pins that address internal block pins.
    pub fn internal_pin_range(&self) -> Range<usize> {
        self.pin_base + self.num_root_pins..self.pin_base + self.num_pins
    }

    /// Tile-wide primitive classes reserved for this site.
    pub fn class_range(&self) -> Range<usize> {
        self.class_base..self.class_base + self.num_classes
    }

    /// Returns whether this span is the given triple.
    pub fn is_at(&self, sub_tile: usize, relative_cap: usize, block: LogicalBlockId) -> bool {
        self.sub_tile == sub_tile && self.relative_cap == relative_cap && self.block == block
    }
}

/// The recorded walk of one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayout {
    spans: Vec<SiteSpan>,
    root_pin_bases: Vec<usize>,
    flat_pin_end: usize,
    num_classes: usize,
}

impl TileLayout {
    /// Walks `tile` and records the span of every site.
    ///
    /// Fails if an equivalent site names a block that is not in `types`.
    pub fn build(types: &DeviceTypes, tile: &PhysicalTileType) -> LookupResult<Self> {
        let mut spans = Vec::new();
        let mut root_pin_bases = Vec::with_capacity(tile.sub_tiles.len());
        let mut root_base = 0;
        let mut pin_base = tile.num_pins;
        let mut class_base = 0;

        for sub_tile in &tile.sub_tiles {
            root_pin_bases.push(root_base);
            root_base += sub_tile.num_phy_pins;

            for relative_cap in 0..sub_tile.capacity.total() {
                for (site, &block_id) in sub_tile.equivalent_sites.iter().enumerate() {
                    let block = types
                        .block(block_id)
                        .ok_or(LookupError::UnknownBlock { block: block_id })?;
                    let span = SiteSpan {
                        sub_tile: sub_tile.index,
                        relative_cap,
                        site,
                        block: block_id,
                        pin_base,
                        num_pins: block.total_pins(),
                        num_root_pins: block.num_pins,
                        class_base,
                        num_classes: block.primitive_class_inf.len(),
                    };
                    pin_base += span.num_pins;
                    class_base += span.num_classes;
                    spans.push(span);
                }
            }
        }

        tracing::trace!(
            tile = %tile.name,
            spans = spans.len(),
            flat_pin_end = pin_base,
            classes = class_base,
            "built tile layout"
        );

        Ok(Self {
            spans,
            root_pin_bases,
            flat_pin_end: pin_base,
            num_classes: class_base,
        })
    }

    /// All spans in walk order.
    pub fn spans(&self) -> &[SiteSpan] {
        &self.spans
    }

    /// Returns the first span matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&SiteSpan) -> bool) -> Option<&SiteSpan> {
        self.spans.iter().find(|span| predicate(span))
    }

    /// Returns the span of a (sub tile, instance, block) triple.
    pub fn span_at(
        &self,
        sub_tile: usize,
        relative_cap: usize,
        block: LogicalBlockId,
    ) -> Option<&SiteSpan> {
        self.find(|span| span.is_at(sub_tile, relative_cap, block))
    }

    /// Returns the span whose flat pins contain `pin`.
    pub fn span_for_pin(&self, pin: usize) -> Option<&SiteSpan> {
        self.find(|span| span.pin_range().contains(&pin))
    }

    /// Returns the span whose primitive classes contain `class`.
    pub fn span_for_class(&self, class: usize) -> Option<&SiteSpan> {
        self.find(|span| span.class_range().contains(&class))
    }

    /// Spans of every equivalent site of one sub tile instance.
    pub fn instance_spans(
        &self,
        sub_tile: usize,
        relative_cap: usize,
    ) -> impl Iterator<Item = &SiteSpan> {
        self.spans
            .iter()
            .filter(move |span| span.sub_tile == sub_tile && span.relative_cap == relative_cap)
    }

    /// First root pin of a sub tile.
    pub fn root_pin_base(&self, sub_tile: usize) -> Option<usize> {
        self.root_pin_bases.get(sub_tile).copied()
    }

    /// One past the last flat pin of the tile.
    pub fn flat_pin_end(&self) -> usize {
        self.flat_pin_end
    }

    /// Total primitive classes across all sites.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

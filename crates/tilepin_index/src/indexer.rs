//! The shared entry point of all pin and class translations.

use crate::config::IndexOptions;
use crate::error::{LookupError, LookupResult};
use crate::layout::TileLayout;
use std::borrow::Cow;
use std::sync::OnceLock;
use tilepin_arch::{
    DeviceTypes, LogicalBlockId, LogicalBlockType, PhysicalTileId, PhysicalTileType, SubTile,
    ValidationError,
};

/// Translates between the pin and class numbering systems of an
/// architecture.
///
/// The indexer borrows the tables and never modifies them. With
/// [`IndexOptions::cache_layouts`] set it memoizes the cumulative walk of
/// each tile the first time a flat pin or class query needs it; the cache
/// is thread-safe, so one indexer can serve concurrent queries.
#[derive(Debug)]
pub struct PinIndexer<'a> {
    types: &'a DeviceTypes,
    options: IndexOptions,
    layouts: Vec<OnceLock<LookupResult<TileLayout>>>,
}

impl<'a> PinIndexer<'a> {
    /// Creates an indexer with default options.
    pub fn new(types: &'a DeviceTypes) -> Self {
        Self::build(types, IndexOptions::default())
    }

    /// Creates an indexer, validating the tables first when
    /// [`IndexOptions::validate_tables`] is set.
    pub fn with_options(
        types: &'a DeviceTypes,
        options: IndexOptions,
    ) -> Result<Self, ValidationError> {
        if options.validate_tables {
            types.validate()?;
        }
        Ok(Self::build(types, options))
    }

    fn build(types: &'a DeviceTypes, options: IndexOptions) -> Self {
        tracing::debug!(
            tiles = types.tile_count(),
            blocks = types.block_count(),
            cache_layouts = options.cache_layouts,
            "created pin indexer"
        );
        let layouts = if options.cache_layouts {
            (0..types.tile_count()).map(|_| OnceLock::new()).collect()
        } else {
            Vec::new()
        };
        Self {
            types,
            options,
            layouts,
        }
    }

    /// The tables this indexer reads.
    pub fn types(&self) -> &'a DeviceTypes {
        self.types
    }

    /// The options this indexer was created with.
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Returns the recorded walk of a tile.
    pub fn layout(&self, tile: PhysicalTileId) -> LookupResult<Cow<'_, TileLayout>> {
        let tile_type = self.tile(tile)?;
        match self.layouts.get(tile.index()) {
            Some(cell) => cell
                .get_or_init(|| TileLayout::build(self.types, tile_type))
                .as_ref()
                .map(Cow::Borrowed)
                .map_err(Clone::clone),
            None => TileLayout::build(self.types, tile_type).map(Cow::Owned),
        }
    }

    pub(crate) fn tile(&self, tile: PhysicalTileId) -> LookupResult<&'a PhysicalTileType> {
        self.types.tile(tile).ok_or(LookupError::UnknownTile { tile })
    }

    pub(crate) fn block(&self, block: LogicalBlockId) -> LookupResult<&'a LogicalBlockType> {
        self.types.block(block).ok_or(LookupError::UnknownBlock { block })
    }

    pub(crate) fn sub_tile(
        &self,
        tile: &'a PhysicalTileType,
        sub_tile: usize,
    ) -> LookupResult<&'a SubTile> {
        tile.sub_tile(sub_tile).ok_or_else(|| LookupError::UnknownSubTile {
            tile: tile.name.clone(),
            sub_tile,
        })
    }

    /// Block name for error messages; falls back to the raw ID.
    pub(crate) fn block_name(&self, block: LogicalBlockId) -> String {
        match self.types.block(block) {
            Some(block_type) => block_type.name.clone(),
            None => format!("#{block}"),
        }
    }

    pub(crate) fn no_site_instance(
        &self,
        tile: &PhysicalTileType,
        sub_tile: usize,
        relative_cap: usize,
        block: LogicalBlockId,
    ) -> LookupError {
        LookupError::NoSiteInstance {
            tile: tile.name.clone(),
            sub_tile,
            relative_cap,
            block: self.block_name(block),
        }
    }
}

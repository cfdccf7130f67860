//! Loading indexer options from disk and applying them.

mod common;

use common::fixtures;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tilepin_arch::{CapacityRange, ValidationError};
use tilepin_index::{load_options, ConfigError, IndexOptions, PinIndexer};

fn data_file(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn checked_in_options() {
    let options = load_options(&data_file("index_options.toml")).unwrap();
    assert_eq!(
        options,
        IndexOptions {
            cache_layouts: false,
            validate_tables: true,
        }
    );
}

#[test]
fn options_from_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tilepin.toml");
    fs::write(&path, "validate_tables = true\n").unwrap();

    let options = load_options(&path).unwrap();
    assert!(options.cache_layouts);
    assert!(options.validate_tables);
}

#[test]
fn malformed_options_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tilepin.toml");
    fs::write(&path, "cache_layouts = \"yes\"\n").unwrap();

    assert!(matches!(load_options(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn loaded_options_drive_the_indexer() {
    let options = load_options(&data_file("index_options.toml")).unwrap();

    let types = fixtures::heterogeneous();
    let indexer = PinIndexer::with_options(&types, options.clone()).unwrap();
    assert_eq!(indexer.options(), &options);
    assert_eq!(
        indexer.tile_max_ptc(fixtures::tile_id(fixtures::CLB_TILE), true),
        Ok(71)
    );

    let mut broken = fixtures::heterogeneous();
    broken.blocks[fixtures::PAD as usize].equivalent_tiles.clear();
    assert!(matches!(
        PinIndexer::with_options(&broken, options),
        Err(ValidationError::AsymmetricEquivalence { .. })
    ));
}

#[test]
fn inverted_capacity_is_rejected_or_inert() {
    let mut types = fixtures::multi_instance();
    types.tiles[0].sub_tiles[0].capacity = CapacityRange { low: 1, high: 0 };

    let checked = IndexOptions {
        validate_tables: true,
        ..IndexOptions::default()
    };
    assert!(matches!(
        PinIndexer::with_options(&types, checked),
        Err(ValidationError::InvertedCapacity { .. })
    ));

    // Unchecked tables hold no instances, so every pin is out of range.
    let indexer = PinIndexer::new(&types);
    let tile = fixtures::tile_id(0);
    assert_eq!(indexer.tile_max_ptc(tile, true), indexer.tile_max_ptc(tile, false));
    assert!(indexer.pin_location(tile, 0).is_err());
    assert!(indexer.pin_to_capacity_location(tile, 0).is_err());
}

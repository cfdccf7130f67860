//! Structural invariants every well-formed architecture must satisfy.

mod common;

use common::all_fixtures;
use std::collections::BTreeSet;
use tilepin_index::{ErrorKind, PinIndexer};

#[test]
fn fixtures_are_valid() {
    for (name, types) in all_fixtures() {
        assert_eq!(types.validate(), Ok(()), "{name}");
    }
}

#[test]
fn total_pin_conservation() {
    for (name, types) in all_fixtures() {
        for tile in &types.tiles {
            let computed: usize = tile
                .sub_tiles
                .iter()
                .map(|sub_tile| sub_tile.capacity.total() * sub_tile.pins_per_instance())
                .sum();
            assert_eq!(tile.num_pins, computed, "{name}: {}", tile.name);
        }
    }
}

#[test]
fn flat_pins_conserve_site_pins() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            let mut per_sub_tile = 0;
            for sub_tile in &tile.sub_tiles {
                per_sub_tile += indexer.total_sub_tile_pins(tile.id, sub_tile.index).unwrap();
            }
            assert_eq!(
                indexer.total_tile_pins(tile.id),
                Ok(per_sub_tile),
                "{name}: {}",
                tile.name
            );
            assert_eq!(
                indexer.tile_max_ptc(tile.id, true),
                Ok(tile.num_pins + per_sub_tile)
            );
        }
    }
}

#[test]
fn capacity_instances_do_not_alias() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            let mut seen = BTreeSet::new();
            for sub_tile in &tile.sub_tiles {
                for location in sub_tile.capacity.low..=sub_tile.capacity.high {
                    for relative_pin in 0..sub_tile.pins_per_instance() {
                        let pin = indexer
                            .capacity_location_to_pin(tile.id, relative_pin, location)
                            .unwrap();
                        assert!(seen.insert(pin), "{name}: pin {pin} of {} aliased", tile.name);
                    }
                }
            }
            assert_eq!(seen.len(), tile.num_pins);
            assert_eq!(seen.iter().next_back().map(|&p| p + 1), Some(tile.num_pins));
        }
    }
}

#[test]
fn flat_spans_are_disjoint_and_follow_root_pins() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            let layout = indexer.layout(tile.id).unwrap();
            let mut next_pin = tile.num_pins;
            let mut next_class = 0;
            for span in layout.spans() {
                assert_eq!(span.pin_base, next_pin, "{name}: {}", tile.name);
                assert_eq!(span.class_base, next_class, "{name}: {}", tile.name);
                next_pin = span.pin_range().end;
                next_class = span.class_range().end;
            }
            assert_eq!(layout.flat_pin_end(), next_pin);
            assert_eq!(layout.num_classes(), next_class);
        }
    }
}

#[test]
fn well_formed_classes_always_name() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            for class in 0..tile.class_inf.len() {
                let names = indexer.class_pin_names(tile.id, class);
                assert!(
                    names.as_ref().is_ok_and(|names| !names.is_empty()),
                    "{name}: class {class} of {}: {names:?}",
                    tile.name
                );
            }
        }
    }
}

#[test]
fn every_root_pin_has_a_name() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            for pin in 0..tile.num_pins {
                let pin_name = indexer.pin_name(tile.id, pin).unwrap();
                assert!(pin_name.starts_with(&tile.name), "{name}: {pin_name}");
            }
            let err = indexer.pin_name(tile.id, tile.num_pins).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange);
        }
    }
}

#[test]
fn opins_match_driver_classes() {
    for (name, types) in all_fixtures() {
        let indexer = PinIndexer::new(&types);
        for tile in &types.tiles {
            for pin in 0..tile.num_pins {
                let class = tile.pin_class[pin];
                let expected = indexer.class_type(tile.id, class, false).unwrap()
                    == tilepin_arch::PinType::Driver;
                assert_eq!(indexer.is_opin(tile.id, pin), Ok(expected), "{name}: pin {pin}");
            }
        }
    }
}

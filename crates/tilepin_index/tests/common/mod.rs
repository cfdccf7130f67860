//! Shared fixture tables for the integration tests.

#![allow(dead_code)]

#[path = "../../src/fixtures.rs"]
pub mod fixtures;

use tilepin_arch::DeviceTypes;

/// Every fixture architecture, by name.
pub fn all_fixtures() -> Vec<(&'static str, DeviceTypes)> {
    vec![
        ("single_instance", fixtures::single_instance()),
        ("multi_instance", fixtures::multi_instance()),
        ("heterogeneous", fixtures::heterogeneous()),
    ]
}

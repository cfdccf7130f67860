//! Human-readable names for root pins and root classes.

use crate::error::{LookupError, LookupResult};
use crate::indexer::PinIndexer;
use crate::pin::root_sub_tile;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tilepin_arch::{PhysicalTileId, PhysicalTileType, SubTile, TilePort};

/// Where a root pin sits within its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinInstancePort {
    /// Sub tile index.
    pub sub_tile: usize,
    /// Instance number within the sub tile.
    pub capacity_instance: usize,
    /// Index of the port carrying the pin, if any.
    pub port: Option<usize>,
    /// Pin number within that port.
    pub pin_in_port: Option<usize>,
}

struct RootPin<'a> {
    sub_tile: &'a SubTile,
    instance: usize,
    port: Option<&'a TilePort>,
    instance_pin: usize,
}

fn resolve_root_pin(tile: &PhysicalTileType, pin: usize) -> LookupResult<RootPin<'_>> {
    let (sub_tile, offset) = root_sub_tile(tile, pin).ok_or_else(|| LookupError::PinOutOfRange {
        tile: tile.name.clone(),
        pin,
        limit: tile.num_pins,
    })?;
    let per_instance = sub_tile.pins_per_instance();
    let instance_pin = offset % per_instance;
    Ok(RootPin {
        sub_tile,
        instance: offset / per_instance,
        port: sub_tile.port_by_pin(instance_pin),
        instance_pin,
    })
}

impl PinIndexer<'_> {
    /// Decomposes a root pin into sub tile, instance, port and pin in port.
    pub fn pin_instance_port(
        &self,
        tile: PhysicalTileId,
        pin: usize,
    ) -> LookupResult<PinInstancePort> {
        let root = resolve_root_pin(self.tile(tile)?, pin)?;
        Ok(PinInstancePort {
            sub_tile: root.sub_tile.index,
            capacity_instance: root.instance,
            port: root.port.map(|port| port.index),
            pin_in_port: root
                .port
                .map(|port| root.instance_pin - port.absolute_first_pin_index),
        })
    }

    /// Formats a root pin as `TILE[instance].PORT[pin]`.
    ///
    /// The instance suffix is omitted when the sub tile has one instance.
    pub fn pin_name(&self, tile: PhysicalTileId, pin: usize) -> LookupResult<String> {
        let tile_type = self.tile(tile)?;
        let root = resolve_root_pin(tile_type, pin)?;
        let port = root.port.ok_or_else(|| LookupError::UnmappedPhysicalPin {
            tile: tile_type.name.clone(),
            pin,
        })?;
        let pin_in_port = root.instance_pin - port.absolute_first_pin_index;

        let block = if root.sub_tile.capacity.total() > 1 {
            format!("{}[{}]", tile_type.name, root.instance)
        } else {
            tile_type.name.clone()
        };
        Ok(format!("{block}.{}[{pin_in_port}]", port.name))
    }

    /// Formats the pins of a root class as port ranges, one string per
    /// (sub tile, instance, port) group.
    ///
    /// Each group reads `TILE[instance].PORT[first:last]`, or
    /// `TILE[instance].PORT[pin]` for a single pin. Fails if a group's pins
    /// do not form one contiguous run.
    pub fn class_pin_names(&self, tile: PhysicalTileId, class: usize) -> LookupResult<Vec<String>> {
        let tile_type = self.tile(tile)?;
        let class_info = tile_type
            .class_inf
            .get(class)
            .ok_or_else(|| LookupError::ClassOutOfRange {
                tile: tile_type.name.clone(),
                class,
                limit: tile_type.class_inf.len(),
            })?;

        let mut pins = Vec::with_capacity(class_info.num_pins());
        for &pin in &class_info.pins {
            let root = resolve_root_pin(tile_type, pin)?;
            let port = root.port.ok_or_else(|| LookupError::UnmappedPhysicalPin {
                tile: tile_type.name.clone(),
                pin,
            })?;
            pins.push((
                root.sub_tile.index,
                root.instance,
                port,
                root.instance_pin - port.absolute_first_pin_index,
            ));
        }
        pins.sort_by_key(|&(sub_tile, instance, port, pin_in_port)| {
            (sub_tile, instance, port.index, pin_in_port)
        });

        let mut groups: BTreeMap<(usize, usize, usize), (&TilePort, usize, usize)> =
            BTreeMap::new();
        for (sub_tile, instance, port, pin_in_port) in pins {
            match groups.entry((sub_tile, instance, port.index)) {
                Entry::Vacant(entry) => {
                    entry.insert((port, pin_in_port, pin_in_port));
                }
                Entry::Occupied(mut entry) => {
                    let (_, _, last) = entry.get_mut();
                    if *last + 1 != pin_in_port {
                        return Err(LookupError::MalformedClass {
                            tile: tile_type.name.clone(),
                            class,
                            detail: format!(
                                "{}[{}] does not follow {}[{}]",
                                port.name, pin_in_port, port.name, last
                            ),
                        });
                    }
                    *last = pin_in_port;
                }
            }
        }

        Ok(groups
            .into_iter()
            .map(|((_, instance, _), (port, first, last))| {
                if first == last {
                    format!("{}[{}].{}[{}]", tile_type.name, instance, port.name, first)
                } else {
                    format!(
                        "{}[{}].{}[{}:{}]",
                        tile_type.name, instance, port.name, first, last
                    )
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::{self, tile_id, CLB_TILE};

    #[test]
    fn single_instance_pin_name() {
        let types = fixtures::single_instance();
        let indexer = PinIndexer::new(&types);
        assert_eq!(indexer.pin_name(tile_id(0), 2).unwrap(), "T.A[2]");
        assert_eq!(
            indexer.class_pin_names(tile_id(0), 0).unwrap(),
            vec!["T[0].A[0:3]".to_string()]
        );
    }

    #[test]
    fn heterogeneous_pin_names() {
        let types = fixtures::heterogeneous();
        let indexer = PinIndexer::new(&types);
        let clb = tile_id(CLB_TILE);

        assert_eq!(indexer.pin_name(clb, 12).unwrap(), "CLB_TILE[1].O[1]");
        assert_eq!(indexer.pin_name(clb, 15).unwrap(), "CLB_TILE.addr[1]");
        assert_eq!(
            indexer.pin_instance_port(clb, 13),
            Ok(PinInstancePort {
                sub_tile: 0,
                capacity_instance: 1,
                port: Some(2),
                pin_in_port: Some(0),
            })
        );
        assert!(matches!(
            indexer.pin_name(clb, 19),
            Err(LookupError::PinOutOfRange { .. })
        ));
    }

    #[test]
    fn heterogeneous_class_names() {
        let types = fixtures::heterogeneous();
        let indexer = PinIndexer::new(&types);
        let clb = tile_id(CLB_TILE);

        assert_eq!(
            indexer.class_pin_names(clb, 4).unwrap(),
            vec!["CLB_TILE[1].O[0:1]".to_string()]
        );
        assert_eq!(
            indexer.class_pin_names(clb, 6).unwrap(),
            vec!["CLB_TILE[0].addr[0:2]".to_string()]
        );
        assert_eq!(
            indexer.class_pin_names(clb, 2).unwrap(),
            vec!["CLB_TILE[0].clk[0]".to_string()]
        );
    }

    #[test]
    fn merged_class_spans_instances() {
        let mut types = fixtures::heterogeneous();
        // One class for the inputs of both CLB instances, listed out of order.
        types.tiles[0].class_inf[0].pins = vec![7, 8, 9, 10, 0, 1, 2, 3];
        let indexer = PinIndexer::new(&types);
        assert_eq!(
            indexer.class_pin_names(tile_id(CLB_TILE), 0).unwrap(),
            vec!["CLB_TILE[0].I[0:3]".to_string(), "CLB_TILE[1].I[0:3]".to_string()]
        );
    }

    #[test]
    fn gap_in_class_is_malformed() {
        let mut types = fixtures::single_instance();
        types.tiles[0].class_inf[0].pins = vec![0, 1, 3];
        let indexer = PinIndexer::new(&types);
        let err = indexer.class_pin_names(tile_id(0), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedGrouping);
        assert!(err.to_string().contains("A[3] does not follow A[1]"));
    }
}

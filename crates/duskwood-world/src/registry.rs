use std::collections::HashMap;

use duskwood_geom::Vec3;
use duskwood_scene::{Handle, Surface};

use crate::decor::Decoration;
use crate::tile::TileKey;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundBlock {
    pub handle: Handle,
    pub position: Vec3,
}

/// Live ground blocks. Owns every block between generation and pruning.
#[derive(Default)]
pub struct BlockRegistry {
    live: Vec<GroundBlock>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles are always fresh from the surface, so no duplicate check.
    #[inline]
    pub fn register(&mut self, block: GroundBlock) {
        self.live.push(block);
    }

    /// Removes every registered block from `surface` and empties the registry.
    /// Returns how many blocks were dropped.
    pub fn remove_all(&mut self, surface: &mut impl Surface) -> usize {
        let n = self.live.len();
        for block in self.live.drain(..) {
            if !surface.remove(block.handle) {
                log::warn!(target: "stream", "ground block {:?} was already gone", block.handle);
            }
        }
        n
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroundBlock> + '_ {
        self.live.iter()
    }
}

/// Decorations grouped by the tile they were scattered over.
#[derive(Default)]
pub struct DecorationRegistry {
    by_tile: HashMap<TileKey, Vec<Decoration>>,
}

impl DecorationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: TileKey, placed: impl IntoIterator<Item = Decoration>) {
        self.by_tile.entry(key).or_default().extend(placed);
    }

    /// Drops every tile group not listed in `keep` from the surface and the registry.
    /// Returns the number of decorations removed.
    pub fn retain_tiles(&mut self, keep: &[TileKey], surface: &mut impl Surface) -> usize {
        let stale: Vec<TileKey> = self
            .by_tile
            .keys()
            .filter(|k| !keep.contains(k))
            .copied()
            .collect();
        let mut removed = 0;
        for key in stale {
            let Some(group) = self.by_tile.remove(&key) else {
                continue;
            };
            for deco in &group {
                for handle in deco.handles() {
                    surface.remove(handle);
                }
            }
            removed += group.len();
            log::debug!(target: "stream", "pruned decorations of tile ({}, {})", key.x, key.z);
        }
        removed
    }

    /// Number of decorations (a tree counts once).
    pub fn len(&self) -> usize {
        self.by_tile.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tile.values().all(Vec::is_empty)
    }

    pub fn tile_count(&self) -> usize {
        self.by_tile.len()
    }

    pub fn tile(&self, key: TileKey) -> Option<&[Decoration]> {
        self.by_tile.get(&key).map(Vec::as_slice)
    }
}

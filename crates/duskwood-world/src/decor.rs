//! Random scattering of trees, rocks, and wolf placeholders over a tile footprint.

use duskwood_geom::Vec3;
use duskwood_scene::{Handle, Primitive, Surface};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decoration {
    Tree {
        trunk: Handle,
        canopy: Handle,
        /// Ground-plane position of the trunk axis (y = 0).
        base: Vec3,
        trunk_height: f32,
    },
    Rock {
        handle: Handle,
        position: Vec3,
    },
    Wolf {
        handle: Handle,
        position: Vec3,
    },
}

impl Decoration {
    pub fn handles(&self) -> impl Iterator<Item = Handle> {
        let (first, second) = match *self {
            Decoration::Tree { trunk, canopy, .. } => (trunk, Some(canopy)),
            Decoration::Rock { handle, .. } | Decoration::Wolf { handle, .. } => (handle, None),
        };
        std::iter::once(first).chain(second)
    }

    pub fn position(&self) -> Vec3 {
        match *self {
            Decoration::Tree { base, .. } => base,
            Decoration::Rock { position, .. } | Decoration::Wolf { position, .. } => position,
        }
    }
}

pub struct DecorationPlacer<R: Rng = StdRng> {
    rng: R,
}

impl DecorationPlacer<StdRng> {
    /// Seeded from OS entropy; every run scatters a different forest.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DecorationPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Trees sit on integer cells: `floor(u * size) - size/2 + offset` per axis.
    fn cell_coord(&mut self, params: &WorldParams, offset: f32) -> f32 {
        self.rng.random_range(0..params.world_size) as f32 - params.half_extent() + offset
    }

    /// Rocks and wolves use continuous coordinates: `u * size - size/2 + offset`.
    /// Far from the origin the sum can round onto the open upper edge, so it is pulled
    /// back one step below it.
    fn free_coord(&mut self, params: &WorldParams, offset: f32) -> f32 {
        let half = params.half_extent();
        let local = self.rng.random::<f32>() * params.world_size as f32 - half;
        let upper = offset + half;
        let v = offset + local;
        if v >= upper { upper.next_down() } else { v }
    }

    pub fn place_trees(
        &mut self,
        params: &WorldParams,
        offset_x: f32,
        offset_z: f32,
        surface: &mut impl Surface,
    ) -> Vec<Decoration> {
        let mut out = Vec::with_capacity(params.trees_per_tile);
        for _ in 0..params.trees_per_tile {
            let x = self.cell_coord(params, offset_x);
            let z = self.cell_coord(params, offset_z);
            let trunk_height = self
                .rng
                .random_range(params.trunk_height_min..params.trunk_height_max);
            let trunk = surface.insert(Primitive::tree_trunk(x, z, trunk_height));
            let canopy = surface.insert(Primitive::tree_canopy(x, z, trunk_height));
            out.push(Decoration::Tree {
                trunk,
                canopy,
                base: Vec3::new(x, 0.0, z),
                trunk_height,
            });
        }
        out
    }

    pub fn place_rocks_and_wolves(
        &mut self,
        params: &WorldParams,
        offset_x: f32,
        offset_z: f32,
        surface: &mut impl Surface,
    ) -> Vec<Decoration> {
        let mut out = Vec::with_capacity(params.rocks_per_tile + params.wolves_per_tile);
        for _ in 0..params.rocks_per_tile {
            let x = self.free_coord(params, offset_x);
            let z = self.free_coord(params, offset_z);
            let rock = Primitive::rock(x, z);
            out.push(Decoration::Rock {
                handle: surface.insert(rock),
                position: rock.position,
            });
        }
        for _ in 0..params.wolves_per_tile {
            let x = self.free_coord(params, offset_x);
            let z = self.free_coord(params, offset_z);
            let wolf = Primitive::wolf(x, z);
            out.push(Decoration::Wolf {
                handle: surface.insert(wolf),
                position: wolf.position,
            });
        }
        out
    }

    /// Trees first, then rocks and wolves, matching the streaming order.
    pub fn decorate(
        &mut self,
        params: &WorldParams,
        offset_x: f32,
        offset_z: f32,
        surface: &mut impl Surface,
    ) -> Vec<Decoration> {
        let mut placed = self.place_trees(params, offset_x, offset_z, surface);
        placed.extend(self.place_rocks_and_wolves(params, offset_x, offset_z, surface));
        placed
    }
}

use duskwood_geom::Vec3;
use duskwood_scene::{Primitive, Surface};

use crate::config::WorldParams;
use crate::registry::{BlockRegistry, GroundBlock};

/// Height of the ground layer's block centres.
pub const GROUND_Y: f32 = -1.0;

/// Lays a `world_size x world_size` square of unit-spaced blocks around an offset.
#[derive(Clone, Copy, Debug)]
pub struct GroundGenerator {
    pub block_size: f32,
    pub world_size: u32,
}

impl GroundGenerator {
    pub fn new(params: &WorldParams) -> Self {
        Self {
            block_size: params.block_size,
            world_size: params.world_size,
        }
    }

    /// Block centres of the tile at `(offset_x, offset_z)`, x-major.
    pub fn positions(&self, offset_x: f32, offset_z: f32) -> impl Iterator<Item = Vec3> + use<> {
        let n = self.world_size;
        let start = -(n as f32) / 2.0;
        (0..n).flat_map(move |i| {
            let x = start + i as f32;
            (0..n).map(move |j| Vec3::new(x + offset_x, GROUND_Y, start + j as f32 + offset_z))
        })
    }

    /// Inserts one tile of ground into `surface` and registers every block.
    /// Returns the number of blocks created.
    pub fn generate(
        &self,
        offset_x: f32,
        offset_z: f32,
        registry: &mut BlockRegistry,
        surface: &mut impl Surface,
    ) -> usize {
        let mut n = 0;
        for position in self.positions(offset_x, offset_z) {
            let handle = surface.insert(Primitive::ground_block(position, self.block_size));
            registry.register(GroundBlock { handle, position });
            n += 1;
        }
        log::debug!(target: "stream", "ground tile at ({offset_x:.2}, {offset_z:.2}): {n} blocks");
        n
    }
}

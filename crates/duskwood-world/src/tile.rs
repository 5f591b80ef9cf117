use duskwood_geom::{Aabb, Vec3};

/// Integer identity of a tile: its generation offset floored to block coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub x: i32,
    pub z: i32,
}

impl TileKey {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn from_offsets(offset_x: f32, offset_z: f32) -> Self {
        Self::new(offset_x.floor() as i32, offset_z.floor() as i32)
    }
}

/// Ground-plane footprint of the tile centred on `(offset_x, offset_z)`.
/// `contains_xz` on the result is the half-open `[o - w/2, o + w/2)` range per axis.
pub fn tile_footprint(offset_x: f32, offset_z: f32, world_size: u32) -> Aabb {
    let w = world_size as f32;
    Aabb::from_center_size(Vec3::new(offset_x, -1.0, offset_z), Vec3::new(w, 1.0, w))
}

use duskwood_geom::Vec3;

use crate::material::MaterialKind;

/// Geometric kind of a primitive. All shapes are centred on the primitive's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { width: f32, height: f32, depth: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, slices: u16 },
    Cone { radius: f32, height: f32, slices: u16 },
    Sphere { radius: f32, rings: u16, slices: u16 },
}

/// Opaque scene handle. Never zero and never reused within one `SceneGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub position: Vec3,
    pub material: MaterialKind,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Primitive {
    pub fn new(shape: Shape, position: Vec3, material: MaterialKind) -> Self {
        Self {
            shape,
            position,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn ground_block(position: Vec3, block_size: f32) -> Self {
        let shape = Shape::Cuboid {
            width: block_size,
            height: block_size,
            depth: block_size,
        };
        Self::new(shape, position, MaterialKind::Ground).receiving_shadow()
    }

    pub fn tree_trunk(base_x: f32, base_z: f32, trunk_height: f32) -> Self {
        let shape = Shape::Cylinder {
            radius_top: 0.4,
            radius_bottom: 0.6,
            height: trunk_height,
            slices: 8,
        };
        let pos = Vec3::new(base_x, trunk_height / 2.0 - 1.0, base_z);
        Self::new(shape, pos, MaterialKind::TreeTrunk).casting_shadow()
    }

    pub fn tree_canopy(base_x: f32, base_z: f32, trunk_height: f32) -> Self {
        let shape = Shape::Cone {
            radius: 1.5,
            height: 3.0,
            slices: 8,
        };
        let pos = Vec3::new(base_x, trunk_height - 1.0, base_z);
        Self::new(shape, pos, MaterialKind::TreeLeaves).casting_shadow()
    }

    pub fn rock(x: f32, z: f32) -> Self {
        let shape = Shape::Sphere {
            radius: 0.5,
            rings: 16,
            slices: 16,
        };
        Self::new(shape, Vec3::new(x, -0.5, z), MaterialKind::Rock).casting_shadow()
    }

    pub fn wolf(x: f32, z: f32) -> Self {
        let shape = Shape::Cuboid {
            width: 0.5,
            height: 0.5,
            depth: 1.0,
        };
        Self::new(shape, Vec3::new(x, 0.0, z), MaterialKind::Wolf).casting_shadow()
    }
}

//! Raylib drawing of a `SceneGraph`: conversions, light shading, fog, and distance culling.

use duskwood_geom::{Rgb, Vec3};
use duskwood_scene::{Environment, Material, Primitive, SceneGraph, Shape};
use raylib::prelude::*;

pub mod conv {
    use duskwood_geom::{Rgb, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn vec3_from_rl(v: raylib::prelude::Vector3) -> Vec3 {
        Vec3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    pub fn rgb_to_rl(c: Rgb) -> raylib::prelude::Color {
        raylib::prelude::Color::new(c.r, c.g, c.b, 255)
    }
}

/// Fog factor past which a primitive is indistinguishable from the fog colour.
pub const FOG_CULL_FACTOR: f32 = 0.995;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub culled: usize,
}

pub struct SceneRenderer {
    env: Environment,
    light_scale: f32,
    pub fog_culling: bool,
}

impl SceneRenderer {
    pub fn new(env: Environment) -> Self {
        Self {
            light_scale: env.light_scale(),
            env,
            fog_culling: true,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn background(&self) -> Color {
        conv::rgb_to_rl(self.env.background)
    }

    /// Final colour of `material` seen from `distance` away.
    pub fn shade(&self, material: &Material, distance: f32) -> Rgb {
        let base = if material.is_emissive() {
            material.color
        } else {
            material.color.scaled(self.light_scale)
        };
        base.lerp(self.env.fog.color, self.env.fog.factor(distance))
    }

    pub fn draw_scene<D: RaylibDraw3D>(&self, d3: &mut D, scene: &SceneGraph, eye: Vec3) -> DrawStats {
        let mut stats = DrawStats::default();
        for (_, prim) in scene.iter() {
            let material = prim.material.material();
            let distance = eye.distance(prim.position);
            if self.fog_culling
                && !material.is_emissive()
                && self.env.fog.factor(distance) >= FOG_CULL_FACTOR
            {
                stats.culled += 1;
                continue;
            }
            let color = conv::rgb_to_rl(self.shade(&material, distance));
            draw_primitive(d3, prim, color);
            stats.drawn += 1;
        }
        stats
    }
}

/// Shapes are centred on the primitive; raylib cylinders grow up from their base.
fn draw_primitive<D: RaylibDraw3D>(d3: &mut D, prim: &Primitive, color: Color) {
    let pos = conv::vec3_to_rl(prim.position);
    match prim.shape {
        Shape::Cuboid { width, height, depth } => {
            d3.draw_cube(pos, width, height, depth, color);
        }
        Shape::Cylinder { radius_top, radius_bottom, height, slices } => {
            let base = pos - Vector3::new(0.0, height / 2.0, 0.0);
            d3.draw_cylinder(base, radius_top, radius_bottom, height, slices as i32, color);
        }
        Shape::Cone { radius, height, slices } => {
            let base = pos - Vector3::new(0.0, height / 2.0, 0.0);
            d3.draw_cylinder(base, 0.0, radius, height, slices as i32, color);
        }
        Shape::Sphere { radius, rings, slices } => {
            d3.draw_sphere_ex(pos, radius, rings as i32, slices as i32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskwood_scene::MaterialKind;

    #[test]
    fn emissive_moon_is_unshaded_up_close() {
        let r = SceneRenderer::new(Environment::nightfall());
        let moon = MaterialKind::Moon.material();
        assert_eq!(r.shade(&moon, 0.0), Rgb::WHITE);
    }

    #[test]
    fn far_things_melt_into_fog() {
        let r = SceneRenderer::new(Environment::nightfall());
        let rock = MaterialKind::Rock.material();
        assert_eq!(r.shade(&rock, 500.0), r.environment().fog.color);
        assert_ne!(r.shade(&rock, 1.0), r.environment().fog.color);
    }

    #[test]
    fn conversions_round_trip_positions() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(conv::vec3_from_rl(conv::vec3_to_rl(v)), v);
    }
}

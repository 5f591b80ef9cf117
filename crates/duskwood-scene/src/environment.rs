//! Static night-time scene dressing: background, fog, lights, and the moon.

use duskwood_geom::{Rgb, Vec3};

use crate::graph::Surface;
use crate::material::MaterialKind;
use crate::primitive::{Handle, Primitive, Shape};

/// Exponential-squared fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub density: f32,
}

impl Fog {
    /// Fraction of the fog colour mixed in at `distance`, in [0, 1].
    pub fn factor(&self, distance: f32) -> f32 {
        let d = self.density * distance.max(0.0);
        (1.0 - (-(d * d)).exp()).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub background: Rgb,
    pub fog: Fog,
    pub sun: DirectionalLight,
    pub ambient: Rgb,
    pub moon_position: Vec3,
    pub moon_radius: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self::nightfall()
    }
}

impl Environment {
    pub fn nightfall() -> Self {
        Self {
            background: Rgb::from_hex(0x1a1a1a),
            fog: Fog {
                color: Rgb::from_hex(0x0d0d0d),
                density: 0.05,
            },
            sun: DirectionalLight {
                color: Rgb::from_hex(0x444444),
                intensity: 0.4,
                position: Vec3::new(10.0, 20.0, 10.0),
                cast_shadow: true,
            },
            ambient: Rgb::from_hex(0x111111),
            moon_position: Vec3::new(5.0, 5.0, -10.0),
            moon_radius: 2.0,
        }
    }

    pub fn moon(&self) -> Primitive {
        let shape = Shape::Sphere {
            radius: self.moon_radius,
            rings: 32,
            slices: 32,
        };
        Primitive::new(shape, self.moon_position, MaterialKind::Moon)
    }

    /// Inserts the permanent scene dressing and returns the moon's handle.
    pub fn install(&self, surface: &mut impl Surface) -> Handle {
        let handle = surface.insert(self.moon());
        log::debug!("moon installed at {:?} as {:?}", self.moon_position, handle);
        handle
    }

    /// Brightness multiplier for lit (non-emissive) surfaces.
    pub fn light_scale(&self) -> f32 {
        let luminance = |c: Rgb| (c.r as f32 + c.g as f32 + c.b as f32) / (3.0 * 255.0);
        // Raw light colours are very dark; lift them so the palette stays readable.
        let raw = luminance(self.ambient) + luminance(self.sun.color) * self.sun.intensity;
        (0.55 + raw * 4.0).min(1.0)
    }
}

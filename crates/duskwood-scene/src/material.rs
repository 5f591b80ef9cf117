use duskwood_geom::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Ground,
    TreeTrunk,
    TreeLeaves,
    Rock,
    Wolf,
    Moon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    /// Self-lit intensity in [0, 1]; zero for ordinary lit surfaces.
    pub emissive: f32,
}

impl Material {
    const fn standard(hex: u32) -> Self {
        Self {
            color: Rgb::from_hex(hex),
            roughness: 1.0,
            metalness: 0.0,
            emissive: 0.0,
        }
    }

    #[inline]
    pub fn is_emissive(&self) -> bool {
        self.emissive > 0.0
    }
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 6] = [
        MaterialKind::Ground,
        MaterialKind::TreeTrunk,
        MaterialKind::TreeLeaves,
        MaterialKind::Rock,
        MaterialKind::Wolf,
        MaterialKind::Moon,
    ];

    pub const fn material(self) -> Material {
        match self {
            MaterialKind::Ground => Material::standard(0x2b2b2b),
            MaterialKind::TreeTrunk => Material::standard(0x3b2b1f),
            MaterialKind::TreeLeaves => Material {
                roughness: 0.9,
                metalness: 0.1,
                ..Material::standard(0x1a3a3a)
            },
            MaterialKind::Rock => Material::standard(0x7d7d7d),
            MaterialKind::Wolf => Material::standard(0x555555),
            MaterialKind::Moon => Material {
                emissive: 0.5,
                ..Material::standard(0xffffff)
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MaterialKind::Ground => "ground",
            MaterialKind::TreeTrunk => "trunk",
            MaterialKind::TreeLeaves => "leaves",
            MaterialKind::Rock => "rock",
            MaterialKind::Wolf => "wolf",
            MaterialKind::Moon => "moon",
        }
    }
}

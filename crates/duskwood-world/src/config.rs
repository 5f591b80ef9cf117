//! TOML configuration and the validated parameters compiled from it.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::streaming::{DecorationRetention, LookBehind, PruneMode, StreamingPolicy};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub world: Tiles,
    #[serde(default)]
    pub decorations: Decorations,
    #[serde(default)]
    pub streaming: Streaming,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Tiles {
    #[serde(default = "default_block_size")]
    pub block_size: f32,
    #[serde(default = "default_world_size")]
    pub world_size: u32,
}
fn default_block_size() -> f32 {
    crate::BLOCK_SIZE
}
fn default_world_size() -> u32 {
    crate::WORLD_SIZE
}
impl Default for Tiles {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            world_size: default_world_size(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Decorations {
    #[serde(default = "default_trees")]
    pub trees_per_tile: usize,
    #[serde(default = "default_rocks")]
    pub rocks_per_tile: usize,
    #[serde(default = "default_wolves")]
    pub wolves_per_tile: usize,
    #[serde(default = "default_trunk_min")]
    pub trunk_height_min: f32,
    #[serde(default = "default_trunk_max")]
    pub trunk_height_max: f32,
}
fn default_trees() -> usize {
    crate::TREES_PER_TILE
}
fn default_rocks() -> usize {
    crate::ROCKS_PER_TILE
}
fn default_wolves() -> usize {
    crate::WOLVES_PER_TILE
}
fn default_trunk_min() -> f32 {
    crate::TRUNK_HEIGHT_MIN
}
fn default_trunk_max() -> f32 {
    crate::TRUNK_HEIGHT_MAX
}
impl Default for Decorations {
    fn default() -> Self {
        Self {
            trees_per_tile: default_trees(),
            rocks_per_tile: default_rocks(),
            wolves_per_tile: default_wolves(),
            trunk_height_min: default_trunk_min(),
            trunk_height_max: default_trunk_max(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Streaming {
    #[serde(default = "default_prune")]
    pub prune: PruneMode,
    #[serde(default = "default_look_behind")]
    pub look_behind: LookBehind,
    #[serde(default = "default_retention")]
    pub decorations: DecorationRetention,
    #[serde(default = "default_decorate_origin")]
    pub decorate_origin: bool,
}
fn default_prune() -> PruneMode {
    StreamingPolicy::default().prune
}
fn default_look_behind() -> LookBehind {
    StreamingPolicy::default().look_behind
}
fn default_retention() -> DecorationRetention {
    StreamingPolicy::default().decorations
}
fn default_decorate_origin() -> bool {
    StreamingPolicy::default().decorate_origin
}
impl Default for Streaming {
    fn default() -> Self {
        Self {
            prune: default_prune(),
            look_behind: default_look_behind(),
            decorations: default_retention(),
            decorate_origin: default_decorate_origin(),
        }
    }
}

/// Validated runtime parameters for ground generation, decoration, and streaming.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldParams {
    pub block_size: f32,
    pub world_size: u32,
    pub trees_per_tile: usize,
    pub rocks_per_tile: usize,
    pub wolves_per_tile: usize,
    pub trunk_height_min: f32,
    pub trunk_height_max: f32,
    pub policy: StreamingPolicy,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            block_size: crate::BLOCK_SIZE,
            world_size: crate::WORLD_SIZE,
            trees_per_tile: crate::TREES_PER_TILE,
            rocks_per_tile: crate::ROCKS_PER_TILE,
            wolves_per_tile: crate::WOLVES_PER_TILE,
            trunk_height_min: crate::TRUNK_HEIGHT_MIN,
            trunk_height_max: crate::TRUNK_HEIGHT_MAX,
            policy: StreamingPolicy::default(),
        }
    }
}

impl WorldParams {
    pub fn from_config(cfg: &WorldConfig) -> Result<Self, Box<dyn Error>> {
        let params = Self {
            block_size: cfg.world.block_size,
            world_size: cfg.world.world_size,
            trees_per_tile: cfg.decorations.trees_per_tile,
            rocks_per_tile: cfg.decorations.rocks_per_tile,
            wolves_per_tile: cfg.decorations.wolves_per_tile,
            trunk_height_min: cfg.decorations.trunk_height_min,
            trunk_height_max: cfg.decorations.trunk_height_max,
            policy: StreamingPolicy {
                prune: cfg.streaming.prune,
                look_behind: cfg.streaming.look_behind,
                decorations: cfg.streaming.decorations,
                decorate_origin: cfg.streaming.decorate_origin,
            },
        };
        params.validate()?;
        Ok(params)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldConfig = toml::from_str(toml_str)?;
        Self::from_config(&cfg)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.world_size == 0 {
            return Err("world.world_size must be at least 1".into());
        }
        if !self.block_size.is_finite() || self.block_size <= 0.0 {
            return Err(format!("world.block_size must be positive, got {}", self.block_size).into());
        }
        let (lo, hi) = (self.trunk_height_min, self.trunk_height_max);
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(format!("decorations.trunk_height range [{lo}, {hi}) is empty").into());
        }
        if lo < 1.0 {
            return Err(format!("decorations.trunk_height_min must be >= 1, got {lo}").into());
        }
        Ok(())
    }

    /// Half a tile width; the distance at which streaming triggers.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.world_size as f32 / 2.0
    }

    #[inline]
    pub fn blocks_per_tile(&self) -> usize {
        (self.world_size as usize) * (self.world_size as usize)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldParams::from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let p = WorldParams::from_toml_str("").unwrap();
        assert_eq!(p, WorldParams::default());
        assert_eq!(p.half_extent(), 25.0);
        assert_eq!(p.blocks_per_tile(), 2500);
    }

    #[test]
    fn policy_names_are_snake_case() {
        let p = WorldParams::from_toml_str(
            r#"
            [streaming]
            prune = "legacy"
            look_behind = "off"
            decorations = "accumulate"
            decorate_origin = false
        "#,
        )
        .unwrap();
        assert_eq!(p.policy.prune, PruneMode::Legacy);
        assert_eq!(p.policy.look_behind, LookBehind::Off);
        assert_eq!(p.policy.decorations, DecorationRetention::Accumulate);
        assert!(!p.policy.decorate_origin);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(WorldParams::from_toml_str("[world]\nworld_size = 0").is_err());
        assert!(WorldParams::from_toml_str("[world]\nblock_size = -1.0").is_err());
        assert!(
            WorldParams::from_toml_str(
                "[decorations]\ntrunk_height_min = 8.0\ntrunk_height_max = 8.0"
            )
            .is_err()
        );
        assert!(WorldParams::from_toml_str("[streaming]\nprune = \"sometimes\"").is_err());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let p = WorldParams::from_toml_str(include_str!("../../../duskwood.toml")).unwrap();
        assert_eq!(p, WorldParams::default());
    }
}

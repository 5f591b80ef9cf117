//! Camera-relative tile streaming.
//!
//! Each frame the controller compares the camera to the last generation offset,
//! independently on X then Z. Once the camera is half a tile away on an axis the
//! offset jumps to the camera position, a fresh tile (ground plus decorations) is
//! generated there, and the configured [`StreamingPolicy`] decides what is pruned
//! and whether the abandoned tile's ground is laid again.
//!
//! Movement larger than a whole tile in one frame leaves gaps: only the tile at
//! the new offset (and optionally the one just left) is generated.

use duskwood_geom::Vec3;
use duskwood_scene::Surface;
use rand::Rng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::config::WorldParams;
use crate::decor::DecorationPlacer;
use crate::ground::GroundGenerator;
use crate::registry::{BlockRegistry, DecorationRegistry};
use crate::tile::TileKey;

/// When the ground registry is emptied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneMode {
    /// Only on X triggers, after the new tile was generated. This also throws away the
    /// tile just laid under the camera, so ground trails one step behind.
    Legacy,
    /// On both axes, before the new tile is generated.
    Symmetric,
}

/// Whether ground is laid again at the offset the camera just left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookBehind {
    RegenerateOld,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationRetention {
    /// Never removed; the forest grows without bound.
    Accumulate,
    /// Decorations of tiles without live ground are removed whenever ground is pruned.
    PruneWithGround,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamingPolicy {
    pub prune: PruneMode,
    pub look_behind: LookBehind,
    pub decorations: DecorationRetention,
    /// Scatter decorations over the start-up tile too.
    pub decorate_origin: bool,
}

impl Default for StreamingPolicy {
    fn default() -> Self {
        Self {
            prune: PruneMode::Symmetric,
            look_behind: LookBehind::RegenerateOld,
            decorations: DecorationRetention::PruneWithGround,
            decorate_origin: true,
        }
    }
}

impl StreamingPolicy {
    /// Bit-for-bit the behaviour of the original viewer, quirks included.
    pub const fn legacy() -> Self {
        Self {
            prune: PruneMode::Legacy,
            look_behind: LookBehind::RegenerateOld,
            decorations: DecorationRetention::Accumulate,
            decorate_origin: false,
        }
    }
}

/// Last generation offset per axis. Starts at the origin, where the first tile is laid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamingState {
    pub offset_x: f32,
    pub offset_z: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTrigger {
    pub axis: Axis,
    pub old_offset: f32,
    pub new_offset: f32,
}

/// What one `update` (or `bootstrap`) did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamReport {
    pub x: Option<AxisTrigger>,
    pub z: Option<AxisTrigger>,
    pub tiles_generated: usize,
    pub blocks_generated: usize,
    pub blocks_pruned: usize,
    pub decorations_placed: usize,
    pub decorations_pruned: usize,
    pub skipped_non_finite: bool,
}

impl StreamReport {
    pub fn is_idle(&self) -> bool {
        self.x.is_none() && self.z.is_none() && self.tiles_generated == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub tiles_generated: u64,
    pub blocks_generated: u64,
    pub blocks_pruned: u64,
    pub decorations_placed: u64,
    pub decorations_pruned: u64,
    pub x_triggers: u64,
    pub z_triggers: u64,
}

impl StreamStats {
    fn absorb(&mut self, r: &StreamReport) {
        self.tiles_generated += r.tiles_generated as u64;
        self.blocks_generated += r.blocks_generated as u64;
        self.blocks_pruned += r.blocks_pruned as u64;
        self.decorations_placed += r.decorations_placed as u64;
        self.decorations_pruned += r.decorations_pruned as u64;
        self.x_triggers += r.x.is_some() as u64;
        self.z_triggers += r.z.is_some() as u64;
    }
}

pub struct StreamingController<R: Rng = StdRng> {
    params: WorldParams,
    state: StreamingState,
    blocks: BlockRegistry,
    decorations: DecorationRegistry,
    placer: DecorationPlacer<R>,
    stats: StreamStats,
}

impl<R: Rng> StreamingController<R> {
    pub fn new(params: WorldParams, placer: DecorationPlacer<R>) -> Self {
        Self::with_state(params, StreamingState::default(), placer)
    }

    pub fn with_state(
        params: WorldParams,
        state: StreamingState,
        placer: DecorationPlacer<R>,
    ) -> Self {
        Self {
            params,
            state,
            blocks: BlockRegistry::new(),
            decorations: DecorationRegistry::new(),
            placer,
            stats: StreamStats::default(),
        }
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    /// Swaps parameters for future generation. Tiles already in the scene are kept.
    pub fn set_params(&mut self, params: WorldParams) {
        log::info!(target: "stream", "streaming params replaced: {:?}", params.policy);
        self.params = params;
    }

    pub fn state(&self) -> StreamingState {
        self.state
    }

    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    pub fn decorations(&self) -> &DecorationRegistry {
        &self.decorations
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Start-up generation at the current offsets.
    pub fn bootstrap(&mut self, surface: &mut impl Surface) -> StreamReport {
        let mut report = StreamReport::default();
        let StreamingState { offset_x, offset_z } = self.state;
        self.lay_ground(offset_x, offset_z, surface, &mut report);
        if self.params.policy.decorate_origin {
            self.scatter(offset_x, offset_z, surface, &mut report);
        }
        log::info!(
            target: "stream",
            "bootstrap tile at ({offset_x:.2}, {offset_z:.2}): {} blocks, {} decorations",
            report.blocks_generated,
            report.decorations_placed
        );
        self.stats.absorb(&report);
        report
    }

    /// One frame of streaming against the camera position.
    pub fn update(&mut self, camera: Vec3, surface: &mut impl Surface) -> StreamReport {
        let mut report = StreamReport::default();
        let half = self.params.half_extent();

        if !camera.x.is_finite() || !camera.z.is_finite() {
            log::warn!(target: "stream", "camera position {camera:?} is not finite; streaming skipped");
            report.skipped_non_finite = true;
        }

        if camera.x.is_finite() && (camera.x - self.state.offset_x).abs() >= half {
            let old_offset = self.state.offset_x;
            self.state.offset_x = camera.x;
            let trigger = AxisTrigger {
                axis: Axis::X,
                old_offset,
                new_offset: camera.x,
            };
            self.shift(trigger, surface, &mut report);
            report.x = Some(trigger);
        }

        if camera.z.is_finite() && (camera.z - self.state.offset_z).abs() >= half {
            let old_offset = self.state.offset_z;
            self.state.offset_z = camera.z;
            let trigger = AxisTrigger {
                axis: Axis::Z,
                old_offset,
                new_offset: camera.z,
            };
            self.shift(trigger, surface, &mut report);
            report.z = Some(trigger);
        }

        self.stats.absorb(&report);
        report
    }

    /// Offsets are already updated when this runs, so a repeated trigger in the same
    /// region cannot fire again.
    fn shift(&mut self, trigger: AxisTrigger, surface: &mut impl Surface, report: &mut StreamReport) {
        let policy = self.params.policy;
        let StreamingState { offset_x, offset_z } = self.state;
        let (behind_x, behind_z) = match trigger.axis {
            Axis::X => (trigger.old_offset, offset_z),
            Axis::Z => (offset_x, trigger.old_offset),
        };
        let behind_key = TileKey::from_offsets(behind_x, behind_z);
        let look_behind = policy.look_behind == LookBehind::RegenerateOld;
        // Only the tile left behind can still have ground once a prune has run.
        let keep = if look_behind { vec![behind_key] } else { Vec::new() };

        log::info!(
            target: "stream",
            "{:?} trigger: offset {:.2} -> {:.2}; tile ({offset_x:.2}, {offset_z:.2})",
            trigger.axis,
            trigger.old_offset,
            trigger.new_offset
        );

        if policy.prune == PruneMode::Symmetric {
            self.prune(&keep, surface, report);
        }

        self.lay_ground(offset_x, offset_z, surface, report);
        self.scatter(offset_x, offset_z, surface, report);

        // Legacy pruning also drops the tile just laid, so its decorations go with it.
        if policy.prune == PruneMode::Legacy && trigger.axis == Axis::X {
            self.prune(&keep, surface, report);
        }

        if look_behind {
            self.lay_ground(behind_x, behind_z, surface, report);
        }
    }

    fn lay_ground(
        &mut self,
        offset_x: f32,
        offset_z: f32,
        surface: &mut impl Surface,
        report: &mut StreamReport,
    ) {
        let generator = GroundGenerator::new(&self.params);
        report.blocks_generated += generator.generate(offset_x, offset_z, &mut self.blocks, surface);
        report.tiles_generated += 1;
    }

    fn scatter(
        &mut self,
        offset_x: f32,
        offset_z: f32,
        surface: &mut impl Surface,
        report: &mut StreamReport,
    ) {
        let placed = self.placer.decorate(&self.params, offset_x, offset_z, surface);
        report.decorations_placed += placed.len();
        self.decorations
            .record(TileKey::from_offsets(offset_x, offset_z), placed);
    }

    fn prune(&mut self, keep: &[TileKey], surface: &mut impl Surface, report: &mut StreamReport) {
        let blocks = self.blocks.remove_all(surface);
        report.blocks_pruned += blocks;
        if self.params.policy.decorations == DecorationRetention::PruneWithGround {
            report.decorations_pruned += self.decorations.retain_tiles(keep, surface);
        }
        log::debug!(target: "stream", "pruned {blocks} ground blocks");
    }
}

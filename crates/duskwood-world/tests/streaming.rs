use duskwood_geom::Vec3;
use duskwood_scene::{MaterialKind, SceneGraph};
use duskwood_world::tile::tile_footprint;
use duskwood_world::{
    Axis, DecorationPlacer, DecorationRetention, LookBehind, PruneMode, StreamingController,
    StreamingPolicy, TileKey, WorldParams,
};

const TILE: usize = 2500;
const DECOS_PER_TILE: usize = 35;
const PRIMS_PER_TILE_DECOS: usize = 55;

fn controller(policy: StreamingPolicy) -> StreamingController {
    let params = WorldParams {
        policy,
        ..WorldParams::default()
    };
    StreamingController::new(params, DecorationPlacer::seeded(0x5EED))
}

fn cam(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 2.0, z)
}

fn assert_registry_in_scene(ctl: &StreamingController, scene: &SceneGraph) {
    assert!(ctl.blocks().iter().all(|b| scene.contains(b.handle)));
    assert_eq!(ctl.blocks().len(), scene.count_by_material(MaterialKind::Ground));
}

#[test]
fn x_trigger_boundary_is_inclusive() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);

    let r = ctl.update(cam(24.9, 0.0), &mut scene);
    assert!(r.x.is_none());
    assert!(r.is_idle());
    assert_eq!(ctl.state().offset_x, 0.0);

    let r = ctl.update(cam(25.0, 0.0), &mut scene);
    assert!(r.x.is_some());
    assert!(r.z.is_none());
}

#[test]
fn negative_direction_triggers_too() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    let r = ctl.update(cam(0.0, -25.0), &mut scene);
    let z = r.z.expect("z trigger");
    assert_eq!(z.axis, Axis::Z);
    assert_eq!(z.old_offset, 0.0);
    assert_eq!(z.new_offset, -25.0);
}

#[test]
fn offset_becomes_camera_position() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::legacy());
    ctl.bootstrap(&mut scene);
    ctl.update(cam(30.0, 0.0), &mut scene);
    assert_eq!(ctl.state().offset_x, 30.0);
    assert_eq!(ctl.state().offset_z, 0.0);

    // Same region again: no re-fire.
    let r = ctl.update(cam(31.0, 0.0), &mut scene);
    assert!(r.is_idle());
}

#[test]
fn legacy_bootstrap_lays_bare_ground() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::legacy());
    let r = ctl.bootstrap(&mut scene);
    assert_eq!(r.blocks_generated, TILE);
    assert_eq!(r.decorations_placed, 0);
    assert_eq!(scene.len(), TILE);
}

#[test]
fn legacy_x_trigger_keeps_only_the_abandoned_tile() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::legacy());
    ctl.bootstrap(&mut scene);

    let r = ctl.update(cam(30.0, 0.0), &mut scene);
    // new tile + old tile laid, then everything before the look-behind pruned
    assert_eq!(r.blocks_generated, 2 * TILE);
    assert_eq!(r.blocks_pruned, 2 * TILE);
    assert_eq!(r.decorations_placed, DECOS_PER_TILE);
    assert_eq!(r.decorations_pruned, 0);

    assert_eq!(ctl.blocks().len(), TILE);
    let origin = tile_footprint(0.0, 0.0, 50);
    assert!(ctl.blocks().iter().all(|b| origin.contains_xz(b.position)));
    assert_registry_in_scene(&ctl, &scene);
    assert_eq!(scene.len(), TILE + PRIMS_PER_TILE_DECOS);
}

#[test]
fn legacy_z_trigger_never_prunes() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::legacy());
    ctl.bootstrap(&mut scene);

    let r = ctl.update(cam(0.0, 30.0), &mut scene);
    assert_eq!(r.blocks_pruned, 0);
    // bootstrap tile, new tile, and a duplicate of the bootstrap tile
    assert_eq!(ctl.blocks().len(), 3 * TILE);
    assert_registry_in_scene(&ctl, &scene);

    let r = ctl.update(cam(0.0, 60.0), &mut scene);
    assert_eq!(r.blocks_pruned, 0);
    assert_eq!(ctl.blocks().len(), 5 * TILE);
}

#[test]
fn legacy_decorations_accumulate() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::legacy());
    ctl.bootstrap(&mut scene);
    for step in 1..=4 {
        ctl.update(cam(30.0 * step as f32, 0.0), &mut scene);
        assert_eq!(ctl.decorations().len(), DECOS_PER_TILE * step);
    }
    assert_eq!(scene.count_by_material(MaterialKind::Wolf), 5 * 4);
    assert_eq!(ctl.stats().decorations_pruned, 0);
}

#[test]
fn symmetric_policy_keeps_a_two_tile_window() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    let r = ctl.bootstrap(&mut scene);
    assert_eq!(r.decorations_placed, DECOS_PER_TILE);

    ctl.update(cam(30.0, 0.0), &mut scene);
    assert_eq!(ctl.blocks().len(), 2 * TILE);
    assert_eq!(ctl.decorations().len(), 2 * DECOS_PER_TILE);
    assert!(ctl.decorations().tile(TileKey::new(0, 0)).is_some());
    assert!(ctl.decorations().tile(TileKey::new(30, 0)).is_some());

    let r = ctl.update(cam(60.0, 0.0), &mut scene);
    assert_eq!(r.blocks_pruned, 2 * TILE);
    assert_eq!(r.decorations_pruned, DECOS_PER_TILE);
    assert!(ctl.decorations().tile(TileKey::new(0, 0)).is_none());
    assert_eq!(ctl.blocks().len(), 2 * TILE);
    assert_registry_in_scene(&ctl, &scene);
    assert_eq!(scene.len(), 2 * TILE + 2 * PRIMS_PER_TILE_DECOS);

    let here = tile_footprint(60.0, 0.0, 50);
    let behind = tile_footprint(30.0, 0.0, 50);
    assert!(
        ctl.blocks()
            .iter()
            .all(|b| here.contains_xz(b.position) || behind.contains_xz(b.position))
    );
}

#[test]
fn symmetric_policy_prunes_on_z_as_well() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    for step in 1..=3 {
        let r = ctl.update(cam(0.0, -30.0 * step as f32), &mut scene);
        assert!(r.blocks_pruned > 0);
        assert_eq!(ctl.blocks().len(), 2 * TILE);
    }
}

#[test]
fn without_look_behind_exactly_one_tile_is_live() {
    let policy = StreamingPolicy {
        look_behind: LookBehind::Off,
        ..StreamingPolicy::default()
    };
    let mut scene = SceneGraph::new();
    let mut ctl = controller(policy);
    ctl.bootstrap(&mut scene);
    ctl.update(cam(30.0, 0.0), &mut scene);
    assert_eq!(ctl.blocks().len(), TILE);
    assert_eq!(ctl.decorations().len(), DECOS_PER_TILE);
    assert_eq!(ctl.decorations().tile_count(), 1);
    assert_eq!(scene.len(), TILE + PRIMS_PER_TILE_DECOS);
}

#[test]
fn legacy_prune_with_retention_fix_drops_far_decorations() {
    let policy = StreamingPolicy {
        decorations: DecorationRetention::PruneWithGround,
        ..StreamingPolicy::legacy()
    };
    assert_eq!(policy.prune, PruneMode::Legacy);
    let mut scene = SceneGraph::new();
    let mut ctl = controller(policy);
    ctl.bootstrap(&mut scene);

    // The tile under the camera loses its ground in the same frame, and its
    // decorations with it.
    let r = ctl.update(cam(30.0, 0.0), &mut scene);
    assert_eq!(r.decorations_placed, DECOS_PER_TILE);
    assert_eq!(r.decorations_pruned, DECOS_PER_TILE);
    assert!(ctl.blocks().iter().all(|b| b.position.x < 25.0));
    assert!(ctl.decorations().tile(TileKey::from_offsets(30.0, 0.0)).is_none());
    assert_eq!(ctl.decorations().tile_count(), 0);
    assert_eq!(scene.count_by_material(MaterialKind::Rock), 0);

    let r = ctl.update(cam(60.0, 0.0), &mut scene);
    assert_eq!(r.decorations_pruned, DECOS_PER_TILE);
    assert!(ctl.decorations().is_empty());
}

#[test]
fn legacy_prune_keeps_decorations_of_the_tile_left_behind() {
    let policy = StreamingPolicy {
        decorations: DecorationRetention::PruneWithGround,
        decorate_origin: true,
        ..StreamingPolicy::legacy()
    };
    let mut scene = SceneGraph::new();
    let mut ctl = controller(policy);
    ctl.bootstrap(&mut scene);

    ctl.update(cam(30.0, 0.0), &mut scene);
    assert_eq!(
        ctl.decorations().tile(TileKey::from_offsets(0.0, 0.0)).map(<[_]>::len),
        Some(DECOS_PER_TILE)
    );
    assert_eq!(ctl.decorations().tile_count(), 1);
    assert_eq!(ctl.blocks().len(), TILE);

    // Next step leaves (30, 0) behind; it never kept decorations, so the origin's go too.
    let r = ctl.update(cam(60.0, 0.0), &mut scene);
    assert_eq!(r.decorations_pruned, 2 * DECOS_PER_TILE);
    assert!(ctl.decorations().is_empty());
}

#[test]
fn diagonal_move_fires_both_axes_in_one_frame() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    let r = ctl.update(cam(30.0, 30.0), &mut scene);
    assert!(r.x.is_some() && r.z.is_some());
    assert_eq!(ctl.state().offset_x, 30.0);
    assert_eq!(ctl.state().offset_z, 30.0);
    assert_eq!(r.decorations_placed, 2 * DECOS_PER_TILE);
    let stats = ctl.stats();
    assert_eq!((stats.x_triggers, stats.z_triggers), (1, 1));
}

#[test]
fn long_jump_leaves_a_gap() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    ctl.update(cam(200.0, 0.0), &mut scene);
    assert!(
        ctl.blocks()
            .iter()
            .all(|b| b.position.x < 25.0 || b.position.x >= 175.0)
    );
}

#[test]
fn non_finite_axis_is_skipped() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    let before = scene.len();

    let r = ctl.update(cam(f32::NAN, 0.0), &mut scene);
    assert!(r.skipped_non_finite);
    assert!(r.is_idle());
    assert_eq!(scene.len(), before);

    let r = ctl.update(cam(f32::INFINITY, 40.0), &mut scene);
    assert!(r.x.is_none());
    assert!(r.z.is_some());
    assert_eq!(ctl.state().offset_x, 0.0);
    assert_eq!(ctl.state().offset_z, 40.0);
}

#[test]
fn stats_accumulate_across_frames() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    ctl.update(cam(30.0, 0.0), &mut scene);
    ctl.update(cam(30.0, 30.0), &mut scene);
    let s = ctl.stats();
    assert_eq!(s.tiles_generated, 1 + 2 + 2);
    assert_eq!(s.blocks_generated, 5 * TILE as u64);
    assert_eq!(s.decorations_placed, 3 * DECOS_PER_TILE as u64);
}

#[test]
fn replaced_params_apply_to_the_next_tile() {
    let mut scene = SceneGraph::new();
    let mut ctl = controller(StreamingPolicy::default());
    ctl.bootstrap(&mut scene);
    let smaller = WorldParams {
        world_size: 10,
        ..ctl.params().clone()
    };
    ctl.set_params(smaller);
    let r = ctl.update(cam(5.0, 0.0), &mut scene);
    assert_eq!(r.blocks_pruned, TILE);
    assert_eq!(r.blocks_generated, 2 * 100);
}

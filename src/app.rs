use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use duskwood_render_raylib::{DrawStats, SceneRenderer, conv};
use duskwood_scene::{Environment, MaterialKind, SceneGraph};
use duskwood_world::{
    DecorationPlacer, StreamReport, StreamingController, StreamingPolicy, WorldParams,
    load_config_from_path,
};
use raylib::prelude::*;

use crate::camera::ViewerCamera;
use crate::controls::{DragTracker, gather_input};
use crate::event::{Event, EventEnvelope, EventQueue};
use crate::hud::{ButtonLayout, draw_stats};

/// Editors write a file in several bursts; wait this many frames before reloading.
const RELOAD_DEBOUNCE_TICKS: u64 = 15;

/// Command-line settings that win over whatever the config file says.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParamOverrides {
    pub legacy: bool,
    pub world_size: Option<u32>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: WorldParams) -> Result<WorldParams, Box<dyn Error>> {
        if self.legacy {
            params.policy = StreamingPolicy::legacy();
        }
        if let Some(ws) = self.world_size {
            params.world_size = ws;
        }
        params.validate()?;
        Ok(params)
    }
}

pub struct App {
    pub camera: ViewerCamera,
    pub scene: SceneGraph,
    pub streaming: StreamingController,
    pub queue: EventQueue,
    renderer: SceneRenderer,
    drag: DragTracker,
    show_stats: bool,
    config_path: Option<PathBuf>,
    overrides: ParamOverrides,
    reload_rx: Option<Receiver<()>>,
    reload_pending: bool,
    last_draw: DrawStats,
    last_report: StreamReport,
}

impl App {
    pub fn new(
        params: WorldParams,
        placer: DecorationPlacer,
        env: Environment,
        config_path: Option<PathBuf>,
        overrides: ParamOverrides,
        reload_rx: Option<Receiver<()>>,
    ) -> Self {
        let mut scene = SceneGraph::new();
        env.install(&mut scene);
        let mut streaming = StreamingController::new(params, placer);
        streaming.bootstrap(&mut scene);
        Self {
            camera: ViewerCamera::new(Vector3::new(0.0, 2.0, 5.0)),
            scene,
            streaming,
            queue: EventQueue::new(),
            renderer: SceneRenderer::new(env),
            drag: DragTracker::default(),
            show_stats: true,
            config_path,
            overrides,
            reload_rx,
            reload_pending: false,
            last_draw: DrawStats::default(),
            last_report: StreamReport::default(),
        }
    }

    /// Input, then camera, then streaming. Everything a trigger generates lands before
    /// this frame is drawn.
    pub fn frame(&mut self, rl: &mut RaylibHandle) {
        let buttons = ButtonLayout::for_screen(rl.get_screen_width(), rl.get_screen_height());
        gather_input(rl, &buttons, &mut self.drag, &mut self.queue);
        self.poll_config_changes();
        self.drain_events();
        self.stream();
        self.queue.advance_tick();
    }

    fn poll_config_changes(&mut self) {
        let Some(rx) = &self.reload_rx else {
            return;
        };
        let changed = rx.try_iter().count() > 0;
        if changed && !self.reload_pending {
            self.queue
                .emit_after(RELOAD_DEBOUNCE_TICKS, Event::ReloadConfig);
            self.reload_pending = true;
        }
    }

    pub fn drain_events(&mut self) {
        while let Some(env) = self.queue.pop_ready() {
            self.handle_event(env);
        }
    }

    fn handle_event(&mut self, env: EventEnvelope) {
        let tick = env.tick;
        match env.kind {
            Event::Nudge(n) => {
                log::trace!(target: "events", "[tick {}] Nudge {:?}", tick, n);
                self.camera.nudge(n);
            }
            Event::Look { dx, dy } => {
                log::trace!(target: "events", "[tick {}] Look dx={:.1} dy={:.1}", tick, dx, dy);
                self.camera.look(dx, dy);
            }
            Event::ToggleStats => {
                log::info!(target: "events", "[tick {}] StatsToggled", tick);
                self.show_stats = !self.show_stats;
            }
            Event::ToggleFogCulling => {
                log::info!(target: "events", "[tick {}] FogCullingToggled", tick);
                self.renderer.fog_culling = !self.renderer.fog_culling;
            }
            Event::ReloadConfig => {
                log::info!(target: "events", "[tick {}] ReloadConfig", tick);
                self.reload_pending = false;
                self.reload_config();
            }
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = &self.config_path else {
            log::warn!("config reload requested but no config file is in use");
            return;
        };
        match load_config_from_path(path).and_then(|p| self.overrides.apply(p)) {
            Ok(params) => {
                self.streaming.set_params(params);
                log::info!("config reloaded from {}", path.display());
                log::info!("Existing tiles unchanged; new tiles use updated params");
            }
            Err(e) => {
                log::warn!("config reload failed ({}): {}", path.display(), e);
            }
        }
    }

    pub fn stream(&mut self) -> StreamReport {
        let eye = conv::vec3_from_rl(self.camera.position);
        let report = self.streaming.update(eye, &mut self.scene);
        if !report.is_idle() {
            log::debug!(
                "streamed: +{} blocks, -{} blocks, +{} decorations, -{} decorations; scene holds {}",
                report.blocks_generated,
                report.blocks_pruned,
                report.decorations_placed,
                report.decorations_pruned,
                self.scene.len()
            );
        }
        self.last_report = report;
        report
    }

    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let buttons = ButtonLayout::for_screen(rl.get_screen_width(), rl.get_screen_height());
        let hovered = buttons.hit(rl.get_mouse_position());
        let eye = conv::vec3_from_rl(self.camera.position);
        let lines = self.stats_lines();

        let mut d = rl.begin_drawing(thread);
        d.clear_background(self.renderer.background());
        {
            let mut d3 = d.begin_mode3D(self.camera.to_camera3d());
            self.last_draw = self.renderer.draw_scene(&mut d3, &self.scene, eye);
        }
        buttons.draw(&mut d, hovered);
        if self.show_stats {
            let mut all = vec![format!("FPS {}", d.get_fps())];
            all.extend(lines);
            draw_stats(&mut d, &all);
        }
    }

    /// Live primitive counts per material, e.g. `ground 2500 trunk 20 ...`.
    fn material_line(&self) -> String {
        MaterialKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", kind.label(), self.scene.count_by_material(kind)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stats_lines(&self) -> Vec<String> {
        let p = self.camera.position;
        let st = self.streaming.state();
        let totals = self.streaming.stats();
        vec![
            format!("camera ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z),
            format!("offset ({:.1}, {:.1})", st.offset_x, st.offset_z),
            format!(
                "ground {} blocks | decorations {} in {} tiles",
                self.streaming.blocks().len(),
                self.streaming.decorations().len(),
                self.streaming.decorations().tile_count()
            ),
            format!(
                "scene {} prims | drawn {} culled {}",
                self.scene.len(),
                self.last_draw.drawn,
                self.last_draw.culled
            ),
            self.material_line(),
            format!(
                "triggers x={} z={} | tiles {}",
                totals.x_triggers, totals.z_triggers, totals.tiles_generated
            ),
            format!("policy {:?}", self.streaming.params().policy.prune),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Nudge;

    fn app(params: WorldParams) -> App {
        App::new(
            params,
            DecorationPlacer::seeded(9),
            Environment::nightfall(),
            None,
            ParamOverrides::default(),
            None,
        )
    }

    #[test]
    fn startup_scene_has_moon_ground_and_origin_forest() {
        let a = app(WorldParams::default());
        assert_eq!(a.scene.count_by_material(MaterialKind::Moon), 1);
        assert_eq!(a.scene.count_by_material(MaterialKind::Ground), 2500);
        assert_eq!(a.streaming.decorations().len(), 35);
    }

    #[test]
    fn holding_right_streams_a_new_tile_at_the_boundary() {
        let mut a = app(WorldParams::default());
        for _ in 0..49 {
            a.queue.emit_now(Event::Nudge(Nudge::Right));
        }
        a.drain_events();
        assert!(a.stream().is_idle());

        a.queue.emit_now(Event::Nudge(Nudge::Right));
        a.drain_events();
        let r = a.stream();
        assert_eq!(r.x.map(|t| t.new_offset), Some(25.0));
        assert_eq!(a.streaming.state().offset_x, 25.0);
    }

    #[test]
    fn legacy_override_replaces_policy() {
        let o = ParamOverrides {
            legacy: true,
            world_size: Some(20),
        };
        let p = o.apply(WorldParams::default()).unwrap();
        assert_eq!(p.policy, StreamingPolicy::legacy());
        assert_eq!(p.world_size, 20);
        let bad = ParamOverrides {
            legacy: false,
            world_size: Some(0),
        };
        assert!(bad.apply(WorldParams::default()).is_err());
    }

    #[test]
    fn reload_without_config_keeps_params() {
        let mut a = app(WorldParams::default());
        a.queue.emit_now(Event::ReloadConfig);
        a.drain_events();
        assert_eq!(a.streaming.params(), &WorldParams::default());
    }

    #[test]
    fn stats_toggle_and_lines() {
        let mut a = app(WorldParams::default());
        assert!(a.show_stats);
        a.queue.emit_now(Event::ToggleStats);
        a.drain_events();
        assert!(!a.show_stats);
        let lines = a.stats_lines();
        assert!(lines[2].starts_with("ground 2500 blocks"));
        assert_eq!(
            lines[4],
            "ground 2500 trunk 20 leaves 20 rock 10 wolf 5 moon 1"
        );
    }
}

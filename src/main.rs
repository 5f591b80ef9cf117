mod app;
mod camera;
mod controls;
mod event;
mod hud;
mod logging;
mod watch;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use duskwood_scene::Environment;
use duskwood_world::{DecorationPlacer, WorldParams, load_config_from_path};

use crate::app::{App, ParamOverrides};

#[derive(Parser, Debug)]
#[command(name = "duskwood", about = "Night-time forest viewer with streamed ground tiles")]
struct Args {
    /// World config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for decoration placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Reproduce the original streaming quirks
    #[arg(long)]
    legacy: bool,
    /// Blocks per tile edge
    #[arg(long)]
    world_size: Option<u32>,
    #[arg(long, default_value_t = 1280)]
    width: i32,
    #[arg(long, default_value_t = 720)]
    height: i32,
    /// Also write debug-level logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Reload the config file when it changes on disk
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let overrides = ParamOverrides {
        legacy: args.legacy,
        world_size: args.world_size,
    };
    let base = match &args.config {
        Some(path) => load_config_from_path(path).map_err(|e| {
            log::error!("failed to load {}: {}", path.display(), e);
            e
        })?,
        None => WorldParams::default(),
    };
    let params = overrides.apply(base)?;
    log::info!(
        "world: {}x{} blocks per tile, policy {:?}",
        params.world_size,
        params.world_size,
        params.policy
    );

    let placer = match args.seed {
        Some(seed) => {
            log::info!("decoration seed {}", seed);
            DecorationPlacer::seeded(seed)
        }
        None => DecorationPlacer::from_entropy(),
    };
    let reload_rx = match (&args.config, args.watch) {
        (Some(path), true) => Some(watch::spawn_config_watcher(path.clone())),
        (None, true) => {
            log::warn!("--watch has no effect without --config");
            None
        }
        _ => None,
    };

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Duskwood")
        .resizable()
        .msaa_4x()
        .build();
    rl.set_target_fps(args.fps);

    let mut app = App::new(
        params,
        placer,
        Environment::nightfall(),
        args.config.clone(),
        overrides,
        reload_rx,
    );

    while !rl.window_should_close() {
        app.frame(&mut rl);
        app.render(&mut rl, &thread);
    }

    let totals = app.streaming.stats();
    log::info!(
        "session: {} tiles generated, {} blocks pruned, {} decorations placed",
        totals.tiles_generated,
        totals.blocks_pruned,
        totals.decorations_placed
    );
    Ok(())
}

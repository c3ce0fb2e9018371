mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stagehand_assets::{Material, Mesh, Renderable, ResourceRegistry};
use stagehand_camera::Camera;
use stagehand_input::KeyboardState;
use stagehand_kernel::{Motion, Scene};
use stagehand_render::{DebugTextRenderer, Frame, Renderer};
use tracing_subscriber::EnvFilter;

use crate::config::StageConfig;

#[derive(Parser)]
#[command(name = "stagehand-cli", about = "Headless driver for the stagehand frame loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default configuration as YAML
    Config,
    /// Run the frame loop with scripted camera input
    Run {
        /// YAML or JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Print a text frame every N frames (0 prints only the last)
        #[arg(long, default_value = "30")]
        print_every: u32,
    },
}

/// Held keys and a mouse sample for one frame of the demo script.
struct ScriptedInput {
    keys: &'static [&'static str],
    mouse: (bool, f32, f32),
}

/// Walk forward, drag-look to the right, turn left while rising, then reset
/// on the final frame.
fn scripted_input(frame: u32, frames: u32) -> ScriptedInput {
    if frame + 1 == frames {
        return ScriptedInput {
            keys: &["R"],
            mouse: (false, 0.0, 0.0),
        };
    }
    let x = frame as f32 * 4.0;
    match frame * 3 / frames.max(1) {
        0 => ScriptedInput {
            keys: &["W"],
            mouse: (false, x, 0.0),
        },
        1 => ScriptedInput {
            keys: &[],
            mouse: (true, x, 0.0),
        },
        _ => ScriptedInput {
            keys: &["LEFT", "E"],
            mouse: (false, x, 0.0),
        },
    }
}

fn run(config: StageConfig, frames: u32, dt: f32, print_every: u32) -> anyhow::Result<()> {
    let mut resources = ResourceRegistry::new();
    let renderable = Renderable {
        mesh: resources.register_mesh(Mesh::unit_quad())?,
        material: resources.register_material(Material::default()),
    };

    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(config.scene.seed);
    let ids = scene.spawn_scattered(config.scene.count, renderable, config.scene.extent, &mut rng)?;
    let motion = Motion {
        rotation: config.scene.spin,
        wobble: config.scene.wobble,
        ..Motion::default()
    };
    for id in ids {
        scene.entity_mut(id)?.set_motion(motion);
    }

    let mut camera = Camera::looking(
        config.camera_start.position,
        config.camera_start.orientation,
        config.camera,
    )
    .context("building camera")?;
    let mut keyboard = KeyboardState::new();
    let renderer = DebugTextRenderer::new();

    tracing::info!(
        frames,
        entities = scene.len(),
        seed = config.scene.seed,
        "starting frame loop"
    );
    let mut total = 0.0;
    for frame in 0..frames {
        let input = scripted_input(frame, frames);
        keyboard.release_all();
        for key in input.keys {
            keyboard.press(key);
        }
        let (button, x, y) = input.mouse;
        camera.update_mouse(button, x, y);

        let actions = keyboard.actions(&config.bindings);
        config.controller.apply(&mut camera, &actions, dt);
        total += dt;
        scene.update(dt, total);

        let last = frame + 1 == frames;
        let due = print_every != 0 && frame % print_every == 0;
        if due || last {
            let captured = Frame::capture(&scene, &camera);
            print!("{}", renderer.render(&captured, &resources)?);
        }
    }
    tracing::info!(tick = scene.tick(), "frame loop finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stagehand-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", stagehand_kernel::crate_info());
            println!("input: {}", stagehand_input::crate_info());
            println!("camera: {}", stagehand_camera::crate_info());
            println!("assets: {}", stagehand_assets::crate_info());
            println!("render: {}", stagehand_render::crate_info());
            println!("common: {}", stagehand_common::crate_info());
        }
        Commands::Config => {
            print!("{}", StageConfig::default().to_yaml()?);
        }
        Commands::Run {
            config,
            frames,
            dt,
            print_every,
        } => {
            let config = match config {
                Some(path) => StageConfig::load(&path)?,
                None => StageConfig::default(),
            };
            run(config, frames, dt, print_every)?;
        }
    }

    Ok(())
}

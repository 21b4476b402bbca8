use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use isleworld_assets::ModelLibrary;
use isleworld_input::PointerAction;
use isleworld_render::{DebugTextRenderer, Renderer};
use isleworld_scene::{SceneConfig, SceneEvent, SceneOrchestrator, SceneProps};
use isleworld_tools::SceneInspector;

const DEFAULT_CATEGORIES: &str = "tech,life,projects,about,contact";

#[derive(Parser)]
#[command(name = "isleworld-cli", about = "Headless driver for the island scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SceneArgs {
    /// RNG seed for stars and creature timing
    #[arg(short, long, default_value = "42")]
    seed: u64,
    /// Comma-separated island categories
    #[arg(short, long, value_delimiter = ',', default_value = DEFAULT_CATEGORIES)]
    categories: Vec<String>,
    /// Start at night
    #[arg(long)]
    night: bool,
    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: f32,
    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: f32,
    /// YAML scene config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory of `<key>.gltf` models
    #[arg(long)]
    models: Option<PathBuf>,
}

impl SceneArgs {
    fn mount(&self) -> anyhow::Result<SceneOrchestrator> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading scene config {}", path.display()))?,
            None => SceneConfig::default(),
        };
        if let Some(dir) = &self.models {
            config.model_dir = Some(dir.clone());
        }
        let library = match &config.model_dir {
            Some(dir) => ModelLibrary::with_root(dir),
            None => ModelLibrary::new(),
        };
        let props = SceneProps::new(self.categories.iter().cloned())
            .with_day(!self.night)
            .with_viewport(self.width, self.height);
        Ok(SceneOrchestrator::mount(props, config, self.seed, library))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Simulate the scene and print the last frame
    Run {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f32,
        /// Flip day/night every N frames (0 disables)
        #[arg(long, default_value = "0")]
        toggle_every: u64,
        /// Print the last frame as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the same seed twice and compare state hashes
    Replay {
        #[arg(short, long, default_value = "600")]
        frames: u64,
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Wait for the creature to jump, then click it through the camera
    Catch {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(long, default_value = "3600")]
        max_frames: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            println!("isleworld-cli v{}", env!("CARGO_PKG_VERSION"));
            for name in [
                "common", "schedule", "ocean", "sky", "assets", "input", "islands", "creature",
                "render", "scene", "tools",
            ] {
                println!("  isleworld-{name}");
            }
            let defaults = SceneConfig::default();
            println!(
                "defaults: wave every {}ms, hover every {}ms, bloom from {}px",
                defaults.budgets.wave_interval_ms,
                defaults.budgets.hover_interval_ms,
                defaults.bloom.min_viewport_width
            );
        }
        Commands::Run {
            scene,
            frames,
            fps,
            toggle_every,
            json,
        } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let mut orchestrator = scene.mount()?;
            let delta = 1.0 / fps;
            for frame in 1..=frames {
                orchestrator.tick(delta);
                if toggle_every > 0 && frame % toggle_every == 0 {
                    let is_day = !orchestrator.is_day();
                    orchestrator.set_day(is_day);
                }
                for event in orchestrator.drain_events() {
                    tracing::info!(frame, ?event, "scene event");
                }
            }

            let snapshot = orchestrator.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", SceneInspector::summary(&orchestrator));
                print!("{}", DebugTextRenderer::verbose().render(&snapshot));
            }
            orchestrator.unmount();
        }
        Commands::Replay { frames, seed } => {
            println!("Deterministic replay: seed={seed}, frames={frames}");
            let categories: Vec<&str> = DEFAULT_CATEGORIES.split(',').collect();
            let run = || {
                let mut scene = SceneOrchestrator::mount(
                    SceneProps::new(categories.iter().copied()),
                    SceneConfig::default(),
                    seed,
                    ModelLibrary::new(),
                );
                for _ in 0..frames {
                    scene.tick(1.0 / 60.0);
                }
                scene.state_hash()
            };
            let first = run();
            let second = run();
            println!("Run 1: hash={first:#018x}");
            println!("Run 2: hash={second:#018x}");
            println!("Match: {}", if first == second { "OK" } else { "MISMATCH" });
            anyhow::ensure!(first == second, "replay diverged");
        }
        Commands::Catch { seed, max_frames } => {
            let mut scene = SceneOrchestrator::mount(
                SceneProps::new(DEFAULT_CATEGORIES.split(',')),
                SceneConfig::default(),
                seed,
                ModelLibrary::new(),
            );
            let min_y = scene.config().creature.clickable_min_y;
            for frame in 1..=max_frames {
                scene.tick(1.0 / 60.0);
                let Some(creature) = scene.creature() else {
                    break;
                };
                let position = creature.transform().position;
                if !creature.state().is_jumping || position.y < min_y {
                    continue;
                }
                let Some(ray) = scene
                    .screen_position(position)
                    .and_then(|pixel| scene.pointer_ray(pixel))
                else {
                    continue;
                };
                scene.pointer(PointerAction::Click(ray));
                if scene.drain_events().contains(&SceneEvent::CreatureClick) {
                    println!(
                        "Caught the creature on frame {frame} at ({:.1}, {:.1}, {:.1})",
                        position.x, position.y, position.z
                    );
                    return Ok(());
                }
            }
            anyhow::bail!("creature not caught within {max_frames} frames");
        }
    }

    Ok(())
}

use std::{f64::consts::TAU, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scenery::{
    ActionList, Actor, ActorKind, App, AppConfig, Color, Ease, MoveTo, Owner, Paint,
    ParticleEmitter, Property, RecordingSurface, Task, Timeline, Wait,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scenery", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in demo scene headless and report what was drawn.
    Demo(DemoArgs),
    /// Print the default app configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// App configuration JSON; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the draw commands of the last frame as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Summary {
    frames: u32,
    elapsed: f64,
    actors: usize,
    draw_commands: usize,
    stats: scenery::FrameStats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&AppConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => AppConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    let mut app = App::new(config)?;
    build_demo(&mut app)?;

    let mut surface = RecordingSurface::new();
    let mut elapsed = 0.0;
    for _ in 0..args.frames {
        surface.clear();
        elapsed += app.frame(&mut surface)?;
    }

    if let Some(path) = &args.dump {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = std::fs::File::create(path)
            .with_context(|| format!("create dump '{}'", path.display()))?;
        serde_json::to_writer_pretty(f, surface.commands())
            .with_context(|| format!("write dump '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    let summary = Summary {
        frames: args.frames,
        elapsed,
        actors: app.world.actor_count(),
        draw_commands: surface.commands().len(),
        stats: app.world.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// A spinning box that patrols left and right, a burst of particles and an app heartbeat.
fn build_demo(app: &mut App) -> anyhow::Result<()> {
    let world = &mut app.world;
    let scene = world.create_scene("demo");

    let patrol = world.add_actor(
        scene,
        Actor::new(ActorKind::rect())
            .with_name("patrol")
            .with_size(80.0, 80.0)
            .with_paint(Paint::fill(Color::rgb(230, 120, 40))),
    )?;

    let mut spin = Timeline::new("spin");
    spin.add_keyframes(patrol, Property::Rotation, vec![0.0, TAU], vec![0.0, 2.0], None)?
        .set_repeat(0);
    world
        .timelines(Owner::Actor(patrol))
        .context("patrol actor has no timelines")?
        .add(spin);

    world
        .action_lists(Owner::Actor(patrol))
        .context("patrol actor has no action lists")?
        .add(
            ActionList::new("patrol")
                .with_repeat(0)
                .then(MoveTo::new(200.0, 0.0, 1.0, Ease::InOutQuad))
                .then(Wait::new(0.25))
                .then(MoveTo::new(-200.0, 0.0, 1.0, Ease::InOutQuad))
                .then(Wait::new(0.25)),
        );

    world.add_actor(
        scene,
        Actor::new(ActorKind::Particles(ParticleEmitter::explosion(
            7,
            Color::rgb(250, 220, 90),
        )))
        .with_name("sparks")
        .with_pos(0.0, -150.0),
    )?;

    world.managers.tasks.add(
        Task::new("heartbeat", |ctx| {
            tracing::debug!(beat = ctx.loops, actors = ctx.world.actor_count(), "heartbeat");
            Ok(())
        })
        .with_wait(0.5)
        .with_repeat(0),
    );
    Ok(())
}

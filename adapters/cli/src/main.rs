#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Chaser experience.

mod config;
mod scene;

use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use chaser_core::{Variant, WELCOME_BANNER};
use chaser_rendering::{FrameControl, RenderingBackend};
use chaser_rendering_macroquad::MacroquadBackend;
use chaser_simulation::Simulation;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use self::scene::SpritePaths;

#[derive(Debug, Parser)]
#[command(name = "chaser")]
#[command(about = "Dodge the wandering NPCs for as long as you can")]
struct Cli {
    /// Game variant to play.
    #[arg(long, value_enum, default_value_t = VariantArg::Continuous)]
    variant: VariantArg,

    /// Seed for NPC placement and wandering; defaults to the current UNIX time.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the variant's rules.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Player image used by the continuous variant.
    #[arg(long, value_name = "PATH", default_value = "assets/player.png")]
    player_sprite: PathBuf,

    /// NPC image used by the continuous variant.
    #[arg(long, value_name = "PATH", default_value = "assets/npc.png")]
    npc_sprite: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Continuous,
    Discrete,
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Continuous => Variant::Continuous,
            VariantArg::Discrete => Variant::Discrete,
        }
    }
}

/// Entry point for the Chaser command-line interface.
fn main() {
    init_tracing();
    let cli = Cli::parse();
    info!("{WELCOME_BANNER}");

    if let Err(error) = run(cli) {
        error!("{error:#}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let variant = Variant::from(cli.variant);
    let rules = config::load_rules(variant, cli.config.as_deref())
        .context("failed to load game configuration")?;
    let seed = cli.seed.unwrap_or_else(default_seed);
    info!(?variant, seed, "starting game");

    let mut simulation =
        Simulation::new(rules.clone(), seed).context("failed to create the world")?;
    let sprites = SpritePaths {
        player: cli.player_sprite,
        npc: cli.npc_sprite,
    };
    let presentation = scene::presentation(&rules, &sprites, simulation.world());

    let backend = MacroquadBackend::new()
        .with_vsync(false)
        .with_frame_delay(rules.frame_delay());

    backend.run(presentation, move |input, scene| {
        let state = simulation.step(&scene::tick_input(input));
        scene::populate(scene, simulation.world());
        if state.is_ended() {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    })
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

//! Headless driver: runs a scripted session at a fixed frame rate and logs
//! what happens. Spawn requests are fulfilled immediately; save requests are
//! printed as JSON.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use log::{error, info};

use drakoria::{BalanceData, GameEvent, GameResult, InputSnapshot, PlayerSnapshot, SimConfig, Simulation};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run a headless Drakoria session", long_about = None)]
struct Args {
    /// Seconds of simulated time to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,
    /// Character class of the new player
    #[arg(long, default_value = "swordsman")]
    class: String,
    /// Player name
    #[arg(long, default_value = "Hero")]
    name: String,
    /// RNG seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation config JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Balance dataset JSON; defaults to the built-in dataset
    #[arg(long, value_name = "FILE")]
    balance: Option<PathBuf>,
    /// Serve puffin profiling data on the default port
    #[arg(long)]
    profile: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> GameResult<()> {
    let _server = if args.profile {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                info!("puffin server listening on {}", addr);
                Some(server)
            }
            Err(e) => {
                error!("could not start puffin server: {}", e);
                None
            }
        }
    } else {
        None
    };

    let data = match &args.balance {
        Some(path) => BalanceData::load(path)?,
        None => BalanceData::embedded()?,
    };
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let snapshot = PlayerSnapshot::new_character(&args.name, &args.class, &data)?;
    let mut sim = Simulation::new(snapshot, data, config)?;
    sim.populate_initial_enemies();

    let dt = 1.0 / args.fps as f32;
    let frames = (args.seconds.max(0.0) * args.fps as f32) as u64;
    for frame in 0..frames {
        puffin::GlobalProfiler::lock().new_frame();

        let input = scripted_input(&sim, frame);
        let events = sim.step(dt, &input);
        sim.apply_spawn_requests(&events);
        report(&events);
    }

    report(&sim.shutdown());
    info!(
        "finished: level {} with {} exp, {} enemies alive",
        sim.player.level,
        sim.player.experience,
        sim.world.live_count()
    );
    Ok(())
}

/// Walk a slow circle and swing at anything in reach.
fn scripted_input(sim: &Simulation, frame: u64) -> InputSnapshot {
    let t = frame as f32 * 0.01;
    let nearest = sim
        .world
        .nearest_enemy_within(sim.player.position, drakoria::constants::PLAYER_ATTACK_RADIUS);
    InputSnapshot {
        move_vector: Vec2::from_angle(t),
        attack_pressed: nearest.is_some(),
        pointer_world_position: None,
    }
}

fn report(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::SaveRequested(snapshot) => match serde_json::to_string(snapshot) {
                Ok(json) => info!("save: {}", json),
                Err(e) => error!("could not serialize save: {}", e),
            },
            GameEvent::PlayerLeveledUp { new_level } => info!("level up! now level {}", new_level),
            GameEvent::PlayerDefeated => info!("player defeated"),
            _ => {}
        }
    }
}

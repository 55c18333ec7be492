/*
 * Flocking Simulation - Headless Runner
 *
 * Spawns a prey flock and a few hunters, runs a fixed number of ticks and
 * logs how the population develops. Set RUST_LOG=debug for per-tick output.
 */

use std::path::PathBuf;

use clap::Parser;
use flocking::obstacles::BoxObstacle;
use flocking::{Role, Simulation, SimulationConfig, SimulationError, Vec3};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "flocking", about = "Run a headless flocking simulation")]
struct Args {
    /// Number of prey to spawn.
    #[arg(long, default_value_t = 200)]
    prey: usize,
    /// Number of hunters to spawn.
    #[arg(long, default_value_t = 3)]
    hunters: usize,
    /// Number of neutral flockers to spawn.
    #[arg(long, default_value_t = 0)]
    flockers: usize,
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    #[arg(long)]
    seed: Option<u64>,
    /// JSON config file; command-line seed overrides the file's.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Box obstacle as `cx,cy,cz,hx,hy,hz` (center and half extents). Repeatable.
    #[arg(long = "obstacle", value_parser = parse_obstacle)]
    obstacles: Vec<BoxObstacle>,
    /// Log a population summary every this many ticks.
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> Result<(), SimulationError> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut simulation = Simulation::new(config)?;
    simulation.initialize();

    for obstacle in &args.obstacles {
        simulation.add_obstacle(obstacle.center, obstacle.half_extents);
    }
    simulation.spawn_population(Role::Prey, args.prey);
    simulation.spawn_population(Role::Hunter, args.hunters);
    simulation.spawn_population(Role::Flocker, args.flockers);

    let report_every = args.report_every.max(1);
    for _ in 0..args.ticks {
        let stats = simulation.update(args.dt);

        if stats.tick % report_every == 0 {
            info!(
                tick = stats.tick,
                prey = stats.population.prey,
                hunters = stats.population.hunters,
                flockers = stats.population.flockers,
                tick_time_us = stats.elapsed.as_micros() as u64,
                "population"
            );
        }

        if simulation.is_empty() {
            warn!(tick = stats.tick, "population died out");
            break;
        }
    }

    let counts = simulation.role_counts();
    info!(
        ticks = simulation.ticks(),
        prey = counts.prey,
        hunters = counts.hunters,
        flockers = counts.flockers,
        "run finished"
    );
    simulation.shutdown();

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn parse_obstacle(value: &str) -> Result<BoxObstacle, String> {
    let numbers = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid number in obstacle `{value}`: {err}"))?;

    match numbers.as_slice() {
        [cx, cy, cz, hx, hy, hz] => Ok(BoxObstacle::new(
            Vec3::new(*cx, *cy, *cz),
            Vec3::new(*hx, *hy, *hz),
        )),
        _ => Err(format!("obstacle `{value}` needs 6 comma-separated numbers")),
    }
}

//! Headless runner: drives a simulation at a fixed tick rate and logs
//! progress instead of rendering.
//!
//! ```text
//! voxel-life-headless [config.yaml] [--ticks N]
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voxel_life::{Simulation, SimulationConfig};

const DEFAULT_TICKS: u64 = 600;

struct Args {
    config: Option<PathBuf>,
    ticks: u64,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        config: None,
        ticks: DEFAULT_TICKS,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                args.ticks = value.parse()?;
            }
            _ if args.config.is_none() => args.config = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    info!(
        x = config.extents.x,
        y = config.extents.y,
        z = config.extents.z,
        lower = config.rules.lower,
        upper = config.rules.upper,
        worker_threads = config.dispatch.worker_threads,
        ticks = args.ticks,
        "configuration loaded"
    );

    let mut sim = Simulation::new(&config)?;
    let interval = Duration::from_millis(config.tick_interval_ms);
    let mut stale_total = 0usize;

    for tick in 0..args.ticks {
        let report = sim.tick()?;
        stale_total += report.stale;

        if let Some(fault) = &report.fault {
            warn!(tick, error = %fault, "transition failed, retrying");
        }
        if let Some(id) = report.adopted {
            info!(
                tick,
                request = %id,
                generation = sim.generations_adopted(),
                alive = sim.generation().alive_count(),
                "generation adopted"
            );
        }
        if report.reseeded {
            info!(tick, alive = sim.generation().alive_count(), "extinct, reseeded");
        }

        thread::sleep(interval);
    }

    info!(
        generations = sim.generations_adopted(),
        alive = sim.generation().alive_count(),
        stale = stale_total,
        "run finished"
    );
    Ok(())
}

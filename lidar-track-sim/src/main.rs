use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use lidar_track_sim::{SimConfig, Simulation};

/// Run the LIDAR reacquisition tracker against a scripted target
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario file (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of host ticks to simulate
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Number of forward-facing sensors
    #[arg(short, long)]
    sensors: Option<u32>,

    /// Seconds per host tick
    #[arg(long)]
    tick_seconds: Option<f64>,

    /// Print one JSON object per tick instead of text
    #[arg(long)]
    json: bool,

    /// Print the effective scenario as JSON and exit
    #[arg(long)]
    dump_config: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Unable to load scenario {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(sensors) = cli.sensors {
        config.sensor_count = sensors;
    }
    if let Some(tick_seconds) = cli.tick_seconds {
        config.tick_seconds = tick_seconds;
    }

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut sim = Simulation::new(&config).context("Invalid scenario")?;
    let mut reacquired = 0;
    let mut lost = 0;

    for _ in 0..config.ticks {
        let report = sim.step()?;
        if report.is_reacquired() {
            reacquired += 1;
        } else if matches!(report.outcome, "exhausted" | "noSensors") {
            lost += 1;
        }

        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "[{:>4}] {:<10} probes={:<4} error={:>8.2}m  {}",
                report.tick,
                report.outcome,
                report.probes,
                report.error,
                report.status.to_string().replace('\n', "  ")
            );
        }
    }

    log::info!(
        "{} cycles reacquired, {} lost, {} probes issued",
        reacquired,
        lost,
        sim.sensors().total_probes()
    );

    Ok(())
}

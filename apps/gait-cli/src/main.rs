mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use gait_common::Transform;
use gait_kernel::{ConfigFormat, Simulation, SimulationConfig, TickEvent};
use gait_motor::PlaneMotor;
use tracing_subscriber::EnvFilter;

use crate::script::Script;

#[derive(Parser)]
#[command(name = "gait-cli", about = "Run scripted character locomotion scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Step a scripted scenario and print one line per tick
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "240")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// YAML or JSON simulation config; defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Input script to play
        #[arg(short, long, value_enum, default_value = "walk")]
        script: Script,
        /// Print tick events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration
    Config {
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for ConfigFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => ConfigFormat::Yaml,
            Format::Json => ConfigFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("gait-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gait_common::crate_info());
            println!("input: {}", gait_input::crate_info());
            println!("motor: {}", gait_motor::crate_info());
            println!("locomotion: {}", gait_locomotion::crate_info());
            println!("camera: {}", gait_camera::crate_info());
            println!("kernel: {}", gait_kernel::crate_info());
        }
        Commands::Run {
            ticks,
            dt,
            config,
            script,
            json,
        } => {
            anyhow::ensure!(dt.is_finite() && dt > 0.0, "dt must be positive, got {dt}");
            let config = match config {
                Some(path) => SimulationConfig::from_path(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SimulationConfig::default(),
            };

            let sim = run_script(&config, script, ticks, dt)?;
            for event in sim.events() {
                if json {
                    println!("{}", serde_json::to_string(event)?);
                } else {
                    println!("{}", describe(event));
                }
            }
            println!("hash={:#018x}", sim.state_hash());
        }
        Commands::Config { format } => {
            print!("{}", SimulationConfig::default().render(format.into())?);
        }
    }

    Ok(())
}

fn run_script(
    config: &SimulationConfig,
    script: Script,
    ticks: u64,
    dt: f32,
) -> anyhow::Result<Simulation<PlaneMotor>> {
    let mut sim = Simulation::on_plane(config, Transform::default())?;
    tracing::info!(?script, ticks, dt, "running scenario");
    for tick in 1..=ticks {
        sim.step(dt, &script.input(tick));
    }
    Ok(sim)
}

fn describe(event: &TickEvent) -> String {
    let p = event.position;
    let v = event.velocity;
    format!(
        "tick={:>5} pos=({:>8.3}, {:>7.3}, {:>8.3}) vel=({:>7.3}, {:>7.3}, {:>7.3}) grounded={} jumps={}",
        event.tick, p.x, p.y, p.z, v.x, v.y, v.z, event.grounded, event.jumps_used
    )
}

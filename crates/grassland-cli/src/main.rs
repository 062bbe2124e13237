use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grassland_core::{SimConfig, World};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

const WARMUP_TICKS: usize = 10;
const BENCHMARK_TICKS: usize = 500;

#[derive(Parser)]
#[command(name = "grassland")]
#[command(about = "Rabbits-and-grass grid simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and report sampled population/grass metrics
    Run {
        /// Path to config file (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the run summary (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 1000)]
        ticks: usize,

        /// Sample metrics every Nth tick
        #[arg(long, default_value_t = 10)]
        sample_every: usize,
    },
    /// Measure ticks-per-second across a few world sizes
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config file {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("failed to parse config")
        }
        None => Ok(SimConfig::default()),
    }
}

fn run_benchmark(width: usize, height: usize, initial_rabbits: usize) -> Result<()> {
    let config = SimConfig {
        width,
        height,
        initial_rabbits,
        ..SimConfig::default()
    };
    let mut world = World::new(config).context("benchmark world construction failed")?;

    for _ in 0..WARMUP_TICKS {
        world.tick();
    }

    let start = Instant::now();
    for _ in 0..BENCHMARK_TICKS {
        world.tick();
    }
    let elapsed = start.elapsed();

    let avg_tick_us = elapsed.as_micros() as f64 / BENCHMARK_TICKS as f64;
    let ticks_per_sec = 1_000_000.0 / avg_tick_us.max(f64::MIN_POSITIVE);
    println!("--- {width}x{height} grid, {initial_rabbits} rabbits seeded ---");
    println!("  Avg tick:  {avg_tick_us:.1} us ({ticks_per_sec:.0} ticks/sec)");
    println!(
        "  Now alive: {} rabbits, {} grass units",
        world.living_rabbit_count(),
        world.total_grass()
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p grassland-cli --release -- benchmark");
                eprintln!();
            }
            for (width, height, rabbits) in [(50, 50, 100), (100, 100, 400), (200, 200, 1600)] {
                run_benchmark(width, height, rabbits)?;
            }
        }
        Commands::Run {
            config,
            out,
            ticks,
            sample_every,
        } => {
            let sim_config = load_config(config.as_ref())?;
            sim_config.validate().context("config validation error")?;

            println!(
                "Simulating {ticks} ticks on a {}x{} grid ({} rabbits seeded)...",
                sim_config.width, sim_config.height, sim_config.initial_rabbits
            );

            let mut world = World::new(sim_config).context("world construction failed")?;
            let summary = world
                .run(ticks, sample_every)
                .context("simulation run failed")?;

            for sample in &summary.samples {
                println!(
                    "tick {:>6}: {:>6} rabbits, {:>8} grass, {:>4} births, {:>4} deaths, mean energy {:.1}",
                    sample.tick,
                    sample.alive_count,
                    sample.grass_total,
                    sample.birth_count,
                    sample.death_count,
                    sample.energy_mean,
                );
            }
            println!(
                "Run complete. Final alive: {}",
                summary.final_alive_count
            );

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(&summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Summary saved to {}", summary_path.display());
            }
        }
    }
    Ok(())
}

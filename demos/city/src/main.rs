//! city — runs the ct traffic simulation on a text map.
//!
//! Loads a map (and optionally a legend and a JSON `SimConfig`), prints the
//! starting grid, runs until saturation or the tick limit, writes
//! `car_snapshots.csv` / `tick_summaries.csv`, and prints the final grid.
//!
//! ```text
//! RUST_LOG=debug cargo run -p city -- --ticks 300 --cars 20
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ct_agent::CarState;
use ct_behavior::BehaviorModel;
use ct_core::{Coord, Direction, SimConfig, Tick};
use ct_map::{load_map, Legend};
use ct_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ct_sim::{Metrics, Sim, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "city")]
#[command(about = "Grid city traffic simulation")]
struct Cli {
    /// Map file, one row per line, top row first
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/maps/base.txt"))]
    map: PathBuf,

    /// JSON legend; omitted fields keep the default symbols
    #[arg(long)]
    legend: Option<PathBuf>,

    /// JSON simulation config; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cars placed on random roads before the first tick
    #[arg(long)]
    cars: Option<usize>,

    /// Ticks between spawn waves
    #[arg(long)]
    spawn_interval: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound on ticks to run
    #[arg(long, default_value = "500")]
    ticks: u64,

    /// Directory for the CSV files
    #[arg(long, default_value = "output/city")]
    output: PathBuf,

    /// Skip printing the grid before and after the run
    #[arg(long)]
    no_draw: bool,
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, metrics: &Metrics) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, metrics);
    }

    fn on_snapshot(&mut self, tick: Tick, cars: &[CarState]) {
        self.snapshot_rows += cars.len();
        self.inner.on_snapshot(tick, cars);
    }

    fn on_sim_end(&mut self, final_tick: Tick, metrics: &Metrics) {
        info!("simulation ended at {final_tick} with {} cars on the road", metrics.current_count);
        self.inner.on_sim_end(final_tick, metrics);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig { initial_car_count: 10, ..SimConfig::default() },
    };
    if let Some(n) = cli.cars {
        config.initial_car_count = n;
    }
    if let Some(n) = cli.spawn_interval {
        config.spawn_interval = n;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn load_legend(path: Option<&Path>) -> Result<Legend> {
    match path {
        Some(p) => Legend::from_json_file(p).with_context(|| format!("loading legend {}", p.display())),
        None => Ok(Legend::default()),
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Render the grid top row first: `C` car, `G`/`R` light, then the static map.
fn draw<B: BehaviorModel>(sim: &Sim<B>) -> String {
    let grid = sim.grid();
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let at = Coord::new(x, y);
            let ch = if grid.car_at(at).is_some() {
                'C'
            } else if let Some(light) = grid.light_at(at) {
                if sim.signals().is_green(light) { 'G' } else { 'R' }
            } else if grid.has_obstacle(at) {
                '#'
            } else if grid.destination_at(at).is_some() {
                'D'
            } else {
                match grid.road_direction(at) {
                    Some(Direction::Up)    => '^',
                    Some(Direction::Down)  => 'v',
                    Some(Direction::Left)  => '<',
                    Some(Direction::Right) => '>',
                    None                   => '.',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let legend = load_legend(cli.legend.as_deref())?;
    let map = load_map(&cli.map, &legend).with_context(|| format!("loading map {}", cli.map.display()))?;

    println!("=== city — grid traffic simulation ===");
    println!(
        "Map: {} ({}x{}, {} road cells)  |  Cars: {}  |  Spawn every {} ticks  |  Seed: {}",
        cli.map.display(),
        map.width(),
        map.height(),
        map.road_count(),
        config.initial_car_count,
        config.spawn_interval,
        config.seed,
    );
    println!();

    let mut sim = Sim::initialize(config, &map)?;
    if !cli.no_draw {
        println!("Initial state:");
        print!("{}", draw(&sim));
        println!();
    }

    let writer = CsvWriter::new(&cli.output)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let ran = sim.run(cli.ticks, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    let m = sim.metrics();
    println!("Simulation complete in {:.3} s ({ran} ticks)", elapsed.as_secs_f64());
    println!("  car_snapshots.csv  : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!();
    println!("{:<14} {:>8}", "Spawned", m.total_spawned);
    println!("{:<14} {:>8}", "Arrived", m.total_arrived);
    println!("{:<14} {:>8}", "Unreachable", m.total_unreachable);
    println!("{:<14} {:>8}", "On the road", m.current_count);
    println!("{:<14} {:>8}", "Saturated", if m.running { "no" } else { "yes" });

    if !cli.no_draw {
        println!();
        println!("Final state ({}):", m.tick_count);
        print!("{}", draw(&sim));
    }
    Ok(())
}

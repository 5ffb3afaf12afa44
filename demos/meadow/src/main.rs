//! meadow — a small needs-driven village on a grid.
//!
//! Loads a scenario (the bundled `meadow.toml` unless `--scenario` is given),
//! runs it with the needs scheduler, and writes `agent_snapshots.csv` and
//! `tick_summaries.csv` to the output directory.
//!
//! ```text
//! RUST_LOG=ns_sim=debug cargo run -p meadow -- --ticks 800 --seed 7
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ns_agent::AgentStore;
use ns_behavior::{Mind, NeedsScheduler, OrderStatus};
use ns_core::Tick;
use ns_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ns_sim::{ScenarioConfig, SimBuilder, SimObserver, TickSummary};

const BUILTIN_SCENARIO: &str = include_str!("../meadow.toml");

#[derive(Parser, Debug)]
#[command(name = "meadow")]
#[command(about = "Run a needs-driven agent scenario and write CSV output")]
struct Args {
    /// Scenario TOML file; the bundled meadow is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads for the decide phase (needs the `parallel` feature)
    #[arg(long)]
    threads: Option<usize>,

    /// Directory for the CSV files
    #[arg(long, default_value = "output/meadow")]
    out: PathBuf,

    /// Print the resolved scenario as TOML and exit
    #[arg(long)]
    dump_scenario: bool,
}

// ── Observer wrapper with run totals ─────────────────────────────────────────

struct TotalsObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    deaths:    usize,
    collapses: usize,
    effects:   usize,
    blocked:   usize,
    last:      TickSummary,
}

impl<W: OutputWriter> TotalsObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self {
            inner,
            deaths:    0,
            collapses: 0,
            effects:   0,
            blocked:   0,
            last:      TickSummary::default(),
        }
    }
}

impl<W: OutputWriter> SimObserver for TotalsObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.deaths += summary.deaths;
        self.collapses += summary.collapses;
        self.effects += summary.effects;
        self.blocked += summary.blocked;
        self.last = *summary;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, minds: &[Mind]) {
        self.inner.on_snapshot(tick, agents, minds);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::from_str(BUILTIN_SCENARIO).context("parsing bundled scenario")?,
    };
    if let Some(ticks) = args.ticks {
        scenario.sim.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        scenario.sim.seed = seed;
    }
    if args.threads.is_some() {
        scenario.sim.num_threads = args.threads;
    }
    Ok(scenario)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenario = load_scenario(&args)?;

    if args.dump_scenario {
        print!("{}", scenario.to_toml()?);
        return Ok(());
    }

    println!("=== meadow ===");
    println!(
        "World {}×{}  |  Agents: {}  |  Orders: {}  |  Ticks: {}  |  Seed: {}",
        scenario.world.width,
        scenario.world.height,
        scenario.agents.len(),
        scenario.orders.len(),
        scenario.sim.total_ticks,
        scenario.sim.seed,
    );
    println!();

    let mut sim = SimBuilder::from_scenario(&scenario, NeedsScheduler)?.build()?;

    let writer = CsvWriter::new(&args.out)
        .with_context(|| format!("opening output in {}", args.out.display()))?;
    let mut obs = TotalsObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output incomplete");
    }
    info!(secs = elapsed.as_secs_f64(), "run complete");

    println!("Simulated {} ticks in {:.3} s", sim.clock.current_tick.0, elapsed.as_secs_f64());
    println!(
        "  alive {}  |  deaths {}  |  collapses {}  |  effects {}  |  blocked steps {}",
        obs.last.alive, obs.deaths, obs.collapses, obs.effects, obs.blocked
    );
    println!("  output: {}", args.out.display());
    println!();

    println!(
        "{:<6} {:<9} {:>7} {:>7} {:>7} {:>7} {:>7}  {:<16}",
        "Agent", "Pos", "Hunger", "Thirst", "Energy", "Health", "Mood", "Activity"
    );
    println!("{}", "-".repeat(74));
    for id in sim.agents.agent_ids() {
        let i = id.index();
        let pos = sim.agents.pos[i];
        let s = &sim.agents.stats[i];
        println!(
            "{:<6} {:<9} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {:<16}",
            i,
            format!("({},{})", pos.x, pos.y),
            s.hunger,
            s.thirst,
            s.energy,
            s.health,
            s.mood,
            sim.minds[i].activity,
        );
    }
    println!();

    for order in sim.orders.iter() {
        let status = match order.status {
            OrderStatus::Open => "open".to_owned(),
            OrderStatus::Assigned(a) => format!("assigned to {}", a.0),
            OrderStatus::Paused(a) => format!("paused ({})", a.0),
            OrderStatus::Done => "done".to_owned(),
        };
        println!("order {:<3} {:<24} {status}", order.id.0, format!("{:?}", order.kind));
    }

    Ok(())
}

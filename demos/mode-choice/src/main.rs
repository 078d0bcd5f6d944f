//! mode-choice — smallest end-to-end metasim scenario.
//!
//! A population of travelers each ride until an arrival callback fires, then
//! choose a mode for the last leg (walk, bike, car) and start their activity.
//! Biking is only eligible while it is dry; a shower starts mid-run.  Driving
//! schedules a follow-up callback that counts parked cars.
//!
//! ```text
//! cargo run -p mode-choice -- [config.json]
//! RUST_LOG=debug cargo run -p mode-choice
//! ```
//!
//! Writes `transitions.csv`, `tick_summaries.csv` and `graph.dot` to
//! `output/mode-choice/`.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ms_agent::PopulationBuilder;
use ms_choice::WeightedRandom;
use ms_core::{AgentId, RandomSource, SimConfig, SimEvent, SimRng, Tick};
use ms_graph::{AgentView, GraphBuilder, TransitionGraph, TransitionSpec};
use ms_output::{CsvWriter, OutputWriter, SimOutputObserver, write_dot};
use ms_sim::{SimBuilder, SimObserver, TransitionEvent};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:        usize = 1_000;
const SEED:               u64   = 42;
const TICK_DURATION_SECS: u32   = 60; // 1 tick = 1 minute
const SIM_TICKS:          u64   = 180;
const MAX_RIDE_TICKS:     usize = 90;
const RAIN_STARTS:        Tick  = Tick(45);
const OUTPUT_DIR:         &str  = "output/mode-choice";

// ── Shared context ────────────────────────────────────────────────────────────

/// World state read by eligibility predicates and written by callbacks.
struct Town {
    arrived:     Vec<bool>,
    raining:     bool,
    cars_parked: usize,
}

impl Town {
    fn new(agents: usize) -> Self {
        Self { arrived: vec![false; agents], raining: false, cars_parked: 0 }
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Traveling → ChoosingMode → InActivity, with three competing last-leg modes.
fn build_graph() -> Result<TransitionGraph<Town>> {
    let mut b = GraphBuilder::new();
    let traveling = b.add_state("Traveling")?;
    let choosing = b.add_state("ChoosingMode")?;
    let active = b.add_terminal_state("InActivity")?;

    b.add_transition(
        traveling,
        choosing,
        TransitionSpec::when(|v: &AgentView<'_, Town>| v.ctx.arrived[v.agent.index()])
            .named("arrive"),
    )?;
    b.add_transition(choosing, active, TransitionSpec::always().named("walk").with_weight(2.0))?;
    b.add_transition(
        choosing,
        active,
        TransitionSpec::when(|v: &AgentView<'_, Town>| !v.ctx.raining)
            .named("bike")
            .with_weight(3.0),
    )?;
    b.add_transition(
        choosing,
        active,
        TransitionSpec::always()
            .named("car")
            .with_weight(1.0)
            .with_effect(|v: &AgentView<'_, Town>, port| {
                // Parking takes a couple of minutes.
                port.schedule_event(
                    v.tick + 2,
                    SimEvent::callback(|_, town: &mut Town| town.cars_parked += 1),
                )?;
                Ok(())
            }),
    )?;

    Ok(b.validate()?)
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            start_unix_secs:           1_700_000_000, // fixed reference Monday 00:00 UTC
            tick_duration_secs:        TICK_DURATION_SECS,
            total_ticks:               SIM_TICKS,
            seed:                      SEED,
            reevaluate_interval_ticks: 1,
        });
    };
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let config: SimConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Observer wrapper to count modes ───────────────────────────────────────────

struct ModeCounter<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    modes: BTreeMap<String, usize>,
}

impl<W: OutputWriter> SimObserver for ModeCounter<W> {
    fn on_transition(&mut self, event: &TransitionEvent<'_>) {
        if event.to == "InActivity" {
            *self.modes.entry(event.label.to_owned()).or_default() += 1;
        }
        self.inner.on_transition(event);
    }

    fn on_tick_end(&mut self, tick: Tick, woken: usize, transitions: usize) {
        self.inner.on_tick_end(tick, woken, transitions);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Set RUST_LOG=debug to see every transition.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    println!("=== mode-choice — metasim ===");
    println!(
        "Agents: {AGENT_COUNT}  |  Ticks: {}  |  Seed: {}",
        config.total_ticks, config.seed
    );

    // 1. Graph, shared by every agent.
    let graph = Arc::new(build_graph()?);
    println!(
        "Graph: {} states, {} transitions",
        graph.state_count(),
        graph.transition_count()
    );

    // 2. Population.
    let (agents, rngs) =
        PopulationBuilder::new(AGENT_COUNT, config.seed, Arc::clone(&graph), Arc::new(WeightedRandom))
            .build()?;

    // 3. Arrival callbacks at random ticks, plus the shower.
    let mut builder = SimBuilder::new(config.clone(), Town::new(AGENT_COUNT), agents, rngs);
    let mut rng = SimRng::new(config.seed);
    for i in 0..AGENT_COUNT {
        let at = Tick(1 + rng.next_int(MAX_RIDE_TICKS)? as u64);
        builder = builder.schedule(
            at,
            SimEvent::callback(move |_, town: &mut Town| town.arrived[i] = true),
        );
    }
    builder = builder.schedule(
        RAIN_STARTS,
        SimEvent::callback(|tick, town: &mut Town| {
            info!(%tick, "rain starts");
            town.raining = true;
        }),
    );
    let mut sim = builder.build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let dir = Path::new(OUTPUT_DIR);
    write_dot(&*graph, File::create(dir.join("graph.dot"))?)?;
    let writer = CsvWriter::new(dir)?;
    let mut obs = ModeCounter {
        inner: SimOutputObserver::new(writer, &config),
        modes: BTreeMap::new(),
    };

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s at {}", elapsed.as_secs_f64(), sim.clock);
    println!("  finished agents : {} / {AGENT_COUNT}", sim.finished_count());
    println!("  cars parked     : {}", sim.ctx().cars_parked);
    println!();
    println!("{:<8} {:>8}", "Mode", "Agents");
    println!("{}", "-".repeat(17));
    for (mode, count) in &obs.modes {
        println!("{mode:<8} {count:>8}");
    }

    let still_riding = (0..AGENT_COUNT)
        .filter_map(|i| sim.agent(AgentId(i as u32)))
        .filter(|a| !a.is_terminal())
        .count();
    if still_riding > 0 {
        println!("{still_riding} agents had not reached an activity by the end of the run");
    }

    Ok(())
}

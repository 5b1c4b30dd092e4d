//! Eco Runner entry point
//!
//! Headless driver: runs sessions under the autopilot on a fixed-step
//! accumulator and reports how they went.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use eco_runner::Settings;
use eco_runner::autopilot::Autopilot;
use eco_runner::consts::*;
use eco_runner::renderer::{Snapshot, shapes};
use eco_runner::sim::{GameEvent, GameState, tick};

/// Wall-clock length of one presented frame
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame the accumulator will absorb
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless Eco Runner demo played by an autopilot", long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for a reproducible run (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulation ticks to run
    #[arg(short, long, default_value_t = 3600, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: u64,

    /// Print the final frame snapshot as JSON
    #[arg(long)]
    dump_snapshot: bool,
}

#[derive(Debug, Default)]
struct Stats {
    sessions: u32,
    best_score: u32,
    lives_lost: u32,
    monsters_killed: u32,
    correct_bins: u32,
    wrong_bins: u32,
    extra_lives: u32,
    throws_dropped: u32,
}

struct Demo {
    state: GameState,
    pilot: Autopilot,
    accumulator: f32,
    ticks_run: u64,
    stats: Stats,
}

impl Demo {
    fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::new(settings),
            pilot: Autopilot::new(settings.autopilot.clone()),
            accumulator: 0.0,
            ticks_run: 0,
            stats: Stats::default(),
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32, tick_budget: u64) {
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.ticks_run < tick_budget {
            let input = self.pilot.next_input(&self.state);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.ticks_run += 1;

            self.record_events();
        }
    }

    fn record_events(&mut self) {
        let stats = &mut self.stats;
        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
            match event {
                GameEvent::SessionStarted => stats.sessions += 1,
                GameEvent::LifeLost { .. } => stats.lives_lost += 1,
                GameEvent::MonsterKilled { .. } => stats.monsters_killed += 1,
                GameEvent::CorrectBin { .. } => stats.correct_bins += 1,
                GameEvent::WrongBin { .. } => stats.wrong_bins += 1,
                GameEvent::ExtraLife => stats.extra_lives += 1,
                GameEvent::ThrowDropped => stats.throws_dropped += 1,
                GameEvent::GameOver { score } => {
                    log::info!("Game over with {} points", score);
                    stats.best_score = stats.best_score.max(score);
                }
                GameEvent::Jumped
                | GameEvent::Thrown { .. }
                | GameEvent::MonsterResisted { .. }
                | GameEvent::ExtraLifeForfeited => {}
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let mut demo = Demo::new(&settings);
    log::info!("Eco Runner starting (seed {})", demo.state.seed);

    while demo.ticks_run < cli.ticks {
        demo.update(FRAME_DT, cli.ticks);
    }

    let state = &demo.state;
    let stats = &demo.stats;
    let best = stats.best_score.max(state.score);
    println!("seed:            {}", state.seed);
    println!("ticks:           {}", demo.ticks_run);
    println!("sessions:        {}", stats.sessions);
    println!("phase:           {:?}", state.phase);
    println!("score:           {} (best {})", state.score, best);
    println!("lives:           {}", state.lives);
    println!("lives lost:      {}", stats.lives_lost);
    println!("extra lives:     {}", stats.extra_lives);
    println!("monsters killed: {}", stats.monsters_killed);
    println!("sorted:          {} right, {} wrong", stats.correct_bins, stats.wrong_bins);
    println!("throws dropped:  {}", stats.throws_dropped);

    let snapshot = Snapshot::capture(state);
    let vertices = shapes::frame(&snapshot);
    log::info!(
        "Final frame: {} sprites, {} vertices ({} bytes)",
        snapshot.sprites.len(),
        vertices.len(),
        bytemuck::cast_slice::<_, u8>(vertices.as_slice()).len()
    );

    if cli.dump_snapshot {
        let json = serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}

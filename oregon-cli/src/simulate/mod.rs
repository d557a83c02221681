//! Automated play: run whole trips under a built-in policy and tally the
//! endings.

pub mod policy;
pub mod reports;

use std::convert::Infallible;

use anyhow::{Context, Result};
use oregon_game::{
    LossCause, SaveRecord, ScriptedConsole, TrailConfig, TrailEngine, TrailRng, TripStatus,
    TripStorage, TurnOutcome,
};
use serde::Serialize;

pub use policy::{Decision, Strategy, TrailPolicy};

/// Storage that drops every save; simulated trips never persist.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardStorage;

impl TripStorage for DiscardStorage {
    type Error = Infallible;

    fn save_trip(&self, _record: &SaveRecord) -> Result<(), Self::Error> {
        Ok(())
    }

    fn load_trip(&self) -> Result<Option<SaveRecord>, Self::Error> {
        Ok(None)
    }

    fn delete_trip(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunResult {
    Won,
    PartyDead,
    Destitute,
    /// Hit the turn cap without an ending.
    Stalled,
}

impl RunResult {
    const fn from_status(status: TripStatus) -> Self {
        match status {
            TripStatus::Won => Self::Won,
            TripStatus::Lost(LossCause::PartyDead) => Self::PartyDead,
            TripStatus::Lost(LossCause::Destitute) => Self::Destitute,
            TripStatus::Playing => Self::Stalled,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::PartyDead => "party dead",
            Self::Destitute => "destitute",
            Self::Stalled => "stalled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub seed: u64,
    pub iteration: u32,
    pub strategy: Strategy,
    pub result: RunResult,
    pub turns: u32,
    pub days: u32,
    pub miles: u32,
    pub survivors: u32,
    pub party_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub runs: usize,
    pub wins: usize,
    pub party_dead: usize,
    pub destitute: usize,
    pub stalled: usize,
    pub win_rate: f64,
    pub average_days: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub seeds: Vec<u64>,
    pub iterations: u32,
    pub strategy: Strategy,
    pub max_turns: u32,
}

/// Parse a comma-separated seed list.
///
/// # Errors
///
/// Returns an error naming the first token that is not a `u64`.
pub fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed `{token}`"))
        })
        .collect()
}

/// Seed used for a given iteration; iteration 0 replays the seed itself.
#[must_use]
pub fn iteration_seed(seed: u64, iteration: u32) -> u64 {
    seed.wrapping_add(u64::from(iteration))
}

/// Play one trip to the end (or the turn cap) under `policy`.
pub fn run_trip(
    cfg: &TrailConfig,
    seed: u64,
    policy: &mut dyn TrailPolicy,
    max_turns: u32,
) -> (RunResult, u32, oregon_game::TripSummary) {
    let engine = TrailEngine::new(cfg.clone(), DiscardStorage);
    let names = (1..=cfg.party_size).map(oregon_game::party::default_name);
    let mut trip = engine.start_with_names(names);
    let mut rng = TrailRng::from_user_seed(seed);

    let mut turns = 0;
    while turns < max_turns && !trip.status().is_terminal() {
        turns += 1;
        let Decision { action, replies } = policy.decide(trip.state(), trip.cfg());
        let mut console = ScriptedConsole::new(replies);
        if trip.apply(action, &mut rng, &mut console, engine.storage()) == TurnOutcome::Quit {
            break;
        }
    }
    log::debug!(
        "{} seed {seed}: {} after {turns} turns ({} draws)",
        policy.name(),
        trip.status(),
        rng.draws()
    );
    (RunResult::from_status(trip.status()), turns, trip.summary())
}

pub fn run_simulation(cfg: &TrailConfig, plan: &SimulationPlan) -> Vec<RunRecord> {
    let mut records = Vec::new();
    for &base in &plan.seeds {
        for iteration in 0..plan.iterations {
            let seed = iteration_seed(base, iteration);
            let mut policy = plan.strategy.create_policy();
            let (result, turns, summary) = run_trip(cfg, seed, policy.as_mut(), plan.max_turns);
            records.push(RunRecord {
                seed,
                iteration,
                strategy: plan.strategy,
                result,
                turns,
                days: summary.days,
                miles: summary.miles,
                survivors: summary.survivors,
                party_size: summary.party_size,
            });
        }
    }
    records
}

#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[RunRecord]) -> SimulationSummary {
    let count = |wanted: RunResult| records.iter().filter(|r| r.result == wanted).count();
    let runs = records.len();
    let wins = count(RunResult::Won);
    let (win_rate, average_days) = if runs == 0 {
        (0.0, 0.0)
    } else {
        let total_days: u64 = records.iter().map(|r| u64::from(r.days)).sum();
        (wins as f64 / runs as f64, total_days as f64 / runs as f64)
    };
    SimulationSummary {
        runs,
        wins,
        party_dead: count(RunResult::PartyDead),
        destitute: count(RunResult::Destitute),
        stalled: count(RunResult::Stalled),
        win_rate,
        average_days,
    }
}

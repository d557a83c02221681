mod simulate;
mod stdio;
mod storage;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use oregon_game::{TrailConfig, TrailEngine, TrailRng, TurnOutcome};
use simulate::{SimulationPlan, Strategy, parse_seeds, run_simulation, summarize};
use stdio::StdConsole;
use storage::JsonFileStorage;

/// Upper bound on `simulate --iterations` per seed.
const MAX_ITERATIONS: u32 = 10_000;

#[derive(Debug, Parser)]
#[command(name = "oregon", version)]
#[command(about = "Lead a wagon party along the Oregon Trail")]
struct Args {
    /// Seed for the trail's random events (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Where `save` writes and the load prompt reads
    #[arg(long, global = true, default_value = "ot_save.json")]
    save_file: PathBuf,

    /// JSON file overriding trail rules and starting supplies
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play interactively (the default)
    Play,
    /// Play whole trips automatically with a built-in strategy
    Simulate(SimulateArgs),
}

#[derive(Debug, ClapArgs)]
struct SimulateArgs {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Trips per seed; each iteration advances the seed by one
    #[arg(long, default_value_t = 1)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_ITERATIONS)))]
    iterations: u32,

    #[arg(long, value_enum, default_value_t = Strategy::Steady)]
    strategy: Strategy,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Turn limit per trip
    #[arg(long, default_value_t = 2_000)]
    max_turns: u32,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let cfg = load_config(args.config.as_deref())?;

    match args.command {
        Some(Command::Simulate(ref sim)) => simulate(&cfg, args.seed, sim),
        Some(Command::Play) | None => play(cfg, args.seed, &args.save_file),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TrailConfig> {
    let Some(path) = path else {
        return Ok(TrailConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg = TrailConfig::from_json(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

fn play(cfg: TrailConfig, seed: Option<u64>, save_file: &Path) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    println!("{}", "=== Oregon Trail ===".bright_yellow().bold());
    println!("{}", format!("Seed: {seed}").dimmed());
    log::info!("starting trip with seed {seed}, save file {}", save_file.display());

    let engine = TrailEngine::new(cfg, JsonFileStorage::new(save_file));
    let mut rng = TrailRng::from_user_seed(seed);
    let mut console = StdConsole::stdio();
    let outcome = engine.run(&mut rng, &mut console);
    log::info!("trip finished: {outcome:?} after {} draws", rng.draws());
    if let TurnOutcome::Ended(status) = outcome {
        log::debug!("final status {status}");
    }
    Ok(())
}

fn simulate(cfg: &TrailConfig, seed: Option<u64>, sim: &SimulateArgs) -> Result<()> {
    let mut seeds = parse_seeds(&sim.seeds)?;
    if let Some(seed) = seed {
        seeds = vec![seed];
    }
    let plan = SimulationPlan {
        seeds,
        iterations: sim.iterations,
        strategy: sim.strategy,
        max_turns: sim.max_turns,
    };

    if sim.report == "console" && sim.output.is_none() {
        println!("{}", "🐂 Oregon Trail Simulator".bright_cyan().bold());
        println!("{}", "=========================".cyan());
    }
    let records = run_simulation(cfg, &plan);
    let summary = summarize(&records);

    let mut output_target = OutputTarget::new(sim.output.clone())?;
    match sim.report.as_str() {
        "json" => simulate::reports::generate_json_report(&mut output_target, &records, &summary)?,
        _ => simulate::reports::generate_console_report(&mut output_target, &records, &summary)?,
    }
    output_target.flush()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(io::stdout())))
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File(writer) => writer.flush(),
        }
    }
}

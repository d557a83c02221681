use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{RunRecord, RunResult, SimulationSummary};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a SimulationSummary,
    records: &'a [RunRecord],
}

pub fn generate_json_report<W: Write>(
    out: &mut W,
    records: &[RunRecord],
    summary: &SimulationSummary,
) -> Result<()> {
    let report = JsonReport { summary, records };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    records: &[RunRecord],
    summary: &SimulationSummary,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;
    writeln!(out, "Runs: {}", summary.runs)?;
    writeln!(out, "Won: {}", summary.wins.to_string().green())?;
    writeln!(out, "Party dead: {}", summary.party_dead.to_string().red())?;
    writeln!(out, "Destitute: {}", summary.destitute.to_string().red())?;
    if summary.stalled > 0 {
        writeln!(out, "Stalled: {}", summary.stalled.to_string().yellow())?;
    }
    writeln!(out, "Win rate: {:.1}%", summary.win_rate * 100.0)?;
    writeln!(out, "Average days: {:.1}", summary.average_days)?;
    writeln!(out)?;

    for record in records {
        let status = match record.result {
            RunResult::Won => "✅ WON ".green(),
            RunResult::PartyDead | RunResult::Destitute => "❌ LOST".red(),
            RunResult::Stalled => "⏸  STALL".yellow(),
        };
        writeln!(
            out,
            "{status} seed {} [{}] {} - {} days, {} mi, {}/{} survivors",
            record.seed,
            record.strategy,
            record.result.label(),
            record.days,
            record.miles,
            record.survivors,
            record.party_size
        )?;
    }
    Ok(())
}

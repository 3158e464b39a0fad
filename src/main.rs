//! # Rowing Tide Analyzer Entry Point
//!
//! This binary reads an analysis input document (tide predictions plus
//! weather observations for one day), runs the viability analysis, and
//! prints the daily report. It supports an ASCII report for the terminal
//! (default), raw JSON output for the presentation layer (`--json`), and a
//! "what slot covers time X" lookup (`--at HH:mm`).

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use rowing_tide_lib::config::Config;
use rowing_tide_lib::{renderer, report, AnalysisInput};
use std::env;
use std::fs;
use std::process::ExitCode;

const USAGE: &str = "usage: rowing-tide-analyzer <input.json> [--json] [--at HH:mm]";

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let json_mode = args.iter().any(|a| a == "--json");
    let lookup_time = args
        .iter()
        .position(|a| a == "--at")
        .map(|i| {
            args.get(i + 1)
                .cloned()
                .context("--at requires an HH:mm argument")
        })
        .transpose()?;

    let input_path = args
        .iter()
        .enumerate()
        .filter(|(i, a)| {
            !a.starts_with("--")
                && !matches!(args.get(i.wrapping_sub(1)), Some(prev) if prev == "--at")
        })
        .map(|(_, a)| a.clone())
        .next()
        .with_context(|| USAGE.to_string())?;

    let raw = fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read input file {input_path}"))?;
    let input: AnalysisInput = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse analysis input from {input_path}"))?;

    let report = report::analyze(&input)?;

    if let Some(raw_time) = lookup_time {
        let time = rowing_tide_lib::parse_clock_time(&raw_time)?;
        match report.slot_covering(time) {
            Some(slot) => println!(
                "{} está na janela {}-{} ({}, pontuação {:.1})",
                raw_time,
                slot.start_time.format("%H:%M"),
                slot.end_time.format("%H:%M"),
                slot.classification,
                slot.score
            ),
            None => println!("{raw_time} está fora de todas as janelas candidatas"),
        }
        return Ok(());
    }

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let config = Config::load();
        renderer::draw_ascii(&report, &config);
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

//! # Report Rendering
//!
//! Renders a [`RowingConditionsOutput`] to ASCII terminal output for the
//! development/operations workflow. The presentation layer proper consumes
//! the JSON contract; this renderer exists so a coach can eyeball the day
//! from a shell.

use crate::config::Config;
use crate::report::RowingConditionsOutput;
use crate::slot::SlotAnalysis;

/// Widest score the bar column can represent before it saturates
const BAR_FULL_SCALE: f32 = 80.0;

/// Bar column width in characters
const BAR_WIDTH: usize = 16;

/// Render a score as a fixed-width penalty bar, e.g. `####............`.
fn score_bar(score: f32) -> String {
    let filled = ((score / BAR_FULL_SCALE) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn slot_line(slot: &SlotAnalysis) -> String {
    format!(
        "  {}-{}  {:>6.1}  {} {:<9}",
        slot.start_time.format("%H:%M"),
        slot.end_time.format("%H:%M"),
        slot.score,
        score_bar(slot.score),
        slot.classification,
    )
}

fn penalty_line(slot: &SlotAnalysis) -> String {
    let p = &slot.penalties;
    format!(
        "            corrente {:>5.1}  vento {:>5.1}  onda {:>5.1}  tempo {:>5.1}  horário {:>+5.1}",
        p.current, p.wind, p.wave, p.weather, p.time_of_day
    )
}

/// Render the daily report to stdout.
pub fn draw_ascii(report: &RowingConditionsOutput, config: &Config) {
    println!("Condições de remo — {} — {}", config.station.name, report.date);
    println!(
        "Maré: preamar {}  baixa-mar {}  amplitude {:.0} cm ({})",
        report.tide_info.next_high_tide.format("%H:%M"),
        report.tide_info.next_low_tide.format("%H:%M"),
        report.tide_info.amplitude,
        report.tide_info.tide_type,
    );
    println!();

    println!("Manhã:");
    for slot in &report.morning_slots {
        println!("{}", slot_line(slot));
        if config.report.show_penalties {
            println!("{}", penalty_line(slot));
        }
    }

    println!("Tarde:");
    for slot in &report.afternoon_slots {
        println!("{}", slot_line(slot));
        if config.report.show_penalties {
            println!("{}", penalty_line(slot));
        }
    }
    println!();

    let best = &report.best_time;
    println!(
        "► Melhor horário: {} ({})",
        report.quick_summary.best_time_range, best.slot.classification
    );
    println!("  {}", best.reason);
    println!("  {}", best.slot.recommendation);

    if !best.alternative_times.is_empty() {
        println!("  Alternativas:");
        for alt in best
            .alternative_times
            .iter()
            .take(config.report.max_alternatives)
        {
            println!(
                "    {}-{}  {:.1}  {}",
                alt.start_time.format("%H:%M"),
                alt.end_time.format("%H:%M"),
                alt.score,
                alt.classification
            );
        }
    }
}

//! # Daily Report Assembly
//!
//! Orchestrates the per-slot analysis over the fixed candidate catalogs and
//! assembles the complete [`RowingConditionsOutput`] the presentation layer
//! consumes. The slot catalogs are part of the external contract and must not
//! silently change:
//!
//! - Morning: 05:00, 05:30, 06:00, 06:30, 07:00, 07:30, 08:00, 08:30, 09:00
//! - Afternoon: 14:30, 15:00, 15:30, 16:00, 16:30, 17:00, 17:30
//!
//! Each slot spans 60 minutes from its start; consecutive catalog entries are
//! 30 minutes apart, so adjacent slots overlap.

use crate::selector::{self, BestTimeResult};
use crate::slot::{self, RowingClassification, SlotAnalysis};
use crate::{AnalysisError, AnalysisInput, DayPeriod};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed morning slot starts, hours and minutes
const MORNING_STARTS: [(u32, u32); 9] = [
    (5, 0),
    (5, 30),
    (6, 0),
    (6, 30),
    (7, 0),
    (7, 30),
    (8, 0),
    (8, 30),
    (9, 0),
];

/// Fixed afternoon slot starts, hours and minutes
const AFTERNOON_STARTS: [(u32, u32); 7] = [
    (14, 30),
    (15, 0),
    (15, 30),
    (16, 0),
    (16, 30),
    (17, 0),
    (17, 30),
];

/// Catalog spacing; a clock-time lookup binds to the most recent start
/// within this window.
const CATALOG_SPACING_MIN: i64 = 30;

/// Amplitude above which the tide counts as a spring tide, in centimeters
const SPRING_THRESHOLD_CM: f32 = 200.0;

/// Amplitude below which the tide counts as a neap tide, in centimeters
const NEAP_THRESHOLD_CM: f32 = 100.0;

/// Spring/neap classification of the day's tide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TideType {
    #[serde(rename = "sizígia")]
    Sizigia,
    #[serde(rename = "quadratura")]
    Quadratura,
    #[serde(rename = "média")]
    Media,
}

impl fmt::Display for TideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TideType::Sizigia => write!(f, "sizígia"),
            TideType::Quadratura => write!(f, "quadratura"),
            TideType::Media => write!(f, "média"),
        }
    }
}

/// Classify the tidal amplitude as spring, neap, or mean tide.
pub fn classify_tide(amplitude_cm: f32) -> TideType {
    if amplitude_cm > SPRING_THRESHOLD_CM {
        TideType::Sizigia
    } else if amplitude_cm < NEAP_THRESHOLD_CM {
        TideType::Quadratura
    } else {
        TideType::Media
    }
}

/// Formatted tide summary carried in the report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideInfo {
    #[serde(with = "crate::hhmm")]
    pub next_high_tide: NaiveTime,
    #[serde(with = "crate::hhmm")]
    pub next_low_tide: NaiveTime,
    pub amplitude: f32,
    pub tide_type: TideType,
}

/// One-glance summary of the day's best window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSummary {
    pub best_period: DayPeriod,
    /// "HH:mm-HH:mm" range of the chosen slot
    pub best_time_range: String,
    pub classification: RowingClassification,
    pub one_line_reason: String,
}

/// The complete daily analysis report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowingConditionsOutput {
    pub date: NaiveDate,
    pub morning_slots: Vec<SlotAnalysis>,
    pub afternoon_slots: Vec<SlotAnalysis>,
    pub best_time: BestTimeResult,
    pub tide_info: TideInfo,
    pub quick_summary: QuickSummary,
}

impl RowingConditionsOutput {
    /// Find the slot covering an arbitrary clock time.
    ///
    /// Consecutive 60-minute slots overlap (catalog spacing is 30 minutes),
    /// so a query binds to the most recent catalog start at most 30 minutes
    /// earlier. Returns `None` outside every candidate window.
    pub fn slot_covering(&self, time: NaiveTime) -> Option<&SlotAnalysis> {
        self.morning_slots
            .iter()
            .chain(self.afternoon_slots.iter())
            .find(|s| {
                let window_end = s.start_time + Duration::minutes(CATALOG_SPACING_MIN);
                s.start_time <= time && time < window_end
            })
    }
}

fn catalog_times(starts: &[(u32, u32)]) -> impl Iterator<Item = NaiveTime> + '_ {
    starts
        .iter()
        .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
}

/// Run the full daily analysis.
///
/// Validates the input, analyzes every catalog slot, selects the best window,
/// and assembles the report.
pub fn analyze(input: &AnalysisInput) -> Result<RowingConditionsOutput, AnalysisError> {
    input.validate()?;

    let tide = &input.tide_data;
    let weather = &input.weather_data;

    let morning_slots: Vec<SlotAnalysis> = catalog_times(&MORNING_STARTS)
        .map(|start| slot::analyze_slot(start, DayPeriod::Morning, tide, weather))
        .collect();
    let afternoon_slots: Vec<SlotAnalysis> = catalog_times(&AFTERNOON_STARTS)
        .map(|start| slot::analyze_slot(start, DayPeriod::Afternoon, tide, weather))
        .collect();

    let best_time = selector::select_best(&morning_slots, &afternoon_slots)
        .ok_or(AnalysisError::EmptySlotCatalog)?;

    let best = &best_time.slot;
    let best_time_range = format!(
        "{}-{}",
        best.start_time.format("%H:%M"),
        best.end_time.format("%H:%M")
    );
    let quick_summary = QuickSummary {
        best_period: best.period,
        best_time_range: best_time_range.clone(),
        classification: best.classification,
        one_line_reason: format!(
            "Melhor janela {} às {} ({})",
            best.period, best_time_range, best.classification
        ),
    };

    let tide_info = TideInfo {
        next_high_tide: tide.next_high_tide.time(),
        next_low_tide: tide.next_low_tide.time(),
        amplitude: tide.amplitude,
        tide_type: classify_tide(tide.amplitude),
    };

    Ok(RowingConditionsOutput {
        date: input.current_date,
        morning_slots,
        afternoon_slots,
        best_time,
        tide_info,
        quick_summary,
    })
}

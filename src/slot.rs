//! # Per-Slot Analysis
//!
//! Combines the phase, current, and environmental models into one scored and
//! classified [`SlotAnalysis`] for a 60-minute candidate window.
//!
//! The total score is a non-negative sum of four penalty terms; lower is
//! better. Classification is a pure step function of the score with fixed,
//! inclusive upper bounds:
//!
//! | score    | classification |
//! |----------|----------------|
//! | <= 15    | EXCELENTE      |
//! | <= 30    | BOA            |
//! | <= 50    | MODERADA       |
//! | <= 70    | DIFÍCIL        |
//! | else     | PERIGOSA       |

use crate::current::{self, CurrentVector};
use crate::phase;
use crate::scoring;
use crate::{DayPeriod, TideData, WeatherData};
use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-band viability classification of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowingClassification {
    #[serde(rename = "EXCELENTE")]
    Excelente,
    #[serde(rename = "BOA")]
    Boa,
    #[serde(rename = "MODERADA")]
    Moderada,
    #[serde(rename = "DIFÍCIL")]
    Dificil,
    #[serde(rename = "PERIGOSA")]
    Perigosa,
}

impl fmt::Display for RowingClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowingClassification::Excelente => "EXCELENTE",
            RowingClassification::Boa => "BOA",
            RowingClassification::Moderada => "MODERADA",
            RowingClassification::Dificil => "DIFÍCIL",
            RowingClassification::Perigosa => "PERIGOSA",
        };
        write!(f, "{label}")
    }
}

/// Classify a total score into its viability band.
pub fn classify(score: f32) -> RowingClassification {
    match score {
        s if s <= 15.0 => RowingClassification::Excelente,
        s if s <= 30.0 => RowingClassification::Boa,
        s if s <= 50.0 => RowingClassification::Moderada,
        s if s <= 70.0 => RowingClassification::Dificil,
        _ => RowingClassification::Perigosa,
    }
}

/// Fixed recommendation text keyed to the classification band.
pub fn recommendation(classification: RowingClassification) -> &'static str {
    match classification {
        RowingClassification::Excelente => "Condições excelentes para remar. Aproveite a janela.",
        RowingClassification::Boa => "Boas condições. Saída liberada com atenção normal.",
        RowingClassification::Moderada => "Condições moderadas. Avalie a experiência da guarnição.",
        RowingClassification::Dificil => "Condições difíceis. Apenas guarnições experientes.",
        RowingClassification::Perigosa => "Condições perigosas. Remada não recomendada.",
    }
}

/// Tidal factors carried in the slot breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideFactors {
    /// Phase description at the departure instant
    pub departure_phase: String,
    /// Phase description at the return instant
    pub return_phase: String,
    pub departure_current: CurrentVector,
    pub return_current: CurrentVector,
    /// Combined favorability in [-1, 1]
    pub balance: f32,
}

/// Environmental factors carried in the slot breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFactors {
    /// Wind speed after the time-of-day adjustment
    pub wind_speed: f32,
    pub wave_height: f32,
    pub sun_intensity: String,
    /// Indicative air temperature in °C
    pub temperature: f32,
}

/// Itemized penalty terms summed into the total score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyBreakdown {
    pub current: f32,
    pub wind: f32,
    pub wave: f32,
    pub weather: f32,
    pub time_of_day: f32,
}

/// Complete analysis of one candidate slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAnalysis {
    #[serde(with = "crate::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::hhmm")]
    pub end_time: NaiveTime,
    pub period: DayPeriod,
    pub classification: RowingClassification,
    /// Non-negative penalty total; lower is better, unbounded above
    pub score: f32,
    pub tide_factors: TideFactors,
    pub environment_factors: EnvironmentFactors,
    pub penalties: PenaltyBreakdown,
    pub recommendation: String,
}

fn fractional_hour(time: NaiveTime) -> f32 {
    time.hour() as f32 + time.minute() as f32 / 60.0
}

/// Analyze one 60-minute candidate slot.
///
/// The departure instant is the slot start; the return instant is 30 minutes
/// in, the midpoint of the outing.
pub fn analyze_slot(
    start: NaiveTime,
    period: DayPeriod,
    tide: &TideData,
    weather: &WeatherData,
) -> SlotAnalysis {
    let end = start + Duration::minutes(60);
    let return_instant = start + Duration::minutes(30);

    let high = tide.next_high_tide.time();
    let low = tide.next_low_tide.time();

    let departure = phase::resolve(start, high, low);
    let ret = phase::resolve(return_instant, high, low);

    let departure_current = current::current_at(departure.hours_from_slack, tide.amplitude, departure.phase);
    let return_current = current::current_at(ret.hours_from_slack, tide.amplitude, ret.phase);
    let balance = current::balance(&departure_current, &return_current);

    // Penalty terms. The current term maps balance [-1,1] onto [0,40].
    let current_penalty = 20.0 * (1.0 - balance);

    let end_hour = fractional_hour(end);
    let adjusted_wind = scoring::adjusted_wind_speed(weather.wind_speed, period, end_hour);
    let wind_penalty = scoring::wind_penalty(adjusted_wind);
    let wave_penalty = scoring::wave_penalty(weather.wave_height);
    let weather_penalty = scoring::weather_penalty(weather.precipitation, weather.condition);
    let time_of_day = scoring::time_of_day_score(period, end_hour);

    let score = (current_penalty + wind_penalty + wave_penalty + weather_penalty + time_of_day).max(0.0);
    let classification = classify(score);

    SlotAnalysis {
        start_time: start,
        end_time: end,
        period,
        classification,
        score,
        tide_factors: TideFactors {
            departure_phase: format!(
                "{} ({:.1}h da estofa)",
                departure.phase, departure.hours_from_slack
            ),
            return_phase: format!("{} ({:.1}h da estofa)", ret.phase, ret.hours_from_slack),
            departure_current,
            return_current,
            balance,
        },
        environment_factors: EnvironmentFactors {
            wind_speed: adjusted_wind,
            wave_height: weather.wave_height,
            sun_intensity: scoring::sun_intensity(period, end_hour).to_string(),
            temperature: scoring::estimated_temperature(period, end_hour),
        },
        penalties: PenaltyBreakdown {
            current: current_penalty,
            wind: wind_penalty,
            wave: wave_penalty,
            weather: weather_penalty,
            time_of_day,
        },
        recommendation: recommendation(classification).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherCondition;
    use chrono::NaiveDate;

    fn tide(high: (u32, u32), low: (u32, u32), amplitude: f32) -> TideData {
        let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        TideData {
            next_high_tide: day.and_hms_opt(high.0, high.1, 0).unwrap(),
            next_low_tide: day.and_hms_opt(low.0, low.1, 0).unwrap(),
            amplitude,
        }
    }

    fn calm_weather() -> WeatherData {
        WeatherData {
            wind_speed: 5.0,
            wind_direction: "E".to_string(),
            wave_height: 0.1,
            precipitation: None,
            condition: Some(WeatherCondition::Clear),
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn classification_is_a_step_function_of_score() {
        assert_eq!(classify(0.0), RowingClassification::Excelente);
        assert_eq!(classify(15.0), RowingClassification::Excelente);
        assert_eq!(classify(15.01), RowingClassification::Boa);
        assert_eq!(classify(30.0), RowingClassification::Boa);
        assert_eq!(classify(30.01), RowingClassification::Moderada);
        assert_eq!(classify(50.0), RowingClassification::Moderada);
        assert_eq!(classify(50.01), RowingClassification::Dificil);
        assert_eq!(classify(70.0), RowingClassification::Dificil);
        assert_eq!(classify(70.01), RowingClassification::Perigosa);
    }

    #[test]
    fn slot_window_arithmetic() {
        let analysis = analyze_slot(at(6, 0), DayPeriod::Morning, &tide((12, 0), (6, 0), 227.0), &calm_weather());
        assert_eq!(analysis.start_time, at(6, 0));
        assert_eq!(analysis.end_time, at(7, 0));
        assert_eq!(analysis.period, DayPeriod::Morning);
    }

    #[test]
    fn score_is_never_negative() {
        // Early morning slot: time-of-day is -8, everything else near zero
        let analysis = analyze_slot(
            at(6, 0),
            DayPeriod::Morning,
            // Departure right at the low-tide slack
            &tide((12, 0), (6, 0), 227.0),
            &calm_weather(),
        );
        assert!(
            analysis.score >= 0.0,
            "score must be clamped at zero, got {}",
            analysis.score
        );
    }

    #[test]
    fn score_equals_the_sum_of_its_penalty_terms() {
        let analysis = analyze_slot(
            at(8, 30),
            DayPeriod::Morning,
            &tide((6, 0), (12, 0), 227.0),
            &calm_weather(),
        );
        let p = &analysis.penalties;
        let sum = (p.current + p.wind + p.wave + p.weather + p.time_of_day).max(0.0);
        assert!(
            (analysis.score - sum).abs() < 1e-5,
            "score {} should equal clamped penalty sum {sum}",
            analysis.score
        );
        assert_eq!(analysis.classification, classify(analysis.score));
    }

    #[test]
    fn reference_morning_slot_classifies_moderada_or_better() {
        // High 06:00, low 12:00, spring amplitude, wind 10, wave 0.2, clear sky
        let weather = WeatherData {
            wind_speed: 10.0,
            wind_direction: "SE".to_string(),
            wave_height: 0.2,
            precipitation: None,
            condition: Some(WeatherCondition::Clear),
        };
        let analysis = analyze_slot(
            at(8, 30),
            DayPeriod::Morning,
            &tide((6, 0), (12, 0), 227.0),
            &weather,
        );
        assert!(
            matches!(
                analysis.classification,
                RowingClassification::Excelente
                    | RowingClassification::Boa
                    | RowingClassification::Moderada
            ),
            "08:30 reference slot should be at worst MODERADA, got {} (score {})",
            analysis.classification,
            analysis.score
        );
    }

    #[test]
    fn worsening_weather_never_improves_the_score() {
        let tide = tide((6, 0), (12, 0), 227.0);
        let mut weather = calm_weather();
        let baseline = analyze_slot(at(7, 0), DayPeriod::Morning, &tide, &weather).score;

        weather.wind_speed = 25.0;
        let windy = analyze_slot(at(7, 0), DayPeriod::Morning, &tide, &weather).score;
        assert!(windy >= baseline);

        weather.wave_height = 1.0;
        let choppy = analyze_slot(at(7, 0), DayPeriod::Morning, &tide, &weather).score;
        assert!(choppy >= windy);

        weather.precipitation = Some(12.0);
        let soaked = analyze_slot(at(7, 0), DayPeriod::Morning, &tide, &weather).score;
        assert!(soaked >= choppy);
    }

    #[test]
    fn recommendation_matches_the_classification_band() {
        let analysis = analyze_slot(
            at(8, 30),
            DayPeriod::Morning,
            &tide((6, 0), (12, 0), 227.0),
            &calm_weather(),
        );
        assert_eq!(
            analysis.recommendation,
            recommendation(analysis.classification)
        );
    }

    #[test]
    fn classification_serializes_with_portuguese_labels() {
        let json = serde_json::to_string(&RowingClassification::Dificil).unwrap();
        assert_eq!(json, "\"DIFÍCIL\"");
        let parsed: RowingClassification = serde_json::from_str("\"EXCELENTE\"").unwrap();
        assert_eq!(parsed, RowingClassification::Excelente);
    }
}

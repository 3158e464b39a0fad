//! # Rowing Tide Analyzer Core Library
//!
//! This library implements a deterministic viability model for on-water rowing
//! outings on a tidal river. Given a single day's tide predictions (next high
//! and low tide plus tidal amplitude) and weather observations, it scores every
//! candidate time-of-day slot, classifies each one, and selects the best slot
//! with a morning-preference tie-break.
//!
//! ## Design Philosophy
//!
//! ### Purity
//! Every function in this crate is a pure mapping from inputs to outputs:
//! - **No I/O**: tide and weather data arrive fully formed from the caller
//! - **No shared state**: each analysis call builds its report from scratch
//! - **Deterministic**: identical [`AnalysisInput`] values always produce
//!   byte-identical [`report::RowingConditionsOutput`] values, so callers may
//!   cache results keyed by the input without staleness risk
//!
//! ### Pipeline
//! Data flows one way through the engine:
//! 1. [`phase`] resolves flood/ebb and hours-from-slack for a clock time
//! 2. [`current`] turns phase distance and amplitude into a current vector,
//!    then balances departure against return favorability
//! 3. [`scoring`] computes wind, wave, weather, and time-of-day penalties
//! 4. [`slot`] combines everything into one scored, classified slot analysis
//! 5. [`selector`] and [`report`] rank slots and assemble the daily report
//!
//! No stage calls back upstream.
//!
//! ## Core Types
//!
//! The input contract lives here: [`TideData`], [`WeatherData`], and the
//! immutable [`AnalysisInput`] wrapper, plus the [`AnalysisError`] enum raised
//! by input validation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// Module declarations
pub mod config;
pub mod current;
pub mod phase;
pub mod renderer;
pub mod report;
pub mod scoring;
pub mod selector;
pub mod slot;

/// Serde helper for `HH:mm` clock-time fields.
///
/// The output contract formats every clock time as `HH:mm`; chrono's default
/// `NaiveTime` serialization carries seconds, so contract fields opt into this
/// module via `#[serde(with = "rowing_tide_lib::hhmm")]`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Errors raised while validating an [`AnalysisInput`].
///
/// The model itself has no failure states; every variant here is a
/// caller-visible input-validation error, never a transient condition, so no
/// retry is meaningful.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Tidal amplitude must be a positive range in centimeters
    #[error("tidal amplitude must be positive, got {0} cm")]
    InvalidAmplitude(f32),

    /// A tide event timestamp fell outside the analysis day
    #[error("{event} falls outside the analysis day {day}")]
    TideEventOutsideDay {
        event: &'static str,
        day: NaiveDate,
    },

    /// Wind speed observations cannot be negative
    #[error("wind speed cannot be negative, got {0}")]
    NegativeWindSpeed(f32),

    /// Wave height observations cannot be negative
    #[error("wave height cannot be negative, got {0} m")]
    NegativeWaveHeight(f32),

    /// A clock-time string did not parse as `HH:mm`
    #[error("malformed clock time '{0}', expected HH:mm")]
    MalformedTime(String),

    /// The fixed slot catalogs yielded no candidates (should never happen)
    #[error("slot catalogs produced no candidates")]
    EmptySlotCatalog,
}

/// Parse an `HH:mm` clock-time string.
///
/// # Example
/// ```
/// use rowing_tide_lib::parse_clock_time;
///
/// let t = parse_clock_time("06:15").unwrap();
/// assert_eq!(t.format("%H:%M").to_string(), "06:15");
/// assert!(parse_clock_time("25:99").is_err());
/// ```
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, AnalysisError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| AnalysisError::MalformedTime(raw.to_string()))
}

/// Closed set of weather conditions accepted from the weather provider.
///
/// Keeping this a closed enum (rather than an open string) gives the scoring
/// switch compiler-enforced exhaustiveness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    HeavyRain,
    Thunderstorm,
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::PartlyCloudy => "partly-cloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rain => "rain",
            WeatherCondition::HeavyRain => "heavy-rain",
            WeatherCondition::Thunderstorm => "thunderstorm",
        };
        write!(f, "{label}")
    }
}

/// Half of the day a candidate slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Afternoon,
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPeriod::Morning => write!(f, "manhã"),
            DayPeriod::Afternoon => write!(f, "tarde"),
        }
    }
}

/// One day's tide prediction: the next high and low tide plus tidal range.
///
/// Both timestamps must fall within the analysis day. The amplitude is the
/// vertical range between consecutive low and high water in centimeters;
/// 227 cm is the reference mean spring tide the current model scales against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideData {
    /// Timestamp of the day's high tide
    pub next_high_tide: NaiveDateTime,
    /// Timestamp of the day's low tide
    pub next_low_tide: NaiveDateTime,
    /// Tidal range in centimeters (reference spring tide = 227)
    pub amplitude: f32,
}

/// Weather observations for the analysis day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Base wind speed before the time-of-day adjustment
    pub wind_speed: f32,
    /// Descriptive wind direction (carried through, not scored)
    pub wind_direction: String,
    /// Wave height in meters
    pub wave_height: f32,
    /// Accumulated precipitation in millimeters, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f32>,
    /// Sky condition, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<WeatherCondition>,
}

/// Complete, immutable input for one analysis call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Calendar day being analyzed
    pub current_date: NaiveDate,
    pub tide_data: TideData,
    pub weather_data: WeatherData,
}

impl AnalysisInput {
    /// Validate the input against the hardened contract.
    ///
    /// Fails fast with a descriptive [`AnalysisError`] rather than letting a
    /// nonsensical input flow through the model and produce nonsense scores.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.tide_data.amplitude <= 0.0 {
            return Err(AnalysisError::InvalidAmplitude(self.tide_data.amplitude));
        }
        if self.tide_data.next_high_tide.date() != self.current_date {
            return Err(AnalysisError::TideEventOutsideDay {
                event: "nextHighTide",
                day: self.current_date,
            });
        }
        if self.tide_data.next_low_tide.date() != self.current_date {
            return Err(AnalysisError::TideEventOutsideDay {
                event: "nextLowTide",
                day: self.current_date,
            });
        }
        if self.weather_data.wind_speed < 0.0 {
            return Err(AnalysisError::NegativeWindSpeed(self.weather_data.wind_speed));
        }
        if self.weather_data.wave_height < 0.0 {
            return Err(AnalysisError::NegativeWaveHeight(self.weather_data.wave_height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_input() -> AnalysisInput {
        let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        AnalysisInput {
            current_date: day,
            tide_data: TideData {
                next_high_tide: day.and_hms_opt(6, 0, 0).unwrap(),
                next_low_tide: day.and_hms_opt(12, 0, 0).unwrap(),
                amplitude: 227.0,
            },
            weather_data: WeatherData {
                wind_speed: 10.0,
                wind_direction: "SE".to_string(),
                wave_height: 0.2,
                precipitation: None,
                condition: Some(WeatherCondition::Clear),
            },
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn non_positive_amplitude_is_rejected() {
        let mut input = valid_input();
        input.tide_data.amplitude = 0.0;
        assert!(matches!(
            input.validate(),
            Err(AnalysisError::InvalidAmplitude(_))
        ));

        input.tide_data.amplitude = -40.0;
        assert!(matches!(
            input.validate(),
            Err(AnalysisError::InvalidAmplitude(_))
        ));
    }

    #[test]
    fn tide_event_outside_day_is_rejected() {
        let mut input = valid_input();
        let next_day = input.current_date.succ_opt().unwrap();
        input.tide_data.next_low_tide = next_day.and_hms_opt(0, 30, 0).unwrap();

        match input.validate() {
            Err(AnalysisError::TideEventOutsideDay { event, .. }) => {
                assert_eq!(event, "nextLowTide");
            }
            other => panic!("expected TideEventOutsideDay, got {other:?}"),
        }
    }

    #[test]
    fn negative_observations_are_rejected() {
        let mut input = valid_input();
        input.weather_data.wind_speed = -1.0;
        assert!(matches!(
            input.validate(),
            Err(AnalysisError::NegativeWindSpeed(_))
        ));

        let mut input = valid_input();
        input.weather_data.wave_height = -0.1;
        assert!(matches!(
            input.validate(),
            Err(AnalysisError::NegativeWaveHeight(_))
        ));
    }

    #[test]
    fn clock_time_parsing_accepts_hhmm_only() {
        assert!(parse_clock_time("05:00").is_ok());
        assert!(parse_clock_time("23:59").is_ok());
        assert!(parse_clock_time("24:00").is_err());
        assert!(parse_clock_time("6h30").is_err());
        assert!(parse_clock_time("").is_err());
    }

    #[test]
    fn weather_condition_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly-cloudy\"");

        let parsed: WeatherCondition = serde_json::from_str("\"heavy-rain\"").unwrap();
        assert_eq!(parsed, WeatherCondition::HeavyRain);
    }

    #[test]
    fn analysis_input_round_trips_through_json() {
        let input = valid_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("nextHighTide"), "contract uses camelCase: {json}");

        let parsed: AnalysisInput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, input);
    }
}

//! # Environmental Penalties and Time-of-Day Scoring
//!
//! Fixed-band penalty tables for wind, wave, and weather conditions, plus the
//! period-dependent time-of-day adjustment. All bands are part of the scoring
//! contract and must not drift between releases.
//!
//! Wind is the only input adjusted before banding: the base wind speed is
//! scaled by a step function of the slot's end hour, reflecting that river
//! mornings are calmer than afternoons.

use crate::{DayPeriod, WeatherCondition};

/// Scale the base wind speed by the slot's end hour.
///
/// Morning multipliers run 0.6-1.0 up to 10:00; afternoon multipliers run
/// 1.1-1.3 through 18:30.
pub fn adjusted_wind_speed(base_speed: f32, period: DayPeriod, end_hour: f32) -> f32 {
    let multiplier = match period {
        DayPeriod::Morning => {
            if end_hour <= 7.0 {
                0.6
            } else if end_hour <= 8.0 {
                0.7
            } else if end_hour <= 9.0 {
                0.85
            } else {
                1.0
            }
        }
        DayPeriod::Afternoon => {
            if end_hour <= 16.0 {
                1.1
            } else if end_hour <= 17.0 {
                1.15
            } else if end_hour <= 18.0 {
                1.2
            } else {
                1.3
            }
        }
    };
    base_speed * multiplier
}

/// Map an adjusted wind speed to its penalty band.
pub fn wind_penalty(adjusted_speed: f32) -> f32 {
    match adjusted_speed {
        s if s < 10.0 => 0.0,
        s if s < 15.0 => 8.0,
        s if s < 20.0 => 17.0,
        s if s < 25.0 => 25.0,
        _ => 30.0,
    }
}

/// Map a wave height in meters to its penalty band.
pub fn wave_penalty(wave_height_m: f32) -> f32 {
    match wave_height_m {
        h if h < 0.3 => 0.0,
        h if h < 0.5 => 5.0,
        h if h < 0.8 => 10.0,
        _ => 15.0,
    }
}

fn rain_penalty(precipitation_mm: f32) -> f32 {
    match precipitation_mm {
        p if p < 2.0 => 5.0,
        p if p < 5.0 => 15.0,
        p if p < 10.0 => 25.0,
        _ => 35.0,
    }
}

fn condition_penalty(condition: WeatherCondition) -> f32 {
    match condition {
        WeatherCondition::Clear | WeatherCondition::PartlyCloudy => 0.0,
        WeatherCondition::Cloudy => 3.0,
        WeatherCondition::Rain => 15.0,
        WeatherCondition::HeavyRain => 30.0,
        WeatherCondition::Thunderstorm => 50.0,
    }
}

/// Weather penalty: the worse of the rain and sky-condition estimators.
///
/// The two bands estimate the same hazard from different observations, so
/// they are alternatives, not additive. A missing observation contributes
/// nothing.
pub fn weather_penalty(precipitation_mm: Option<f32>, condition: Option<WeatherCondition>) -> f32 {
    let rain = precipitation_mm.map(rain_penalty).unwrap_or(0.0);
    let sky = condition.map(condition_penalty).unwrap_or(0.0);
    rain.max(sky)
}

/// Period-dependent bonus/penalty keyed to the slot's end hour.
///
/// Negative values favor early morning slots; positive values penalize later
/// slots in both periods as heat and wind build through the day.
pub fn time_of_day_score(period: DayPeriod, end_hour: f32) -> f32 {
    match period {
        DayPeriod::Morning => {
            if end_hour <= 7.0 {
                -8.0
            } else if end_hour <= 8.0 {
                -5.0
            } else if end_hour <= 9.0 {
                0.0
            } else {
                12.0
            }
        }
        DayPeriod::Afternoon => {
            if end_hour <= 16.5 {
                15.0
            } else if end_hour <= 17.5 {
                10.0
            } else {
                5.0
            }
        }
    }
}

/// Qualitative sun intensity for the report's environment factors.
pub fn sun_intensity(period: DayPeriod, end_hour: f32) -> &'static str {
    match period {
        DayPeriod::Morning => {
            if end_hour <= 7.0 {
                "suave"
            } else if end_hour <= 9.0 {
                "moderado"
            } else {
                "forte"
            }
        }
        DayPeriod::Afternoon => {
            if end_hour <= 16.5 {
                "forte"
            } else {
                "moderado"
            }
        }
    }
}

/// Rough air temperature estimate for the report's environment factors.
///
/// Derived from the slot's end hour only; the weather provider does not
/// report temperature, and the presentation layer wants an indicative value.
pub fn estimated_temperature(period: DayPeriod, end_hour: f32) -> f32 {
    match period {
        DayPeriod::Morning => 22.0 + (end_hour - 6.0).max(0.0) * 1.5,
        DayPeriod::Afternoon => 31.0 - (end_hour - 15.5).max(0.0),
    }
}

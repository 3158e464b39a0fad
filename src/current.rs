//! # Tidal Current Model
//!
//! Converts a phase distance and tidal amplitude into a current vector, and
//! balances the departure current against the return current into a single
//! favorability number.
//!
//! ## Speed model
//!
//! Current speed follows a quarter-sine ramp from zero at slack water to a
//! peak three hours later (half the quarter-cycle of a ~12.4 h tidal period):
//!
//! ```text
//! speed = 0.85 × (amplitude / 227) × sin((min(distance, 3) / 3) × π/2)
//! ```
//!
//! This is an empirical approximation of a sinusoidal tidal current calibrated
//! against a 227 cm mean spring tide, not a physical simulation. Distances
//! beyond three hours saturate at the amplitude-scaled peak.
//!
//! ## Favorability
//!
//! Direction matters asymmetrically for a rowing crew. On departure a flood
//! current is favorable (resistance training against the rise); on the return
//! leg an ebb current is favorable (it pushes the crew home). The return leg
//! is operationally riskier, so the balance weights it higher:
//!
//! ```text
//! balance = 0.4 × departure_favor + 0.6 × return_favor   ∈ [-1, 1]
//! ```

use crate::phase::TidePhase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Peak current speed for the reference spring tide
const BASE_MAX_SPEED: f32 = 0.85;

/// Reference mean spring tide amplitude in centimeters
const REFERENCE_AMPLITUDE_CM: f32 = 227.0;

/// Hours from slack at which the current peaks
const HOURS_TO_PEAK: f32 = 3.0;

/// Below this distance from slack the current counts as slack water
const SLACK_THRESHOLD_HOURS: f32 = 0.3;

/// Direction classification of a current vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentType {
    Flood,
    Ebb,
    Slack,
}

impl fmt::Display for CurrentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentType::Flood => write!(f, "enchente"),
            CurrentType::Ebb => write!(f, "vazante"),
            CurrentType::Slack => write!(f, "estofa"),
        }
    }
}

/// Current magnitude and direction at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentVector {
    /// Magnitude in m/s-equivalent units
    pub speed: f32,
    #[serde(rename = "type")]
    pub kind: CurrentType,
}

/// Compute the current vector at a given distance from slack water.
///
/// `hours_from_slack` comes from [`crate::phase::resolve`] and may exceed the
/// three-hour peak domain; it is clamped here.
pub fn current_at(hours_from_slack: f32, amplitude_cm: f32, phase: TidePhase) -> CurrentVector {
    let clamped = hours_from_slack.min(HOURS_TO_PEAK);
    let ramp = (clamped / HOURS_TO_PEAK * std::f32::consts::FRAC_PI_2).sin();
    let speed = BASE_MAX_SPEED * (amplitude_cm / REFERENCE_AMPLITUDE_CM) * ramp;

    let kind = if hours_from_slack < SLACK_THRESHOLD_HOURS {
        CurrentType::Slack
    } else {
        match phase {
            TidePhase::Flood => CurrentType::Flood,
            TidePhase::Ebb => CurrentType::Ebb,
        }
    };

    CurrentVector { speed, kind }
}

/// Favorability of the current on the departure leg, in [-1, 1].
///
/// Flood resistance is welcome on the way out, graded down as it strengthens;
/// an ebb on departure works against the outbound leg.
fn departure_favor(current: &CurrentVector) -> f32 {
    match current.kind {
        CurrentType::Slack => 0.5,
        CurrentType::Flood => match current.speed {
            s if s < 0.2 => 1.0,
            s if s < 0.4 => 0.7,
            s if s < 0.6 => 0.4,
            _ => 0.2,
        },
        CurrentType::Ebb => match current.speed {
            s if s < 0.2 => -0.2,
            s if s < 0.4 => -0.5,
            s if s < 0.6 => -0.8,
            _ => -1.0,
        },
    }
}

/// Favorability of the current on the return leg, in [-1, 1].
///
/// Polarity inverts on the way back: an ebb pushes the crew home, a flood
/// fights the return.
fn return_favor(current: &CurrentVector) -> f32 {
    match current.kind {
        CurrentType::Slack => 0.2,
        CurrentType::Ebb => match current.speed {
            s if s < 0.2 => 0.3,
            s if s < 0.4 => 0.6,
            s if s < 0.6 => 0.8,
            _ => 1.0,
        },
        CurrentType::Flood => match current.speed {
            s if s < 0.2 => -0.3,
            s if s < 0.4 => -0.6,
            s if s < 0.6 => -0.8,
            _ => -1.0,
        },
    }
}

/// Combine departure and return currents into one favorability balance.
pub fn balance(departure: &CurrentVector, ret: &CurrentVector) -> f32 {
    0.4 * departure_favor(departure) + 0.6 * return_favor(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_zero_at_exact_slack_for_any_amplitude() {
        for amplitude in [50.0, 100.0, 227.0, 300.0] {
            let v = current_at(0.0, amplitude, TidePhase::Flood);
            assert_eq!(
                v.speed, 0.0,
                "slack speed should be 0 at amplitude {amplitude}"
            );
            assert_eq!(v.kind, CurrentType::Slack);
        }
    }

    #[test]
    fn speed_saturates_at_amplitude_scaled_peak() {
        let peak = current_at(3.0, 227.0, TidePhase::Ebb);
        assert!(
            (peak.speed - 0.85).abs() < 1e-6,
            "reference amplitude should peak at 0.85, got {}",
            peak.speed
        );

        // Beyond the 3h domain the clamp holds the peak
        let beyond = current_at(7.5, 227.0, TidePhase::Ebb);
        assert!((beyond.speed - peak.speed).abs() < 1e-6);

        // Half the amplitude halves the peak
        let half = current_at(3.0, 113.5, TidePhase::Ebb);
        assert!((half.speed - 0.425).abs() < 1e-6);
    }

    #[test]
    fn type_resolves_slack_below_threshold_and_phase_above() {
        assert_eq!(current_at(0.29, 227.0, TidePhase::Flood).kind, CurrentType::Slack);
        assert_eq!(current_at(0.3, 227.0, TidePhase::Flood).kind, CurrentType::Flood);
        assert_eq!(current_at(0.3, 227.0, TidePhase::Ebb).kind, CurrentType::Ebb);
    }

    #[test]
    fn speed_ramp_is_monotonic_up_to_the_peak() {
        let mut previous = -1.0;
        for step in 0..=30 {
            let hours = step as f32 * 0.1;
            let v = current_at(hours, 227.0, TidePhase::Flood);
            assert!(
                v.speed >= previous,
                "speed should not decrease on the ramp: {} at {hours}h",
                v.speed
            );
            previous = v.speed;
        }
    }

    #[test]
    fn flood_departure_with_ebb_return_is_the_best_balance() {
        let weak_flood = CurrentVector {
            speed: 0.1,
            kind: CurrentType::Flood,
        };
        let strong_ebb = CurrentVector {
            speed: 0.8,
            kind: CurrentType::Ebb,
        };
        let b = balance(&weak_flood, &strong_ebb);
        assert!((b - 1.0).abs() < 1e-6, "ideal legs should balance to 1.0, got {b}");
    }

    #[test]
    fn inverted_legs_give_the_worst_balance() {
        let strong_ebb = CurrentVector {
            speed: 0.8,
            kind: CurrentType::Ebb,
        };
        let strong_flood = CurrentVector {
            speed: 0.8,
            kind: CurrentType::Flood,
        };
        let b = balance(&strong_ebb, &strong_flood);
        assert!((b - (-1.0)).abs() < 1e-6, "worst legs should balance to -1.0, got {b}");
    }

    #[test]
    fn slack_legs_score_the_fixed_neutral_constants() {
        let slack = CurrentVector {
            speed: 0.05,
            kind: CurrentType::Slack,
        };
        let b = balance(&slack, &slack);
        // 0.4 * 0.5 + 0.6 * 0.2
        assert!((b - 0.32).abs() < 1e-6);
    }

    #[test]
    fn balance_stays_within_unit_range() {
        let speeds = [0.0, 0.1, 0.3, 0.5, 0.85];
        let kinds = [CurrentType::Flood, CurrentType::Ebb, CurrentType::Slack];
        for &ds in &speeds {
            for &dk in &kinds {
                for &rs in &speeds {
                    for &rk in &kinds {
                        let b = balance(
                            &CurrentVector { speed: ds, kind: dk },
                            &CurrentVector { speed: rs, kind: rk },
                        );
                        assert!(
                            (-1.0..=1.0).contains(&b),
                            "balance {b} out of range for {dk:?}@{ds} / {rk:?}@{rs}"
                        );
                    }
                }
            }
        }
    }
}

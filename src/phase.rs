//! # Tide Phase Resolution
//!
//! Determines whether a clock time sits in the flood (rising) or ebb (falling)
//! phase of the day's tide, and how far it is from the nearest slack water.
//!
//! The model only knows two tide events for the day: the next high tide and
//! the next low tide. That gives two possible orderings (low before high, or
//! high before low), and for each ordering a query time can fall before both
//! events, between them, or after both. Those four outcomes are resolved by an
//! exhaustive match so each branch stays independently testable:
//!
//! - **Before both events**: the phase is whichever direction the first event
//!   is approached from (ebb when heading into a low, flood when heading into
//!   a high); distance is the time to that event.
//! - **Between the events**: the phase is the direction implied by the
//!   interval (flood toward a later high, ebb toward a later low); distance is
//!   the minimum distance to either boundary.
//! - **After both events**: the phase is the direction heading toward the next
//!   unmodeled cycle extreme; distance is measured from the most recently
//!   passed event.
//!
//! Distance is intentionally NOT clamped here; the current model clamps it to
//! the quarter-cycle domain. For times more than a half-cycle (~6.2 h) from
//! any modeled event the large distance simply saturates the clamp downstream,
//! which can mis-classify very early or very late queries. That mirrors the
//! reference tide tables this model was calibrated against and must not be
//! "fixed" without re-checking those tables.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the tidal phase at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TidePhase {
    /// Rising tide, current running upstream
    Flood,
    /// Falling tide, current running downstream
    Ebb,
}

impl fmt::Display for TidePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TidePhase::Flood => write!(f, "enchente"),
            TidePhase::Ebb => write!(f, "vazante"),
        }
    }
}

/// Outcome of phase resolution for one clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseResolution {
    pub phase: TidePhase,
    /// Hours from the nearest slack water, always >= 0, unclamped
    pub hours_from_slack: f32,
}

/// Which tide event comes first in the day's sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EventOrdering {
    LowFirst,
    HighFirst,
}

fn minutes_of_day(time: NaiveTime) -> f32 {
    (time.num_seconds_from_midnight() / 60) as f32
}

/// Resolve the tidal phase and slack distance for `time`.
///
/// `high` and `low` are the clock times of the day's high and low tide.
pub fn resolve(time: NaiveTime, high: NaiveTime, low: NaiveTime) -> PhaseResolution {
    let t = minutes_of_day(time);
    let h = minutes_of_day(high);
    let l = minutes_of_day(low);

    let ordering = if l <= h {
        EventOrdering::LowFirst
    } else {
        EventOrdering::HighFirst
    };

    let (phase, distance_min) = match ordering {
        EventOrdering::LowFirst => {
            if t < l {
                // Approaching the low: tide is still falling
                (TidePhase::Ebb, l - t)
            } else if t < h {
                // Between low and high: rising toward the high
                (TidePhase::Flood, (t - l).min(h - t))
            } else {
                // Past the high: falling toward the next (unmodeled) low
                (TidePhase::Ebb, t - h)
            }
        }
        EventOrdering::HighFirst => {
            if t < h {
                // Approaching the high: tide is still rising
                (TidePhase::Flood, h - t)
            } else if t < l {
                // Between high and low: falling toward the low
                (TidePhase::Ebb, (t - h).min(l - t))
            } else {
                // Past the low: rising toward the next (unmodeled) high
                (TidePhase::Flood, t - l)
            }
        }
    };

    PhaseResolution {
        phase,
        hours_from_slack: distance_min / 60.0,
    }
}

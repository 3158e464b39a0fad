//! # Best-Slot Selection
//!
//! Ranks the analyzed slots and applies the club's morning-preference
//! heuristic ("regra de ouro"): when both periods have a best candidate and
//! the afternoon best is within 10 points of the morning best, the morning
//! slot wins regardless of raw score. Only when the score gap exceeds 10
//! points does the afternoon candidate take the pick. With candidates in a
//! single period, that period wins by default.
//!
//! Alternatives are the three lowest-scoring remaining slots across both
//! periods, globally re-sorted.

use crate::slot::SlotAnalysis;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Score gap above which the afternoon candidate overrides the morning preference
const MORNING_PREFERENCE_MARGIN: f32 = 10.0;

/// Number of ranked alternatives returned alongside the chosen slot
const ALTERNATIVE_COUNT: usize = 3;

/// The chosen slot, the tie-break explanation, and ranked alternatives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTimeResult {
    pub slot: SlotAnalysis,
    /// Text explaining why this slot won the tie-break
    pub reason: String,
    /// Up to three next-best slots across both periods
    pub alternative_times: Vec<SlotAnalysis>,
}

fn by_score(a: &SlotAnalysis, b: &SlotAnalysis) -> Ordering {
    // Scores are finite by construction; equal treated as stable
    a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
}

fn best_of(slots: &[SlotAnalysis]) -> Option<&SlotAnalysis> {
    slots.iter().min_by(|a, b| by_score(a, b))
}

/// Select the best slot across both periods.
///
/// Returns `None` only when both candidate lists are empty.
pub fn select_best(
    morning: &[SlotAnalysis],
    afternoon: &[SlotAnalysis],
) -> Option<BestTimeResult> {
    let best_morning = best_of(morning);
    let best_afternoon = best_of(afternoon);

    let (chosen, reason) = match (best_morning, best_afternoon) {
        (Some(m), Some(a)) => {
            if a.score - m.score <= MORNING_PREFERENCE_MARGIN {
                (
                    m,
                    "Manhã preferida pela regra de ouro: estabilidade e conforto com \
                     pontuações próximas entre os períodos"
                        .to_string(),
                )
            } else {
                (
                    a,
                    format!(
                        "Tarde escolhida: diferença de {:.1} pontos acima da margem da \
                         regra de ouro",
                        a.score - m.score
                    ),
                )
            }
        }
        (Some(m), None) => (m, "Único período com candidatos: manhã".to_string()),
        (None, Some(a)) => (a, "Único período com candidatos: tarde".to_string()),
        (None, None) => return None,
    };

    let mut alternatives: Vec<SlotAnalysis> = morning
        .iter()
        .chain(afternoon.iter())
        .filter(|s| s.start_time != chosen.start_time || s.period != chosen.period)
        .cloned()
        .collect();
    alternatives.sort_by(by_score);
    alternatives.truncate(ALTERNATIVE_COUNT);

    Some(BestTimeResult {
        slot: chosen.clone(),
        reason,
        alternative_times: alternatives,
    })
}

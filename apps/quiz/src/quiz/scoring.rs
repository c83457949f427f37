//! Dimension Scorer and Boundary Detector.
//!
//! Each answered question moves its dimension by `value - 3`, toward the
//! question's agree pole. The signed total maps linearly onto a 0–100 split:
//! `[-2 * answered, +2 * answered]` → `[0, 100]`.

use tracing::debug;

use crate::models::{
    Answers, Dimension, DimensionResult, Question, ScoreSummary, TypeCode, LIKERT_NEUTRAL,
};

/// Gap (in percentage points between the two poles) below which a split counts
/// as ambiguous. 10 flags anything within 5 points of 50/50.
pub const DEFAULT_BOUNDARY_GAP_PERCENT: u8 = 10;

/// Scores one dimension from the questions that belong to it and were answered.
pub fn score_dimension(
    dimension: Dimension,
    questions: &[Question],
    answers: &Answers,
) -> DimensionResult {
    let (first_pole, second_pole) = dimension.poles();

    let mut score: i32 = 0;
    let mut answered: u32 = 0;
    for q in questions {
        if q.parsed_dimension() != Some(dimension) {
            continue;
        }
        let Some(value) = answers.get(&q.id) else {
            continue;
        };
        let delta = value as i32 - LIKERT_NEUTRAL as i32;
        if q.agree_pole == first_pole {
            score += delta;
        } else {
            score -= delta;
        }
        answered += 1;
    }

    let first_percent = percent_for(score, answered);
    let second_percent = 100 - first_percent;
    let gap_percent = first_percent.abs_diff(second_percent);

    DimensionResult {
        dimension,
        first_pole,
        second_pole,
        score,
        answered,
        first_percent,
        second_percent,
        gap_percent,
    }
}

/// Maps a signed score onto the first pole's share. No answers means no signal: 50.
fn percent_for(score: i32, answered: u32) -> u8 {
    if answered == 0 {
        return 50;
    }
    let max_abs = 2.0 * answered as f64;
    let raw = (score as f64 / max_abs) * 50.0 + 50.0;
    raw.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Scores all four dimensions and derives the type code.
pub fn score_all(questions: &[Question], answers: &Answers) -> ScoreSummary {
    let dimensions: Vec<DimensionResult> = Dimension::ALL
        .into_iter()
        .map(|dim| score_dimension(dim, questions, answers))
        .collect();
    let type_code = TypeCode::from_results(&dimensions);

    debug!(
        type_code = %type_code,
        answered = answers.len(),
        "Scored quiz attempt"
    );

    ScoreSummary {
        type_code,
        dimensions,
    }
}

/// True when the two poles are closer than `threshold_gap_percent` points apart.
pub fn is_near_boundary(first_percent: u8, threshold_gap_percent: u8) -> bool {
    let gap = (100 - 2 * first_percent as i32).unsigned_abs();
    gap < threshold_gap_percent as u32
}

/// One note per near-boundary dimension, e.g. `"E/I is close to the boundary (52% / 48%)"`.
pub fn boundary_notes(summary: &ScoreSummary, threshold_gap_percent: u8) -> Vec<String> {
    summary
        .dimensions
        .iter()
        .filter(|r| is_near_boundary(r.first_percent, threshold_gap_percent))
        .map(|r| {
            format!(
                "{}/{} is close to the boundary ({}% / {}%); this preference may shift with context",
                r.first_pole, r.second_pole, r.first_percent, r.second_percent
            )
        })
        .collect()
}

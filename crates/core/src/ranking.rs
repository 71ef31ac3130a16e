//! Top-k resolution over a probability vector.
//!
//! Ties go to the lowest index ("first maximum"), for both the winner and the
//! runner-up, so the same vector always ranks the same way.

use crate::probability::ProbabilityVector;

/// One ranked class position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank {
    pub index: usize,
    pub probability: f32,
}

impl Rank {
    pub fn confidence_pct(&self) -> f64 {
        confidence_pct(self.probability)
    }
}

/// `round(probability * 100, 2)`, with exact halves going to the even digit.
///
/// Monotone non-decreasing in `probability`; in `[0, 100]` for inputs in `[0, 1]`.
pub fn confidence_pct(probability: f32) -> f64 {
    let pct = f64::from(probability) * 100.0;
    ((pct * 100.0).round_ties_even() / 100.0).clamp(0.0, 100.0)
}

/// Index of the highest probability; ties resolve to the lowest index.
pub fn top_one(probs: &ProbabilityVector) -> Rank {
    best_excluding(probs, None)
}

/// Highest and (when the vector has more than one class) second-highest ranks.
pub fn top_two(probs: &ProbabilityVector) -> (Rank, Option<Rank>) {
    let top = top_one(probs);
    let second = (probs.len() > 1).then(|| best_excluding(probs, Some(top.index)));
    (top, second)
}

fn best_excluding(probs: &ProbabilityVector, skip: Option<usize>) -> Rank {
    let mut best: Option<Rank> = None;
    for (index, &probability) in probs.as_slice().iter().enumerate() {
        if Some(index) == skip {
            continue;
        }
        match best {
            // Strict comparison keeps the earlier index on ties.
            Some(b) if probability <= b.probability => {}
            _ => best = Some(Rank { index, probability }),
        }
    }
    // ProbabilityVector is never empty, and `skip` is only set when len > 1.
    best.unwrap_or(Rank {
        index: 0,
        probability: 0.0,
    })
}

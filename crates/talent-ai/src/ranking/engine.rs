use std::collections::{BTreeMap, HashSet};

use super::{
    Candidate, CriterionContribution, CriterionName, RankedResult, RankingError, WeightVector,
};

/// Stateless SAW evaluator shared by every ranking call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn rank(
        &self,
        candidates: &[Candidate],
        weights: &WeightVector,
    ) -> Result<Vec<RankedResult>, RankingError> {
        rank(candidates, weights)
    }
}

/// Ranks `candidates` by their weighted, max-normalised criterion values.
///
/// Results come back in rank order. Equal composite scores keep the order in which
/// the candidates were supplied and still receive distinct ranks.
pub fn rank(
    candidates: &[Candidate],
    weights: &WeightVector,
) -> Result<Vec<RankedResult>, RankingError> {
    if candidates.len() < 2 {
        return Err(RankingError::InsufficientCandidates {
            found: candidates.len(),
        });
    }

    weights.validate()?;
    validate_candidates(candidates, weights)?;

    let maxima = column_maxima(candidates, weights);

    let mut scored: Vec<RankedResult> = candidates
        .iter()
        .map(|candidate| score_candidate(candidate, weights, &maxima))
        .collect();

    // `sort_by` is stable, so ties stay in input order.
    scored.sort_by(|left, right| right.score.total_cmp(&left.score));

    for (position, result) in scored.iter_mut().enumerate() {
        result.rank = (position + 1) as u32;
    }

    Ok(scored)
}

fn validate_candidates(
    candidates: &[Candidate],
    weights: &WeightVector,
) -> Result<(), RankingError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(&candidate.id) {
            return Err(RankingError::DuplicateCandidate {
                candidate: candidate.id.clone(),
            });
        }
        for (criterion, value) in &candidate.scores {
            if !weights.contains(criterion) {
                return Err(RankingError::invalid_weights(format!(
                    "missing weight for criterion {criterion}"
                )));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(RankingError::InvalidScore {
                    candidate: candidate.id.clone(),
                    criterion: criterion.clone(),
                    value: *value,
                });
            }
        }
    }

    Ok(())
}

fn column_maxima(candidates: &[Candidate], weights: &WeightVector) -> BTreeMap<CriterionName, f64> {
    weights
        .criteria()
        .map(|criterion| {
            let max = candidates
                .iter()
                .map(|candidate| candidate.raw(criterion))
                .fold(0.0_f64, f64::max);
            // An all-zero column divides by 1 and contributes nothing.
            let denominator = if max == 0.0 { 1.0 } else { max };
            (criterion.clone(), denominator)
        })
        .collect()
}

fn score_candidate(
    candidate: &Candidate,
    weights: &WeightVector,
    maxima: &BTreeMap<CriterionName, f64>,
) -> RankedResult {
    let components: Vec<CriterionContribution> = weights
        .iter()
        .map(|(criterion, weight)| {
            let raw = candidate.raw(criterion);
            let max = maxima.get(criterion).copied().unwrap_or(1.0);
            let normalized = (raw / max).clamp(0.0, 1.0);
            CriterionContribution {
                criterion: criterion.clone(),
                raw,
                normalized,
                weight,
                contribution: normalized * weight,
            }
        })
        .collect();

    let score = components
        .iter()
        .map(|component| component.contribution)
        .sum();

    RankedResult {
        candidate_id: candidate.id.clone(),
        name: candidate.name.clone(),
        score,
        rank: 0,
        components,
    }
}

//! Simple Additive Weighting (SAW) ranking over benefit criteria.
//!
//! Every criterion is normalised by its maximum within the ranked group, multiplied
//! by its weight, and summed into a composite score. Candidates are then ordered by
//! that score with a stable, input-order tie-break.

mod engine;
pub mod export;
mod weights;

pub use engine::{rank, RankingEngine};
pub use weights::{WeightVector, WEIGHT_SUM_TOLERANCE};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a scored attribute such as `education` or `experience`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionName(pub String);

impl CriterionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CriterionName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Stable identifier of a ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Engine input: one candidate with its raw criterion values.
///
/// Criteria absent from `scores` count as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub scores: BTreeMap<CriterionName, f64>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId(id.into()),
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, criterion: impl Into<String>, value: f64) -> Self {
        self.scores.insert(CriterionName(criterion.into()), value);
        self
    }

    pub fn raw(&self, criterion: &CriterionName) -> f64 {
        self.scores.get(criterion).copied().unwrap_or(0.0)
    }
}

/// Contribution of one criterion to a candidate's composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: CriterionName,
    pub raw: f64,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Engine output for a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub candidate_id: CandidateId,
    pub name: String,
    pub score: f64,
    pub rank: u32,
    pub components: Vec<CriterionContribution>,
}

/// Caller-input failures raised before any ranking takes place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("invalid weights: {detail}")]
    InvalidWeights { detail: String },
    #[error("at least 2 candidates are required for ranking, found {found}")]
    InsufficientCandidates { found: usize },
    #[error("candidate {candidate} appears more than once in the ranked group")]
    DuplicateCandidate { candidate: CandidateId },
    #[error("candidate {candidate} has invalid value {value} for criterion {criterion}")]
    InvalidScore {
        candidate: CandidateId,
        criterion: CriterionName,
        value: f64,
    },
}

impl RankingError {
    pub(crate) fn invalid_weights(detail: impl Into<String>) -> Self {
        Self::InvalidWeights {
            detail: detail.into(),
        }
    }

    /// Short machine-readable label for API payloads and logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            RankingError::InvalidWeights { .. } => "invalid_weights",
            RankingError::InsufficientCandidates { .. } => "insufficient_candidates",
            RankingError::DuplicateCandidate { .. } => "duplicate_candidate",
            RankingError::InvalidScore { .. } => "invalid_score",
        }
    }
}

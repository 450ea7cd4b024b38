use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CriterionName, RankingError};

/// Accepted shortfall of the weight sum below 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

// Slack for float summation error on top of the stated tolerance.
const FLOAT_SLACK: f64 = 1e-9;

/// Per-run mapping of criterion to weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<CriterionName, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: impl Into<String>, weight: f64) -> Self {
        self.0.insert(CriterionName(criterion.into()), weight);
        self
    }

    pub fn insert(&mut self, criterion: CriterionName, weight: f64) {
        self.0.insert(criterion, weight);
    }

    pub fn get(&self, criterion: &CriterionName) -> Option<f64> {
        self.0.get(criterion).copied()
    }

    pub fn contains(&self, criterion: &CriterionName) -> bool {
        self.0.contains_key(criterion)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CriterionName, f64)> {
        self.0.iter().map(|(name, weight)| (name, *weight))
    }

    pub fn criteria(&self) -> impl Iterator<Item = &CriterionName> {
        self.0.keys()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Checks range and sum of the weights on their own.
    ///
    /// The sum may fall short of 1.0 by up to [`WEIGHT_SUM_TOLERANCE`] but may not
    /// exceed it, which keeps every composite score inside `[0, 1]`.
    pub fn validate(&self) -> Result<(), RankingError> {
        if self.0.is_empty() {
            return Err(RankingError::invalid_weights("no criteria were weighted"));
        }

        for (criterion, weight) in &self.0 {
            if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                return Err(RankingError::invalid_weights(format!(
                    "weight {weight} for {criterion} must be within [0, 1]"
                )));
            }
        }

        let sum = self.sum();
        if sum > 1.0 + FLOAT_SLACK || sum < 1.0 - WEIGHT_SUM_TOLERANCE - FLOAT_SLACK {
            return Err(RankingError::invalid_weights(format!(
                "weights sum to {sum:.4}, expected 1.0 (tolerance -{WEIGHT_SUM_TOLERANCE})"
            )));
        }

        Ok(())
    }

    /// Checks that the weights cover exactly the criteria a set of records is scored on.
    pub fn validate_against<'a, I>(&self, criteria: I) -> Result<(), RankingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.validate()?;

        let expected: Vec<&str> = criteria.into_iter().collect();
        if let Some(missing) = expected
            .iter()
            .find(|name| !self.0.contains_key(&CriterionName::from(**name)))
        {
            return Err(RankingError::invalid_weights(format!(
                "missing weight for criterion {missing}"
            )));
        }
        if let Some(extra) = self
            .0
            .keys()
            .find(|name| !expected.contains(&name.as_str()))
        {
            return Err(RankingError::invalid_weights(format!(
                "unknown criterion {extra}"
            )));
        }

        Ok(())
    }
}

impl FromIterator<(CriterionName, f64)> for WeightVector {
    fn from_iter<T: IntoIterator<Item = (CriterionName, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<CriterionName, f64>> for WeightVector {
    fn from(value: BTreeMap<CriterionName, f64>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halves(first: f64, second: f64) -> WeightVector {
        WeightVector::new()
            .with("education", first)
            .with("experience", second)
    }

    #[test]
    fn accepts_sum_slightly_below_one() {
        assert!(halves(0.5, 0.4995).validate().is_ok());
    }

    #[test]
    fn rejects_sum_above_one() {
        match halves(0.5, 0.5005).validate() {
            Err(RankingError::InvalidWeights { detail }) => assert!(detail.contains("sum")),
            other => panic!("expected invalid weights, got {other:?}"),
        }
    }

    #[test]
    fn rejects_sum_far_below_one() {
        assert!(matches!(
            halves(0.5, 0.4).validate(),
            Err(RankingError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_weights() {
        assert!(halves(1.5, -0.5).validate().is_err());
        assert!(halves(f64::NAN, 0.5).validate().is_err());
    }

    #[test]
    fn rejects_empty_vector() {
        assert!(matches!(
            WeightVector::new().validate(),
            Err(RankingError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn validate_against_reports_missing_and_unknown_criteria() {
        let weights = halves(0.5, 0.5);

        match weights.validate_against(["education", "experience", "skills"]) {
            Err(RankingError::InvalidWeights { detail }) => assert!(detail.contains("skills")),
            other => panic!("expected missing weight, got {other:?}"),
        }

        match weights.validate_against(["education"]) {
            Err(RankingError::InvalidWeights { detail }) => {
                assert!(detail.contains("experience"))
            }
            other => panic!("expected unknown criterion, got {other:?}"),
        }

        assert!(weights.validate_against(["experience", "education"]).is_ok());
    }
}

//! Mapping between applicant records and the generic ranking shape.

use std::collections::HashMap;

use crate::ranking::{Candidate, CandidateId, CriterionName, RankedResult};

use super::domain::{InternshipApplication, JobApplication, SawAlternative};

/// Record type that can take part in a SAW ranking.
pub trait RankableApplicant {
    fn candidate_id(&self) -> CandidateId;

    fn to_candidate(&self) -> Candidate;

    fn apply_ranking(&mut self, result: &RankedResult);

    fn clear_ranking(&mut self);
}

impl RankableApplicant for JobApplication {
    fn candidate_id(&self) -> CandidateId {
        CandidateId(self.id.0.clone())
    }

    fn to_candidate(&self) -> Candidate {
        Candidate::new(self.id.0.clone(), self.applicant_name.clone())
            .with_score("education", self.education)
            .with_score("experience", self.experience)
            .with_score("skills", self.skills)
            .with_score("interview", self.interview)
    }

    fn apply_ranking(&mut self, result: &RankedResult) {
        self.score = Some(result.score);
        self.rank = Some(result.rank);
    }

    fn clear_ranking(&mut self) {
        self.score = None;
        self.rank = None;
    }
}

impl RankableApplicant for InternshipApplication {
    fn candidate_id(&self) -> CandidateId {
        CandidateId(self.id.0.clone())
    }

    fn to_candidate(&self) -> Candidate {
        Candidate::new(self.id.0.clone(), self.applicant_name.clone())
            .with_score("academic", self.academic)
            .with_score("skills", self.skills)
            .with_score("interview", self.interview)
            .with_score("motivation", self.motivation)
    }

    fn apply_ranking(&mut self, result: &RankedResult) {
        self.score = Some(result.score);
        self.rank = Some(result.rank);
    }

    fn clear_ranking(&mut self) {
        self.score = None;
        self.rank = None;
    }
}

impl RankableApplicant for SawAlternative {
    fn candidate_id(&self) -> CandidateId {
        CandidateId(self.id.0.clone())
    }

    fn to_candidate(&self) -> Candidate {
        let mut candidate = Candidate::new(self.id.0.clone(), self.name.clone());
        candidate.scores = self
            .values
            .iter()
            .map(|(criterion, value)| (CriterionName(criterion.clone()), *value))
            .collect();
        candidate
    }

    fn apply_ranking(&mut self, result: &RankedResult) {
        self.score = Some(result.score);
        self.rank = Some(result.rank);
    }

    fn clear_ranking(&mut self) {
        self.score = None;
        self.rank = None;
    }
}

/// Writes each result back onto the record with the matching identifier.
pub(crate) fn apply_results<T: RankableApplicant>(records: &mut [T], results: &[RankedResult]) {
    let by_id: HashMap<&CandidateId, &RankedResult> = results
        .iter()
        .map(|result| (&result.candidate_id, result))
        .collect();

    for record in records.iter_mut() {
        match by_id.get(&record.candidate_id()).copied() {
            Some(result) => record.apply_ranking(result),
            None => record.clear_ranking(),
        }
    }
}

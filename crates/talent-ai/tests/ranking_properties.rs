use proptest::prelude::*;
use talent_ai::ranking::{rank, Candidate, RankingError, WeightVector};

const CRITERIA: [&str; 3] = ["education", "experience", "interview"];

fn candidates_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(prop::array::uniform3(0.0f64..100.0), 2..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, values)| {
                CRITERIA.iter().zip(values).fold(
                    Candidate::new(format!("c-{index}"), format!("Candidate {index}")),
                    |candidate, (criterion, value)| candidate.with_score(*criterion, value),
                )
            })
            .collect()
    })
}

fn weights_strategy() -> impl Strategy<Value = WeightVector> {
    prop::array::uniform3(1u32..100).prop_map(|raw| {
        let total: u32 = raw.iter().sum();
        CRITERIA
            .iter()
            .zip(raw)
            .fold(WeightVector::new(), |weights, (criterion, part)| {
                weights.with(*criterion, f64::from(part) / f64::from(total))
            })
    })
}

proptest! {
    #[test]
    fn ranks_form_a_gapless_permutation(
        candidates in candidates_strategy(),
        weights in weights_strategy(),
    ) {
        let results = rank(&candidates, &weights).expect("valid input ranks");

        let mut ranks: Vec<u32> = results.iter().map(|result| result.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=candidates.len() as u32).collect();
        prop_assert_eq!(ranks, expected);
    }

    #[test]
    fn scores_stay_within_unit_interval_and_descend(
        candidates in candidates_strategy(),
        weights in weights_strategy(),
    ) {
        let results = rank(&candidates, &weights).expect("valid input ranks");

        for result in &results {
            prop_assert!(result.score >= 0.0);
            prop_assert!(result.score <= 1.0 + 1e-9);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn ranking_is_idempotent(
        candidates in candidates_strategy(),
        weights in weights_strategy(),
    ) {
        let first = rank(&candidates, &weights).expect("valid input ranks");
        let second = rank(&candidates, &weights).expect("valid input ranks");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn raising_a_value_never_worsens_rank(
        candidates in candidates_strategy(),
        weights in weights_strategy(),
        pick in any::<prop::sample::Index>(),
        criterion in 0usize..3,
        bump in 0.0f64..50.0,
    ) {
        let target = pick.index(candidates.len());
        let name = CRITERIA[criterion];
        let current = candidates[target].raw(&name.into());
        let column_max = candidates
            .iter()
            .map(|candidate| candidate.raw(&name.into()))
            .fold(0.0f64, f64::max);
        // Keep the column maximum fixed.
        let raised = (current + bump).min(column_max);

        let before = rank(&candidates, &weights).expect("valid input ranks");
        let mut improved = candidates.clone();
        improved[target] = improved[target].clone().with_score(name, raised);
        let after = rank(&improved, &weights).expect("valid input ranks");

        let id = &candidates[target].id;
        let rank_before = before.iter().find(|r| &r.candidate_id == id).map(|r| r.rank);
        let rank_after = after.iter().find(|r| &r.candidate_id == id).map(|r| r.rank);
        prop_assert!(rank_after <= rank_before);
    }
}

#[test]
fn sample_scenario_from_recruiting_handbook() {
    let candidates = vec![
        Candidate::new("a", "A")
            .with_score("edu", 80.0)
            .with_score("exp", 60.0),
        Candidate::new("b", "B")
            .with_score("edu", 100.0)
            .with_score("exp", 40.0),
    ];
    let weights = WeightVector::new().with("edu", 0.5).with("exp", 0.5);

    let results = rank(&candidates, &weights).expect("ranks");

    assert_eq!(results[0].candidate_id.0, "a");
    assert!((results[0].score - 0.9).abs() < 1e-9);
    assert_eq!(results[1].candidate_id.0, "b");
    assert!((results[1].score - 0.8333).abs() < 1e-4);
}

#[test]
fn weight_sum_boundaries_are_asymmetric() {
    let candidates = vec![
        Candidate::new("a", "A").with_score("edu", 1.0),
        Candidate::new("b", "B").with_score("edu", 2.0),
    ];

    let over = WeightVector::new().with("edu", 0.6).with("exp", 0.4005);
    assert!(matches!(
        rank(&candidates, &over),
        Err(RankingError::InvalidWeights { .. })
    ));

    let under = WeightVector::new().with("edu", 0.6).with("exp", 0.3995);
    assert!(rank(&candidates, &under).is_ok());
}

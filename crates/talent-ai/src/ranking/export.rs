//! CSV rendering of ranked results for spreadsheet hand-off.

use std::io::Write;

use super::{CriterionName, RankedResult};

/// Writes one row per result: rank, id, name, score, then each criterion's
/// normalised value in the order of the first result's breakdown.
pub fn write_csv<W: Write>(results: &[RankedResult], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let criteria: Vec<CriterionName> = results
        .first()
        .map(|result| {
            result
                .components
                .iter()
                .map(|component| component.criterion.clone())
                .collect()
        })
        .unwrap_or_default();

    let mut header = vec![
        "rank".to_string(),
        "candidate_id".to_string(),
        "name".to_string(),
        "score".to_string(),
    ];
    header.extend(criteria.iter().map(|criterion| criterion.to_string()));
    csv_writer.write_record(&header)?;

    for result in results {
        let mut row = vec![
            result.rank.to_string(),
            result.candidate_id.to_string(),
            result.name.clone(),
            format!("{:.4}", result.score),
        ];
        row.extend(criteria.iter().map(|criterion| {
            result
                .components
                .iter()
                .find(|component| &component.criterion == criterion)
                .map(|component| format!("{:.4}", component.normalized))
                .unwrap_or_default()
        }));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{rank, Candidate, WeightVector};

    #[test]
    fn writes_header_and_rows_in_rank_order() {
        let candidates = vec![
            Candidate::new("a", "Ayu")
                .with_score("education", 80.0)
                .with_score("experience", 60.0),
            Candidate::new("b", "Budi")
                .with_score("education", 100.0)
                .with_score("experience", 40.0),
        ];
        let weights = WeightVector::new()
            .with("education", 0.5)
            .with("experience", 0.5);
        let results = rank(&candidates, &weights).expect("ranks");

        let mut buffer = Vec::new();
        write_csv(&results, &mut buffer).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "rank,candidate_id,name,score,education,experience");
        assert_eq!(lines[1], "1,a,Ayu,0.9000,0.8000,1.0000");
        assert!(lines[2].starts_with("2,b,Budi,0.8333"));
    }

    #[test]
    fn empty_results_still_write_header() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).expect("csv written");
        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "rank,candidate_id,name,score\n"
        );
    }
}

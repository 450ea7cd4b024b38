use crate::infra::{InMemoryApplicantRepository, InMemoryAuditLog, SeedData};
use clap::{Args, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use talent_ai::error::AppError;
use talent_ai::ranking::{export, rank, Candidate, RankedResult, WeightVector};
use talent_ai::recruitment::{
    ApplicantId, ApplicantRankingService, InternshipApplication, InternshipTrackId,
    JobApplication, JobPostingId, RankingRequest,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file with `weights` and `candidates`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format for the ranked results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the job-posting ranking as CSV instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
    /// Skip the internship portion of the demo
    #[arg(long)]
    pub(crate) skip_internships: bool,
}

/// File layout accepted by the `rank` command.
#[derive(Debug, Deserialize)]
pub(crate) struct RankInput {
    pub(crate) weights: WeightVector,
    pub(crate) candidates: Vec<Candidate>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs { input, format } = args;

    let raw = std::fs::read_to_string(&input)?;
    let RankInput {
        weights,
        candidates,
    } = serde_json::from_str(&raw)?;

    let results = rank(&candidates, &weights)?;
    render_results(&results, format)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        csv,
        skip_internships,
    } = args;

    let repository = Arc::new(InMemoryApplicantRepository::with_seed(demo_seed()));
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = ApplicantRankingService::new(repository, audit);

    println!("Applicant ranking demo");

    let posting = JobPostingId("backend-engineer".to_string());
    let job_request = RankingRequest {
        requested_by: "demo-recruiter".to_string(),
        weights: WeightVector::new()
            .with("education", 0.2)
            .with("experience", 0.3)
            .with("skills", 0.3)
            .with("interview", 0.2),
    };
    let report = service.rank_job_posting(&posting, &job_request)?;
    println!(
        "\nJob posting {} ({} applicants, run {})",
        posting.0,
        report.results.len(),
        report.run_id
    );
    let format = if csv {
        OutputFormat::Csv
    } else {
        OutputFormat::Table
    };
    render_results(&report.results, format)?;

    if !skip_internships {
        let track = InternshipTrackId("summer-intern".to_string());
        let internship_request = RankingRequest {
            requested_by: "demo-campus-lead".to_string(),
            weights: WeightVector::new()
                .with("academic", 0.35)
                .with("skills", 0.25)
                .with("interview", 0.25)
                .with("motivation", 0.15),
        };
        let report = service.rank_internship_track(&track, &internship_request)?;
        println!(
            "\nInternship track {} ({} applicants, run {})",
            track.0,
            report.results.len(),
            report.run_id
        );
        render_results(&report.results, OutputFormat::Table)?;
    }

    println!("\nStored rankings for {}", posting.0);
    for view in service.job_rankings(&posting)? {
        match (view.rank, view.score) {
            (Some(rank), Some(score)) => println!(
                "- #{} {} ({}) score {:.4}",
                rank, view.applicant_name, view.applicant_id.0, score
            ),
            _ => println!("- {} ({}) not ranked", view.applicant_name, view.applicant_id.0),
        }
    }

    println!("\nAudit trail");
    for entry in service.audit_trail(10)? {
        let weights: Vec<String> = entry
            .weights
            .iter()
            .map(|(criterion, weight)| format!("{criterion}={weight}"))
            .collect();
        println!(
            "- {} | {} | by {} | {} candidates | {}",
            entry.run_id,
            entry.group,
            entry.requested_by,
            entry.candidate_count,
            weights.join(", ")
        );
    }

    Ok(())
}

fn render_results(results: &[RankedResult], format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Csv => export::write_csv(results, std::io::stdout())?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::Table => {
            for result in results {
                let breakdown: Vec<String> = result
                    .components
                    .iter()
                    .map(|component| {
                        format!("{} {:.3}", component.criterion, component.normalized)
                    })
                    .collect();
                println!(
                    "{:>3}. {:<24} {:.4}  [{}]",
                    result.rank,
                    result.name,
                    result.score,
                    breakdown.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn demo_seed() -> SeedData {
    let job = |id: &str, name: &str, education, experience, skills, interview| JobApplication {
        id: ApplicantId(id.to_string()),
        applicant_name: name.to_string(),
        job_posting_id: JobPostingId("backend-engineer".to_string()),
        education,
        experience,
        skills,
        interview,
        score: None,
        rank: None,
    };
    let intern = |id: &str, name: &str, academic, skills, interview, motivation| {
        InternshipApplication {
            id: ApplicantId(id.to_string()),
            applicant_name: name.to_string(),
            track_id: InternshipTrackId("summer-intern".to_string()),
            academic,
            skills,
            interview,
            motivation,
            score: None,
            rank: None,
        }
    };

    SeedData {
        job_applications: vec![
            job("job-001", "Sari Wulandari", 4.0, 6.0, 85.0, 78.0),
            job("job-002", "Dimas Pratama", 3.0, 9.0, 80.0, 88.0),
            job("job-003", "Lina Hartono", 5.0, 3.0, 92.0, 81.0),
            job("job-004", "Agus Setiawan", 3.0, 2.0, 70.0, 65.0),
        ],
        internship_applications: vec![
            intern("int-001", "Rina Kusuma", 3.8, 75.0, 82.0, 90.0),
            intern("int-002", "Bayu Nugroho", 3.4, 88.0, 79.0, 70.0),
            intern("int-003", "Putri Anggraini", 3.9, 68.0, 85.0, 85.0),
        ],
    }
}

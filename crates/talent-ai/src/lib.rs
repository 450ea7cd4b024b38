//! Applicant ranking for job postings and internship tracks.
//!
//! The [`ranking`] module holds the pure SAW engine; [`recruitment`] wires it to
//! applicant records, persistence, and the audit trail.

pub mod config;
pub mod error;
pub mod ranking;
pub mod recruitment;
pub mod telemetry;

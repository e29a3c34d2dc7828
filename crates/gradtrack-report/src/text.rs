//! Plain-text progress summary, suitable for terminal output and logs.

use gradtrack_core::model::SectionStatus;
use gradtrack_core::report::EvaluationReport;

use crate::markdown::n_of_counter;

/// Render a compact plain-text summary of an evaluation report.
pub fn generate_text(report: &EvaluationReport) -> String {
    let major = &report.major_progress;
    let college = &report.college_progress;
    let mut out = String::new();

    out.push_str(&format!(
        "{} [{}]: {:.1}/{:.1} credits ({:.1} remaining)\n",
        major.id,
        major.major_key,
        major.major_credits_earned,
        major.major_credits_target,
        major.remaining_credits
    ));

    for section in &major.sections {
        let marker = match section.status {
            SectionStatus::Complete => "[x]",
            SectionStatus::InProgress => "[~]",
            SectionStatus::Missing => "[ ]",
            SectionStatus::Unknown => "[?]",
        };
        out.push_str(&format!("  {marker} {}", section.title));
        if let Some(counter) = n_of_counter(section) {
            out.push_str(&format!(" ({counter})"));
        }
        if !section.missing.is_empty() {
            let needed: Vec<&str> = section.missing.iter().map(|c| c.code.as_str()).collect();
            out.push_str(&format!(" — needs {}", needed.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Degree {}: {:.1}/{:.1} credits ({:.1} remaining)\n",
        college.id,
        college.credits_completed,
        college.total_degree_credits,
        college.credits_remaining
    ));

    out
}

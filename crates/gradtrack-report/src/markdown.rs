//! Markdown progress report generator.

use std::path::Path;

use anyhow::{Context, Result};
use gradtrack_core::report::{EvaluationReport, SectionResult};

/// Render an evaluation report as a markdown document.
pub fn generate_markdown(report: &EvaluationReport) -> String {
    let major = &report.major_progress;
    let college = &report.college_progress;
    let mut md = String::new();

    md.push_str(&format!("# Progress report — {}\n\n", major.id));
    md.push_str(&format!(
        "Generated {}\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Major\n\n");
    md.push_str(&format!(
        "**{:.1} / {:.1}** credits earned ({:.1} remaining)\n\n",
        major.major_credits_earned, major.major_credits_target, major.remaining_credits
    ));

    md.push_str("| Section | Type | Status | Credits | Taken | Still needed |\n");
    md.push_str("|---------|------|--------|---------|-------|--------------|\n");
    for section in &major.sections {
        md.push_str(&format!(
            "| {} | {} | {} | {:.1} | {} | {} |\n",
            section.title,
            section.section_type,
            section.status,
            section.credits_earned,
            code_list(&section.taken),
            code_list(&section.missing),
        ));
    }
    md.push('\n');

    md.push_str(&format!("## Degree ({})\n\n", college.id));
    md.push_str(&format!(
        "**{:.1} / {:.1}** credits completed ({:.1} remaining)\n",
        college.credits_completed, college.total_degree_credits, college.credits_remaining
    ));

    md
}

/// Write a markdown report to a file.
pub fn write_markdown(report: &EvaluationReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(report))
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}

fn code_list(courses: &[gradtrack_core::model::CourseRef]) -> String {
    if courses.is_empty() {
        return "—".to_string();
    }
    courses
        .iter()
        .map(|c| c.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Helper shared with the text renderer: "2/2" style counter for N_OF rows.
pub(crate) fn n_of_counter(section: &SectionResult) -> Option<String> {
    match (section.n_completed, section.n_required) {
        (Some(done), Some(required)) => Some(format!("{done}/{required}")),
        _ => None,
    }
}

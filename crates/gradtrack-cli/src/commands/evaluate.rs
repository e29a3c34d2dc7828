//! The `gradtrack evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gradtrack_core::model::PlannedCourse;
use gradtrack_core::report::EvaluationReport;

pub fn execute(
    courses_path: PathBuf,
    major: String,
    college: Option<String>,
    catalog: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let engine = super::load_engine(catalog)?;

    let content = std::fs::read_to_string(&courses_path)
        .with_context(|| format!("failed to read courses file: {}", courses_path.display()))?;
    let planned: Vec<PlannedCourse> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse courses JSON: {}", courses_path.display()))?;

    let report = engine.evaluate(college.as_deref(), &major, &planned)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", gradtrack_report::markdown::generate_markdown(&report)),
        "text" => print!("{}", gradtrack_report::text::generate_text(&report)),
        _ => print_table(&report),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        tracing::info!("wrote JSON report to {}", path.display());
    }

    Ok(())
}

fn print_table(report: &EvaluationReport) {
    let major = &report.major_progress;
    let college = &report.college_progress;

    println!("{} [{}]", major.id, major.major_key);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Section", "Type", "Status", "Credits", "Still needed"]);

    for section in &major.sections {
        let needed = section
            .missing
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            section.title.clone(),
            section.section_type.clone(),
            section.status.to_string(),
            format!("{:.1}", section.credits_earned),
            needed,
        ]);
    }
    println!("{table}");

    println!(
        "Major credits: {:.1} / {:.1} ({:.1} remaining)",
        major.major_credits_earned, major.major_credits_target, major.remaining_credits
    );
    println!(
        "Degree credits ({}): {:.1} / {:.1} ({:.1} remaining)",
        college.id,
        college.credits_completed,
        college.total_degree_credits,
        college.credits_remaining
    );
}

//! Evaluation report types with JSON persistence.
//!
//! These are the JSON-serializable shapes handed back to callers; the
//! transport layer is expected to emit them without reshaping.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluate::SelectedOption;
use crate::model::{CourseRef, SectionStatus};

/// One section's evaluated result, as reported to the caller.
///
/// `credits_earned` is deduplicated across the whole major: a course that
/// satisfies several sections is credited only to the first section that
/// lists it, so section rows sum exactly to the major total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub status: SectionStatus,
    pub taken: Vec<CourseRef>,
    pub missing: Vec<CourseRef>,
    /// Canonical codes this section matched (pre-dedup, for transparency).
    pub credited_codes: Vec<String>,
    pub credits_earned: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<SelectedOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_required: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_completed: Option<usize>,
}

/// A student's progress toward one major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorProgress {
    /// Human-readable major name.
    pub id: String,
    /// The key that was evaluated.
    pub major_key: String,
    /// The college this major belongs to.
    pub college_key: String,
    /// Per-section results in declaration order.
    pub sections: Vec<SectionResult>,
    pub major_credits_earned: f64,
    pub major_credits_target: f64,
    /// Credits still needed, clamped at zero.
    pub remaining_credits: f64,
}

/// A student's progress toward the flat degree credit target.
///
/// Independent of section matching: every planned course's credits count,
/// whether or not a rule section lists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeProgress {
    pub id: String,
    pub college_key: String,
    pub total_degree_credits: f64,
    pub credits_completed: f64,
    /// Credits still needed, clamped at zero.
    pub credits_remaining: f64,
    /// Gen-Ed labels, passed through unevaluated.
    pub gen_ed: serde_json::Value,
    /// College-specific breadth labels, passed through unevaluated.
    pub breadth: serde_json::Value,
}

/// The combined per-request evaluation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// When the report was produced.
    pub created_at: DateTime<Utc>,
    pub college_progress: CollegeProgress,
    pub major_progress: MajorProgress,
}

impl EvaluationReport {
    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

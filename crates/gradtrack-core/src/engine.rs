//! Audit engine orchestrators.
//!
//! Composes the section evaluators over a catalog's majors and degrees.
//! Stateless per call: every evaluation builds its own ephemeral
//! [`UserCatalog`] and touches only immutable catalog data, so one engine
//! can serve concurrent callers without locking.

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::AuditError;
use crate::evaluate::eval_section;
use crate::model::PlannedCourse;
use crate::report::{CollegeProgress, EvaluationReport, MajorProgress, SectionResult};
use crate::user::UserCatalog;

/// The audit engine: a shared catalog plus the evaluation entry points.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    catalog: Arc<Catalog>,
}

impl AuditEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// An engine over the embedded builtin catalog.
    pub fn builtin() -> Self {
        Self::new(Arc::new(Catalog::builtin().clone()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Evaluate a student's progress toward one major.
    ///
    /// Sections are evaluated in declaration order. Credits are
    /// deduplicated across sections through a running used-codes set: a
    /// course counts toward the major total only the first time it appears,
    /// attributed to the earliest section that lists it.
    pub fn evaluate_major(
        &self,
        major_key: &str,
        planned: &[PlannedCourse],
    ) -> Result<MajorProgress, AuditError> {
        let major = self.catalog.major(major_key)?;
        let user = UserCatalog::build(planned, self.catalog.aliases());

        let mut sections = Vec::with_capacity(major.sections.len());
        let mut used_codes: HashSet<String> = HashSet::new();
        let mut major_credits_earned = 0.0;

        for section in &major.sections {
            let outcome = eval_section(&section.rule, &user, self.catalog.aliases());
            tracing::debug!(
                section = %section.id,
                status = %outcome.status,
                matched = outcome.taken.len(),
                "evaluated section"
            );

            // Credit each code once across the whole major, using the
            // student's own credit values.
            let mut dedup_credits = 0.0;
            for code in &outcome.credited_codes {
                if used_codes.insert(code.clone()) {
                    dedup_credits += user.credits_for(code).unwrap_or(0.0);
                }
            }
            major_credits_earned += dedup_credits;

            sections.push(SectionResult {
                id: section.id.clone(),
                title: section.title.clone(),
                section_type: section.rule.type_tag().to_string(),
                status: outcome.status,
                taken: outcome.taken,
                missing: outcome.missing,
                credited_codes: outcome.credited_codes.into_iter().collect(),
                credits_earned: dedup_credits,
                selected_option: outcome.selected_option,
                n_required: outcome.n_required,
                n_completed: outcome.n_completed,
            });
        }

        let target = major.total_major_credits;
        Ok(MajorProgress {
            id: major.id.clone(),
            major_key: major_key.to_string(),
            college_key: major.college.clone(),
            sections,
            major_credits_earned,
            major_credits_target: target,
            remaining_credits: (target - major_credits_earned).max(0.0),
        })
    }

    /// Evaluate flat degree-credit progress.
    ///
    /// Sums every planned course's credit value regardless of whether any
    /// rule section lists it; duplicates in the input each count, since
    /// this mirrors whatever the student recorded.
    pub fn evaluate_degree(
        &self,
        college_key: &str,
        planned: &[PlannedCourse],
    ) -> Result<CollegeProgress, AuditError> {
        let degree = self.catalog.degree(college_key)?;

        let credits_completed: f64 = planned.iter().map(|c| c.credits.as_f64()).sum();
        let target = degree.total_degree_credits;

        Ok(CollegeProgress {
            id: degree.id.clone(),
            college_key: college_key.to_string(),
            total_degree_credits: target,
            credits_completed,
            credits_remaining: (target - credits_completed).max(0.0),
            gen_ed: degree.gen_ed.clone(),
            breadth: degree.breadth.clone(),
        })
    }

    /// Full evaluation: major progress plus degree progress in one report.
    ///
    /// The major always runs first; when no college key is supplied (or it
    /// is empty), the major's declared college is used.
    pub fn evaluate(
        &self,
        college_key: Option<&str>,
        major_key: &str,
        planned: &[PlannedCourse],
    ) -> Result<EvaluationReport, AuditError> {
        let major_progress = self.evaluate_major(major_key, planned)?;

        let college = match college_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => major_progress.college_key.as_str(),
        };
        let college_progress = self.evaluate_degree(college, planned)?;

        Ok(EvaluationReport {
            created_at: chrono::Utc::now(),
            college_progress,
            major_progress,
        })
    }
}

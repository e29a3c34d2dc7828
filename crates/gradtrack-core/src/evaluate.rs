//! Pure section evaluators for the three rule kinds.
//!
//! Each evaluator compares one requirement section against a student's
//! [`UserCatalog`] and reports completion status, the taken/missing split,
//! and which codes may count toward major credit. No I/O, no shared state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{CourseRef, OneOfOption, SectionRule, SectionStatus};
use crate::normalize::{normalize, AliasTable};
use crate::user::UserCatalog;

/// The outcome of evaluating a single requirement section.
///
/// `credits_earned` here is the section's own view and may overlap with
/// other sections; cross-section deduplication happens in the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub status: SectionStatus,
    /// Courses from the section that the student has, normalized.
    pub taken: Vec<CourseRef>,
    /// Courses still needed. For N_OF this is truncated to the number of
    /// courses actually still required, not every absent item.
    pub missing: Vec<CourseRef>,
    /// Canonical codes eligible to count toward the major total.
    pub credited_codes: BTreeSet<String>,
    pub credits_earned: f64,
    /// For ONE_OF: which option was satisfied, or the closest partial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<SelectedOption>,
    /// For N_OF: the required count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_required: Option<usize>,
    /// For N_OF: how many of the required count are satisfied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_completed: Option<usize>,
}

impl SectionOutcome {
    fn empty(status: SectionStatus) -> Self {
        Self {
            status,
            taken: Vec::new(),
            missing: Vec::new(),
            credited_codes: BTreeSet::new(),
            credits_earned: 0.0,
            selected_option: None,
            n_required: None,
            n_completed: None,
        }
    }
}

/// Identifies which ONE_OF option satisfied a section, or was closest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectedOption {
    #[serde(rename = "COURSE")]
    Course { code: String },
    #[serde(rename = "ALL_OF")]
    AllOf {
        /// The satisfied courses, for a fully completed subgroup.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<String>,
    },
}

/// Evaluate a section against the matching rule kind.
pub fn eval_section(rule: &SectionRule, user: &UserCatalog, aliases: &AliasTable) -> SectionOutcome {
    match rule {
        SectionRule::AllOf { items } => eval_all_of(items, user, aliases),
        SectionRule::OneOf { options } => eval_one_of(options, user, aliases),
        SectionRule::NOf { n, items } => eval_n_of(*n, items, user, aliases),
        SectionRule::Unknown { tag } => {
            tracing::warn!("unrecognized section type {tag:?}, skipping evaluation");
            SectionOutcome::empty(SectionStatus::Unknown)
        }
    }
}

/// ALL_OF: every item must be present.
pub fn eval_all_of(
    items: &[CourseRef],
    user: &UserCatalog,
    aliases: &AliasTable,
) -> SectionOutcome {
    let (taken, missing, credited_codes) = partition(items, user, aliases);

    let status = if missing.is_empty() {
        SectionStatus::Complete
    } else if taken.is_empty() {
        SectionStatus::Missing
    } else {
        SectionStatus::InProgress
    };

    let credits_earned = sum_credits(&taken, user);

    SectionOutcome {
        status,
        taken,
        missing,
        credited_codes,
        credits_earned,
        selected_option: None,
        n_required: None,
        n_completed: None,
    }
}

/// ONE_OF: at least one option must be fully satisfied.
///
/// Options are scanned in declaration order and the first fully satisfiable
/// one wins immediately, so order acts as a priority. If none is satisfied,
/// the best partial match (highest matched count, strict `>`, first seen
/// wins ties) is reported for guidance. A missed single-course option only
/// seeds the initial placeholder; it never displaces a tracked partial.
pub fn eval_one_of(
    options: &[OneOfOption],
    user: &UserCatalog,
    aliases: &AliasTable,
) -> SectionOutcome {
    struct Partial {
        match_count: usize,
        taken: Vec<CourseRef>,
        missing: Vec<CourseRef>,
        credited_codes: BTreeSet<String>,
        selected_option: SelectedOption,
    }

    let mut best: Option<Partial> = None;

    for option in options {
        match option {
            OneOfOption::Course { code, credits } => {
                let code = normalize(code, aliases);
                if user.contains(&code) {
                    // First satisfied single course wins outright.
                    let credits_earned = user.credit_or_declared(&code, *credits);
                    return SectionOutcome {
                        status: SectionStatus::Complete,
                        taken: vec![CourseRef {
                            code: code.clone(),
                            credits: *credits,
                        }],
                        missing: Vec::new(),
                        credited_codes: BTreeSet::from([code.clone()]),
                        credits_earned,
                        selected_option: Some(SelectedOption::Course { code }),
                        n_required: None,
                        n_completed: None,
                    };
                }
                if best.is_none() {
                    best = Some(Partial {
                        match_count: 0,
                        taken: Vec::new(),
                        missing: vec![CourseRef {
                            code: code.clone(),
                            credits: *credits,
                        }],
                        credited_codes: BTreeSet::new(),
                        selected_option: SelectedOption::Course { code },
                    });
                }
            }
            OneOfOption::AllOf { items } => {
                let (taken, missing, credited_codes) = partition(items, user, aliases);
                if missing.is_empty() {
                    let credits_earned = sum_credits(&taken, user);
                    let item_codes = taken.iter().map(|c| c.code.clone()).collect();
                    return SectionOutcome {
                        status: SectionStatus::Complete,
                        taken,
                        missing,
                        credited_codes,
                        credits_earned,
                        selected_option: Some(SelectedOption::AllOf { items: item_codes }),
                        n_required: None,
                        n_completed: None,
                    };
                }
                // Strict > keeps the first-seen option on ties.
                if best.as_ref().is_none_or(|b| taken.len() > b.match_count) {
                    best = Some(Partial {
                        match_count: taken.len(),
                        taken,
                        missing,
                        credited_codes,
                        selected_option: SelectedOption::AllOf { items: Vec::new() },
                    });
                }
            }
        }
    }

    let Some(best) = best else {
        return SectionOutcome::empty(SectionStatus::Missing);
    };

    let status = if best.match_count > 0 {
        SectionStatus::InProgress
    } else {
        SectionStatus::Missing
    };
    let credits_earned = sum_credits(&best.taken, user);

    SectionOutcome {
        status,
        taken: best.taken,
        missing: best.missing,
        credited_codes: best.credited_codes,
        credits_earned,
        selected_option: Some(best.selected_option),
        n_required: None,
        n_completed: None,
    }
}

/// N_OF: at least `n` of the items must be present.
///
/// Only the first `n` present items (in declaration order) are credited, so
/// a student with more matches than required is not over-credited. Missing
/// suggestions are likewise capped at the count still needed.
pub fn eval_n_of(
    n: usize,
    items: &[CourseRef],
    user: &UserCatalog,
    aliases: &AliasTable,
) -> SectionOutcome {
    let (present, absent, _) = partition(items, user, aliases);

    let credited_slice = &present[..present.len().min(n)];
    let credited_codes: BTreeSet<String> =
        credited_slice.iter().map(|c| c.code.clone()).collect();
    let credits_earned = sum_credits(credited_slice, user);

    let remaining_needed = n.saturating_sub(present.len());
    let missing: Vec<CourseRef> = absent
        .into_iter()
        .take(remaining_needed)
        .collect();

    let status = if remaining_needed == 0 {
        SectionStatus::Complete
    } else if present.is_empty() {
        SectionStatus::Missing
    } else {
        SectionStatus::InProgress
    };

    let n_completed = present.len().min(n);

    SectionOutcome {
        status,
        taken: present,
        missing,
        credited_codes,
        credits_earned,
        selected_option: None,
        n_required: Some(n),
        n_completed: Some(n_completed),
    }
}

/// Split items into (taken, missing, credited codes) by set membership,
/// normalizing each item code first.
fn partition(
    items: &[CourseRef],
    user: &UserCatalog,
    aliases: &AliasTable,
) -> (Vec<CourseRef>, Vec<CourseRef>, BTreeSet<String>) {
    let mut taken = Vec::new();
    let mut missing = Vec::new();
    let mut credited = BTreeSet::new();

    for item in items {
        let code = normalize(&item.code, aliases);
        let entry = CourseRef {
            code: code.clone(),
            credits: item.credits,
        };
        if user.contains(&code) {
            credited.insert(code);
            taken.push(entry);
        } else {
            missing.push(entry);
        }
    }

    (taken, missing, credited)
}

/// Sum credits for taken courses, preferring the student's own value over
/// the catalog's declared value.
fn sum_credits(taken: &[CourseRef], user: &UserCatalog) -> f64 {
    taken
        .iter()
        .map(|c| user.credit_or_declared(&c.code, c.credits))
        .sum()
}

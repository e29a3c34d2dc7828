//! Core data model types for gradtrack.
//!
//! These are the fundamental types the entire system uses to represent
//! degree/major requirements and a student's planned courses. Requirement
//! rules are closed sum types so every evaluator matches them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A course reference inside a requirement rule: a (possibly cross-listed)
/// code plus the catalog's declared credit value.
///
/// Codes are stored as written in the catalog and normalized at evaluation
/// time, so cross-listed spellings like `"COMP SCI/E C E 354"` are fine here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    pub code: String,
    /// Declared credit value. Used as a fallback when the student has not
    /// recorded their own credit amount for the course.
    #[serde(default)]
    pub credits: Option<f64>,
}

impl CourseRef {
    pub fn new(code: impl Into<String>, credits: f64) -> Self {
        Self {
            code: code.into(),
            credits: Some(credits),
        }
    }
}

/// One option inside a `ONE_OF` section: either a single course or a
/// subgroup of courses that must all be completed together (a sequence).
#[derive(Debug, Clone, PartialEq)]
pub enum OneOfOption {
    Course { code: String, credits: Option<f64> },
    AllOf { items: Vec<CourseRef> },
}

/// The rule applied by one requirement section.
///
/// `Unknown` is produced only by the catalog loader when it encounters a
/// type tag it does not recognize; evaluating it yields a zero-credit
/// `unknown` result instead of aborting the rest of the major.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionRule {
    /// Every listed course must be present.
    AllOf { items: Vec<CourseRef> },
    /// At least one option must be fully satisfied.
    OneOf { options: Vec<OneOfOption> },
    /// At least `n` of the listed courses must be present.
    NOf { n: usize, items: Vec<CourseRef> },
    /// Unrecognized section type tag, carried through for diagnostics.
    Unknown { tag: String },
}

impl SectionRule {
    /// The catalog type tag for this rule, as it appears in section results.
    pub fn type_tag(&self) -> &str {
        match self {
            SectionRule::AllOf { .. } => "ALL_OF",
            SectionRule::OneOf { .. } => "ONE_OF",
            SectionRule::NOf { .. } => "N_OF",
            SectionRule::Unknown { tag } => tag,
        }
    }
}

/// A named rule block within a major's requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementSection {
    /// Stable identifier (e.g. "basic_cs").
    pub id: String,
    /// Human-readable title (e.g. "Basic Computer Sciences").
    pub title: String,
    pub rule: SectionRule,
}

/// A major's full requirement definition.
#[derive(Debug, Clone)]
pub struct MajorDefinition {
    /// Lookup key (e.g. "CS_LS").
    pub key: String,
    /// Human-readable name (e.g. "Computer Science (L&S)").
    pub id: String,
    /// Key of the college/degree this major belongs to (e.g. "L&S_BS").
    pub college: String,
    /// Total credits the major requires.
    pub total_major_credits: f64,
    /// Requirement sections in declaration order. Order matters: it drives
    /// both ONE_OF option priority and cross-section credit deduplication.
    pub sections: Vec<RequirementSection>,
}

/// A degree's definition: a flat credit target plus informational labels.
///
/// The label fields are opaque pass-through data; the engine never inspects
/// them (Gen-Ed and breadth rules are not auto-checked).
#[derive(Debug, Clone)]
pub struct DegreeDefinition {
    /// Lookup key (e.g. "L&S_BS").
    pub key: String,
    /// Human-readable identifier.
    pub id: String,
    /// Total credits to graduate.
    pub total_degree_credits: f64,
    /// Gen-Ed requirement labels, informational only.
    pub gen_ed: serde_json::Value,
    /// College-specific breadth/depth labels, informational only.
    pub breadth: serde_json::Value,
}

/// A course the student has completed or plans to take, as supplied by the
/// caller. The credit field tolerates whatever the caller's storage holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    pub code: String,
    #[serde(default)]
    pub credits: RawCredits,
}

impl PlannedCourse {
    pub fn new(code: impl Into<String>, credits: f64) -> Self {
        Self {
            code: code.into(),
            credits: RawCredits::Number(credits),
        }
    }
}

/// A credit value as it arrives from the outside world: a number, a string
/// that may or may not parse, or nothing at all. Coercion never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCredits {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

impl RawCredits {
    /// Coerce to a credit amount, treating anything non-numeric as 0.0.
    pub fn as_f64(&self) -> f64 {
        match self {
            RawCredits::Number(n) if n.is_finite() => *n,
            RawCredits::Number(_) => 0.0,
            RawCredits::Text(s) => s.trim().parse().unwrap_or(0.0),
            RawCredits::Absent => 0.0,
        }
    }
}

/// Completion status of one requirement section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    InProgress,
    Missing,
    /// The section's rule type was not recognized; nothing was evaluated.
    Unknown,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionStatus::Complete => write!(f, "complete"),
            SectionStatus::InProgress => write!(f, "in_progress"),
            SectionStatus::Missing => write!(f, "missing"),
            SectionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SectionStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(SectionStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn raw_credits_coercion() {
        assert_eq!(RawCredits::Number(3.0).as_f64(), 3.0);
        assert_eq!(RawCredits::Text("4".into()).as_f64(), 4.0);
        assert_eq!(RawCredits::Text(" 2.5 ".into()).as_f64(), 2.5);
        assert_eq!(RawCredits::Text("three".into()).as_f64(), 0.0);
        assert_eq!(RawCredits::Absent.as_f64(), 0.0);
        assert_eq!(RawCredits::Number(f64::NAN).as_f64(), 0.0);
    }

    #[test]
    fn planned_course_lenient_deserialization() {
        let from_number: PlannedCourse =
            serde_json::from_str(r#"{"code": "MATH 221", "credits": 5}"#).unwrap();
        assert_eq!(from_number.credits.as_f64(), 5.0);

        let from_string: PlannedCourse =
            serde_json::from_str(r#"{"code": "MATH 221", "credits": "5"}"#).unwrap();
        assert_eq!(from_string.credits.as_f64(), 5.0);

        let from_null: PlannedCourse =
            serde_json::from_str(r#"{"code": "MATH 221", "credits": null}"#).unwrap();
        assert_eq!(from_null.credits.as_f64(), 0.0);

        let missing: PlannedCourse = serde_json::from_str(r#"{"code": "MATH 221"}"#).unwrap();
        assert_eq!(missing.credits.as_f64(), 0.0);
    }

    #[test]
    fn section_rule_type_tags() {
        let rule = SectionRule::NOf { n: 2, items: vec![] };
        assert_eq!(rule.type_tag(), "N_OF");
        let unknown = SectionRule::Unknown {
            tag: "SOME_OF".into(),
        };
        assert_eq!(unknown.type_tag(), "SOME_OF");
    }
}

//! Per-evaluation lookup structures for a student's planned courses.

use std::collections::{HashMap, HashSet};

use crate::model::PlannedCourse;
use crate::normalize::{normalize, AliasTable};

/// Fast-lookup view of one student's planned courses, built fresh for each
/// evaluation call and discarded afterwards.
///
/// Codes are canonical, so membership checks against normalized rule items
/// are direct set lookups. If the same canonical code appears twice in the
/// input, the later credit value wins; presence is idempotent.
#[derive(Debug, Clone, Default)]
pub struct UserCatalog {
    codes: HashSet<String>,
    credits: HashMap<String, f64>,
}

impl UserCatalog {
    /// Build the catalog by normalizing every planned course's code and
    /// coercing its credit value. Never fails: malformed credits become 0.0.
    pub fn build(planned: &[PlannedCourse], aliases: &AliasTable) -> Self {
        let mut codes = HashSet::with_capacity(planned.len());
        let mut credits = HashMap::with_capacity(planned.len());
        for course in planned {
            let code = normalize(&course.code, aliases);
            credits.insert(code.clone(), course.credits.as_f64());
            codes.insert(code);
        }
        Self { codes, credits }
    }

    /// Whether the student has the given canonical code.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// The student's self-reported credit value for a canonical code.
    pub fn credits_for(&self, code: &str) -> Option<f64> {
        self.credits.get(code).copied()
    }

    /// The credit value to award for a taken course: the student's own
    /// value when present, else the rule's declared value, else zero.
    pub fn credit_or_declared(&self, code: &str, declared: Option<f64>) -> f64 {
        self.credits_for(code)
            .or(declared)
            .unwrap_or(0.0)
    }

    /// Number of distinct canonical codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawCredits;

    fn aliases() -> AliasTable {
        AliasTable::new([("COMP SCI/E C E 354", "COMP SCI 354")])
    }

    #[test]
    fn builds_normalized_codes_and_credits() {
        let planned = vec![PlannedCourse::new("comp sci/e c e 354", 3.0)];
        let user = UserCatalog::build(&planned, &aliases());
        assert!(user.contains("COMP SCI 354"));
        assert_eq!(user.credits_for("COMP SCI 354"), Some(3.0));
    }

    #[test]
    fn last_write_wins_on_duplicate_codes() {
        let planned = vec![
            PlannedCourse::new("MATH 221", 5.0),
            PlannedCourse::new("math  221", 4.0),
        ];
        let user = UserCatalog::build(&planned, &aliases());
        assert_eq!(user.len(), 1);
        assert_eq!(user.credits_for("MATH 221"), Some(4.0));
    }

    #[test]
    fn missing_credits_become_zero() {
        let planned = vec![PlannedCourse {
            code: "STAT 311".into(),
            credits: RawCredits::Absent,
        }];
        let user = UserCatalog::build(&planned, &aliases());
        assert_eq!(user.credits_for("STAT 311"), Some(0.0));
    }

    #[test]
    fn credit_fallback_chain() {
        let planned = vec![PlannedCourse::new("MATH 221", 5.0)];
        let user = UserCatalog::build(&planned, &aliases());
        assert_eq!(user.credit_or_declared("MATH 221", Some(4.0)), 5.0);
        assert_eq!(user.credit_or_declared("MATH 222", Some(4.0)), 4.0);
        assert_eq!(user.credit_or_declared("MATH 222", None), 0.0);
    }
}

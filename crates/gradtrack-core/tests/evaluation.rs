//! End-to-end engine tests against the embedded UW-Madison catalog.

use gradtrack_core::engine::AuditEngine;
use gradtrack_core::error::AuditError;
use gradtrack_core::model::{PlannedCourse, RawCredits, SectionStatus};

fn planned(courses: &[(&str, f64)]) -> Vec<PlannedCourse> {
    courses
        .iter()
        .map(|(code, cr)| PlannedCourse::new(*code, *cr))
        .collect()
}

fn section<'a>(
    progress: &'a gradtrack_core::report::MajorProgress,
    id: &str,
) -> &'a gradtrack_core::report::SectionResult {
    progress
        .sections
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("no section {id}"))
}

#[test]
fn builtin_normalization_resolves_cross_listings() {
    let catalog = gradtrack_core::catalog::Catalog::builtin();
    assert_eq!(catalog.normalize("COMP SCI/ECE 354"), "COMP SCI 354");
    assert_eq!(catalog.normalize("comp  sci/ece 354"), "COMP SCI 354");
    assert_eq!(catalog.normalize("COMP SCI 354"), "COMP SCI 354");
}

#[test]
fn calculus_sequence_completes() {
    let engine = AuditEngine::builtin();
    let progress = engine
        .evaluate_major("CS_LS", &planned(&[("MATH 221", 5.0), ("MATH 222", 4.0)]))
        .unwrap();

    let calc = section(&progress, "basic_calculus");
    assert_eq!(calc.status, SectionStatus::Complete);
    assert_eq!(calc.credits_earned, 9.0);
    assert_eq!(calc.section_type, "ONE_OF");
}

#[test]
fn linear_algebra_first_course_option_wins() {
    let engine = AuditEngine::builtin();
    let progress = engine
        .evaluate_major("CS_LS", &planned(&[("MATH 320", 3.0), ("MATH 340", 3.0)]))
        .unwrap();

    let la = section(&progress, "linear_algebra");
    assert_eq!(la.status, SectionStatus::Complete);
    // Both options are satisfied; the first declared (MATH 320) is chosen.
    assert_eq!(la.credited_codes, vec!["MATH 320".to_string()]);
    assert_eq!(la.credits_earned, 3.0);
}

#[test]
fn software_hardware_credits_cap_at_two() {
    let engine = AuditEngine::builtin();
    let progress = engine
        .evaluate_major(
            "CS_LS",
            &planned(&[
                ("COMP SCI 537", 3.0),
                ("COMP SCI 564", 3.0),
                ("COMP SCI 640", 3.0),
            ]),
        )
        .unwrap();

    let sh = section(&progress, "software_hardware");
    assert_eq!(sh.status, SectionStatus::Complete);
    assert_eq!(sh.n_required, Some(2));
    assert_eq!(sh.n_completed, Some(2));
    assert_eq!(sh.credited_codes.len(), 2);
}

#[test]
fn courses_shared_between_sections_count_once() {
    // COMP SCI 537 and 564 appear in both software_hardware and electives.
    let engine = AuditEngine::builtin();
    let progress = engine
        .evaluate_major(
            "CS_LS",
            &planned(&[("COMP SCI 537", 3.0), ("COMP SCI 564", 3.0)]),
        )
        .unwrap();

    let sh = section(&progress, "software_hardware");
    let el = section(&progress, "electives");
    assert_eq!(sh.credits_earned, 6.0);
    assert_eq!(el.credits_earned, 0.0);
    assert_eq!(el.status, SectionStatus::Complete);
    assert_eq!(progress.major_credits_earned, 6.0);

    // Section rows sum to the major total.
    let sum: f64 = progress.sections.iter().map(|s| s.credits_earned).sum();
    assert_eq!(sum, progress.major_credits_earned);
}

#[test]
fn empty_plan_reports_every_section_missing() {
    let engine = AuditEngine::builtin();
    let progress = engine.evaluate_major("CS_LS", &[]).unwrap();
    assert_eq!(progress.sections.len(), 8);
    assert!(progress
        .sections
        .iter()
        .all(|s| s.status == SectionStatus::Missing));
    assert_eq!(progress.major_credits_earned, 0.0);
    assert_eq!(progress.remaining_credits, 48.0);
}

#[test]
fn unknown_major_key_is_not_found() {
    let engine = AuditEngine::builtin();
    assert!(matches!(
        engine.evaluate_major("NOPE", &[]),
        Err(AuditError::MajorNotFound(_))
    ));
}

#[test]
fn degree_credits_clamp_at_target() {
    let engine = AuditEngine::builtin();
    let courses: Vec<PlannedCourse> = (0..50)
        .map(|i| PlannedCourse::new(format!("X {i}"), 3.0))
        .collect();
    let progress = engine.evaluate_degree("L&S_BS", &courses).unwrap();
    assert_eq!(progress.credits_completed, 150.0);
    assert_eq!(progress.credits_remaining, 0.0);
}

#[test]
fn null_credits_never_raise_and_count_zero() {
    let engine = AuditEngine::builtin();
    let courses = vec![PlannedCourse {
        code: "COMP SCI 300".into(),
        credits: RawCredits::Absent,
    }];

    let report = engine.evaluate(None, "CS_LS", &courses).unwrap();
    assert_eq!(report.college_progress.credits_completed, 0.0);
    // The course still matches the requirement, at zero credit value.
    let basic = report
        .major_progress
        .sections
        .iter()
        .find(|s| s.id == "basic_cs")
        .unwrap();
    assert_eq!(basic.status, SectionStatus::InProgress);
    assert_eq!(basic.credits_earned, 0.0);
}

#[test]
fn combined_report_serializes_with_passthrough_labels() {
    let engine = AuditEngine::builtin();
    let report = engine
        .evaluate(None, "CS_LS", &planned(&[("MATH 221", 5.0)]))
        .unwrap();

    assert_eq!(report.college_progress.college_key, "L&S_BS");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["college_progress"]["gen_ed"]["Humanities"], 6);
    assert_eq!(
        json["college_progress"]["total_degree_credits"],
        serde_json::json!(120.0)
    );
    assert_eq!(json["major_progress"]["major_key"], "CS_LS");
}

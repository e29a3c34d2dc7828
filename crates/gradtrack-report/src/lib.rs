//! gradtrack-report — Renders an [`gradtrack_core::report::EvaluationReport`]
//! to markdown or plain text.

pub mod markdown;
pub mod text;

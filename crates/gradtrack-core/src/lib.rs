//! gradtrack-core — Requirement catalog, section evaluators, and audit engine.
//!
//! This crate defines the declarative rule model, course-code normalization,
//! and the evaluation logic that the rest of gradtrack builds on.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod normalize;
pub mod report;
pub mod user;

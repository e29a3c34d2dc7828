//! Subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use gradtrack_core::catalog::Catalog;
use gradtrack_core::engine::AuditEngine;

pub mod evaluate;
pub mod init;
pub mod list;
pub mod validate;

/// Build an engine from an optional catalog path, defaulting to the
/// embedded catalog.
pub(crate) fn load_engine(catalog: Option<PathBuf>) -> Result<AuditEngine> {
    Ok(match catalog {
        Some(path) => AuditEngine::new(Arc::new(Catalog::load(&path)?)),
        None => AuditEngine::builtin(),
    })
}

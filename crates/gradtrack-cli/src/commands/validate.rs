//! The `gradtrack validate` command.

use std::path::PathBuf;

use anyhow::Result;
use gradtrack_core::catalog::validate_catalog;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let engine = super::load_engine(catalog_path)?;
    let catalog = engine.catalog();

    println!(
        "Catalog: {} degree(s), {} major(s), {} alias(es)",
        catalog.degrees().count(),
        catalog.majors().count(),
        catalog.aliases().len()
    );

    let warnings = validate_catalog(catalog);
    for w in &warnings {
        let prefix = w
            .major_key
            .as_ref()
            .map(|key| format!("  [{key}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

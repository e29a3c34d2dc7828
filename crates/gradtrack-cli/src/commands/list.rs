//! The `gradtrack list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let engine = super::load_engine(catalog_path)?;
    let catalog = engine.catalog();

    let mut majors: Vec<_> = catalog.majors().collect();
    majors.sort_by(|a, b| a.key.cmp(&b.key));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Major", "Name", "College", "Credits", "Sections"]);
    for major in majors {
        table.add_row(vec![
            major.key.clone(),
            major.id.clone(),
            major.college.clone(),
            format!("{:.0}", major.total_major_credits),
            major.sections.len().to_string(),
        ]);
    }
    println!("Majors:\n{table}");

    let mut degrees: Vec<_> = catalog.degrees().collect();
    degrees.sort_by(|a, b| a.key.cmp(&b.key));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Degree", "Name", "Credits"]);
    for degree in degrees {
        table.add_row(vec![
            degree.key.clone(),
            degree.id.clone(),
            format!("{:.0}", degree.total_degree_credits),
        ]);
    }
    println!("Degrees:\n{table}");

    Ok(())
}

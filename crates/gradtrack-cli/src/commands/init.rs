//! The `gradtrack init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

const SAMPLE_COURSES: &str = r#"[
  { "code": "COMP SCI 300", "credits": 3 },
  { "code": "COMP SCI 400", "credits": 3 },
  { "code": "MATH 221", "credits": 5 },
  { "code": "MATH 222", "credits": 4 },
  { "code": "STAT 311", "credits": 3 }
]
"#;

pub fn execute(dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let path = dir.join("courses.json");
    if path.exists() {
        anyhow::bail!("{} already exists, not overwriting", path.display());
    }
    std::fs::write(&path, SAMPLE_COURSES)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    println!("Next: gradtrack evaluate --courses {} --major CS_LS", path.display());

    Ok(())
}

//! Requirement catalog loading and validation.
//!
//! Catalogs are declarative TOML documents describing degrees, majors, and
//! the cross-listing alias table. They are parsed once into immutable typed
//! structures; a builtin catalog (UW-Madison L&S + CS) ships embedded in the
//! crate and is shared process-wide.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::AuditError;
use crate::model::{
    CourseRef, DegreeDefinition, MajorDefinition, OneOfOption, RequirementSection, SectionRule,
};
use crate::normalize::{normalize, AliasTable};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    aliases: HashMap<String, String>,
    #[serde(default)]
    degrees: Vec<TomlDegree>,
    #[serde(default)]
    majors: Vec<TomlMajor>,
}

#[derive(Debug, Deserialize)]
struct TomlDegree {
    key: String,
    id: String,
    total_degree_credits: f64,
    #[serde(default)]
    gen_ed: serde_json::Value,
    #[serde(default)]
    breadth: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TomlMajor {
    key: String,
    id: String,
    college: String,
    total_major_credits: f64,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    items: Vec<TomlCourseRef>,
    #[serde(default)]
    options: Vec<TomlOption>,
    #[serde(default)]
    n: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseRef {
    code: String,
    #[serde(default)]
    credits: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    credits: Option<f64>,
    #[serde(default)]
    items: Vec<TomlCourseRef>,
}

/// An immutable requirement catalog: alias table plus keyed degree and
/// major definitions. Read-only after load; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    aliases: AliasTable,
    degrees: HashMap<String, DegreeDefinition>,
    majors: HashMap<String, MajorDefinition>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

const BUILTIN_TOML: &str = include_str!("../data/uw_madison.toml");

impl Catalog {
    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        Self::from_toml_str(&content, path)
    }

    /// Parse a TOML string into a catalog (useful for testing).
    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self> {
        let parsed: TomlCatalog = toml::from_str(content)
            .with_context(|| format!("failed to parse catalog TOML: {}", source_path.display()))?;

        let aliases = AliasTable::new(parsed.aliases);

        let degrees = parsed
            .degrees
            .into_iter()
            .map(|d| {
                (
                    d.key.clone(),
                    DegreeDefinition {
                        key: d.key,
                        id: d.id,
                        total_degree_credits: d.total_degree_credits,
                        gen_ed: d.gen_ed,
                        breadth: d.breadth,
                    },
                )
            })
            .collect();

        let majors = parsed
            .majors
            .into_iter()
            .map(|m| {
                let sections = m
                    .sections
                    .into_iter()
                    .map(|s| convert_section(s, &m.key))
                    .collect::<Result<Vec<_>>>()?;
                Ok((
                    m.key.clone(),
                    MajorDefinition {
                        key: m.key,
                        id: m.id,
                        college: m.college,
                        total_major_credits: m.total_major_credits,
                        sections,
                    },
                ))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            aliases,
            degrees,
            majors,
        })
    }

    /// The embedded UW-Madison catalog, parsed once per process.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Catalog::from_toml_str(BUILTIN_TOML, Path::new("builtin:uw_madison.toml"))
                .expect("embedded catalog is valid TOML")
        })
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Canonicalize a raw course code against this catalog's alias table.
    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw, &self.aliases)
    }

    /// Look up a major definition, failing on unknown keys.
    pub fn major(&self, key: &str) -> Result<&MajorDefinition, AuditError> {
        self.majors
            .get(key)
            .ok_or_else(|| AuditError::MajorNotFound(key.to_string()))
    }

    /// Look up a degree definition, failing on unknown keys.
    pub fn degree(&self, key: &str) -> Result<&DegreeDefinition, AuditError> {
        self.degrees
            .get(key)
            .ok_or_else(|| AuditError::CollegeNotFound(key.to_string()))
    }

    pub fn majors(&self) -> impl Iterator<Item = &MajorDefinition> {
        self.majors.values()
    }

    pub fn degrees(&self) -> impl Iterator<Item = &DegreeDefinition> {
        self.degrees.values()
    }
}

fn convert_section(section: TomlSection, major_key: &str) -> Result<RequirementSection> {
    let rule = match section.kind.as_str() {
        "ALL_OF" => SectionRule::AllOf {
            items: section.items.into_iter().map(convert_course).collect(),
        },
        "ONE_OF" => {
            let options = section
                .options
                .into_iter()
                .map(|o| convert_option(o, major_key, &section.id))
                .collect::<Result<Vec<_>>>()?;
            SectionRule::OneOf { options }
        }
        "N_OF" => SectionRule::NOf {
            n: section.n.unwrap_or(0),
            items: section.items.into_iter().map(convert_course).collect(),
        },
        other => {
            tracing::warn!(
                "major {major_key:?} section {:?} has unrecognized type {other:?}",
                section.id
            );
            SectionRule::Unknown {
                tag: other.to_string(),
            }
        }
    };

    Ok(RequirementSection {
        id: section.id.clone(),
        title: section.title.unwrap_or(section.id),
        rule,
    })
}

fn convert_option(option: TomlOption, major_key: &str, section_id: &str) -> Result<OneOfOption> {
    match option.kind.as_str() {
        "COURSE" => {
            let code = option.code.with_context(|| {
                format!("major {major_key:?} section {section_id:?}: COURSE option without a code")
            })?;
            Ok(OneOfOption::Course {
                code,
                credits: option.credits,
            })
        }
        "ALL_OF" => Ok(OneOfOption::AllOf {
            items: option.items.into_iter().map(convert_course).collect(),
        }),
        other => anyhow::bail!(
            "major {major_key:?} section {section_id:?}: unknown option type {other:?}"
        ),
    }
}

fn convert_course(course: TomlCourseRef) -> CourseRef {
    CourseRef {
        code: course.code,
        credits: course.credits,
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The major key the warning applies to, if any.
    pub major_key: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common data defects.
///
/// Warnings never block evaluation; a defective section degrades to an
/// `unknown` result at evaluation time instead.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Alias entries whose target is itself an alias key would need two
    // normalization passes to resolve.
    for (alias, target) in catalog.aliases.entries() {
        let canonical_target = normalize(target, &AliasTable::default());
        if catalog.aliases.resolve(&canonical_target).is_some() {
            warnings.push(ValidationWarning {
                major_key: None,
                message: format!("alias {alias:?} points to another alias {target:?}"),
            });
        }
    }

    for major in catalog.majors() {
        if catalog.degree(&major.college).is_err() {
            warnings.push(ValidationWarning {
                major_key: Some(major.key.clone()),
                message: format!("references undefined college {:?}", major.college),
            });
        }

        let mut seen_ids = std::collections::HashSet::new();
        for section in &major.sections {
            if !seen_ids.insert(&section.id) {
                warnings.push(ValidationWarning {
                    major_key: Some(major.key.clone()),
                    message: format!("duplicate section id: {}", section.id),
                });
            }

            match &section.rule {
                SectionRule::AllOf { items } => {
                    if items.is_empty() {
                        warnings.push(ValidationWarning {
                            major_key: Some(major.key.clone()),
                            message: format!("section {:?} has no items", section.id),
                        });
                    }
                }
                SectionRule::OneOf { options } => {
                    if options.is_empty() {
                        warnings.push(ValidationWarning {
                            major_key: Some(major.key.clone()),
                            message: format!("section {:?} has no options", section.id),
                        });
                    }
                }
                SectionRule::NOf { n, items } => {
                    if *n == 0 {
                        warnings.push(ValidationWarning {
                            major_key: Some(major.key.clone()),
                            message: format!("section {:?} requires zero courses", section.id),
                        });
                    }
                    if *n > items.len() {
                        warnings.push(ValidationWarning {
                            major_key: Some(major.key.clone()),
                            message: format!(
                                "section {:?} requires {n} courses but lists only {}",
                                section.id,
                                items.len()
                            ),
                        });
                    }
                }
                SectionRule::Unknown { tag } => {
                    warnings.push(ValidationWarning {
                        major_key: Some(major.key.clone()),
                        message: format!(
                            "section {:?} has unrecognized type {tag:?}",
                            section.id
                        ),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MINIMAL_TOML: &str = r#"
[aliases]
"COMP SCI/ECE 354" = "COMP SCI 354"

[[degrees]]
key = "ENG_BS"
id = "Engineering (BS)"
total_degree_credits = 120

[[majors]]
key = "CE"
id = "Computer Engineering"
college = "ENG_BS"
total_major_credits = 24

[[majors.sections]]
id = "core"
title = "Core"
type = "ALL_OF"
items = [
    { code = "COMP SCI/ECE 354", credits = 3 },
    { code = "COMP SCI 400", credits = 3 },
]

[[majors.sections]]
id = "capstone"
type = "ONE_OF"
options = [
    { type = "COURSE", code = "E C E 453", credits = 4 },
    { type = "ALL_OF", items = [{ code = "E C E 551", credits = 3 }] },
]

[[majors.sections]]
id = "breadth"
type = "N_OF"
n = 1
items = [{ code = "E C E 340", credits = 3 }]
"#;

    fn parse(content: &str) -> Catalog {
        Catalog::from_toml_str(content, &PathBuf::from("test.toml")).unwrap()
    }

    #[test]
    fn parse_minimal_catalog() {
        let catalog = parse(MINIMAL_TOML);
        let major = catalog.major("CE").unwrap();
        assert_eq!(major.id, "Computer Engineering");
        assert_eq!(major.sections.len(), 3);
        assert!(matches!(major.sections[0].rule, SectionRule::AllOf { .. }));
        assert!(matches!(major.sections[1].rule, SectionRule::OneOf { .. }));
        assert!(matches!(
            major.sections[2].rule,
            SectionRule::NOf { n: 1, .. }
        ));
        // Untitled sections fall back to their id.
        assert_eq!(major.sections[1].title, "capstone");
        assert_eq!(catalog.normalize("comp sci/ece 354"), "COMP SCI 354");
    }

    #[test]
    fn unknown_keys_fail_lookup() {
        let catalog = parse(MINIMAL_TOML);
        assert!(matches!(
            catalog.major("NOPE"),
            Err(AuditError::MajorNotFound(_))
        ));
        assert!(matches!(
            catalog.degree("NOPE"),
            Err(AuditError::CollegeNotFound(_))
        ));
    }

    #[test]
    fn unknown_section_type_parses_as_unknown() {
        let toml = r#"
[[majors]]
key = "M"
id = "M"
college = "C"
total_major_credits = 10

[[majors.sections]]
id = "weird"
type = "SOME_OF"
"#;
        let catalog = parse(toml);
        let major = catalog.major("M").unwrap();
        assert_eq!(
            major.sections[0].rule,
            SectionRule::Unknown {
                tag: "SOME_OF".into()
            }
        );
        let warnings = validate_catalog(&catalog);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("unrecognized type")));
        // The major also references a college this catalog does not define.
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("undefined college")));
    }

    #[test]
    fn unknown_option_type_is_a_parse_error() {
        let toml = r#"
[[majors]]
key = "M"
id = "M"
college = "C"
total_major_credits = 10

[[majors.sections]]
id = "s"
type = "ONE_OF"
options = [{ type = "MAYBE", code = "X 1" }]
"#;
        let result = Catalog::from_toml_str(toml, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_bad_n_of() {
        let toml = r#"
[[degrees]]
key = "D"
id = "D"
total_degree_credits = 120

[[majors]]
key = "M"
id = "M"
college = "D"
total_major_credits = 10

[[majors.sections]]
id = "pick"
type = "N_OF"
n = 5
items = [{ code = "X 1", credits = 3 }]
"#;
        let warnings = validate_catalog(&parse(toml));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("requires 5 courses")));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, MINIMAL_TOML).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.major("CE").is_ok());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let result = Catalog::from_toml_str("not [valid toml }{", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn builtin_catalog_parses_and_validates_clean() {
        let catalog = Catalog::builtin();
        let major = catalog.major("CS_LS").unwrap();
        assert_eq!(major.id, "Computer Science (L&S)");
        assert_eq!(major.college, "L&S_BS");
        assert_eq!(major.sections.len(), 8);
        assert_eq!(catalog.degree("L&S_BS").unwrap().total_degree_credits, 120.0);
        assert!(validate_catalog(catalog).is_empty());
    }
}

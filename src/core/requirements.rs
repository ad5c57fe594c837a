//! Dependency-list parsing from requirements files
//!
//! Parsing only: lines are shape-checked and sorted into pip/conda lists,
//! never resolved against an index.

use crate::core::error::MetadataError;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

/// Dependency metadata extracted from a requirements file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    /// Language runtime version pinned by the environment, if any
    pub python_version: Option<String>,

    /// Conda dependency specs
    pub conda: Vec<String>,

    /// Pip requirement lines
    pub pip: Vec<String>,
}

// Requirement line: package name, optional extras, optional version specifiers.
fn requirement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*(\[[^\]]+\])?\s*([<>=!~]=?\s*[A-Za-z0-9.*+!-]+(\s*,\s*[<>=!~]=?\s*[A-Za-z0-9.*+!-]+)*)?$")
            .expect("pattern is valid")
    })
}

/// Check a single pip requirement line
pub fn check_requirement(line: &str) -> Result<(), MetadataError> {
    if requirement_regex().is_match(line.trim()) {
        Ok(())
    } else {
        Err(MetadataError::InvalidRequirement(line.to_string()))
    }
}

/// Extract the package name from a requirement line
pub fn requirement_name(line: &str) -> &str {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'))
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// Parse `requirements.txt` content into validated pip requirement lines
pub fn parse_requirements_txt(content: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        check_requirement(line)
            .with_context(|| format!("requirements.txt line '{}'", line))?;
        lines.push(line.to_string());
    }
    Ok(lines)
}

/// Parse a conda `environment.yml` into a [`RequirementSet`]
///
/// The `python=X.Y` entry is extracted as the runtime version; a nested
/// `pip:` list is split out from the conda dependencies.
pub fn parse_conda_env(content: &str) -> Result<RequirementSet> {
    let doc: Value = serde_yaml::from_str(content).context("could not parse environment YAML")?;

    let deps = match doc.get("dependencies") {
        Some(Value::Sequence(seq)) => seq,
        Some(_) => bail!("environment 'dependencies' is not a list"),
        None => return Ok(RequirementSet::default()),
    };

    let mut set = RequirementSet::default();
    for entry in deps {
        match entry {
            Value::String(spec) => {
                let spec = spec.trim();
                if let Some(rest) = spec.strip_prefix("python") {
                    let version = rest.trim_start_matches(['=', ' ']);
                    if !version.is_empty() && rest.starts_with('=') {
                        set.python_version = Some(version.to_string());
                        continue;
                    }
                }
                set.conda.push(spec.to_string());
            }
            Value::Mapping(map) => {
                if let Some(Value::Sequence(pip)) = map.get(&Value::String("pip".to_string())) {
                    for item in pip {
                        if let Some(line) = item.as_str() {
                            set.pip.push(line.trim().to_string());
                        }
                    }
                }
            }
            _ => bail!("unrecognized dependency entry: {:?}", entry),
        }
    }

    Ok(set)
}

//! Step metadata records

use crate::core::error::MetadataError;
use crate::core::ident;
use serde::{Deserialize, Serialize};

/// Metadata for a single typed processing function within a pipeline
///
/// Steps here are records, not callables: the registry stores what a step
/// looks like (signature descriptors, provenance, dependency lists), not
/// how to run it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Function name, usable as an identifier
    pub function_name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Descriptor of the step's input signature
    pub input_info: String,

    /// Descriptor of the step's output signature
    pub output_info: String,

    /// Authors of this step
    #[serde(default)]
    pub authors: Vec<String>,

    /// Acknowledged contributors, distinct from authors
    #[serde(default)]
    pub contributors: Vec<String>,

    /// Language runtime version the step was authored against
    #[serde(default)]
    pub python_version: Option<String>,

    /// Pinned pip dependency lines
    #[serde(default)]
    pub pip_dependencies: Vec<String>,

    /// Conda dependency specs
    #[serde(default)]
    pub conda_dependencies: Vec<String>,

    /// URIs of models this step references
    #[serde(default)]
    pub model_uris: Vec<String>,
}

impl Step {
    /// Validate this step's metadata
    pub fn validate(&self) -> Result<(), MetadataError> {
        if !ident::is_identifier(&self.function_name) {
            return Err(MetadataError::InvalidIdentifier(self.function_name.clone()));
        }
        if self.input_info.trim().is_empty() {
            return Err(MetadataError::MissingField("input_info"));
        }
        if self.output_info.trim().is_empty() {
            return Err(MetadataError::MissingField("output_info"));
        }
        for info in [&self.input_info, &self.output_info] {
            if info.trim().eq_ignore_ascii_case("any") {
                return Err(MetadataError::VagueTypeDescriptor(info.clone()));
            }
        }
        Ok(())
    }

    /// If a descriptor names exactly one plain type, return it
    ///
    /// Descriptors are free-form in registered metadata ("a spoonful of Soup
    /// object", "{'a': int, 'b': str}"). Only single-token descriptors are
    /// concrete enough to compare between adjacent steps.
    pub fn simple_type(descriptor: &str) -> Option<&str> {
        let trimmed = descriptor.trim();
        let is_plain = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        is_plain.then_some(trimmed)
    }

    /// Check this step's output descriptor against the next step's input
    pub fn compatible_with(&self, next: &Step) -> bool {
        match (
            Self::simple_type(&self.output_info),
            Self::simple_type(&next.input_info),
        ) {
            (Some(out), Some(input)) => out.eq_ignore_ascii_case(input),
            // At least one side is free-form, nothing to compare
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, input: &str, output: &str) -> Step {
        Step {
            function_name: name.to_string(),
            description: None,
            input_info: input.to_string(),
            output_info: output.to_string(),
            authors: vec![],
            contributors: vec![],
            python_version: None,
            pip_dependencies: vec![],
            conda_dependencies: vec![],
            model_uris: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_well_described_step() {
        step("split_peas", "List", "List").validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_function_name() {
        assert!(step("not a name", "int", "str").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_descriptors() {
        assert!(step("f", "", "int").validate().is_err());
        assert!(step("f", "int", "  ").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_any() {
        assert!(step("f", "Any", "int").validate().is_err());
        assert!(step("f", "int", "any").validate().is_err());
    }

    #[test]
    fn test_simple_type_extraction() {
        assert_eq!(Step::simple_type("  int "), Some("int"));
        assert_eq!(Step::simple_type("pandas.DataFrame"), Some("pandas.DataFrame"));
        assert_eq!(Step::simple_type("{'a': int}"), None);
        assert_eq!(Step::simple_type("a spoonful of Soup object"), None);
    }

    #[test]
    fn test_adjacent_compatibility() {
        let a = step("a", "List", "Soup");
        let b = step("b", "Soup", "float");
        let c = step("c", "int", "float");
        assert!(a.compatible_with(&b));
        assert!(!b.compatible_with(&c));

        // Free-form descriptors are never rejected
        let loose = step("loose", "a spoonful of Soup object", "float");
        assert!(a.compatible_with(&loose));
    }
}

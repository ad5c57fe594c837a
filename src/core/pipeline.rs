//! Pipeline metadata records

use crate::core::error::MetadataError;
use crate::core::ident;
use crate::core::model::ModelUri;
use crate::core::requirements;
use crate::core::step::Step;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered pipeline: a named, versioned sequence of steps
///
/// Everything here is describable by plain JSON. The record carries the
/// citation metadata needed to mint a DOI and the dependency lists needed
/// to rebuild the environment the steps were registered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// DOI identifying this pipeline
    pub doi: String,

    /// Handle of the remotely registered composed function, if any
    #[serde(default)]
    pub func_uuid: Option<Uuid>,

    /// Human-readable title, as it should appear in citations
    pub title: String,

    /// Identifier used for attribute-style access from a garden
    pub short_name: String,

    /// Main researchers, "Family, Given" format, order preserved
    pub authors: Vec<String>,

    /// Step metadata in invocation order
    pub steps: Vec<Step>,

    /// Acknowledged contributors, distinct from authors
    #[serde(default)]
    pub contributors: Vec<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Version string
    #[serde(default = "default_version")]
    pub version: String,

    /// Year that should appear in citations
    #[serde(default = "default_year")]
    pub year: String,

    /// Tags, keywords or key phrases
    #[serde(default)]
    pub tags: Vec<String>,

    /// Language runtime version for the registered environment
    #[serde(default)]
    pub python_version: Option<String>,

    /// Pinned pip dependency lines
    #[serde(default)]
    pub pip_dependencies: Vec<String>,

    /// Conda dependency specs
    #[serde(default)]
    pub conda_dependencies: Vec<String>,

    /// URIs of models referenced by this pipeline's steps
    #[serde(default)]
    pub model_uris: Vec<String>,
}

fn default_version() -> String {
    "0.0.1".to_string()
}

pub(crate) fn default_year() -> String {
    chrono::Utc::now().format("%Y").to_string()
}

/// Append items not already present, preserving first-seen order
fn extend_unique(target: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

impl Pipeline {
    /// Validate this pipeline's metadata
    pub fn validate(&self) -> Result<(), MetadataError> {
        if !ident::is_doi(&self.doi) {
            return Err(MetadataError::InvalidDoi(self.doi.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(MetadataError::MissingField("title"));
        }
        if !ident::is_identifier(&self.short_name) {
            return Err(MetadataError::InvalidIdentifier(self.short_name.clone()));
        }
        if self.authors.is_empty() {
            return Err(MetadataError::NoAuthors);
        }
        if self.steps.is_empty() {
            return Err(MetadataError::EmptySteps);
        }

        for step in &self.steps {
            step.validate()?;
        }
        for pair in self.steps.windows(2) {
            if !pair[0].compatible_with(&pair[1]) {
                return Err(MetadataError::IncompatibleSteps {
                    from: pair[0].function_name.clone(),
                    output: pair[0].output_info.clone(),
                    to: pair[1].function_name.clone(),
                    input: pair[1].input_info.clone(),
                });
            }
        }

        for dep in &self.pip_dependencies {
            requirements::check_requirement(dep)?;
        }
        for uri in &self.model_uris {
            ModelUri::parse(uri)?;
        }

        Ok(())
    }

    /// Merge step authors and contributors into this pipeline's contributors
    ///
    /// Pipeline authors are never demoted to contributors; existing
    /// contributors are never removed.
    pub fn sync_contributors(&mut self) {
        let step_people: Vec<String> = self
            .steps
            .iter()
            .flat_map(|s| s.authors.iter().chain(s.contributors.iter()))
            .filter(|name| !self.authors.contains(name))
            .cloned()
            .collect();
        extend_unique(&mut self.contributors, step_people);
    }

    /// Gather model URIs from steps into the pipeline's own list
    pub fn collect_model_uris(&mut self) {
        let from_steps: Vec<String> = self
            .steps
            .iter()
            .flat_map(|s| s.model_uris.iter())
            .cloned()
            .collect();
        extend_unique(&mut self.model_uris, from_steps);
    }

    /// Deduplicate list fields and derive collected metadata from steps
    pub fn normalize(&mut self) {
        let tags = std::mem::take(&mut self.tags);
        extend_unique(&mut self.tags, tags);
        let contributors = std::mem::take(&mut self.contributors);
        extend_unique(&mut self.contributors, contributors);
        self.sync_contributors();
        self.collect_model_uris();
    }
}

//! Garden metadata records

use crate::core::error::MetadataError;
use crate::core::ident;
use crate::core::pipeline::default_year;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A curated collection of pipelines under a shared publication identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garden {
    /// DOI identifying this garden
    pub doi: String,

    /// Human-readable title, as it should appear in citations
    pub title: String,

    /// Main researchers, "Family, Given" format, order preserved
    pub authors: Vec<String>,

    /// Acknowledged contributors, distinct from authors
    #[serde(default)]
    pub contributors: Vec<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Publishing entity for citations
    #[serde(default = "default_publisher")]
    pub publisher: String,

    /// Year that should appear in citations
    #[serde(default = "default_year")]
    pub year: String,

    /// Primary language of the garden's documentation
    #[serde(default = "default_language")]
    pub language: String,

    /// Version string
    #[serde(default = "default_version")]
    pub version: String,

    /// Tags, keywords or key phrases
    #[serde(default)]
    pub tags: Vec<String>,

    /// DOIs of member pipelines, in display order
    #[serde(default)]
    pub pipeline_ids: Vec<String>,
}

fn default_publisher() -> String {
    "trellis".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_version() -> String {
    "0.0.1".to_string()
}

impl Garden {
    /// Create a garden with the minimum publishable metadata
    pub fn new(doi: &str, title: &str, authors: Vec<String>) -> Self {
        Garden {
            doi: doi.to_string(),
            title: title.to_string(),
            authors,
            contributors: Vec::new(),
            description: None,
            publisher: default_publisher(),
            year: default_year(),
            language: default_language(),
            version: default_version(),
            tags: Vec::new(),
            pipeline_ids: Vec::new(),
        }
    }

    /// Validate this garden's metadata
    pub fn validate(&self) -> Result<(), MetadataError> {
        if !ident::is_doi(&self.doi) {
            return Err(MetadataError::InvalidDoi(self.doi.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(MetadataError::MissingField("title"));
        }
        if self.authors.is_empty() {
            return Err(MetadataError::NoAuthors);
        }

        let mut seen = HashSet::new();
        for id in &self.pipeline_ids {
            if !seen.insert(id) {
                return Err(MetadataError::DuplicatePipelineId(id.clone()));
            }
        }

        Ok(())
    }
}

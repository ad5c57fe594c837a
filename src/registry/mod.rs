//! Local registry: metadata tables, lookups, and integrity checks

pub mod store;

pub use store::{InMemoryStore, JsonFileStore, RegistryBackend};

use crate::core::{Garden, MetadataError, Pipeline, RegisteredModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Error types for registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} '{id}' not found in registry")]
    NotFound { kind: &'static str, id: String },

    #[error("registry has {} broken reference(s)", .0.len())]
    BrokenReferences(Vec<ReferenceViolation>),

    #[error("invalid {kind} record '{id}': {source}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        #[source]
        source: MetadataError,
    },

    #[error("malformed registry JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single referential-integrity failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceViolation {
    /// A pipeline references a model URI with no record in the model table
    MissingModel {
        pipeline_doi: String,
        model_uri: String,
    },
    /// A garden lists a pipeline DOI with no record in the pipeline table
    MissingPipeline {
        garden_doi: String,
        pipeline_doi: String,
    },
    /// A table key does not match the identity of the record stored under it
    KeyMismatch {
        table: &'static str,
        key: String,
        id: String,
    },
}

impl fmt::Display for ReferenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceViolation::MissingModel {
                pipeline_doi,
                model_uri,
            } => write!(
                f,
                "pipeline '{}' references model '{}' which is not in the model table",
                pipeline_doi, model_uri
            ),
            ReferenceViolation::MissingPipeline {
                garden_doi,
                pipeline_doi,
            } => write!(
                f,
                "garden '{}' lists pipeline '{}' which is not in the pipeline table",
                garden_doi, pipeline_doi
            ),
            ReferenceViolation::KeyMismatch { table, key, id } => write!(
                f,
                "{} table key '{}' does not match record identity '{}'",
                table, key, id
            ),
        }
    }
}

/// The local registry: gardens, pipelines, and models keyed by identifier
///
/// Maps are kept sorted so the serialized registry file is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalRegistry {
    /// Gardens keyed by DOI
    #[serde(default)]
    pub gardens: BTreeMap<String, Garden>,

    /// Pipelines keyed by DOI
    #[serde(default)]
    pub pipelines: BTreeMap<String, Pipeline>,

    /// Models keyed by model URI
    #[serde(default)]
    pub models: BTreeMap<String, RegisteredModel>,
}

impl LocalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from its JSON table format
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the registry back to JSON
    pub fn to_json(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the registry to human-readable JSON
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert or replace a garden, validating it first
    pub fn put_garden(&mut self, garden: Garden) -> Result<(), RegistryError> {
        garden.validate().map_err(|e| RegistryError::InvalidRecord {
            kind: "garden",
            id: garden.doi.clone(),
            source: e,
        })?;
        self.gardens.insert(garden.doi.clone(), garden);
        Ok(())
    }

    /// Insert or replace a pipeline, validating it first
    pub fn put_pipeline(&mut self, pipeline: Pipeline) -> Result<(), RegistryError> {
        pipeline
            .validate()
            .map_err(|e| RegistryError::InvalidRecord {
                kind: "pipeline",
                id: pipeline.doi.clone(),
                source: e,
            })?;
        self.pipelines.insert(pipeline.doi.clone(), pipeline);
        Ok(())
    }

    /// Insert or replace a model, validating it first
    pub fn put_model(&mut self, model: RegisteredModel) -> Result<(), RegistryError> {
        model.validate().map_err(|e| RegistryError::InvalidRecord {
            kind: "model",
            id: model.model_uri.clone(),
            source: e,
        })?;
        self.models.insert(model.model_uri.clone(), model);
        Ok(())
    }

    /// Look up a garden by DOI
    pub fn garden(&self, doi: &str) -> Option<&Garden> {
        self.gardens.get(doi)
    }

    /// Look up a pipeline by DOI
    pub fn pipeline(&self, doi: &str) -> Option<&Pipeline> {
        self.pipelines.get(doi)
    }

    /// Look up a model by URI
    pub fn model(&self, uri: &str) -> Option<&RegisteredModel> {
        self.models.get(uri)
    }

    /// Remove a garden by DOI
    pub fn remove_garden(&mut self, doi: &str) -> Option<Garden> {
        self.gardens.remove(doi)
    }

    /// Remove a pipeline by DOI
    pub fn remove_pipeline(&mut self, doi: &str) -> Option<Pipeline> {
        self.pipelines.remove(doi)
    }

    /// Remove a model by URI
    pub fn remove_model(&mut self, uri: &str) -> Option<RegisteredModel> {
        self.models.remove(uri)
    }

    /// Resolve a member pipeline of a garden by its short name
    ///
    /// This is the attribute-style access path: `my_garden.<short_name>(...)`
    /// in the original client maps to this lookup.
    pub fn pipeline_by_short_name(&self, garden_doi: &str, short_name: &str) -> Option<&Pipeline> {
        let garden = self.gardens.get(garden_doi)?;
        garden
            .pipeline_ids
            .iter()
            .filter_map(|doi| self.pipelines.get(doi))
            .find(|p| p.short_name == short_name)
    }

    /// Run record-level validation over every table
    ///
    /// Returns one error per invalid record. Records loaded from a
    /// hand-edited registry file bypass the `put_*` checks, so a validation
    /// pass has to be able to sweep the whole registry.
    pub fn validate_records(&self) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        for garden in self.gardens.values() {
            if let Err(e) = garden.validate() {
                errors.push(RegistryError::InvalidRecord {
                    kind: "garden",
                    id: garden.doi.clone(),
                    source: e,
                });
            }
        }
        for pipeline in self.pipelines.values() {
            if let Err(e) = pipeline.validate() {
                errors.push(RegistryError::InvalidRecord {
                    kind: "pipeline",
                    id: pipeline.doi.clone(),
                    source: e,
                });
            }
        }
        for model in self.models.values() {
            if let Err(e) = model.validate() {
                errors.push(RegistryError::InvalidRecord {
                    kind: "model",
                    id: model.model_uri.clone(),
                    source: e,
                });
            }
        }
        errors
    }

    /// Check referential integrity across all tables
    ///
    /// Returns every violation, not just the first: a registry repair
    /// session needs the complete list.
    pub fn check_references(&self) -> Vec<ReferenceViolation> {
        let mut violations = Vec::new();

        for (key, garden) in &self.gardens {
            if key != &garden.doi {
                violations.push(ReferenceViolation::KeyMismatch {
                    table: "gardens",
                    key: key.clone(),
                    id: garden.doi.clone(),
                });
            }
            for pipeline_doi in &garden.pipeline_ids {
                if !self.pipelines.contains_key(pipeline_doi) {
                    violations.push(ReferenceViolation::MissingPipeline {
                        garden_doi: garden.doi.clone(),
                        pipeline_doi: pipeline_doi.clone(),
                    });
                }
            }
        }

        for (key, pipeline) in &self.pipelines {
            if key != &pipeline.doi {
                violations.push(ReferenceViolation::KeyMismatch {
                    table: "pipelines",
                    key: key.clone(),
                    id: pipeline.doi.clone(),
                });
            }
            for model_uri in &pipeline.model_uris {
                if !self.models.contains_key(model_uri) {
                    violations.push(ReferenceViolation::MissingModel {
                        pipeline_doi: pipeline.doi.clone(),
                        model_uri: model_uri.clone(),
                    });
                }
            }
        }

        for (key, model) in &self.models {
            if key != &model.model_uri {
                violations.push(ReferenceViolation::KeyMismatch {
                    table: "models",
                    key: key.clone(),
                    id: model.model_uri.clone(),
                });
            }
        }

        violations
    }

    /// Fail with all violations unless referential integrity holds
    pub fn ensure_references(&self) -> Result<(), RegistryError> {
        let violations = self.check_references();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::BrokenReferences(violations))
        }
    }

    /// Collect the model records referenced by a pipeline
    ///
    /// Missing records are skipped with a warning rather than failing the
    /// lookup; strictness is the job of [`ensure_references`].
    ///
    /// [`ensure_references`]: LocalRegistry::ensure_references
    pub fn collect_models(&self, pipeline_doi: &str) -> Result<Vec<&RegisteredModel>, RegistryError> {
        let pipeline = self
            .pipelines
            .get(pipeline_doi)
            .ok_or_else(|| RegistryError::NotFound {
                kind: "pipeline",
                id: pipeline_doi.to_string(),
            })?;

        let mut models = Vec::new();
        for uri in &pipeline.model_uris {
            match self.models.get(uri) {
                Some(model) => models.push(model),
                None => warn!(
                    pipeline = %pipeline.doi,
                    model_uri = %uri,
                    "no record for referenced model; expanded metadata will omit it"
                ),
            }
        }
        Ok(models)
    }

    /// Build the denormalized metadata for a pipeline: the record plus a
    /// `models` list carrying full model records
    pub fn expanded_pipeline(&self, doi: &str) -> Result<Value, RegistryError> {
        let pipeline = self
            .pipelines
            .get(doi)
            .ok_or_else(|| RegistryError::NotFound {
                kind: "pipeline",
                id: doi.to_string(),
            })?;
        let models = self.collect_models(doi)?;

        let mut value = serde_json::to_value(pipeline)?;
        if let Value::Object(ref mut obj) = value {
            obj.insert("models".to_string(), serde_json::to_value(models)?);
        }
        Ok(value)
    }

    /// Build the denormalized publication metadata for a garden
    ///
    /// The garden record is augmented with a `pipelines` list of expanded
    /// pipeline records, each carrying its model records inline.
    pub fn expanded_garden(&self, doi: &str) -> Result<Value, RegistryError> {
        let garden = self
            .gardens
            .get(doi)
            .ok_or_else(|| RegistryError::NotFound {
                kind: "garden",
                id: doi.to_string(),
            })?;

        let mut pipelines = Vec::new();
        for pipeline_doi in &garden.pipeline_ids {
            pipelines.push(self.expanded_pipeline(pipeline_doi)?);
        }

        let mut value = serde_json::to_value(garden)?;
        if let Value::Object(ref mut obj) = value {
            obj.insert("pipelines".to_string(), Value::Array(pipelines));
        }
        Ok(value)
    }
}

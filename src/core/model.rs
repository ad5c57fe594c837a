//! Registered model records and model URIs

use crate::core::error::MetadataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed model URI of the form `<owner>-<name>/<version>`
///
/// The stem is split at its first dash: the owner segment (typically an
/// email address) cannot contain one, while everything after that dash
/// belongs to the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUri {
    owner: String,
    name: String,
    version: String,
}

impl ModelUri {
    /// Parse a model URI, rejecting malformed strings
    pub fn parse(uri: &str) -> Result<Self, MetadataError> {
        let invalid = || MetadataError::InvalidModelUri(uri.to_string());

        let (stem, version) = uri.split_once('/').ok_or_else(invalid)?;
        if version.is_empty() || version.contains('/') {
            return Err(invalid());
        }

        let (owner, name) = stem.split_once('-').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(ModelUri {
            owner: owner.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ModelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}/{}", self.owner, self.name, self.version)
    }
}

/// Supported model serialization flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFlavor {
    Sklearn,
    Pytorch,
    Tensorflow,
}

impl fmt::Display for ModelFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelFlavor::Sklearn => "sklearn",
            ModelFlavor::Pytorch => "pytorch",
            ModelFlavor::Tensorflow => "tensorflow",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ModelFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sklearn" => Ok(ModelFlavor::Sklearn),
            "pytorch" => Ok(ModelFlavor::Pytorch),
            "tensorflow" => Ok(ModelFlavor::Tensorflow),
            other => Err(format!(
                "unknown flavor '{}' (expected sklearn, pytorch, or tensorflow)",
                other
            )),
        }
    }
}

/// Kind of external resource a connection points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Dataset,
    Repository,
}

/// Provenance link from a model to an external dataset or repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// What kind of resource this points at
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,

    /// How the resource relates to the model (e.g. "origin")
    #[serde(default = "default_relationship")]
    pub relationship: String,

    /// DOI of the resource, if it has one
    #[serde(default)]
    pub doi: Option<String>,

    /// Resolvable URL for the resource
    pub url: String,

    /// Hosting repository name, if applicable
    #[serde(default)]
    pub repository: Option<String>,
}

fn default_relationship() -> String {
    "origin".to_string()
}

/// A registered ML model reference with provenance connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredModel {
    /// Full namespaced URI: `<owner>-<name>/<version>`
    pub model_uri: String,

    /// Model name within the owner's namespace
    pub model_name: String,

    /// Namespace owner (typically an email address)
    pub owner: String,

    /// Registry version string
    pub version: String,

    /// Serialization flavor tag
    pub flavor: ModelFlavor,

    /// Provenance connections to external datasets/repositories
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl RegisteredModel {
    /// Build a record from its components, deriving the URI
    pub fn new(owner: &str, model_name: &str, version: &str, flavor: ModelFlavor) -> Self {
        RegisteredModel {
            model_uri: format!("{}-{}/{}", owner, model_name, version),
            model_name: model_name.to_string(),
            owner: owner.to_string(),
            version: version.to_string(),
            flavor,
            connections: Vec::new(),
        }
    }

    /// Parse this record's URI
    pub fn uri(&self) -> Result<ModelUri, MetadataError> {
        ModelUri::parse(&self.model_uri)
    }

    /// Validate the record: URI must parse and agree with the fields
    pub fn validate(&self) -> Result<(), MetadataError> {
        let uri = self.uri()?;
        let reassembled = format!("{}-{}/{}", self.owner, self.model_name, self.version);
        if reassembled != self.model_uri || uri.version() != self.version {
            return Err(MetadataError::InconsistentModelRecord(
                self.model_uri.clone(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_uri() {
        let uri = ModelUri::parse("willengler@uchicago.edu-iris-classifier/3").unwrap();
        assert_eq!(uri.owner(), "willengler@uchicago.edu");
        assert_eq!(uri.name(), "iris-classifier");
        assert_eq!(uri.version(), "3");
    }

    #[test]
    fn test_parse_rejects_missing_version() {
        assert!(ModelUri::parse("owner-model").is_err());
        assert!(ModelUri::parse("owner-model/").is_err());
    }

    #[test]
    fn test_parse_rejects_nested_version_path() {
        assert!(ModelUri::parse("owner-model/1/2").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_owner() {
        assert!(ModelUri::parse("-model/1").is_err());
        assert!(ModelUri::parse("justaname/1").is_err());
    }

    #[test]
    fn test_uri_display_roundtrip() {
        let s = "email@addr.ess-fake-model/fake-version";
        let uri = ModelUri::parse(s).unwrap();
        assert_eq!(uri.to_string(), s);
    }

    #[test]
    fn test_registered_model_new_derives_uri() {
        let model = RegisteredModel::new("will@test.com", "test_model", "1", ModelFlavor::Sklearn);
        assert_eq!(model.model_uri, "will@test.com-test_model/1");
        assert!(model.connections.is_empty());
        model.validate().unwrap();
    }

    #[test]
    fn test_validate_catches_mismatched_fields() {
        let mut model =
            RegisteredModel::new("will@test.com", "test_model", "1", ModelFlavor::Sklearn);
        model.version = "2".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_flavor_from_str() {
        assert_eq!("sklearn".parse::<ModelFlavor>().unwrap(), ModelFlavor::Sklearn);
        assert!("keras".parse::<ModelFlavor>().is_err());
    }
}

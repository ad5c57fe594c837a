//! DataCite-shaped citation metadata
//!
//! A subset of the DataCite kernel-4.3 attributes, shaped the way the
//! registry publishes them. Field names follow the DataCite wire format.

use crate::core::{Garden, Pipeline};
use serde::{Deserialize, Serialize};

/// Publisher recorded on pipeline citations minted by this registry
pub const DEFAULT_PUBLISHER: &str = "trellis";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identifier {
    pub identifier: String,
    #[serde(rename = "identifierType")]
    pub identifier_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Types {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "resourceTypeGeneral")]
    pub resource_type_general: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(rename = "contributorType")]
    pub contributor_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    pub description: String,
    #[serde(rename = "descriptionType")]
    pub description_type: String,
}

/// The "attributes" body of a DataCite metadata request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataciteSchema {
    pub identifiers: Vec<Identifier>,
    pub types: Types,
    pub creators: Vec<Creator>,
    pub titles: Vec<Title>,
    pub publisher: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: String,
    pub subjects: Vec<Subject>,
    pub contributors: Vec<Contributor>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<Vec<Description>>,
}

impl DataciteSchema {
    /// Build citation metadata for a pipeline record
    ///
    /// Works on a normalized copy of the record, so step authors and
    /// contributors surface in the citation's contributor list.
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        let mut pipeline = pipeline.clone();
        pipeline.normalize();
        DataciteSchema {
            identifiers: vec![Identifier {
                identifier: pipeline.doi.clone(),
                identifier_type: "DOI".to_string(),
            }],
            types: Types {
                resource_type: "AI/ML Pipeline".to_string(),
                resource_type_general: "Software".to_string(),
            },
            creators: names_to_creators(&pipeline.authors),
            titles: vec![Title {
                title: pipeline.title.clone(),
            }],
            publisher: DEFAULT_PUBLISHER.to_string(),
            publication_year: pipeline.year.clone(),
            subjects: tags_to_subjects(&pipeline.tags),
            contributors: names_to_contributors(&pipeline.contributors),
            version: pipeline.version.clone(),
            descriptions: pipeline.description.as_ref().map(|d| {
                vec![Description {
                    description: d.clone(),
                    description_type: "Other".to_string(),
                }]
            }),
        }
    }

    /// Build citation metadata for a garden record
    pub fn from_garden(garden: &Garden) -> Self {
        DataciteSchema {
            identifiers: vec![Identifier {
                identifier: garden.doi.clone(),
                identifier_type: "DOI".to_string(),
            }],
            types: Types {
                resource_type: "Garden".to_string(),
                resource_type_general: "Software".to_string(),
            },
            creators: names_to_creators(&garden.authors),
            titles: vec![Title {
                title: garden.title.clone(),
            }],
            publisher: garden.publisher.clone(),
            publication_year: garden.year.clone(),
            subjects: tags_to_subjects(&garden.tags),
            contributors: names_to_contributors(&garden.contributors),
            version: garden.version.clone(),
            descriptions: garden.description.as_ref().map(|d| {
                vec![Description {
                    description: d.clone(),
                    description_type: "Other".to_string(),
                }]
            }),
        }
    }

    /// Serialize to the DataCite JSON wire format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn names_to_creators(names: &[String]) -> Vec<Creator> {
    names
        .iter()
        .map(|name| Creator { name: name.clone() })
        .collect()
}

fn names_to_contributors(names: &[String]) -> Vec<Contributor> {
    names
        .iter()
        .map(|name| Contributor {
            name: name.clone(),
            contributor_type: "Other".to_string(),
        })
        .collect()
}

fn tags_to_subjects(tags: &[String]) -> Vec<Subject> {
    tags.iter()
        .map(|tag| Subject {
            subject: tag.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garden_citation_shape() {
        let mut garden = Garden::new(
            "10.26311/fake-doi",
            "Experiments on Plant Hybridization",
            vec!["Mendel, Gregor".to_string()],
        );
        garden.tags = vec!["genetics".to_string()];
        garden.contributors = vec!["St. Thomas Abbey".to_string()];

        let schema = DataciteSchema::from_garden(&garden);
        let json: serde_json::Value =
            serde_json::from_str(&schema.to_json().unwrap()).unwrap();

        assert!(json["creators"].is_array());
        assert!(json["titles"].is_array());
        assert_eq!(json["types"]["resourceType"], "Garden");
        assert_eq!(json["types"]["resourceTypeGeneral"], "Software");
        assert_eq!(json["publisher"], "trellis");
        assert_eq!(json["identifiers"][0]["identifierType"], "DOI");
        assert_eq!(json["subjects"][0]["subject"], "genetics");
        assert_eq!(json["contributors"][0]["contributorType"], "Other");
        // No description -> key omitted entirely
        assert!(json.get("descriptions").is_none());
    }

    #[test]
    fn test_pipeline_citation_shape() {
        let pipeline = Pipeline {
            doi: "10.26311/pipeline-doi".to_string(),
            func_uuid: None,
            title: "Lorem Ipsum".to_string(),
            short_name: "lorem".to_string(),
            authors: vec!["Team, Garden".to_string()],
            steps: vec![],
            contributors: vec![],
            description: Some("A pipeline.".to_string()),
            version: "0.0.1".to_string(),
            year: "2023".to_string(),
            tags: vec![],
            python_version: None,
            pip_dependencies: vec![],
            conda_dependencies: vec![],
            model_uris: vec![],
        };

        let schema = DataciteSchema::from_pipeline(&pipeline);
        let json: serde_json::Value =
            serde_json::from_str(&schema.to_json().unwrap()).unwrap();

        assert_eq!(json["types"]["resourceType"], "AI/ML Pipeline");
        assert_eq!(json["types"]["resourceTypeGeneral"], "Software");
        assert_eq!(json["publicationYear"], "2023");
        assert_eq!(json["descriptions"][0]["descriptionType"], "Other");
    }

    #[test]
    fn test_pipeline_citation_credits_step_authors() {
        let step = crate::core::Step {
            function_name: "classify".to_string(),
            description: None,
            input_info: "DataFrame".to_string(),
            output_info: "DataFrame".to_string(),
            authors: vec!["Lovelace, Ada".to_string()],
            contributors: vec!["Babbage, Charles".to_string()],
            python_version: None,
            pip_dependencies: vec![],
            conda_dependencies: vec![],
            model_uris: vec![],
        };
        let pipeline = Pipeline {
            doi: "10.26311/pipeline-doi".to_string(),
            func_uuid: None,
            title: "Lorem Ipsum".to_string(),
            short_name: "lorem".to_string(),
            authors: vec!["Team, Garden".to_string()],
            steps: vec![step],
            contributors: vec![],
            description: None,
            version: "0.0.1".to_string(),
            year: "2023".to_string(),
            tags: vec![],
            python_version: None,
            pip_dependencies: vec![],
            conda_dependencies: vec![],
            model_uris: vec![],
        };

        let schema = DataciteSchema::from_pipeline(&pipeline);
        let names: Vec<&str> = schema.contributors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Lovelace, Ada", "Babbage, Charles"]);
        // Pipeline authors stay creators, not contributors
        assert_eq!(schema.creators[0].name, "Team, Garden");
        assert_eq!(schema.creators.len(), 1);
        // The record passed in is untouched
        assert!(pipeline.contributors.is_empty());
    }
}

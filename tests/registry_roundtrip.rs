//! Round-trip and integrity tests over a complete registry fixture
//!
//! The fixture exercises every field the registry file format carries, so
//! a lossy round-trip shows up as a JSON diff rather than a silently
//! dropped attribute.

use trellis::{LocalRegistry, ReferenceViolation};

fn fixture_json() -> &'static str {
    r#"{
  "gardens": {
    "10.23677/fake-doi": {
      "doi": "10.23677/fake-doi",
      "title": "Experiments on Plant Hybridization",
      "authors": ["Mendel, Gregor"],
      "contributors": ["Curie, Marie"],
      "description": "Pea plant trait experiments, cataloged",
      "publisher": "trellis",
      "year": "2023",
      "language": "en",
      "version": "0.0.1",
      "tags": ["genetics", "peas"],
      "pipeline_ids": ["10.26311/pea-pipeline"]
    }
  },
  "pipelines": {
    "10.26311/pea-pipeline": {
      "doi": "10.26311/pea-pipeline",
      "func_uuid": "9f5688ac-424d-443e-b525-97c72e4e083f",
      "title": "Pea Edibility Pipeline",
      "short_name": "pea_edibility",
      "authors": ["Mendel, Gregor"],
      "steps": [
        {
          "function_name": "classify_peas",
          "description": "Predict edibility from pod measurements",
          "input_info": "DataFrame",
          "output_info": "DataFrame",
          "authors": ["Mendel, Gregor"],
          "contributors": ["Lovelace, Ada"],
          "python_version": "3.10.9",
          "pip_dependencies": ["scikit-learn==1.2.2"],
          "conda_dependencies": [],
          "model_uris": ["lab@example.org-pea-classifier/2"]
        }
      ],
      "contributors": ["Lovelace, Ada"],
      "description": "Classifies pea pods as edible or not",
      "version": "0.0.1",
      "year": "2023",
      "tags": ["peas"],
      "python_version": "3.10.9",
      "pip_dependencies": ["scikit-learn==1.2.2"],
      "conda_dependencies": [],
      "model_uris": ["lab@example.org-pea-classifier/2"]
    }
  },
  "models": {
    "lab@example.org-pea-classifier/2": {
      "model_uri": "lab@example.org-pea-classifier/2",
      "model_name": "pea-classifier",
      "owner": "lab@example.org",
      "version": "2",
      "flavor": "sklearn",
      "connections": [
        {
          "type": "dataset",
          "relationship": "origin",
          "doi": "10.34555/pea-data",
          "url": "https://example.org/datasets/peas",
          "repository": "Example Data Repository"
        }
      ]
    }
  }
}"#
}

#[test]
fn roundtrip_preserves_every_field() {
    let registry = LocalRegistry::from_json(fixture_json()).unwrap();
    let serialized = registry.to_json().unwrap();

    let original: serde_json::Value = serde_json::from_str(fixture_json()).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(original, reparsed);
}

#[test]
fn fixture_records_are_valid_and_consistent() {
    let registry = LocalRegistry::from_json(fixture_json()).unwrap();
    assert!(registry.validate_records().is_empty());
    assert!(registry.check_references().is_empty());
    registry.ensure_references().unwrap();
}

#[test]
fn lookups_resolve_fixture_records() {
    let registry = LocalRegistry::from_json(fixture_json()).unwrap();

    let garden = registry.garden("10.23677/fake-doi").unwrap();
    assert_eq!(garden.title, "Experiments on Plant Hybridization");

    let pipeline = registry.pipeline("10.26311/pea-pipeline").unwrap();
    assert_eq!(pipeline.steps.len(), 1);
    assert_eq!(pipeline.steps[0].function_name, "classify_peas");

    let by_name = registry
        .pipeline_by_short_name("10.23677/fake-doi", "pea_edibility")
        .unwrap();
    assert_eq!(by_name.doi, pipeline.doi);

    let models = registry.collect_models("10.26311/pea-pipeline").unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].owner, "lab@example.org");
}

#[test]
fn missing_model_breaks_integrity() {
    let mut registry = LocalRegistry::from_json(fixture_json()).unwrap();
    registry.remove_model("lab@example.org-pea-classifier/2");

    let violations = registry.check_references();
    assert_eq!(violations.len(), 1);
    match &violations[0] {
        ReferenceViolation::MissingModel {
            pipeline_doi,
            model_uri,
        } => {
            assert_eq!(pipeline_doi, "10.26311/pea-pipeline");
            assert_eq!(model_uri, "lab@example.org-pea-classifier/2");
        }
        other => panic!("expected MissingModel, got {}", other),
    }
}

#[test]
fn missing_pipeline_breaks_integrity() {
    let mut registry = LocalRegistry::from_json(fixture_json()).unwrap();
    registry.remove_pipeline("10.26311/pea-pipeline");

    let violations = registry.check_references();
    assert!(violations
        .iter()
        .any(|v| matches!(v, ReferenceViolation::MissingPipeline { .. })));
    assert!(registry.ensure_references().is_err());
}

#[test]
fn expanded_garden_inlines_pipelines_and_models() {
    let registry = LocalRegistry::from_json(fixture_json()).unwrap();
    let expanded = registry.expanded_garden("10.23677/fake-doi").unwrap();

    assert_eq!(expanded["doi"], "10.23677/fake-doi");
    let pipelines = expanded["pipelines"].as_array().unwrap();
    assert_eq!(pipelines.len(), 1);

    let models = pipelines[0]["models"].as_array().unwrap();
    assert_eq!(models[0]["model_uri"], "lab@example.org-pea-classifier/2");
    assert_eq!(models[0]["connections"][0]["type"], "dataset");
}

#[test]
fn empty_registry_parses_and_checks_clean() {
    let registry = LocalRegistry::from_json("{}").unwrap();
    assert!(registry.gardens.is_empty());
    assert!(registry.validate_records().is_empty());
    assert!(registry.check_references().is_empty());
}

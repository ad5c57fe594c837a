//! Core domain records for the registry
//!
//! This module defines the metadata records the registry stores:
//! gardens, pipelines, steps, and models, plus their validation rules.

pub mod error;
pub mod garden;
pub mod ident;
pub mod model;
pub mod pipeline;
pub mod requirements;
pub mod step;

pub use error::MetadataError;
pub use garden::Garden;
pub use model::{Connection, ConnectionType, ModelFlavor, ModelUri, RegisteredModel};
pub use pipeline::Pipeline;
pub use requirements::RequirementSet;
pub use step::Step;

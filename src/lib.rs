//! trellis - a local metadata registry for ML pipelines, models, and gardens

pub mod citation;
pub mod cli;
pub mod core;
pub mod registry;

// Re-export commonly used types
pub use citation::DataciteSchema;
pub use core::{
    Connection, ConnectionType, Garden, MetadataError, ModelFlavor, ModelUri, Pipeline,
    RegisteredModel, Step,
};
pub use registry::{
    InMemoryStore, JsonFileStore, LocalRegistry, ReferenceViolation, RegistryBackend,
    RegistryError,
};

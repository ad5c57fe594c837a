//! Record validation errors

use thiserror::Error;

/// Error types for metadata record validation
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid DOI")]
    InvalidDoi(String),

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("'{0}' is not a valid model URI (expected <owner>-<name>/<version>)")]
    InvalidModelUri(String),

    #[error("could not parse pip requirement '{0}'")]
    InvalidRequirement(String),

    #[error("at least one author is required")]
    NoAuthors,

    #[error("a pipeline must have at least one step")]
    EmptySteps,

    #[error("step '{from}' output '{output}' does not match step '{to}' input '{input}'")]
    IncompatibleSteps {
        from: String,
        output: String,
        to: String,
        input: String,
    },

    #[error("type descriptor '{0}' is too vague to register")]
    VagueTypeDescriptor(String),

    #[error("garden lists pipeline '{0}' more than once")]
    DuplicatePipelineId(String),

    #[error("model URI components do not match record fields: {0}")]
    InconsistentModelRecord(String),
}

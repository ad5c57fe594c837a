//! CLI output formatting

use crate::core::{Garden, Pipeline, RegisteredModel};
use crate::registry::ReferenceViolation;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static LEAF: Emoji<'_, '_> = Emoji("🌱 ", "* ");

/// One-line summary of a garden for table listings
pub fn format_garden_summary(garden: &Garden) -> String {
    format!(
        "{} {} - {} ({} pipeline{})",
        LEAF,
        style(&garden.doi).cyan(),
        style(&garden.title).bold(),
        garden.pipeline_ids.len(),
        if garden.pipeline_ids.len() == 1 { "" } else { "s" }
    )
}

/// One-line summary of a pipeline for table listings
pub fn format_pipeline_summary(pipeline: &Pipeline) -> String {
    format!(
        "{} - {} [{}] ({} step{})",
        style(&pipeline.doi).cyan(),
        style(&pipeline.title).bold(),
        style(&pipeline.short_name).dim(),
        pipeline.steps.len(),
        if pipeline.steps.len() == 1 { "" } else { "s" }
    )
}

/// One-line summary of a model for table listings
pub fn format_model_summary(model: &RegisteredModel) -> String {
    format!(
        "{} - {} ({} connection{})",
        style(&model.model_uri).cyan(),
        style(model.flavor).bold(),
        model.connections.len(),
        if model.connections.len() == 1 { "" } else { "s" }
    )
}

/// Format an integrity violation for display
pub fn format_violation(violation: &ReferenceViolation) -> String {
    format!("{} {}", CROSS, style(violation).red())
}

/// Format an author list the way it appears in citations
pub fn format_authors(authors: &[String]) -> String {
    authors.join("; ")
}

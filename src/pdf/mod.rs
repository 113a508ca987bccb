//! Document generation - renders job records onto PDF document templates.
//!
//! The pieces mirror the flow: `resolver` pulls typed values out of a job
//! by dotted path, `renderer` lays a template out page by page and tracks
//! a per-field outcome, and `batch` runs one render per selected template.

pub mod batch;
pub mod common;
pub mod renderer;
pub mod resolver;

pub use batch::generate_batch;
pub use renderer::{render, Disposition, FieldOutcome, RenderedDocument};
pub use resolver::{resolve, FieldValue};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("unknown template id: {0}")]
    UnknownTemplate(String),
    #[error("failed to write PDF document: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to store generated document: {0}")]
    StoreArtifact(#[source] std::io::Error),
}

/// Summary produced by rendering one template against one job. Ephemeral;
/// returned to the caller, never persisted.
#[derive(Debug, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfGenerationResult {
    #[schema(example = "insurance-claim-form")]
    pub template_id: String,
    #[schema(example = "Insurance Claim Form")]
    pub template_name: String,
    #[schema(example = "/api/documents/TX-MOLD-2026-042_Insurance_Claim_Form.pdf")]
    pub pdf_url: String,
    pub fields_populated: usize,
    pub total_fields: usize,
    pub missing_fields: Vec<String>,
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

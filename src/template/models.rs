use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    ClaimForm,
    WorkOrder,
    Certificate,
    Estimate,
}

/// Semantic type of a document field; drives value formatting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Checkbox,
    Signature,
    Photo,
}

/// One field of a document template, mapping a labelled slot to a dotted
/// path into the job record.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfField {
    #[schema(example = "customer_name")]
    pub id: String,
    #[schema(example = "Customer Name")]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[schema(example = "customer.name")]
    pub data_path: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// chrono format pattern, date fields only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A named, ordered list of field descriptors describing one output
/// document.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfTemplate {
    #[schema(example = "insurance-claim-form")]
    pub id: String,
    #[schema(example = "Insurance Claim Form")]
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub fields: Vec<PdfField>,
    /// Field ids with `required` set, kept for quick lookup. Derived from
    /// the field flags at construction; `validate_template` re-checks the
    /// agreement.
    pub required_fields: Vec<String>,
}

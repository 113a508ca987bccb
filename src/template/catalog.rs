//! Builtin document template catalog.
//!
//! Four templates ship with the server, one per category: claim form,
//! work order, certificate and estimate. The catalog is assembled once at
//! startup, validated against the field-path registry, and injected
//! read-only into the application state.

use super::models::{FieldKind, PdfField, PdfTemplate, TemplateCategory};
use crate::pdf::resolver;

fn field(id: &str, label: &str, kind: FieldKind, data_path: &str, required: bool) -> PdfField {
    PdfField {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        data_path: data_path.to_string(),
        required,
        max_length: None,
        format: None,
    }
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    category: TemplateCategory,
    fields: Vec<PdfField>,
) -> PdfTemplate {
    // Quick-lookup list stays in lockstep with the per-field flags.
    let required_fields = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.id.clone())
        .collect();
    PdfTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        fields,
        required_fields,
    }
}

/// Check a template against the registration-time rules: unique field
/// ids, every data path known to the resolver, `required_fields` in
/// agreement with the per-field flags, and date formats only on date
/// fields.
pub fn validate_template(template: &PdfTemplate) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for field in &template.fields {
        if !seen.insert(field.id.as_str()) {
            return Err(format!(
                "template '{}': duplicate field id '{}'",
                template.id, field.id
            ));
        }
        if !resolver::is_known_path(&field.data_path) {
            return Err(format!(
                "template '{}': field '{}' uses unknown data path '{}'",
                template.id, field.id, field.data_path
            ));
        }
        if field.format.is_some() && field.kind != FieldKind::Date {
            return Err(format!(
                "template '{}': field '{}' declares a format but is not a date field",
                template.id, field.id
            ));
        }
    }

    let from_flags: Vec<&str> = template
        .fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.id.as_str())
        .collect();
    let declared: Vec<&str> = template.required_fields.iter().map(String::as_str).collect();
    if from_flags != declared {
        return Err(format!(
            "template '{}': requiredFields list disagrees with field flags",
            template.id
        ));
    }

    Ok(())
}

/// The builtin templates, in catalog order.
pub fn builtin_templates() -> Vec<PdfTemplate> {
    vec![
        insurance_claim_form(),
        remediation_work_order(),
        certificate_of_completion(),
        remediation_estimate(),
    ]
}

fn insurance_claim_form() -> PdfTemplate {
    let mut fields = vec![
        field("customer_name", "Customer Name", FieldKind::Text, "customer.name", true),
        field("customer_phone", "Customer Phone", FieldKind::Text, "customer.phone", true),
        field("customer_email", "Customer Email", FieldKind::Text, "customer.email", false),
        field(
            "policy_holder",
            "Customer Is Policyholder",
            FieldKind::Checkbox,
            "customer.isPolicyHolder",
            false,
        ),
        field("property_street", "Property Street", FieldKind::Text, "property.street", true),
        field("property_city", "Property City", FieldKind::Text, "property.city", true),
        field("property_state", "Property State", FieldKind::Text, "property.state", true),
        field("property_zip", "Property ZIP", FieldKind::Text, "property.zip", true),
        field("carrier", "Insurance Carrier", FieldKind::Text, "insurance.carrier", true),
        field("policy_number", "Policy Number", FieldKind::Text, "insurance.policyNumber", true),
        field("claim_number", "Claim Number", FieldKind::Text, "insurance.claimNumber", true),
        field("adjuster_name", "Adjuster Name", FieldKind::Text, "insurance.adjuster.name", false),
        field(
            "adjuster_email",
            "Adjuster Email",
            FieldKind::Text,
            "insurance.adjuster.email",
            false,
        ),
        field("loss_date", "Date of Loss", FieldKind::Date, "lossInfo.lossDate", true),
        field("loss_type", "Cause of Loss", FieldKind::Text, "lossInfo.lossType", true),
        field(
            "loss_description",
            "Loss Description",
            FieldKind::Text,
            "lossInfo.lossDescription",
            true,
        ),
        field(
            "affected_sqft",
            "Affected Square Footage",
            FieldKind::Number,
            "lossInfo.affectedSquareFootage",
            false,
        ),
        field(
            "affected_rooms",
            "Affected Rooms",
            FieldKind::Text,
            "lossInfo.affectedRooms",
            false,
        ),
    ];
    fields[2].max_length = Some(120);
    fields[15].max_length = Some(500);

    template(
        "insurance-claim-form",
        "Insurance Claim Form",
        "Carrier claim submission form covering the insured, the loss and the policy.",
        TemplateCategory::ClaimForm,
        fields,
    )
}

fn remediation_work_order() -> PdfTemplate {
    let mut fields = vec![
        field("customer_name", "Customer Name", FieldKind::Text, "customer.name", true),
        field("property_street", "Job Site Street", FieldKind::Text, "property.street", true),
        field("property_city", "Job Site City", FieldKind::Text, "property.city", true),
        field(
            "inspection_date",
            "Inspection Date",
            FieldKind::Date,
            "inspection.inspectionDate",
            true,
        ),
        field(
            "inspector_name",
            "Inspector Name",
            FieldKind::Text,
            "inspection.inspectorName",
            true,
        ),
        field(
            "inspector_license",
            "Inspector License No.",
            FieldKind::Text,
            "inspection.inspectorLicense",
            true,
        ),
        field(
            "moisture_source_identified",
            "Moisture Source Identified",
            FieldKind::Checkbox,
            "inspection.moistureSource.identified",
            false,
        ),
        field(
            "moisture_source_description",
            "Moisture Source Description",
            FieldKind::Text,
            "inspection.moistureSource.description",
            false,
        ),
        field(
            "visible_mold",
            "Visible Mold Present",
            FieldKind::Checkbox,
            "inspection.visibleMold.present",
            false,
        ),
        field(
            "visible_mold_locations",
            "Visible Mold Locations",
            FieldKind::Text,
            "inspection.visibleMold.locations",
            false,
        ),
        field(
            "air_quality_concerns",
            "Air Quality Concerns",
            FieldKind::Checkbox,
            "inspection.airQualityConcerns",
            false,
        ),
        field(
            "materials_removed",
            "Contaminated Materials Removed",
            FieldKind::Text,
            "inspection.workPerformed.contaminatedMaterialsRemoved",
            false,
        ),
        field(
            "surfaces_cleaned",
            "Surfaces Cleaned",
            FieldKind::Text,
            "inspection.workPerformed.surfacesCleaned",
            false,
        ),
    ];
    // Long-form site date on the work order
    fields[3].format = Some("%B %d, %Y".to_string());

    template(
        "remediation-work-order",
        "Mold Remediation Work Order",
        "Scope-of-work order issued after the initial inspection.",
        TemplateCategory::WorkOrder,
        fields,
    )
}

fn certificate_of_completion() -> PdfTemplate {
    let fields = vec![
        field("customer_name", "Customer Name", FieldKind::Text, "customer.name", true),
        field("property_street", "Property Street", FieldKind::Text, "property.street", true),
        field("property_city", "Property City", FieldKind::Text, "property.city", true),
        field(
            "start_date",
            "Remediation Start Date",
            FieldKind::Date,
            "inspection.workPerformed.startDate",
            true,
        ),
        field(
            "completion_date",
            "Completion Date",
            FieldKind::Date,
            "inspection.workPerformed.completionDate",
            true,
        ),
        field(
            "containment",
            "Containment Established",
            FieldKind::Checkbox,
            "inspection.workPerformed.containmentSetup",
            false,
        ),
        field(
            "negative_air",
            "Negative Air Pressure Maintained",
            FieldKind::Checkbox,
            "inspection.workPerformed.negativeAirPressure",
            false,
        ),
        field(
            "antimicrobial",
            "Antimicrobial Applied",
            FieldKind::Checkbox,
            "inspection.workPerformed.antimicrobialApplied",
            false,
        ),
        field(
            "hepa_vacuumed",
            "HEPA Vacuumed",
            FieldKind::Checkbox,
            "inspection.workPerformed.hepaVacuumed",
            false,
        ),
        field(
            "dehumidification_days",
            "Days of Dehumidification",
            FieldKind::Number,
            "inspection.workPerformed.dehumidificationDays",
            false,
        ),
        field(
            "inspector_signature",
            "Inspector Signature",
            FieldKind::Signature,
            "inspection.inspectorName",
            true,
        ),
        field(
            "inspector_license",
            "Inspector License No.",
            FieldKind::Text,
            "inspection.inspectorLicense",
            true,
        ),
    ];

    template(
        "certificate-of-completion",
        "Certificate of Completion",
        "Clearance certificate issued once remediation work is finished.",
        TemplateCategory::Certificate,
        fields,
    )
}

fn remediation_estimate() -> PdfTemplate {
    let fields = vec![
        field("customer_name", "Customer Name", FieldKind::Text, "customer.name", true),
        field("property_street", "Property Street", FieldKind::Text, "property.street", true),
        field("property_city", "Property City", FieldKind::Text, "property.city", true),
        field(
            "property_type",
            "Property Type",
            FieldKind::Text,
            "property.propertyType",
            false,
        ),
        field(
            "total_sqft",
            "Total Square Footage",
            FieldKind::Number,
            "property.squareFootage",
            false,
        ),
        field(
            "affected_sqft",
            "Affected Square Footage",
            FieldKind::Number,
            "lossInfo.affectedSquareFootage",
            true,
        ),
        field("loss_type", "Cause of Loss", FieldKind::Text, "lossInfo.lossType", true),
        field(
            "loss_description",
            "Loss Description",
            FieldKind::Text,
            "lossInfo.lossDescription",
            false,
        ),
        field(
            "affected_rooms",
            "Affected Rooms",
            FieldKind::Text,
            "lossInfo.affectedRooms",
            false,
        ),
    ];

    template(
        "remediation-estimate",
        "Remediation Cost Estimate",
        "Preliminary estimate worksheet for the affected areas.",
        TemplateCategory::Estimate,
        fields,
    )
}

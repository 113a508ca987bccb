mod common;

use common::sample_job;
use moldtrack_server::pdf::renderer::{self, format_value, Disposition};
use moldtrack_server::pdf::resolver::FieldValue;
use moldtrack_server::template::models::{FieldKind, PdfField, PdfTemplate, TemplateCategory};

fn field(id: &str, label: &str, kind: FieldKind, path: &str, required: bool) -> PdfField {
    PdfField {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        data_path: path.to_string(),
        required,
        max_length: None,
        format: None,
    }
}

fn template(id: &str, name: &str, fields: Vec<PdfField>) -> PdfTemplate {
    let required_fields = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.id.clone())
        .collect();
    PdfTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: TemplateCategory::ClaimForm,
        fields,
        required_fields,
    }
}

#[test]
fn test_every_field_gets_exactly_one_outcome() {
    let job = sample_job();
    let tpl = template(
        "t",
        "Outcome Accounting",
        vec![
            field("a", "Customer Name", FieldKind::Text, "customer.name", true),
            field("b", "Carrier", FieldKind::Text, "insurance.carrier", true),
            field("c", "Unknown", FieldKind::Text, "no.such.path", false),
        ],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    assert_eq!(rendered.outcomes.len(), tpl.fields.len());
}

#[test]
fn test_populated_missing_and_warned_are_pairwise_disjoint() {
    let mut job = sample_job();
    job.customer.email = String::new();
    job.insurance.carrier = String::new();

    let tpl = template(
        "t",
        "Disjointness",
        vec![
            field("name", "Customer Name", FieldKind::Text, "customer.name", true),
            field("email", "Customer Email", FieldKind::Text, "customer.email", false),
            field("carrier", "Carrier", FieldKind::Text, "insurance.carrier", true),
        ],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    for outcome in &rendered.outcomes {
        // one disposition per field, so membership in the three derived
        // sets is mutually exclusive by construction
        let in_missing = rendered.missing_fields().contains(&outcome.label);
        let in_warnings = rendered
            .warnings()
            .iter()
            .any(|w| w.contains(&format!("'{}'", outcome.label)));
        match outcome.disposition {
            Disposition::Populated => assert!(!in_missing && !in_warnings),
            Disposition::MissingRequired => assert!(in_missing && !in_warnings),
            Disposition::EmptyOptional => assert!(!in_missing && in_warnings),
        }
    }

    assert_eq!(rendered.fields_populated(), 1);
    assert_eq!(rendered.missing_fields(), vec!["Carrier".to_string()]);
    assert_eq!(
        rendered.warnings(),
        vec!["Optional field 'Customer Email' is empty".to_string()]
    );
}

#[test]
fn test_date_renders_with_default_pattern() {
    // resolved date 2024-03-15, no format string
    let f = field("d", "Date of Loss", FieldKind::Date, "lossInfo.lossDate", true);
    let value = FieldValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(format_value(&f, &value), "03/15/2024");
}

#[test]
fn test_date_renders_with_declared_format() {
    let mut f = field("d", "Inspection Date", FieldKind::Date, "inspection.inspectionDate", true);
    f.format = Some("%B %d, %Y".to_string());
    let value = FieldValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(format_value(&f, &value), "March 15, 2024");
}

#[test]
fn test_checkbox_glyphs() {
    let f = field("c", "Policyholder", FieldKind::Checkbox, "customer.isPolicyHolder", false);
    assert_eq!(format_value(&f, &FieldValue::Flag(true)), "☑ Yes");
    assert_eq!(format_value(&f, &FieldValue::Flag(false)), "☐ No");
}

#[test]
fn test_list_values_join_comma_separated() {
    let f = field("r", "Affected Rooms", FieldKind::Text, "lossInfo.affectedRooms", false);
    let value = FieldValue::List(vec!["Kitchen".to_string(), "Hallway".to_string()]);
    assert_eq!(format_value(&f, &value), "Kitchen, Hallway");
}

#[test]
fn test_number_values_render_plainly() {
    let f = field("n", "Square Footage", FieldKind::Number, "property.squareFootage", false);
    assert_eq!(format_value(&f, &FieldValue::Number(2400.0)), "2400");
    assert_eq!(format_value(&f, &FieldValue::Number(42.5)), "42.5");
}

#[test]
fn test_required_empty_field_is_missing_exactly_once() {
    let mut job = sample_job();
    job.insurance.claim_number = String::new();

    let tpl = template(
        "t",
        "Missing Required",
        vec![field("claim", "Claim Number", FieldKind::Text, "insurance.claimNumber", true)],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    let missing = rendered.missing_fields();
    assert_eq!(missing, vec!["Claim Number".to_string()]);
    assert!(rendered.warnings().is_empty());
    assert_eq!(rendered.fields_populated(), 0);
}

#[test]
fn test_unresolvable_required_field_is_missing() {
    let mut job = sample_job();
    job.insurance.adjuster.company = None;

    let tpl = template(
        "t",
        "Unset Leaf",
        vec![field(
            "company",
            "Adjuster Company",
            FieldKind::Text,
            "insurance.adjuster.company",
            true,
        )],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    assert_eq!(rendered.missing_fields(), vec!["Adjuster Company".to_string()]);
}

#[test]
fn test_end_to_end_scenario() {
    // Job with customer.name = "Jane Doe" and an empty adjuster email,
    // against a two-field template.
    let mut job = sample_job();
    job.insurance.adjuster.email = String::new();

    let tpl = template(
        "t",
        "Scenario",
        vec![
            field("customer", "Customer", FieldKind::Text, "customer.name", true),
            field(
                "adjuster_email",
                "Adjuster Email",
                FieldKind::Text,
                "insurance.adjuster.email",
                false,
            ),
        ],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    assert_eq!(rendered.fields_populated(), 1);
    assert_eq!(rendered.outcomes.len(), 2);
    assert!(rendered.missing_fields().is_empty());
    assert_eq!(
        rendered.warnings(),
        vec!["Optional field 'Adjuster Email' is empty".to_string()]
    );
}

#[test]
fn test_statistics_are_idempotent() {
    let job = sample_job();
    let tpl = template(
        "t",
        "Idempotence",
        vec![
            field("name", "Customer Name", FieldKind::Text, "customer.name", true),
            field("email", "Adjuster Email", FieldKind::Text, "insurance.adjuster.email", false),
            field("rooms", "Affected Rooms", FieldKind::Text, "lossInfo.affectedRooms", false),
        ],
    );

    let first = renderer::render(&job, &tpl).unwrap();
    let second = renderer::render(&job, &tpl).unwrap();
    assert_eq!(first.fields_populated(), second.fields_populated());
    assert_eq!(first.missing_fields(), second.missing_fields());
    assert_eq!(first.warnings(), second.warnings());
    assert_eq!(first.outcomes.len(), second.outcomes.len());
}

#[test]
fn test_rendered_bytes_are_a_pdf() {
    let job = sample_job();
    let tpl = template(
        "t",
        "PDF Header",
        vec![field("name", "Customer Name", FieldKind::Text, "customer.name", true)],
    );

    let rendered = renderer::render(&job, &tpl).unwrap();
    assert!(rendered.pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_long_templates_paginate() {
    let job = sample_job();
    let fields: Vec<PdfField> = (0..40)
        .map(|i| field(&format!("f{i}"), &format!("Field {i}"), FieldKind::Text, "customer.name", false))
        .collect();
    let tpl = template("t", "Pagination", fields);

    let rendered = renderer::render(&job, &tpl).unwrap();
    let doc = lopdf::Document::load_mem(&rendered.pdf).expect("generated PDF should parse");
    assert!(
        doc.get_pages().len() >= 2,
        "40 field lines should overflow onto a second page"
    );
}

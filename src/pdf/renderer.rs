//! Renders one job record onto one document template.
//!
//! The layout is a plain paginated form: a title block, then one line per
//! template field in declared order, with a page break whenever the
//! cursor passes the usable height. Pages are built in memory with lopdf;
//! nothing here touches the filesystem or mutates its inputs.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::common::{format_generated_at, DEFAULT_DATE_FORMAT};
use super::resolver::{self, FieldValue};
use super::GeneratorError;
use crate::job::models::Job;
use crate::template::models::{FieldKind, PdfField, PdfTemplate};

// US Letter, points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const LABEL_X: f32 = 57.0;
const VALUE_X: f32 = 227.0;
const TOP_MARGIN: f32 = 57.0;
const FIELDS_START_Y: f32 = 142.0;
const LINE_HEIGHT: f32 = 23.0;
const BOTTOM_LIMIT: f32 = 735.0;

const PLACEHOLDER: &str = "[NOT PROVIDED]";
const CHECKED: &str = "☑ Yes";
const UNCHECKED: &str = "☐ No";

/// How a single template field fared during rendering. The three cases
/// are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Populated,
    MissingRequired,
    EmptyOptional,
}

/// Outcome of rendering one field.
#[derive(Debug, Clone)]
pub struct FieldOutcome {
    pub field_id: String,
    pub label: String,
    pub disposition: Disposition,
}

/// Result of rendering one template against one job: the document bytes
/// plus one outcome per template field, in field order.
#[derive(Debug)]
pub struct RenderedDocument {
    pub pdf: Vec<u8>,
    pub outcomes: Vec<FieldOutcome>,
}

impl RenderedDocument {
    pub fn fields_populated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.disposition == Disposition::Populated)
            .count()
    }

    /// Labels of required fields that resolved to nothing, in field order.
    pub fn missing_fields(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.disposition == Disposition::MissingRequired)
            .map(|o| o.label.clone())
            .collect()
    }

    /// One notice per empty optional field, in field order.
    pub fn warnings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.disposition == Disposition::EmptyOptional)
            .map(|o| format!("Optional field '{}' is empty", o.label))
            .collect()
    }
}

/// Format a resolved value for display, honoring the field's declared
/// semantic type.
pub fn format_value(field: &PdfField, value: &FieldValue) -> String {
    match (field.kind, value) {
        (FieldKind::Date, FieldValue::Date(d)) => {
            let pattern = field.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
            d.format(pattern).to_string()
        }
        (FieldKind::Checkbox, FieldValue::Flag(flag)) => {
            if *flag { CHECKED } else { UNCHECKED }.to_string()
        }
        (_, FieldValue::List(items)) => items.join(", "),
        (_, FieldValue::Text(s)) => s.clone(),
        (_, FieldValue::Number(n)) => n.to_string(),
        (_, FieldValue::Flag(flag)) => flag.to_string(),
        (_, FieldValue::Date(d)) => d.format(DEFAULT_DATE_FORMAT).to_string(),
    }
}

/// Render `template` against `job`. Every field in the template is always
/// rendered; absent values get a red placeholder and are accounted in the
/// field's outcome instead of failing the render.
pub fn render(job: &Job, template: &PdfTemplate) -> Result<RenderedDocument, GeneratorError> {
    let mut pages = vec![PageBuilder::new()];
    let mut outcomes = Vec::with_capacity(template.fields.len());

    {
        let first = pages.last_mut().unwrap();
        first.text(LABEL_X, TOP_MARGIN, Font::Bold, 18, &template.name);
        first.text(
            LABEL_X,
            TOP_MARGIN + 28.0,
            Font::Regular,
            10,
            &format!("Job ID: {}", job.id),
        );
        first.text(
            LABEL_X,
            TOP_MARGIN + 45.0,
            Font::Regular,
            10,
            &format!("Generated: {}", format_generated_at(&Utc::now())),
        );
    }

    let mut cursor = FIELDS_START_Y;
    for field in &template.fields {
        let page = pages.last_mut().unwrap();
        page.text(LABEL_X, cursor, Font::Bold, 9, &format!("{}:", field.label));

        let value = resolver::resolve(job, &field.data_path);
        let disposition = match value {
            Some(ref v) if !v.is_empty() => {
                page.text(VALUE_X, cursor, Font::Regular, 9, &format_value(field, v));
                Disposition::Populated
            }
            _ => {
                page.alert_text(VALUE_X, cursor, 9, PLACEHOLDER);
                if field.required {
                    Disposition::MissingRequired
                } else {
                    Disposition::EmptyOptional
                }
            }
        };
        outcomes.push(FieldOutcome {
            field_id: field.id.clone(),
            label: field.label.clone(),
            disposition,
        });

        cursor += LINE_HEIGHT;
        if cursor > BOTTOM_LIMIT {
            pages.push(PageBuilder::new());
            cursor = TOP_MARGIN;
        }
    }

    let pdf = assemble(pages)?;
    Ok(RenderedDocument { pdf, outcomes })
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Accumulates content-stream operations for one page. Y coordinates are
/// given from the top of the page and flipped on emission.
struct PageBuilder {
    operations: Vec<Operation>,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    fn text(&mut self, x: f32, y_from_top: f32, font: Font, size: i64, content: &str) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), size.into()],
        ));
        self.operations.push(Operation::new(
            "Td",
            vec![real(x), real(PAGE_HEIGHT - y_from_top)],
        ));
        self.operations
            .push(Operation::new("Tj", vec![Object::string_literal(content)]));
        self.operations.push(Operation::new("ET", vec![]));
    }

    /// Text in the alert color used for missing-value placeholders.
    fn alert_text(&mut self, x: f32, y_from_top: f32, size: i64, content: &str) {
        self.operations
            .push(Operation::new("rg", vec![real(0.78), real(0.0), real(0.0)]));
        self.text(x, y_from_top, Font::Regular, size, content);
        self.operations
            .push(Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]));
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Assemble accumulated pages into a finished PDF.
fn assemble(pages: Vec<PageBuilder>) -> Result<Vec<u8>, GeneratorError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content = Content {
            operations: page.operations.clone(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = pages.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

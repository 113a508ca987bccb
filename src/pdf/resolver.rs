//! Field resolver: typed accessor registry over the job record.
//!
//! Template fields address job data through dotted paths matching the
//! record's serialized shape (`"insurance.adjuster.email"`). Instead of
//! duck-typed traversal of an arbitrary object graph, every addressable
//! leaf is registered here as a typed extraction, and template validation
//! rejects unknown paths up front. At render time an unknown or unset path
//! still resolves to `None` rather than an error; emptiness of a resolved
//! value is judged by the renderer, not here.

use chrono::NaiveDate;

use crate::job::models::Job;

/// A value extracted from a job record, tagged with its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// An empty string or empty list counts as "not provided"; numbers,
    /// dates and flags are always considered present once resolved.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

/// Every path the registry can resolve, in job-record order. Template
/// validation checks declared paths against this list.
pub const KNOWN_PATHS: &[&str] = &[
    "id",
    "status",
    "customer.name",
    "customer.phone",
    "customer.email",
    "customer.isPolicyHolder",
    "property.street",
    "property.city",
    "property.state",
    "property.zip",
    "property.propertyType",
    "property.squareFootage",
    "lossInfo.lossDate",
    "lossInfo.lossType",
    "lossInfo.lossDescription",
    "lossInfo.affectedSquareFootage",
    "lossInfo.affectedRooms",
    "inspection.inspectionDate",
    "inspection.inspectorName",
    "inspection.inspectorLicense",
    "inspection.moistureSource.identified",
    "inspection.moistureSource.description",
    "inspection.visibleMold.present",
    "inspection.visibleMold.locations",
    "inspection.airQualityConcerns",
    "inspection.workPerformed.containmentSetup",
    "inspection.workPerformed.negativeAirPressure",
    "inspection.workPerformed.contaminatedMaterialsRemoved",
    "inspection.workPerformed.surfacesCleaned",
    "inspection.workPerformed.antimicrobialApplied",
    "inspection.workPerformed.hepaVacuumed",
    "inspection.workPerformed.dehumidificationDays",
    "inspection.workPerformed.startDate",
    "inspection.workPerformed.completionDate",
    "insurance.carrier",
    "insurance.policyNumber",
    "insurance.claimNumber",
    "insurance.adjuster.name",
    "insurance.adjuster.phone",
    "insurance.adjuster.email",
    "insurance.adjuster.company",
];

/// True if the registry has an accessor for this path.
pub fn is_known_path(path: &str) -> bool {
    KNOWN_PATHS.contains(&path)
}

/// Resolve a dotted field path against a job record.
///
/// Returns `None` both for unregistered paths and for registered paths
/// whose value is unset (`Option` leaves); the caller cannot tell the
/// two apart.
pub fn resolve(job: &Job, path: &str) -> Option<FieldValue> {
    use FieldValue::*;

    let value = match path {
        "id" => Text(job.id.clone()),
        "status" => Text(job.status.as_str().to_string()),

        "customer.name" => Text(job.customer.name.clone()),
        "customer.phone" => Text(job.customer.phone.clone()),
        "customer.email" => Text(job.customer.email.clone()),
        "customer.isPolicyHolder" => Flag(job.customer.is_policy_holder),

        "property.street" => Text(job.property.street.clone()),
        "property.city" => Text(job.property.city.clone()),
        "property.state" => Text(job.property.state.clone()),
        "property.zip" => Text(job.property.zip.clone()),
        "property.propertyType" => Text(job.property.property_type.as_str().to_string()),
        "property.squareFootage" => Number(f64::from(job.property.square_footage)),

        "lossInfo.lossDate" => Date(job.loss_info.loss_date),
        "lossInfo.lossType" => Text(job.loss_info.loss_type.as_str().to_string()),
        "lossInfo.lossDescription" => Text(job.loss_info.loss_description.clone()),
        "lossInfo.affectedSquareFootage" => {
            Number(f64::from(job.loss_info.affected_square_footage))
        }
        "lossInfo.affectedRooms" => List(job.loss_info.affected_rooms.clone()),

        "inspection.inspectionDate" => Date(job.inspection.inspection_date),
        "inspection.inspectorName" => Text(job.inspection.inspector_name.clone()),
        "inspection.inspectorLicense" => Text(job.inspection.inspector_license.clone()),
        "inspection.moistureSource.identified" => Flag(job.inspection.moisture_source.identified),
        "inspection.moistureSource.description" => {
            Text(job.inspection.moisture_source.description.clone())
        }
        "inspection.visibleMold.present" => Flag(job.inspection.visible_mold.present),
        "inspection.visibleMold.locations" => List(job.inspection.visible_mold.locations.clone()),
        "inspection.airQualityConcerns" => Flag(job.inspection.air_quality_concerns),

        "inspection.workPerformed.containmentSetup" => {
            Flag(job.inspection.work_performed.containment_setup)
        }
        "inspection.workPerformed.negativeAirPressure" => {
            Flag(job.inspection.work_performed.negative_air_pressure)
        }
        "inspection.workPerformed.contaminatedMaterialsRemoved" => List(
            job.inspection
                .work_performed
                .contaminated_materials_removed
                .clone(),
        ),
        "inspection.workPerformed.surfacesCleaned" => {
            List(job.inspection.work_performed.surfaces_cleaned.clone())
        }
        "inspection.workPerformed.antimicrobialApplied" => {
            Flag(job.inspection.work_performed.antimicrobial_applied)
        }
        "inspection.workPerformed.hepaVacuumed" => Flag(job.inspection.work_performed.hepa_vacuumed),
        "inspection.workPerformed.dehumidificationDays" => {
            Number(f64::from(job.inspection.work_performed.dehumidification_days))
        }
        "inspection.workPerformed.startDate" => Date(job.inspection.work_performed.start_date),
        "inspection.workPerformed.completionDate" => {
            Date(job.inspection.work_performed.completion_date)
        }

        "insurance.carrier" => Text(job.insurance.carrier.clone()),
        "insurance.policyNumber" => Text(job.insurance.policy_number.clone()),
        "insurance.claimNumber" => Text(job.insurance.claim_number.clone()),
        "insurance.adjuster.name" => Text(job.insurance.adjuster.name.clone()),
        "insurance.adjuster.phone" => Text(job.insurance.adjuster.phone.clone()),
        "insurance.adjuster.email" => Text(job.insurance.adjuster.email.clone()),
        "insurance.adjuster.company" => Text(job.insurance.adjuster.company.clone()?),

        _ => return None,
    };

    Some(value)
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a job. Freely settable; there are no enforced
/// transition rules.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Ready,
    Submitted,
    Approved,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Ready => "ready",
            JobStatus::Submitted => "submitted",
            JobStatus::Approved => "approved",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[schema(example = "TX-MOLD-2026-042")]
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: JobStatus,
    pub customer: Customer,
    pub property: Property,
    pub loss_info: LossInfo,
    pub inspection: InspectionData,
    pub insurance: InsuranceInfo,
    pub files: Vec<JobFile>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "(512) 555-0187")]
    pub phone: String,
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    pub is_policy_holder: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[schema(example = "1200 Brazos St")]
    pub street: String,
    #[schema(example = "Austin")]
    pub city: String,
    #[schema(example = "TX")]
    pub state: String,
    #[schema(example = "78701")]
    pub zip: String,
    pub property_type: PropertyType,
    pub square_footage: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    WaterDamage,
    Flood,
    PipeBurst,
    RoofLeak,
    HvacLeak,
    Other,
}

impl LossType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LossType::WaterDamage => "water_damage",
            LossType::Flood => "flood",
            LossType::PipeBurst => "pipe_burst",
            LossType::RoofLeak => "roof_leak",
            LossType::HvacLeak => "hvac_leak",
            LossType::Other => "other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossInfo {
    #[schema(example = "2026-03-15")]
    pub loss_date: NaiveDate,
    pub loss_type: LossType,
    pub loss_description: String,
    pub affected_square_footage: u32,
    pub affected_rooms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoistureSource {
    pub identified: bool,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibleMold {
    pub present: bool,
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionData {
    pub inspection_date: NaiveDate,
    pub inspector_name: String,
    pub inspector_license: String,
    pub moisture_source: MoistureSource,
    pub visible_mold: VisibleMold,
    pub air_quality_concerns: bool,
    pub moisture_readings: Vec<MoistureReading>,
    pub air_samples: Vec<AirSample>,
    pub photos: Vec<Photo>,
    pub work_performed: WorkPerformed,
    pub equipment_used: Vec<Equipment>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceMaterial {
    Drywall,
    Concrete,
    Wood,
    Tile,
    Carpet,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoistureReading {
    #[schema(example = "mr-1767225600000")]
    pub id: String,
    pub room: String,
    pub surface_material: SurfaceMaterial,
    pub moisture_percentage: f64,
    pub reading_date: DateTime<Utc>,
    pub inspector_initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    SporeTrap,
    Swab,
    Bulk,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirSample {
    #[schema(example = "as-1767225600000")]
    pub id: String,
    pub location: String,
    pub sample_type: SampleType,
    pub lab_name: String,
    pub sample_date: DateTime<Utc>,
    pub results_received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colonies_per_m3: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mold_types_detected: Option<Vec<String>>,
    pub exceeds_outdoor_control: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhotoCategory {
    Before,
    During,
    After,
    Damage,
    Equipment,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[schema(example = "photo-1767225600000-481")]
    pub id: String,
    pub filename: String,
    #[schema(example = "/uploads/3f6c2e90-1b2a-4f5e-9c7d-8a1b2c3d4e5f.jpg")]
    pub url: String,
    pub category: PhotoCategory,
    pub captured_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkPerformed {
    pub containment_setup: bool,
    pub negative_air_pressure: bool,
    pub contaminated_materials_removed: Vec<String>,
    pub surfaces_cleaned: Vec<String>,
    pub antimicrobial_applied: bool,
    pub hepa_vacuumed: bool,
    pub dehumidification_days: u32,
    pub start_date: NaiveDate,
    pub completion_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Dehumidifier,
    AirScrubber,
    HepaVacuum,
    MoistureMeter,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub quantity: u32,
    pub days_used: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Adjuster {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceInfo {
    #[schema(example = "Lone Star Mutual")]
    pub carrier: String,
    pub policy_number: String,
    pub claim_number: String,
    pub adjuster: Adjuster,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobFileType {
    Photo,
    MoistureData,
    AirSampleData,
    Pdf,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobFile {
    pub id: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: JobFileType,
    pub url: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Payload for creating a job. The server stamps id, timestamps, draft
/// status and an empty inspection skeleton.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub customer: Customer,
    pub property: Property,
    pub loss_info: LossInfo,
    pub insurance: InsuranceInfo,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoistureReadingRequest {
    pub room: String,
    pub surface_material: SurfaceMaterial,
    pub moisture_percentage: f64,
    pub inspector_initials: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAirSampleRequest {
    pub location: String,
    pub sample_type: SampleType,
    pub lab_name: String,
    #[serde(default)]
    pub colonies_per_m3: Option<u32>,
    #[serde(default)]
    pub exceeds_outdoor_control: bool,
}

/// Counts by lifecycle status for the dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total: usize,
    pub draft: usize,
    pub ready: usize,
    pub submitted: usize,
    pub approved: usize,
}

impl InspectionData {
    /// Empty inspection skeleton attached to a freshly created job.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            inspection_date: today,
            inspector_name: String::new(),
            inspector_license: String::new(),
            moisture_source: MoistureSource {
                identified: false,
                description: String::new(),
            },
            visible_mold: VisibleMold {
                present: false,
                locations: Vec::new(),
            },
            air_quality_concerns: false,
            moisture_readings: Vec::new(),
            air_samples: Vec::new(),
            photos: Vec::new(),
            work_performed: WorkPerformed {
                containment_setup: false,
                negative_air_pressure: false,
                contaminated_materials_removed: Vec::new(),
                surfaces_cleaned: Vec::new(),
                antimicrobial_applied: false,
                hepa_vacuumed: false,
                dehumidification_days: 0,
                start_date: today,
                completion_date: today,
            },
            equipment_used: Vec::new(),
        }
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use moldtrack_server::db::archive::JobArchive;
use moldtrack_server::db::AppState;
use moldtrack_server::job::models::*;
use moldtrack_server::template::catalog::builtin_templates;

/// In-memory archive so integration tests never touch the filesystem
/// through the persistence worker.
pub struct MemoryArchive {
    jobs: tokio::sync::Mutex<Vec<Job>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self {
            jobs: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    /// Jobs as last persisted through the archive seam.
    pub async fn snapshot(&self) -> Vec<Job> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl JobArchive for MemoryArchive {
    async fn persist(&self, jobs: &[Job]) -> Result<(), String> {
        *self.jobs.lock().await = jobs.to_vec();
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Job>, String> {
        Ok(self.jobs.lock().await.clone())
    }
}

/// Fresh application state over an in-memory archive and a temp data dir.
/// The TempDir must be kept alive for the duration of the test.
pub async fn test_state() -> (web::Data<AppState>, TempDir) {
    let dir = TempDir::new().expect("failed to create temp data dir");
    let archive: Arc<dyn JobArchive> = Arc::new(MemoryArchive::new());
    let state = AppState::new_with_archive(archive, dir.path().to_path_buf(), builtin_templates())
        .await
        .expect("failed to build test state");
    (web::Data::new(state), dir)
}

/// A fully populated job record touching every resolvable field path.
pub fn sample_job() -> Job {
    let created = Utc.with_ymd_and_hms(2024, 3, 18, 14, 30, 0).unwrap();
    Job {
        id: "TX-MOLD-2024-001".to_string(),
        created_at: created,
        updated_at: created,
        status: JobStatus::Ready,
        customer: Customer {
            name: "Jane Doe".to_string(),
            phone: "(512) 555-0187".to_string(),
            email: "jane.doe@example.com".to_string(),
            is_policy_holder: true,
        },
        property: Property {
            street: "1200 Brazos St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip: "78701".to_string(),
            property_type: PropertyType::Residential,
            square_footage: 2400,
        },
        loss_info: LossInfo {
            loss_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            loss_type: LossType::PipeBurst,
            loss_description: "Supply line burst behind the kitchen wall".to_string(),
            affected_square_footage: 350,
            affected_rooms: vec!["Kitchen".to_string(), "Hallway".to_string()],
        },
        inspection: InspectionData {
            inspection_date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            inspector_name: "Raul Vega".to_string(),
            inspector_license: "TX-MAC-1402".to_string(),
            moisture_source: MoistureSource {
                identified: true,
                description: "Pinhole leak in copper supply line".to_string(),
            },
            visible_mold: VisibleMold {
                present: true,
                locations: vec!["Under kitchen sink".to_string()],
            },
            air_quality_concerns: true,
            moisture_readings: vec![MoistureReading {
                id: "mr-1710772200000".to_string(),
                room: "Kitchen".to_string(),
                surface_material: SurfaceMaterial::Drywall,
                moisture_percentage: 42.5,
                reading_date: created,
                inspector_initials: "RV".to_string(),
                notes: Some("Behind lower cabinets".to_string()),
            }],
            air_samples: vec![AirSample {
                id: "as-1710772300000".to_string(),
                location: "Kitchen".to_string(),
                sample_type: SampleType::SporeTrap,
                lab_name: "Hill Country Labs".to_string(),
                sample_date: created,
                results_received: true,
                colonies_per_m3: Some(1800),
                mold_types_detected: Some(vec!["Aspergillus".to_string()]),
                exceeds_outdoor_control: true,
            }],
            photos: vec![Photo {
                id: "photo-1710772400000-512".to_string(),
                filename: "kitchen-wall.jpg".to_string(),
                url: "/uploads/kitchen-wall.jpg".to_string(),
                category: PhotoCategory::Damage,
                captured_at: created,
                caption: Some("Staining on drywall".to_string()),
                room: Some("Kitchen".to_string()),
            }],
            work_performed: WorkPerformed {
                containment_setup: true,
                negative_air_pressure: true,
                contaminated_materials_removed: vec!["Lower cabinet drywall".to_string()],
                surfaces_cleaned: vec!["Wall studs".to_string()],
                antimicrobial_applied: true,
                hepa_vacuumed: true,
                dehumidification_days: 5,
                start_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
                completion_date: NaiveDate::from_ymd_opt(2024, 3, 27).unwrap(),
            },
            equipment_used: vec![Equipment {
                equipment_type: EquipmentType::Dehumidifier,
                quantity: 2,
                days_used: 5,
            }],
        },
        insurance: InsuranceInfo {
            carrier: "Lone Star Mutual".to_string(),
            policy_number: "LSM-99182".to_string(),
            claim_number: "CLM-2024-5520".to_string(),
            adjuster: Adjuster {
                name: "Dana Whitfield".to_string(),
                phone: "(512) 555-0144".to_string(),
                email: "d.whitfield@lonestar.example".to_string(),
                company: Some("Lone Star Claims Group".to_string()),
            },
        },
        files: Vec::new(),
    }
}

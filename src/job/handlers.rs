use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use chrono::Utc;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::db::AppState;
use crate::job::helpers::{entry_id, format_phone_number, generate_job_id, photo_id};
use crate::job::models::{
    AirSample, CreateAirSampleRequest, CreateJobRequest, CreateMoistureReadingRequest, Job,
    JobStats, JobStatus, MoistureReading, Photo, PhotoCategory,
};
use crate::pdf::common::document_filename;
use crate::pdf::{generate_batch, GeneratorError, PdfGenerationResult};
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "List of all jobs in creation order", body = [Job])
    )
)]
pub async fn get_all_jobs(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.all_jobs())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    get,
    path = "/jobs/stats",
    responses(
        (status = 200, description = "Job counts by lifecycle status", body = JobStats)
    )
)]
pub async fn get_job_stats(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.stats())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    get,
    path = "/jobs/{id}",
    responses(
        (status = 200, description = "Job found", body = Job),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "ID of the job to retrieve")
    )
)]
pub async fn get_job_by_id(id: Path<String>, data: web::Data<AppState>) -> impl Responder {
    match data.get_job(&id.into_inner()) {
        Some(job) => HttpResponse::Ok().json(job),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found")),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    post,
    path = "/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created successfully", body = Job),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_job(
    req: web::Json<CreateJobRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    if let Err(message) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let now = Utc::now();
    let mut customer = req.customer;
    customer.phone = format_phone_number(&customer.phone);
    let mut insurance = req.insurance;
    insurance.adjuster.phone = format_phone_number(&insurance.adjuster.phone);

    let new_job = Job {
        id: generate_job_id(),
        created_at: now,
        updated_at: now,
        status: JobStatus::Draft,
        customer,
        property: req.property,
        loss_info: req.loss_info,
        inspection: crate::job::models::InspectionData::empty(now.date_naive()),
        insurance,
        files: Vec::new(),
    };

    data.save_job(new_job.clone());
    log::info!("Created job {}", new_job.id);
    HttpResponse::Created().json(new_job)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    put,
    path = "/jobs/{id}",
    request_body = Job,
    responses(
        (status = 200, description = "Job replaced successfully", body = Job),
        (status = 400, description = "Body id does not match path id", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "ID of the job to replace")
    )
)]
pub async fn update_job(
    id: Path<String>,
    req: web::Json<Job>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();
    let mut job = req.into_inner();
    if job.id != id {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Body id does not match path id"));
    }
    if data.get_job(&id).is_none() {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    }

    job.updated_at = Utc::now();
    data.save_job(job.clone());
    HttpResponse::Ok().json(job)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Job Service",
    delete,
    path = "/jobs/{id}",
    responses(
        (status = 204, description = "Job deleted successfully"),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "ID of the job to delete")
    )
)]
pub async fn delete_job(id: Path<String>, data: web::Data<AppState>) -> impl Responder {
    if data.delete_job(&id.into_inner()) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    post,
    path = "/jobs/{id}/readings",
    request_body = CreateMoistureReadingRequest,
    responses(
        (status = 201, description = "Moisture reading appended", body = MoistureReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID")
    )
)]
pub async fn add_moisture_reading(
    id: Path<String>,
    req: web::Json<CreateMoistureReadingRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    if let Err(message) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }
    let Some(mut job) = data.get_job(&id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let reading = MoistureReading {
        id: entry_id("mr"),
        room: req.room,
        surface_material: req.surface_material,
        moisture_percentage: req.moisture_percentage,
        reading_date: Utc::now(),
        inspector_initials: req.inspector_initials,
        notes: req.notes.filter(|n| !n.trim().is_empty()),
    };

    job.inspection.moisture_readings.push(reading.clone());
    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::Created().json(reading)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    delete,
    path = "/jobs/{id}/readings/{reading_id}",
    responses(
        (status = 204, description = "Moisture reading removed"),
        (status = 404, description = "Job or reading not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID"),
        ("reading_id" = String, Path, description = "Reading ID")
    )
)]
pub async fn remove_moisture_reading(
    path: Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (job_id, reading_id) = path.into_inner();
    let Some(mut job) = data.get_job(&job_id) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let before = job.inspection.moisture_readings.len();
    job.inspection.moisture_readings.retain(|r| r.id != reading_id);
    if job.inspection.moisture_readings.len() == before {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Reading not found"));
    }

    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::NoContent().finish()
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    post,
    path = "/jobs/{id}/samples",
    request_body = CreateAirSampleRequest,
    responses(
        (status = 201, description = "Air sample appended", body = AirSample),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID")
    )
)]
pub async fn add_air_sample(
    id: Path<String>,
    req: web::Json<CreateAirSampleRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    if let Err(message) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }
    let Some(mut job) = data.get_job(&id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let sample = AirSample {
        id: entry_id("as"),
        location: req.location,
        sample_type: req.sample_type,
        lab_name: req.lab_name,
        sample_date: Utc::now(),
        results_received: req.colonies_per_m3.is_some(),
        colonies_per_m3: req.colonies_per_m3,
        mold_types_detected: None,
        exceeds_outdoor_control: req.exceeds_outdoor_control,
    };

    job.inspection.air_samples.push(sample.clone());
    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::Created().json(sample)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    delete,
    path = "/jobs/{id}/samples/{sample_id}",
    responses(
        (status = 204, description = "Air sample removed"),
        (status = 404, description = "Job or sample not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID"),
        ("sample_id" = String, Path, description = "Sample ID")
    )
)]
pub async fn remove_air_sample(
    path: Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (job_id, sample_id) = path.into_inner();
    let Some(mut job) = data.get_job(&job_id) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let before = job.inspection.air_samples.len();
    job.inspection.air_samples.retain(|s| s.id != sample_id);
    if job.inspection.air_samples.len() == before {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Sample not found"));
    }

    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::NoContent().finish()
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    post,
    path = "/jobs/{id}/photos",
    request_body(content = String, description = "Multipart form with one or more image files", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photos attached to the job", body = [Photo]),
        (status = 400, description = "Empty or malformed upload", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID")
    )
)]
pub async fn upload_photos(
    id: Path<String>,
    mut payload: actix_multipart::Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(mut job) = data.get_job(&id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let uploads_dir = data.uploads_dir();
    let mut added: Vec<Photo> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(&format!("Malformed upload: {e}")));
            }
        };

        let Some(original) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| sanitize_filename::sanitize(name))
        else {
            continue;
        };

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(chunk) => bytes.extend_from_slice(&chunk),
                Err(e) => {
                    return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                        &format!("Failed to read upload: {e}"),
                    ));
                }
            }
        }
        if bytes.is_empty() {
            continue;
        }

        let stored = match original.rsplit_once('.') {
            Some((_, ext)) => format!("{}.{ext}", uuid::Uuid::new_v4()),
            None => uuid::Uuid::new_v4().to_string(),
        };
        if let Err(e) = tokio::fs::write(uploads_dir.join(&stored), &bytes).await {
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("Failed to store upload: {e}")));
        }

        added.push(Photo {
            id: photo_id(),
            filename: original,
            url: format!("/uploads/{stored}"),
            category: PhotoCategory::Damage,
            captured_at: Utc::now(),
            caption: None,
            room: None,
        });
    }

    if added.is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Upload contained no files"));
    }

    job.inspection.photos.extend(added.iter().cloned());
    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::Created().json(added)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Inspection Service",
    delete,
    path = "/jobs/{id}/photos/{photo_id}",
    responses(
        (status = 204, description = "Photo removed"),
        (status = 404, description = "Job or photo not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID"),
        ("photo_id" = String, Path, description = "Photo ID")
    )
)]
pub async fn remove_photo(
    path: Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (job_id, photo_id) = path.into_inner();
    let Some(mut job) = data.get_job(&job_id) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let before = job.inspection.photos.len();
    job.inspection.photos.retain(|p| p.id != photo_id);
    if job.inspection.photos.len() == before {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Photo not found"));
    }

    job.updated_at = Utc::now();
    data.save_job(job);
    HttpResponse::NoContent().finish()
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfsRequest {
    #[schema(example = json!(["insurance-claim-form", "remediation-work-order"]))]
    pub template_ids: Vec<String>,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/jobs/{id}/generate",
    request_body = GeneratePdfsRequest,
    responses(
        (status = 200, description = "One generation result per selected template", body = [PdfGenerationResult]),
        (status = 400, description = "Empty selection or unknown template id", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 500, description = "Document writing failed", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID")
    )
)]
pub async fn generate_documents(
    id: Path<String>,
    req: web::Json<GeneratePdfsRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(job) = data.get_job(&id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };
    if req.template_ids.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("No templates selected"));
    }

    let rendered = match generate_batch(&job, &req.template_ids, &data.templates) {
        Ok(rendered) => rendered,
        Err(e @ GeneratorError::UnknownTemplate(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()));
        }
        Err(e) => {
            log::error!("Document generation failed for job {}: {e}", job.id);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&e.to_string()));
        }
    };

    let documents_dir = data.documents_dir();
    let mut results = Vec::with_capacity(rendered.len());
    for (template, document) in rendered {
        let filename = document_filename(&job.id, &template.name);
        if let Err(e) = tokio::fs::write(documents_dir.join(&filename), &document.pdf).await {
            let e = GeneratorError::StoreArtifact(e);
            log::error!("{filename}: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&e.to_string()));
        }

        crate::DOCUMENTS_GENERATED
            .with_label_values(&[&template.id])
            .inc();
        results.push(PdfGenerationResult {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            pdf_url: format!("/api/documents/{filename}"),
            fields_populated: document.fields_populated(),
            total_fields: template.fields.len(),
            missing_fields: document.missing_fields(),
            warnings: document.warnings(),
            generated_at: Utc::now(),
        });
    }

    log::info!(
        "Generated {} document(s) for job {}",
        results.len(),
        job.id
    );
    HttpResponse::Ok().json(results)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    get,
    path = "/documents/{filename}",
    responses(
        (status = 200, description = "Generated document as a PDF byte stream"),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    params(
        ("filename" = String, Path, description = "Document filename")
    )
)]
pub async fn serve_document(filename: Path<String>, data: web::Data<AppState>) -> impl Responder {
    let safe = sanitize_filename::sanitize(filename.into_inner());
    let path = data.documents_dir().join(&safe);
    match tokio::fs::read(&path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(mime_guess::from_path(&safe).first_or_octet_stream())
            .body(bytes),
        Err(_) => HttpResponse::NotFound().json(ErrorResponse::not_found("Document not found")),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentRequest {
    #[schema(example = "TX-MOLD-2026-042_Insurance_Claim_Form.pdf")]
    pub filename: String,
    /// Recipient override; defaults to the job's adjuster email.
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentResponse {
    pub sent: bool,
    pub to: String,
    pub subject: String,
}

/// Notification boundary stub: confirms after a short delay without
/// contacting any mail system.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/jobs/{id}/send",
    request_body = SendDocumentRequest,
    responses(
        (status = 200, description = "Delivery simulated", body = SendDocumentResponse),
        (status = 400, description = "No recipient available", body = ErrorResponse),
        (status = 404, description = "Job or document not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Job ID")
    )
)]
pub async fn send_document(
    id: Path<String>,
    req: web::Json<SendDocumentRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(job) = data.get_job(&id.into_inner()) else {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Job not found"));
    };

    let recipient = req
        .to
        .clone()
        .filter(|to| !to.trim().is_empty())
        .unwrap_or_else(|| job.insurance.adjuster.email.clone());
    if recipient.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("No recipient email available"));
    }

    let safe = sanitize_filename::sanitize(&req.filename);
    if !data.documents_dir().join(&safe).exists() {
        return HttpResponse::NotFound().json(ErrorResponse::not_found("Document not found"));
    }

    tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
    log::info!("Simulated delivery of {safe} for job {} to {recipient}", job.id);

    HttpResponse::Ok().json(SendDocumentResponse {
        sent: true,
        to: recipient,
        subject: format!("Insurance Documentation - Job {}", job.id),
    })
}

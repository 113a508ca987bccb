use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod db;
pub mod job;
pub mod pdf;
pub mod template;

pub use crate::db::AppState;

lazy_static! {
    /// Documents generated per template, exposed on /metrics.
    pub static ref DOCUMENTS_GENERATED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "moldtrack_documents_generated_total",
            "Number of documents generated, by template id"
        ),
        &["template"]
    )
    .expect("Failed to create documents_generated metric");
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Register every `/api` resource. Shared between `run` and the
/// integration tests so both exercise the same route table.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/jobs")
            .route(web::get().to(job::handlers::get_all_jobs))
            .route(web::post().to(job::handlers::create_job)),
    )
    .service(web::resource("/jobs/stats").route(web::get().to(job::handlers::get_job_stats)))
    .service(
        web::resource("/jobs/{id}")
            .route(web::get().to(job::handlers::get_job_by_id))
            .route(web::put().to(job::handlers::update_job))
            .route(web::delete().to(job::handlers::delete_job)),
    )
    .service(
        web::resource("/jobs/{id}/readings")
            .route(web::post().to(job::handlers::add_moisture_reading)),
    )
    .service(
        web::resource("/jobs/{id}/readings/{reading_id}")
            .route(web::delete().to(job::handlers::remove_moisture_reading)),
    )
    .service(
        web::resource("/jobs/{id}/samples").route(web::post().to(job::handlers::add_air_sample)),
    )
    .service(
        web::resource("/jobs/{id}/samples/{sample_id}")
            .route(web::delete().to(job::handlers::remove_air_sample)),
    )
    .service(web::resource("/jobs/{id}/photos").route(web::post().to(job::handlers::upload_photos)))
    .service(
        web::resource("/jobs/{id}/photos/{photo_id}")
            .route(web::delete().to(job::handlers::remove_photo)),
    )
    .service(
        web::resource("/jobs/{id}/generate")
            .route(web::post().to(job::handlers::generate_documents)),
    )
    .service(web::resource("/jobs/{id}/send").route(web::post().to(job::handlers::send_document)))
    .service(
        web::resource("/templates").route(web::get().to(template::handlers::get_all_templates)),
    )
    .service(
        web::resource("/templates/{id}")
            .route(web::get().to(template::handlers::get_template_by_id)),
    )
    .service(
        web::resource("/documents/{filename}")
            .route(web::get().to(job::handlers::serve_document)),
    );
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::job::handlers::get_all_jobs,
            crate::job::handlers::get_job_stats,
            crate::job::handlers::create_job,
            crate::job::handlers::get_job_by_id,
            crate::job::handlers::update_job,
            crate::job::handlers::delete_job,
            crate::job::handlers::add_moisture_reading,
            crate::job::handlers::remove_moisture_reading,
            crate::job::handlers::add_air_sample,
            crate::job::handlers::remove_air_sample,
            crate::job::handlers::upload_photos,
            crate::job::handlers::remove_photo,
            crate::job::handlers::generate_documents,
            crate::job::handlers::serve_document,
            crate::job::handlers::send_document,
            crate::template::handlers::get_all_templates,
            crate::template::handlers::get_template_by_id
        ),
        components(
            schemas(
                job::models::Job,
                job::models::JobStatus,
                job::models::Customer,
                job::models::Property,
                job::models::PropertyType,
                job::models::LossInfo,
                job::models::LossType,
                job::models::InspectionData,
                job::models::MoistureSource,
                job::models::VisibleMold,
                job::models::MoistureReading,
                job::models::SurfaceMaterial,
                job::models::AirSample,
                job::models::SampleType,
                job::models::Photo,
                job::models::PhotoCategory,
                job::models::WorkPerformed,
                job::models::Equipment,
                job::models::EquipmentType,
                job::models::InsuranceInfo,
                job::models::Adjuster,
                job::models::JobFile,
                job::models::JobFileType,
                job::models::CreateJobRequest,
                job::models::CreateMoistureReadingRequest,
                job::models::CreateAirSampleRequest,
                job::models::JobStats,
                job::handlers::GeneratePdfsRequest,
                job::handlers::SendDocumentRequest,
                job::handlers::SendDocumentResponse,
                template::models::PdfTemplate,
                template::models::PdfField,
                template::models::FieldKind,
                template::models::TemplateCategory,
                pdf::PdfGenerationResult,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Job Service", description = "Job record CRUD endpoints."),
            (name = "Inspection Service", description = "Moisture readings, air samples and photos."),
            (name = "Template Service", description = "Document template catalog."),
            (name = "Document Service", description = "Document generation, download and delivery.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost server")
        )
    )]
    struct ApiDoc;

    let templates = template::catalog::builtin_templates();
    for t in &templates {
        if let Err(e) = template::catalog::validate_template(t) {
            log::error!("Builtin template catalog is invalid: {e}");
            std::process::exit(1);
        }
    }

    let data_dir = db::data_dir_from_env();
    let app_state = match AppState::new(data_dir, templates).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialize application state. Please check MOLDTRACK_DATA_DIR and the jobs archive. Error: {e}");
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("moldtrack_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");
    prometheus
        .registry
        .register(Box::new(DOCUMENTS_GENERATED.clone()))
        .ok();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| String::from("0.0.0.0:8080"));
    let uploads_dir = app_state.uploads_dir();

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(api_config))
            .service(actix_files::Files::new("/uploads", uploads_dir.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_addr.as_str())?
    .run()
    .await
}

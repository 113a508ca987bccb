use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};

use crate::db::AppState;
use crate::template::models::PdfTemplate;
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Template Service",
    get,
    path = "/templates",
    responses(
        (status = 200, description = "List of all document templates", body = [PdfTemplate])
    )
)]
pub async fn get_all_templates(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&data.templates)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Template Service",
    get,
    path = "/templates/{id}",
    responses(
        (status = 200, description = "Template found", body = PdfTemplate),
        (status = 404, description = "Template not found", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "ID of the template to retrieve")
    )
)]
pub async fn get_template_by_id(id: Path<String>, data: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    match data.templates.iter().find(|t| t.id == id) {
        Some(template) => HttpResponse::Ok().json(template),
        None => HttpResponse::NotFound()
            .json(ErrorResponse::not_found(&format!("Template '{id}' not found"))),
    }
}

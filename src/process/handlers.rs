use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpResponse, Responder};
use log::{error, info, warn};
use utoipa::ToSchema;

use crate::config::Config;
use crate::process::models::HealthResponse;
use crate::process::multipart_parser::ProcessMultipartParser;
use crate::template;
use crate::ErrorResponse;

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Documentation-only shape of the multipart form.
#[derive(Debug, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessUploadRequest {
    /// The .pptx template file
    #[allow(unused)]
    #[schema(value_type = String, format = Binary)]
    pub template: String,
    /// Company name substituted for {{COMPANY_NAME}}
    #[allow(unused)]
    #[schema(example = "Acme Corp")]
    pub company_name: String,
    /// ISO-8601 date; rendered in ordinal form for {{DATE_LONG}}
    #[allow(unused)]
    #[schema(example = "2025-05-21")]
    pub date: String,
    /// Optional logo image stored into the deck's media area
    #[allow(unused)]
    #[schema(value_type = Option<String>, format = Binary)]
    pub logo: Option<String>,
}

#[utoipa::path(
    tag = "Template Service",
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        message: "PPTX Templater API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Template Service",
    post,
    path = "/process",
    request_body(content = inline(ProcessUploadRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Generated .pptx deck", content_type = "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Template processing failed", body = ErrorResponse)
    )
)]
pub async fn process_template(payload: Multipart, config: web::Data<Config>) -> impl Responder {
    let form = match ProcessMultipartParser::parse(payload, config.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => {
            error!("Failed to parse multipart payload: {}", e);
            return HttpResponse::from(e);
        }
    };

    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => {
            warn!("Rejected process request: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
    };

    info!(
        "Processing template for '{}' ({} bytes, logo: {})",
        request.company_name,
        request.template.len(),
        request.logo.is_some()
    );

    match template::generate(
        &request.template,
        &request.company_name,
        request.date,
        request.logo,
    )
    .await
    {
        Ok(deck) => {
            info!("Generated '{}' ({} bytes)", deck.filename, deck.bytes.len());
            HttpResponse::Ok()
                .content_type(PPTX_MIME)
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", deck.filename),
                ))
                .body(deck.bytes)
        }
        Err(e) => {
            error!("Template processing failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("Processing failed: {}", e)))
        }
    }
}

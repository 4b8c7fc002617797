use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{Formality, Language};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::documents::{ContentRenderer, FileRenderer};
use crate::salutation::{self, Channel};

#[derive(Debug, Deserialize)]
pub struct GenerateCvRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateCoverLetterRequest {
    pub language: Language,
    pub english_job: String,
    pub french_job: String,
    pub company: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_formality")]
    pub formality: Formality,
}

fn default_formality() -> Formality {
    Formality::Formal
}

fn attachment_response(path: PathBuf) -> ActixResult<HttpResponse> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document.pdf".to_string());
    let bytes =
        std::fs::read(&path).map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes))
}

/// Standalone CV generation, outside any queue run.
pub async fn generate_cv(
    config: web::Data<Arc<AppConfig>>,
    req: web::Json<GenerateCvRequest>,
) -> ActixResult<HttpResponse> {
    let role = req.into_inner().role;

    let path = web::block(move || {
        let renderer = FileRenderer::new(config.documents.clone());
        let content = ContentRenderer::new(&renderer, &config.documents);
        content.render_cv(&role)
    })
    .await
    .map_err(actix_web::error::ErrorInternalServerError)?
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    attachment_response(path)
}

/// Standalone cover letter generation. Picks the job title matching the
/// requested language, the same rule the pipeline applies.
pub async fn generate_cover_letter(
    config: web::Data<Arc<AppConfig>>,
    req: web::Json<GenerateCoverLetterRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    let path = web::block(move || {
        let job = match req.language {
            Language::English => req.english_job.clone(),
            Language::French => req.french_job.clone(),
        };
        let greeting = salutation::resolve(
            req.language,
            Channel::Letter,
            req.formality,
            &req.title,
            &req.first_name,
            &req.last_name,
        );

        let renderer = FileRenderer::new(config.documents.clone());
        let content = ContentRenderer::new(&renderer, &config.documents);
        content.render_cover_letter(req.language, &job, &req.company, &greeting)
    })
    .await
    .map_err(actix_web::error::ErrorInternalServerError)?
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    attachment_response(path)
}

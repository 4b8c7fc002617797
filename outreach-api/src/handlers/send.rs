use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{Contact, SendSelectedRequest, SendSummary};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::database::contacts as contacts_db;
use crate::database::Database;
use crate::documents::{ContentRenderer, FileRenderer};
use crate::mail::DesktopMailTransport;
use crate::pipeline::QueueRunner;

/// The queue blocks on converter shell-outs, client startup waits and pacing
/// sleeps, so runs go through `web::block` instead of tying up an executor
/// thread.
fn run_queue(
    db: &Database,
    config: &AppConfig,
    transport: &DesktopMailTransport,
    records: &[Contact],
) -> SendSummary {
    let renderer = FileRenderer::new(config.documents.clone());
    let content = ContentRenderer::new(&renderer, &config.documents);
    let runner = QueueRunner::new(
        db,
        &content,
        transport,
        Duration::from_secs(config.pipeline.send_delay_secs),
    );

    SendSummary::new(runner.run(records))
}

pub async fn send_all(
    db: web::Data<Arc<Database>>,
    config: web::Data<Arc<AppConfig>>,
    transport: web::Data<Arc<DesktopMailTransport>>,
) -> ActixResult<HttpResponse> {
    tracing::info!("Starting queue run over all contacts");

    let summary = web::block(move || -> anyhow::Result<SendSummary> {
        let records = contacts_db::list_contacts(&db)?;
        Ok(run_queue(&db, &config, &transport, &records))
    })
    .await
    .map_err(actix_web::error::ErrorInternalServerError)?
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    tracing::info!("Queue run attempted {} records", summary.attempted);
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn send_selected(
    db: web::Data<Arc<Database>>,
    config: web::Data<Arc<AppConfig>>,
    transport: web::Data<Arc<DesktopMailTransport>>,
    req: web::Json<SendSelectedRequest>,
) -> ActixResult<HttpResponse> {
    let ids = req.into_inner().ids;
    if ids.is_empty() {
        return Ok(HttpResponse::Ok().json(SendSummary::new(Vec::new())));
    }

    tracing::info!("Starting queue run over {} selected contacts", ids.len());

    let summary = web::block(move || -> anyhow::Result<SendSummary> {
        // Ids may be stale (record deleted since selection); drop those
        // instead of failing the batch.
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match contacts_db::get_contact(&db, id) {
                Ok(contact) => records.push(contact),
                Err(e) => tracing::warn!("Skipping selected contact {}: {}", id, e),
            }
        }
        Ok(run_queue(&db, &config, &transport, &records))
    })
    .await
    .map_err(actix_web::error::ErrorInternalServerError)?
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    tracing::info!("Selected run attempted {} records", summary.attempted);
    Ok(HttpResponse::Ok().json(summary))
}

use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{ContactsResponse, CreateContactRequest, ErrorResponse, UpdateContactRequest};
use std::sync::Arc;

use crate::database::contacts as contacts_db;
use crate::database::Database;

/// Intake guard: the pipeline re-checks these invariants, but a record should
/// never be stored incomplete in the first place.
fn validate_intake(req: &CreateContactRequest) -> Result<(), String> {
    if req.email.trim().is_empty() {
        return Err("email is required".to_string());
    }
    if req.company.trim().is_empty() {
        return Err("company is required".to_string());
    }
    if req.english_job.trim().is_empty() && req.french_job.trim().is_empty() {
        return Err("at least one job title is required".to_string());
    }
    Ok(())
}

pub async fn list_contacts(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let contacts = contacts_db::list_contacts(&db)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ContactsResponse { contacts }))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    let contact = contacts_db::get_contact(&db, contact_id)
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn create_contact(
    db: web::Data<Arc<Database>>,
    req: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(message) = validate_intake(&req) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse { error: message }));
    }

    let id = contacts_db::create_contact(&db, &req)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    let contact = contacts_db::get_contact(&db, id)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Created().json(contact))
}

pub async fn update_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
    req: web::Json<UpdateContactRequest>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    if let Err(message) = validate_intake(&req) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse { error: message }));
    }

    contacts_db::update_contact(&db, contact_id, &req)
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    let contact = contacts_db::get_contact(&db, contact_id)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    contacts_db::delete_contact(&db, contact_id)
        .map_err(|e| actix_web::error::ErrorNotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": contact_id })))
}

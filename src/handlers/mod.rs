pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod shifts;

use actix_web::{web, HttpResponse};

use crate::domain::errors::DomainError;
use crate::errors::AppError;

/// Run a repository-bound closure on actix's blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    let result = web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(result)
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

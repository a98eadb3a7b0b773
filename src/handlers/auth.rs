use actix_web::{web, HttpResponse};

use super::blocking;
use crate::application::AppState;
use crate::domain::model::Identity;
use crate::errors::AppError;
use crate::wire::{ErrorResponse, PinAuthRequest};

/// POST /auth/pin
///
/// Resolves a PIN to the employee's identity and opens their shift if none
/// is running.
#[utoipa::path(
    post,
    path = "/auth/pin",
    request_body = PinAuthRequest,
    responses(
        (status = 200, description = "Authenticated", body = Identity),
        (status = 400, description = "Blank PIN", body = ErrorResponse),
        (status = 401, description = "Unknown or inactive PIN", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<PinAuthRequest>,
) -> Result<HttpResponse, AppError> {
    let PinAuthRequest { pin } = body.into_inner();
    let identity = blocking(move || state.auth.login(&pin)).await?;
    Ok(HttpResponse::Ok().json(identity))
}

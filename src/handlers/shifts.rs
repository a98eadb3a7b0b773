use actix_web::{web, HttpResponse};

use super::blocking;
use crate::application::AppState;
use crate::errors::AppError;
use crate::wire::{EmployeeQuery, ErrorResponse, ShiftSummaryResponse};

/// POST /shifts/end?employee_id=
///
/// Closes the running shift and posts its summary to the report channel.
/// A failed delivery is logged; the shift stays closed either way.
#[utoipa::path(
    post,
    path = "/shifts/end",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Shift closed", body = ShiftSummaryResponse),
        (status = 404, description = "Employee or active shift not found", body = ErrorResponse),
    ),
    tag = "shifts"
)]
pub async fn end_shift(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let employee_id = query.into_inner().employee_id;
    let shifts = state.shifts.clone();
    let summary = blocking(move || shifts.end(employee_id)).await?;

    if let Err(e) = state.notifier.deliver(&summary.to_message()).await {
        log::error!("Shift summary for employee {employee_id} was not delivered: {e}");
    }

    Ok(HttpResponse::Ok().json(ShiftSummaryResponse::from(&summary)))
}

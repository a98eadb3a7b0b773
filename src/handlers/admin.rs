use actix_web::{web, HttpResponse};

use super::blocking;
use crate::application::AppState;
use crate::errors::AppError;
use crate::wire::{
    DailyReportResponse, EmployeeDayResponse, EmployeeDetailQuery, EmployeeQuery, ErrorResponse,
    StatusResponse,
};

/// GET /admin/report/today?employee_id=
///
/// Per-employee takings for the current local day. Read-only, safe to poll.
#[utoipa::path(
    get,
    path = "/admin/report/today",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Today's report", body = DailyReportResponse),
        (status = 403, description = "Requester is not an admin", body = ErrorResponse),
        (status = 404, description = "Requester not found", body = ErrorResponse),
    ),
    tag = "admin"
)]
pub async fn report_today(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let admin_id = query.into_inner().employee_id;
    let report = blocking(move || state.reports.today(admin_id)).await?;
    Ok(HttpResponse::Ok().json(DailyReportResponse::from(report)))
}

/// GET /admin/employee/today?employee_id=&target_employee_id=
#[utoipa::path(
    get,
    path = "/admin/employee/today",
    params(EmployeeDetailQuery),
    responses(
        (status = 200, description = "One employee's orders today", body = EmployeeDayResponse),
        (status = 403, description = "Requester is not an admin", body = ErrorResponse),
        (status = 404, description = "Requester or target not found", body = ErrorResponse),
    ),
    tag = "admin"
)]
pub async fn employee_today(
    state: web::Data<AppState>,
    query: web::Query<EmployeeDetailQuery>,
) -> Result<HttpResponse, AppError> {
    let EmployeeDetailQuery {
        employee_id,
        target_employee_id,
    } = query.into_inner();
    let day = blocking(move || state.reports.employee_today(employee_id, target_employee_id)).await?;
    Ok(HttpResponse::Ok().json(EmployeeDayResponse::from(day)))
}

/// POST /admin/report/today/send?employee_id=
///
/// Renders today's report and hands it to the report channel. Success means
/// the channel accepted the message, not that anyone read it.
#[utoipa::path(
    post,
    path = "/admin/report/today/send",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Report sent", body = StatusResponse),
        (status = 403, description = "Requester is not an admin", body = ErrorResponse),
        (status = 502, description = "Report channel rejected the message", body = ErrorResponse),
    ),
    tag = "admin"
)]
pub async fn send_report(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let admin_id = query.into_inner().employee_id;
    let reports = state.reports.clone();
    let report = blocking(move || reports.today(admin_id)).await?;

    state.notifier.deliver(&report.to_message()).await?;
    log::info!("Admin {admin_id} sent today's report");
    Ok(HttpResponse::Ok().json(StatusResponse::new("sent")))
}

use actix_web::{web, HttpResponse};

use super::blocking;
use crate::application::AppState;
use crate::domain::model::{NewEmployee, NewService};
use crate::errors::AppError;
use crate::wire::{
    CreateEmployeeRequest, CreateServiceRequest, CreatedResponse, EmployeeResponse,
    ErrorResponse, ServiceResponse, StatusResponse,
};

// ── Employees ────────────────────────────────────────────────────────────────

/// POST /employees
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = CreatedResponse),
        (status = 400, description = "Blank name or PIN", body = ErrorResponse),
        (status = 409, description = "PIN already in use", body = ErrorResponse),
    ),
    tag = "employees"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    body: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = blocking(move || {
        state.catalog.create_employee(NewEmployee {
            name: body.name,
            pin: body.pin,
            role: body.role,
            branch_id: body.branch_id,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /employees
#[utoipa::path(
    get,
    path = "/employees",
    responses((status = 200, description = "All employees", body = [EmployeeResponse])),
    tag = "employees"
)]
pub async fn list_employees(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let employees = blocking(move || state.catalog.list_employees()).await?;
    let body: Vec<EmployeeResponse> = employees.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /employees/{id}
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = StatusResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 409, description = "Employee has orders", body = ErrorResponse),
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.catalog.delete_employee(id)).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::new("deleted")))
}

// ── Services ─────────────────────────────────────────────────────────────────

/// POST /services
#[utoipa::path(
    post,
    path = "/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = CreatedResponse),
        (status = 400, description = "Blank name or negative price", body = ErrorResponse),
    ),
    tag = "services"
)]
pub async fn create_service(
    state: web::Data<AppState>,
    body: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = blocking(move || {
        state.catalog.create_service(NewService {
            name: body.name,
            price: body.price,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /services
#[utoipa::path(
    get,
    path = "/services",
    responses((status = 200, description = "Service catalog", body = [ServiceResponse])),
    tag = "services"
)]
pub async fn list_services(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let services = blocking(move || state.catalog.list_services()).await?;
    let body: Vec<ServiceResponse> = services.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

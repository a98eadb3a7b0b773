use actix_web::{web, HttpResponse};
use chrono::Utc;

use super::blocking;
use crate::application::AppState;
use crate::domain::order::{OrderRequest, PaymentType};
use crate::errors::AppError;
use crate::wire::{
    CompleteOrderRequest, EmployeeQuery, ErrorResponse, InProgressOrder, NotProvidedRequest,
    StartOrderRequest, StartOrderResponse, StatusResponse,
};

/// POST /orders/start
///
/// Starts one order covering every listed service. There is no idempotency
/// key: each successful call creates a new order.
#[utoipa::path(
    post,
    path = "/orders/start",
    request_body = StartOrderRequest,
    responses(
        (status = 201, description = "Order started", body = StartOrderResponse),
        (status = 400, description = "Missing services or client details", body = ErrorResponse),
        (status = 409, description = "Employee has no active shift", body = ErrorResponse),
        (status = 422, description = "Unknown service or employee", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn start_order(
    state: web::Data<AppState>,
    body: web::Json<StartOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order_id = blocking(move || {
        state.orders.start(OrderRequest {
            employee_id: body.employee_id,
            branch_id: body.branch_id,
            service_ids: body.service_ids,
            client_name: body.client_name,
            client_phone: body.client_phone,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(StartOrderResponse { order_id }))
}

/// GET /orders/in-progress?employee_id=
///
/// The employee's open orders, oldest first, with elapsed minutes computed
/// at request time.
#[utoipa::path(
    get,
    path = "/orders/in-progress",
    params(EmployeeQuery),
    responses((status = 200, description = "Open orders", body = [InProgressOrder])),
    tag = "orders"
)]
pub async fn in_progress(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let employee_id = query.into_inner().employee_id;
    let orders = blocking(move || state.orders.in_progress(employee_id)).await?;
    let now = Utc::now();
    let body: Vec<InProgressOrder> = orders
        .into_iter()
        .map(|o| InProgressOrder::from_order(o, now))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /orders/{id}/complete
#[utoipa::path(
    post,
    path = "/orders/{id}/complete",
    params(("id" = i32, Path, description = "Order id")),
    request_body = CompleteOrderRequest,
    responses(
        (status = 200, description = "Order completed", body = StatusResponse),
        (status = 400, description = "Unknown payment type", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order already completed or failed", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn complete_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CompleteOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let payment: PaymentType = body.payment_type.parse()?;
    blocking(move || state.orders.complete(order_id, payment)).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::new("completed")))
}

/// POST /orders/{id}/not-provided
#[utoipa::path(
    post,
    path = "/orders/{id}/not-provided",
    params(("id" = i32, Path, description = "Order id")),
    request_body = NotProvidedRequest,
    responses(
        (status = 200, description = "Order marked as not provided", body = StatusResponse),
        (status = 400, description = "Blank reason", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order already completed or failed", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn not_provided(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<NotProvidedRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let NotProvidedRequest { reason } = body.into_inner();
    blocking(move || state.orders.fail(order_id, &reason)).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::new("not_provided")))
}

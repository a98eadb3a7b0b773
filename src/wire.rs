//! JSON bodies exchanged between the HTTP surface and the client adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::EmployeeDay;
use crate::domain::model::{Employee, Role, Service};
use crate::domain::order::{Order, OrderStatus, PaymentType};
use crate::domain::report::{DailyReport, ShiftSummary};

// ── Auth ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PinAuthRequest {
    pub pin: String,
}

// ── Employees & catalog ──────────────────────────────────────────────────────

fn default_role() -> Role {
    Role::Employee
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub branch_id: i32,
    pub pin: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            role: e.role,
            is_active: e.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub name: String,
    /// Whole tenge.
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: i32,
    pub name: String,
    pub price: i32,
}

impl From<Service> for ServiceResponse {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            price: s.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartOrderRequest {
    pub service_ids: Vec<i32>,
    pub branch_id: i32,
    pub employee_id: i32,
    pub client_name: String,
    pub client_phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartOrderResponse {
    pub order_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InProgressOrder {
    pub order_id: i32,
    pub services: Vec<String>,
    /// Service names joined for single-line display.
    pub service: String,
    pub client_name: String,
    pub client_phone: String,
    pub total: i64,
    pub minutes_in_progress: i64,
}

impl InProgressOrder {
    pub fn from_order(order: Order, now: DateTime<Utc>) -> Self {
        let services = order.service_names();
        Self {
            order_id: order.id,
            service: services.join(", "),
            total: order.total(),
            minutes_in_progress: order.minutes_in_progress(now),
            services,
            client_name: order.client_name,
            client_phone: order.client_phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompleteOrderRequest {
    /// `CASH` or `QR`, case-insensitive.
    pub payment_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotProvidedRequest {
    pub reason: String,
}

// ── Query strings ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    pub employee_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeDetailQuery {
    /// The requesting admin.
    pub employee_id: i32,
    pub target_employee_id: i32,
}

// ── Shifts & reports ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShiftSummaryResponse {
    pub employee: String,
    pub shift_id: i32,
    pub total_orders: i64,
    pub total_amount: i64,
    pub cash: i64,
    pub qr: i64,
    pub not_provided: i64,
}

impl From<&ShiftSummary> for ShiftSummaryResponse {
    fn from(s: &ShiftSummary) -> Self {
        Self {
            employee: s.employee.clone(),
            shift_id: s.shift_id,
            total_orders: s.takings.orders,
            total_amount: s.takings.total,
            cash: s.takings.cash,
            qr: s.takings.qr,
            not_provided: s.not_provided,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportRow {
    pub employee_id: i32,
    pub employee: String,
    pub orders: i64,
    pub total: i64,
    pub cash: i64,
    pub qr: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyReportResponse {
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub employees: Vec<ReportRow>,
    pub total_all: i64,
    pub cash_all: i64,
    pub qr_all: i64,
}

impl From<DailyReport> for DailyReportResponse {
    fn from(r: DailyReport) -> Self {
        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            employees: r
                .rows
                .into_iter()
                .map(|row| ReportRow {
                    employee_id: row.employee_id,
                    employee: row.employee,
                    orders: row.takings.orders,
                    total: row.takings.total,
                    cash: row.takings.cash,
                    qr: row.takings.qr,
                })
                .collect(),
            total_all: r.all.total,
            cash_all: r.all.cash,
            qr_all: r.all.qr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeOrder {
    pub order_id: i32,
    pub service: String,
    pub price: i64,
    pub status: OrderStatus,
    pub payment_type: Option<PaymentType>,
    pub client_name: String,
    pub failure_reason: Option<String>,
}

impl From<Order> for EmployeeOrder {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.id,
            service: o.service_names().join(", "),
            price: o.total(),
            status: o.status,
            payment_type: o.payment_type,
            client_name: o.client_name,
            failure_reason: o.failure_reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDayResponse {
    pub employee: String,
    pub orders: Vec<EmployeeOrder>,
    pub total: i64,
    pub cash: i64,
    pub qr: i64,
}

impl From<EmployeeDay> for EmployeeDayResponse {
    fn from(d: EmployeeDay) -> Self {
        Self {
            employee: d.employee.name,
            orders: d.orders.into_iter().map(EmployeeOrder::from).collect(),
            total: d.takings.total,
            cash: d.takings.cash,
            qr: d.takings.qr,
        }
    }
}

/// Error body; the server always sets `error`, but clients treat it as optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

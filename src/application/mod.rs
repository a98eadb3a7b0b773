pub mod auth_service;
pub mod catalog_service;
pub mod order_service;
pub mod report_service;
pub mod shift_service;

use std::sync::Arc;

use crate::domain::ports::{
    EmployeeRepository, OrderRepository, ReportNotifier, ServiceRepository, ShiftRepository,
};

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use report_service::{EmployeeDay, ReportService};
pub use shift_service::ShiftService;

/// Everything a request handler needs, shared across actix workers.
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub shifts: ShiftService,
    pub reports: ReportService,
    pub notifier: Arc<dyn ReportNotifier>,
}

impl AppState {
    /// Wire every service against one store implementing all repositories.
    pub fn new<S>(store: Arc<S>, notifier: Arc<dyn ReportNotifier>, utc_offset_hours: i32) -> Self
    where
        S: EmployeeRepository + ServiceRepository + ShiftRepository + OrderRepository,
    {
        let employees: Arc<dyn EmployeeRepository> = store.clone();
        let services: Arc<dyn ServiceRepository> = store.clone();
        let shifts: Arc<dyn ShiftRepository> = store.clone();
        let orders: Arc<dyn OrderRepository> = store;

        let auth = AuthService::new(employees.clone(), shifts.clone());
        Self {
            catalog: CatalogService::new(employees.clone(), services.clone(), orders.clone()),
            orders: OrderService::new(employees.clone(), services, shifts.clone(), orders.clone()),
            shifts: ShiftService::new(employees.clone(), shifts, orders.clone()),
            reports: ReportService::new(auth.clone(), employees, orders, utc_offset_hours),
            auth,
            notifier,
        }
    }
}

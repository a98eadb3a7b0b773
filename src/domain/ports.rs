use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::model::{Employee, NewEmployee, NewService, Service, Shift};
use super::order::{NewOrder, Order, OrderClosure};
use super::report::Window;

pub trait EmployeeRepository: Send + Sync + 'static {
    fn create(&self, employee: NewEmployee) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError>;
    fn find_active_by_pin(&self, pin: &str) -> Result<Option<Employee>, DomainError>;
    /// All employees ordered by id.
    fn list(&self) -> Result<Vec<Employee>, DomainError>;
    /// Returns `false` when no such employee exists.
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

pub trait ServiceRepository: Send + Sync + 'static {
    fn create(&self, service: NewService) -> Result<i32, DomainError>;
    /// All services ordered by id.
    fn list(&self) -> Result<Vec<Service>, DomainError>;
    /// Only the ids that exist are returned.
    fn find_many(&self, ids: &[i32]) -> Result<Vec<Service>, DomainError>;
}

pub trait ShiftRepository: Send + Sync + 'static {
    fn find_active(&self, employee_id: i32) -> Result<Option<Shift>, DomainError>;
    fn open(&self, employee_id: i32, at: DateTime<Utc>) -> Result<Shift, DomainError>;
    fn close(&self, shift_id: i32, at: DateTime<Utc>) -> Result<Shift, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: NewOrder) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;
    /// In-progress orders of one employee, oldest first.
    fn list_in_progress(&self, employee_id: i32) -> Result<Vec<Order>, DomainError>;
    /// Orders created or closed inside `window`, optionally for one employee.
    fn list_touched(&self, employee_id: Option<i32>, window: &Window)
        -> Result<Vec<Order>, DomainError>;
    fn has_orders(&self, employee_id: i32) -> Result<bool, DomainError>;
    /// Atomically moves an `IN_PROGRESS` order to a terminal state.
    ///
    /// Fails with `NotFound` for unknown ids and `Conflict` when the order is
    /// already terminal.
    fn close(&self, id: i32, closure: &OrderClosure, at: DateTime<Utc>) -> Result<(), DomainError>;
}

/// Out-of-band delivery of report text (a chat channel).
#[async_trait]
pub trait ReportNotifier: Send + Sync + 'static {
    async fn deliver(&self, text: &str) -> Result<(), DomainError>;
}

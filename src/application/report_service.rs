use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::auth_service::AuthService;
use crate::domain::errors::DomainError;
use crate::domain::model::Employee;
use crate::domain::order::Order;
use crate::domain::ports::{EmployeeRepository, OrderRepository};
use crate::domain::report::{DailyReport, LocalDay, Takings};

/// One employee's day, for the admin drill-down.
#[derive(Debug, Clone)]
pub struct EmployeeDay {
    pub employee: Employee,
    pub orders: Vec<Order>,
    pub takings: Takings,
}

#[derive(Clone)]
pub struct ReportService {
    auth: AuthService,
    employees: Arc<dyn EmployeeRepository>,
    orders: Arc<dyn OrderRepository>,
    utc_offset_hours: i32,
}

impl ReportService {
    pub fn new(
        auth: AuthService,
        employees: Arc<dyn EmployeeRepository>,
        orders: Arc<dyn OrderRepository>,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            auth,
            employees,
            orders,
            utc_offset_hours,
        }
    }

    pub fn today(&self, admin_id: i32) -> Result<DailyReport, DomainError> {
        self.report_at(admin_id, Utc::now())
    }

    pub fn report_at(&self, admin_id: i32, now: DateTime<Utc>) -> Result<DailyReport, DomainError> {
        self.auth.require_admin(admin_id)?;
        let day = LocalDay::containing(now, self.utc_offset_hours)?;
        let employees = self.employees.list()?;
        let orders = self.orders.list_touched(None, &day.window)?;
        Ok(DailyReport::build(&day, &employees, &orders))
    }

    pub fn employee_today(&self, admin_id: i32, target_id: i32) -> Result<EmployeeDay, DomainError> {
        self.employee_day_at(admin_id, target_id, Utc::now())
    }

    pub fn employee_day_at(
        &self,
        admin_id: i32,
        target_id: i32,
        now: DateTime<Utc>,
    ) -> Result<EmployeeDay, DomainError> {
        self.auth.require_admin(admin_id)?;
        let employee = self
            .employees
            .find_by_id(target_id)?
            .ok_or(DomainError::NotFound("Employee"))?;
        let day = LocalDay::containing(now, self.utc_offset_hours)?;
        let orders = self.orders.list_touched(Some(target_id), &day.window)?;
        let takings = Takings::of(&orders, &day.window);
        Ok(EmployeeDay {
            employee,
            orders,
            takings,
        })
    }
}

use chrono::Utc;
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::model::{Employee, Identity};
use crate::domain::ports::{EmployeeRepository, ShiftRepository};

#[derive(Clone)]
pub struct AuthService {
    employees: Arc<dyn EmployeeRepository>,
    shifts: Arc<dyn ShiftRepository>,
}

impl AuthService {
    pub fn new(employees: Arc<dyn EmployeeRepository>, shifts: Arc<dyn ShiftRepository>) -> Self {
        Self { employees, shifts }
    }

    /// Resolve a PIN to an identity. Signing in opens the employee's shift
    /// unless one is already running.
    pub fn login(&self, pin: &str) -> Result<Identity, DomainError> {
        let pin = pin.trim();
        if pin.is_empty() {
            return Err(DomainError::InvalidInput("pin must not be blank".into()));
        }

        let Some(employee) = self.employees.find_active_by_pin(pin)? else {
            log::warn!("PIN login rejected");
            return Err(DomainError::InvalidPin);
        };

        if self.shifts.find_active(employee.id)?.is_none() {
            match self.shifts.open(employee.id, Utc::now()) {
                Ok(shift) => log::info!("Opened shift {} for employee {}", shift.id, employee.id),
                // A concurrent login opened it first.
                Err(DomainError::Conflict(_)) => {
                    log::info!("Shift for employee {} already running", employee.id)
                }
                Err(e) => return Err(e),
            }
        }

        Ok(employee.identity())
    }

    pub fn require_admin(&self, employee_id: i32) -> Result<Employee, DomainError> {
        let employee = self
            .employees
            .find_by_id(employee_id)?
            .ok_or(DomainError::NotFound("Employee"))?;
        if !employee.is_admin() {
            log::warn!("Employee {employee_id} denied admin access");
            return Err(DomainError::Forbidden);
        }
        Ok(employee)
    }
}

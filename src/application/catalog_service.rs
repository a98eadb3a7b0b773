use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::model::{Employee, NewEmployee, NewService, Service};
use crate::domain::ports::{EmployeeRepository, OrderRepository, ServiceRepository};

/// Staff roster and the service price list.
#[derive(Clone)]
pub struct CatalogService {
    employees: Arc<dyn EmployeeRepository>,
    services: Arc<dyn ServiceRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl CatalogService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        services: Arc<dyn ServiceRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            employees,
            services,
            orders,
        }
    }

    pub fn create_employee(&self, employee: NewEmployee) -> Result<i32, DomainError> {
        employee.validate()?;
        let id = self.employees.create(employee)?;
        log::info!("Created employee {id}");
        Ok(id)
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, DomainError> {
        self.employees.list()
    }

    /// Employees with order history cannot be removed.
    pub fn delete_employee(&self, id: i32) -> Result<(), DomainError> {
        if self.employees.find_by_id(id)?.is_none() {
            return Err(DomainError::NotFound("Employee"));
        }
        if self.orders.has_orders(id)? {
            return Err(DomainError::Conflict(
                "Cannot delete employee with existing orders".into(),
            ));
        }
        if !self.employees.delete(id)? {
            return Err(DomainError::NotFound("Employee"));
        }
        log::info!("Deleted employee {id}");
        Ok(())
    }

    pub fn create_service(&self, service: NewService) -> Result<i32, DomainError> {
        service.validate()?;
        self.services.create(service)
    }

    pub fn list_services(&self) -> Result<Vec<Service>, DomainError> {
        self.services.list()
    }
}

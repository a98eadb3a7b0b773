//! Process-local store used by tests and for running without a database.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use crate::domain::errors::DomainError;
use crate::domain::model::{Employee, NewEmployee, NewService, Service, Shift};
use crate::domain::order::{NewOrder, Order, OrderClosure, OrderStatus};
use crate::domain::ports::{
    EmployeeRepository, OrderRepository, ServiceRepository, ShiftRepository,
};
use crate::domain::report::Window;

#[derive(Default)]
struct Tables {
    next_id: i32,
    employees: Vec<Employee>,
    services: Vec<Service>,
    shifts: Vec<Shift>,
    orders: Vec<Order>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|e| DomainError::Internal(format!("store lock poisoned: {e}")))
    }
}

impl EmployeeRepository for InMemoryStore {
    fn create(&self, employee: NewEmployee) -> Result<i32, DomainError> {
        let mut t = self.lock()?;
        if t.employees.iter().any(|e| e.pin == employee.pin) {
            return Err(DomainError::Conflict("PIN is already in use".into()));
        }
        let id = t.next_id();
        t.employees.push(Employee {
            id,
            name: employee.name,
            pin: employee.pin,
            role: employee.role,
            branch_id: employee.branch_id,
            is_active: true,
        });
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError> {
        Ok(self.lock()?.employees.iter().find(|e| e.id == id).cloned())
    }

    fn find_active_by_pin(&self, pin: &str) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .lock()?
            .employees
            .iter()
            .find(|e| e.pin == pin && e.is_active)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.lock()?.employees.clone())
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut t = self.lock()?;
        let before = t.employees.len();
        t.employees.retain(|e| e.id != id);
        let removed = t.employees.len() != before;
        if removed {
            t.shifts.retain(|s| s.employee_id != id);
        }
        Ok(removed)
    }
}

impl ServiceRepository for InMemoryStore {
    fn create(&self, service: NewService) -> Result<i32, DomainError> {
        let mut t = self.lock()?;
        let id = t.next_id();
        t.services.push(Service {
            id,
            name: service.name,
            price: service.price,
        });
        Ok(id)
    }

    fn list(&self) -> Result<Vec<Service>, DomainError> {
        Ok(self.lock()?.services.clone())
    }

    fn find_many(&self, ids: &[i32]) -> Result<Vec<Service>, DomainError> {
        Ok(self
            .lock()?
            .services
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }
}

impl ShiftRepository for InMemoryStore {
    fn find_active(&self, employee_id: i32) -> Result<Option<Shift>, DomainError> {
        Ok(self
            .lock()?
            .shifts
            .iter()
            .find(|s| s.employee_id == employee_id && s.is_active)
            .cloned())
    }

    fn open(&self, employee_id: i32, at: DateTime<Utc>) -> Result<Shift, DomainError> {
        let mut t = self.lock()?;
        if t.shifts.iter().any(|s| s.employee_id == employee_id && s.is_active) {
            return Err(DomainError::Conflict("Shift already open".into()));
        }
        let shift = Shift {
            id: t.next_id(),
            employee_id,
            started_at: at,
            ended_at: None,
            is_active: true,
        };
        t.shifts.push(shift.clone());
        Ok(shift)
    }

    fn close(&self, shift_id: i32, at: DateTime<Utc>) -> Result<Shift, DomainError> {
        let mut t = self.lock()?;
        let shift = t
            .shifts
            .iter_mut()
            .find(|s| s.id == shift_id && s.is_active)
            .ok_or(DomainError::NotFound("Active shift"))?;
        shift.is_active = false;
        shift.ended_at = Some(at);
        Ok(shift.clone())
    }
}

impl OrderRepository for InMemoryStore {
    fn create(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut t = self.lock()?;
        let id = t.next_id();
        t.orders.push(Order {
            id,
            employee_id: order.employee_id,
            branch_id: order.branch_id,
            client_name: order.client_name,
            client_phone: order.client_phone,
            status: OrderStatus::InProgress,
            payment_type: None,
            failure_reason: None,
            created_at: order.created_at,
            closed_at: None,
            lines: order.lines,
        });
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        Ok(self.lock()?.orders.iter().find(|o| o.id == id).cloned())
    }

    fn list_in_progress(&self, employee_id: i32) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self
            .lock()?
            .orders
            .iter()
            .filter(|o| o.employee_id == employee_id && o.status == OrderStatus::InProgress)
            .cloned()
            .collect();
        orders.sort_by_key(|o| (o.created_at, o.id));
        Ok(orders)
    }

    fn list_touched(
        &self,
        employee_id: Option<i32>,
        window: &Window,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .lock()?
            .orders
            .iter()
            .filter(|o| employee_id.map_or(true, |id| o.employee_id == id))
            .filter(|o| {
                window.contains(o.created_at) || o.closed_at.is_some_and(|at| window.contains(at))
            })
            .cloned()
            .collect())
    }

    fn has_orders(&self, employee_id: i32) -> Result<bool, DomainError> {
        Ok(self.lock()?.orders.iter().any(|o| o.employee_id == employee_id))
    }

    fn close(&self, id: i32, closure: &OrderClosure, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut t = self.lock()?;
        let order = t
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.close(closure, at)
    }
}

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::{EmployeeRepository, OrderRepository, ShiftRepository};
use crate::domain::report::{ShiftSummary, Window};

#[derive(Clone)]
pub struct ShiftService {
    employees: Arc<dyn EmployeeRepository>,
    shifts: Arc<dyn ShiftRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl ShiftService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        shifts: Arc<dyn ShiftRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            employees,
            shifts,
            orders,
        }
    }

    /// Close the running shift and summarise what was taken during it.
    pub fn end(&self, employee_id: i32) -> Result<ShiftSummary, DomainError> {
        let employee = self
            .employees
            .find_by_id(employee_id)?
            .ok_or(DomainError::NotFound("Employee"))?;
        let active = self
            .shifts
            .find_active(employee_id)?
            .ok_or(DomainError::NotFound("Active shift"))?;

        let closed = self.shifts.close(active.id, Utc::now())?;
        let ended_at = closed.ended_at.unwrap_or_else(Utc::now);
        // Inclusive of anything closed in the same instant as the shift.
        let window = Window {
            start: closed.started_at,
            end: ended_at + Duration::milliseconds(1),
        };
        let orders = self.orders.list_touched(Some(employee_id), &window)?;
        let summary = ShiftSummary::build(closed.id, &employee.name, &window, &orders);

        log::info!(
            "Closed shift {} for employee {employee_id}: {} orders, {} total",
            closed.id,
            summary.takings.orders,
            summary.takings.total
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewEmployee, Role};
    use crate::domain::order::{NewOrder, OrderClosure, OrderLine, PaymentType};
    use crate::infrastructure::memory::InMemoryStore;

    fn setup() -> (Arc<InMemoryStore>, ShiftService, i32) {
        let store = Arc::new(InMemoryStore::new());
        let employee = EmployeeRepository::create(
            store.as_ref(),
            NewEmployee {
                name: "Anna".into(),
                pin: "1234".into(),
                role: Role::Employee,
                branch_id: 1,
            },
        )
        .unwrap();
        let service = ShiftService::new(store.clone(), store.clone(), store.clone());
        (store, service, employee)
    }

    fn place(store: &InMemoryStore, employee_id: i32, price: i32) -> i32 {
        OrderRepository::create(
            store,
            NewOrder {
                employee_id,
                branch_id: 1,
                client_name: "c".into(),
                client_phone: "p".into(),
                created_at: Utc::now(),
                lines: vec![OrderLine {
                    service_id: 1,
                    service_name: "Haircut".into(),
                    price,
                }],
            },
        )
        .unwrap()
    }

    #[test]
    fn end_without_active_shift_is_not_found() {
        let (_, shifts, employee) = setup();
        assert!(matches!(shifts.end(employee), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn end_summarises_orders_closed_during_the_shift() {
        let (store, shifts, employee) = setup();
        store
            .open(employee, Utc::now() - Duration::minutes(1))
            .unwrap();

        let paid = place(&store, employee, 2000);
        let failed = place(&store, employee, 500);
        place(&store, employee, 700);
        OrderRepository::close(
            store.as_ref(),
            paid,
            &OrderClosure::Completed(PaymentType::Cash),
            Utc::now(),
        )
        .unwrap();
        OrderRepository::close(
            store.as_ref(),
            failed,
            &OrderClosure::Failed("no show".into()),
            Utc::now(),
        )
        .unwrap();

        let summary = shifts.end(employee).unwrap();
        assert_eq!(summary.employee, "Anna");
        assert_eq!(summary.takings.orders, 1);
        assert_eq!(summary.takings.cash, 2000);
        assert_eq!(summary.not_provided, 1);
        assert!(store.find_active(employee).unwrap().is_none());
    }
}

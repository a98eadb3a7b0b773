use chrono::Utc;
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderClosure, OrderLine, OrderRequest, PaymentType};
use crate::domain::ports::{
    EmployeeRepository, OrderRepository, ServiceRepository, ShiftRepository,
};

#[derive(Clone)]
pub struct OrderService {
    employees: Arc<dyn EmployeeRepository>,
    services: Arc<dyn ServiceRepository>,
    shifts: Arc<dyn ShiftRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        services: Arc<dyn ServiceRepository>,
        shifts: Arc<dyn ShiftRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            employees,
            services,
            shifts,
            orders,
        }
    }

    /// Start a multi-service order for a client. The employee must be active
    /// and on shift; every service id must exist.
    pub fn start(&self, request: OrderRequest) -> Result<i32, DomainError> {
        let request = request.normalized()?;

        let employee = self.employees.find_by_id(request.employee_id)?;
        let found = self.services.find_many(&request.service_ids)?;
        if !employee.is_some_and(|e| e.is_active) || found.len() != request.service_ids.len() {
            return Err(DomainError::Unprocessable(
                "Invalid service or employee".into(),
            ));
        }

        if self.shifts.find_active(request.employee_id)?.is_none() {
            return Err(DomainError::Conflict("No active shift".into()));
        }

        // Keep lines in the order the services were picked.
        let lines = request
            .service_ids
            .iter()
            .filter_map(|id| found.iter().find(|s| s.id == *id))
            .map(|s| OrderLine {
                service_id: s.id,
                service_name: s.name.clone(),
                price: s.price,
            })
            .collect();

        let id = self.orders.create(NewOrder {
            employee_id: request.employee_id,
            branch_id: request.branch_id,
            client_name: request.client_name,
            client_phone: request.client_phone,
            created_at: Utc::now(),
            lines,
        })?;
        log::info!("Order {id} started by employee {}", request.employee_id);
        Ok(id)
    }

    pub fn in_progress(&self, employee_id: i32) -> Result<Vec<Order>, DomainError> {
        self.orders.list_in_progress(employee_id)
    }

    pub fn complete(&self, order_id: i32, payment: PaymentType) -> Result<(), DomainError> {
        self.orders
            .close(order_id, &OrderClosure::Completed(payment), Utc::now())?;
        log::info!("Order {order_id} completed ({payment})");
        Ok(())
    }

    pub fn fail(&self, order_id: i32, reason: &str) -> Result<(), DomainError> {
        let closure = OrderClosure::failed(reason)?;
        self.orders.close(order_id, &closure, Utc::now())?;
        log::info!("Order {order_id} marked as not provided");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NewEmployee, NewService, Role};
    use crate::domain::order::OrderStatus;
    use crate::infrastructure::memory::InMemoryStore;

    struct Fixture {
        store: Arc<InMemoryStore>,
        orders: OrderService,
        employee: i32,
        haircut: i32,
        wash: i32,
    }

    fn fixture() -> Fixture {
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
        let haircut = ServiceRepository::create(
            store.as_ref(),
            NewService {
                name: "Haircut".into(),
                price: 2000,
            },
        )
        .unwrap();
        let wash = ServiceRepository::create(
            store.as_ref(),
            NewService {
                name: "Wash".into(),
                price: 500,
            },
        )
        .unwrap();
        store.open(employee, Utc::now()).unwrap();
        let orders = OrderService::new(store.clone(), store.clone(), store.clone(), store.clone());
        Fixture {
            store,
            orders,
            employee,
            haircut,
            wash,
        }
    }

    fn request(f: &Fixture, ids: Vec<i32>) -> OrderRequest {
        OrderRequest {
            employee_id: f.employee,
            branch_id: 1,
            service_ids: ids,
            client_name: "Dana".into(),
            client_phone: "+7 700".into(),
        }
    }

    #[test]
    fn start_snapshots_lines_in_pick_order() {
        let f = fixture();
        let id = f.orders.start(request(&f, vec![f.wash, f.haircut])).unwrap();

        let order = OrderRepository::find_by_id(f.store.as_ref(), id).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.service_names(), vec!["Wash", "Haircut"]);
        assert_eq!(order.total(), 2500);
        assert_eq!(f.orders.in_progress(f.employee).unwrap().len(), 1);
    }

    #[test]
    fn start_rejects_unknown_service() {
        let f = fixture();
        let err = f.orders.start(request(&f, vec![f.haircut, 999])).unwrap_err();
        assert!(matches!(err, DomainError::Unprocessable(_)));
    }

    #[test]
    fn start_requires_active_shift() {
        let f = fixture();
        let shift = f.store.find_active(f.employee).unwrap().unwrap();
        ShiftRepository::close(f.store.as_ref(), shift.id, Utc::now()).unwrap();

        let err = f.orders.start(request(&f, vec![f.haircut])).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(msg) if msg == "No active shift"));
    }

    #[test]
    fn second_transition_is_a_conflict() {
        let f = fixture();
        let id = f.orders.start(request(&f, vec![f.haircut])).unwrap();

        f.orders.complete(id, PaymentType::Cash).unwrap();
        assert!(matches!(
            f.orders.fail(id, "late"),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            f.orders.complete(id, PaymentType::Qr),
            Err(DomainError::Conflict(_))
        ));
        assert!(f.orders.in_progress(f.employee).unwrap().is_empty());
    }

    #[test]
    fn fail_requires_reason_and_known_order() {
        let f = fixture();
        let id = f.orders.start(request(&f, vec![f.haircut])).unwrap();

        assert!(matches!(
            f.orders.fail(id, " "),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            f.orders.fail(12345, "late"),
            Err(DomainError::NotFound(_))
        ));
        f.orders.fail(id, "client left").unwrap();
        let order = OrderRepository::find_by_id(f.store.as_ref(), id).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Failed);
        assert_eq!(order.failure_reason.as_deref(), Some("client left"));
    }
}

//! Demo roster and price list for a fresh branch.

use crate::domain::errors::DomainError;
use crate::domain::model::{NewEmployee, NewService, Role};
use crate::domain::ports::{EmployeeRepository, ServiceRepository};

const DEMO_EMPLOYEES: &[(&str, &str, Role)] = &[
    ("Aigerim", "7777", Role::Employee),
    ("Dias", "6543", Role::Employee),
    ("Madina", "1213", Role::Employee),
    ("Admin", "7132", Role::Admin),
];

const DEMO_SERVICES: &[(&str, i32)] = &[
    ("Haircut", 2000),
    ("Wash", 500),
    ("Coloring", 6000),
    ("Beard trim", 1500),
];

/// Insert the demo data into empty tables. Tables that already hold rows
/// are left alone, so this is safe to run on every start.
pub fn seed_demo_data<S>(store: &S, branch_id: i32) -> Result<(), DomainError>
where
    S: EmployeeRepository + ServiceRepository,
{
    if EmployeeRepository::list(store)?.is_empty() {
        for (name, pin, role) in DEMO_EMPLOYEES {
            EmployeeRepository::create(
                store,
                NewEmployee {
                    name: name.to_string(),
                    pin: pin.to_string(),
                    role: *role,
                    branch_id,
                },
            )?;
        }
        log::info!("Seeded {} demo employees", DEMO_EMPLOYEES.len());
    }

    if ServiceRepository::list(store)?.is_empty() {
        for (name, price) in DEMO_SERVICES {
            ServiceRepository::create(
                store,
                NewService {
                    name: name.to_string(),
                    price: *price,
                },
            )?;
        }
        log::info!("Seeded {} demo services", DEMO_SERVICES.len());
    }
    Ok(())
}

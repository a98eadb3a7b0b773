use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::model::{Employee, Service, Shift};
use crate::domain::order::{Order, OrderLine};
use crate::schema::{employees, order_lines, orders, services, shifts};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub pin: String,
    pub role: String,
    pub branch_id: i32,
    pub is_active: bool,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Employee {
            id: row.id,
            name: row.name,
            pin: row.pin,
            role: row.role.parse()?,
            branch_id: row.branch_id,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub pin: &'a str,
    pub role: &'a str,
    pub branch_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: i32,
    pub name: String,
    pub price: i32,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = services)]
pub struct NewServiceRow<'a> {
    pub name: &'a str,
    pub price: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = shifts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShiftRow {
    pub id: i32,
    pub employee_id: i32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Shift {
            id: row.id,
            employee_id: row.employee_id,
            started_at: row.started_at,
            ended_at: row.ended_at,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = shifts)]
pub struct NewShiftRow {
    pub employee_id: i32,
    pub started_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub employee_id: i32,
    pub branch_id: i32,
    pub client_name: String,
    pub client_phone: String,
    pub status: String,
    pub payment_type: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl OrderRow {
    pub fn into_order(self, lines: Vec<OrderLineRow>) -> Result<Order, DomainError> {
        Ok(Order {
            id: self.id,
            employee_id: self.employee_id,
            branch_id: self.branch_id,
            client_name: self.client_name,
            client_phone: self.client_phone,
            status: self.status.parse()?,
            payment_type: self.payment_type.map(|p| p.parse()).transpose()?,
            failure_reason: self.failure_reason,
            created_at: self.created_at,
            closed_at: self.closed_at,
            lines: lines.into_iter().map(OrderLine::from).collect(),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub employee_id: i32,
    pub branch_id: i32,
    pub client_name: &'a str,
    pub client_phone: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: i32,
    pub order_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub price: i32,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        OrderLine {
            service_id: row.service_id,
            service_name: row.service_name,
            price: row.price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow<'a> {
    pub order_id: i32,
    pub service_id: i32,
    pub service_name: &'a str,
    pub price: i32,
}

//! Daily takings, computed from closed orders.
//!
//! Only `COMPLETED` orders whose `closed_at` falls inside the window count
//! towards money totals. Failed orders are tallied separately where a view
//! needs them.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use super::errors::DomainError;
use super::model::Employee;
use super::order::{Order, OrderStatus, PaymentType};

/// Half-open `[start, end)` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// The business day as seen by a branch at a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDay {
    pub date: NaiveDate,
    pub window: Window,
}

impl LocalDay {
    pub fn containing(now: DateTime<Utc>, offset_hours: i32) -> Result<Self, DomainError> {
        let offset = FixedOffset::east_opt(offset_hours * 3600).ok_or_else(|| {
            DomainError::Internal(format!("invalid UTC offset {offset_hours}h"))
        })?;
        let date = now.with_timezone(&offset).date_naive();
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .and_then(|t| offset.from_local_datetime(&t).single())
            .ok_or_else(|| DomainError::Internal(format!("no local midnight for {date}")))?;
        let start = midnight.with_timezone(&Utc);
        Ok(Self {
            date,
            window: Window {
                start,
                end: start + Duration::days(1),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Takings {
    pub orders: i64,
    pub total: i64,
    pub cash: i64,
    pub qr: i64,
}

impl Takings {
    fn add(&mut self, order: &Order) {
        let amount = order.total();
        self.orders += 1;
        self.total += amount;
        match order.payment_type {
            Some(PaymentType::Cash) => self.cash += amount,
            Some(PaymentType::Qr) => self.qr += amount,
            None => {}
        }
    }

    /// Sum the completed orders closed inside `window`.
    pub fn of<'a>(orders: impl IntoIterator<Item = &'a Order>, window: &Window) -> Self {
        let mut takings = Takings::default();
        for order in orders {
            if counts_towards(order, window) {
                takings.add(order);
            }
        }
        takings
    }
}

fn counts_towards(order: &Order, window: &Window) -> bool {
    order.status == OrderStatus::Completed && order.closed_at.is_some_and(|at| window.contains(at))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTakings {
    pub employee_id: i32,
    pub employee: String,
    pub takings: Takings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub rows: Vec<EmployeeTakings>,
    pub all: Takings,
}

impl DailyReport {
    /// One row per employee, in the order given, even for employees with no
    /// orders.
    pub fn build(day: &LocalDay, employees: &[Employee], orders: &[Order]) -> Self {
        let mut all = Takings::default();
        let rows = employees
            .iter()
            .map(|emp| {
                let takings = Takings::of(
                    orders.iter().filter(|o| o.employee_id == emp.id),
                    &day.window,
                );
                all.orders += takings.orders;
                all.total += takings.total;
                all.cash += takings.cash;
                all.qr += takings.qr;
                EmployeeTakings {
                    employee_id: emp.id,
                    employee: emp.name.clone(),
                    takings,
                }
            })
            .collect();
        Self {
            date: day.date,
            rows,
            all,
        }
    }

    /// Plain-text rendering for chat delivery.
    pub fn to_message(&self) -> String {
        let mut message = format!("📊 Report for {}\n\n", self.date);
        for row in &self.rows {
            message.push_str(&format!(
                "{}\nServices: {}\nTotal: {} ₸\n\n",
                row.employee, row.takings.orders, row.takings.total
            ));
        }
        message.push_str(&format!(
            "💰 Till total: {} ₸ (cash {} ₸, QR {} ₸)",
            self.all.total, self.all.cash, self.all.qr
        ));
        message
    }
}

/// Result of closing a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSummary {
    pub shift_id: i32,
    pub employee: String,
    pub takings: Takings,
    pub not_provided: i64,
}

impl ShiftSummary {
    pub fn build(shift_id: i32, employee: &str, window: &Window, orders: &[Order]) -> Self {
        let not_provided = orders
            .iter()
            .filter(|o| {
                o.status == OrderStatus::Failed && o.closed_at.is_some_and(|at| window.contains(at))
            })
            .count() as i64;
        Self {
            shift_id,
            employee: employee.to_string(),
            takings: Takings::of(orders, window),
            not_provided,
        }
    }

    pub fn to_message(&self) -> String {
        format!(
            "📊 Shift closed\n\nEmployee: {}\nServices: {}\nTotal: {} ₸\nCash: {} ₸\nQR: {} ₸\nNot provided: {}",
            self.employee,
            self.takings.orders,
            self.takings.total,
            self.takings.cash,
            self.takings.qr,
            self.not_provided
        )
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    InProgress,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::InProgress)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "FAILED" => Ok(OrderStatus::Failed),
            other => Err(DomainError::Internal(format!("unknown order status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Cash,
    Qr,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "CASH",
            PaymentType::Qr => "QR",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentType::Cash),
            "QR" => Ok(PaymentType::Qr),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment type '{other}'"
            ))),
        }
    }
}

/// One service inside an order, priced at the moment the order started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub service_id: i32,
    pub service_name: String,
    pub price: i32,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub employee_id: i32,
    pub branch_id: i32,
    pub client_name: String,
    pub client_phone: String,
    pub status: OrderStatus,
    pub payment_type: Option<PaymentType>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn total(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.price)).sum()
    }

    pub fn service_names(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.service_name.clone()).collect()
    }

    /// Whole minutes since the order started, never negative.
    pub fn minutes_in_progress(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes().max(0)
    }

    /// Apply a terminal transition. Only `IN_PROGRESS` orders accept one.
    pub fn close(&mut self, closure: &OrderClosure, at: DateTime<Utc>) -> Result<(), DomainError> {
        ensure_open(self.status)?;
        match closure {
            OrderClosure::Completed(payment) => {
                self.status = OrderStatus::Completed;
                self.payment_type = Some(*payment);
            }
            OrderClosure::Failed(reason) => {
                self.status = OrderStatus::Failed;
                self.failure_reason = Some(reason.clone());
            }
        }
        self.closed_at = Some(at);
        Ok(())
    }
}

/// Rejects a transition out of a terminal state.
pub fn ensure_open(status: OrderStatus) -> Result<(), DomainError> {
    if status.is_terminal() {
        return Err(DomainError::Conflict(format!("Order is already {status}")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderClosure {
    Completed(PaymentType),
    Failed(String),
}

impl OrderClosure {
    pub fn failed(reason: &str) -> Result<Self, DomainError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidInput("reason must not be blank".into()));
        }
        Ok(OrderClosure::Failed(reason.to_string()))
    }

    pub fn status(&self) -> OrderStatus {
        match self {
            OrderClosure::Completed(_) => OrderStatus::Completed,
            OrderClosure::Failed(_) => OrderStatus::Failed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub employee_id: i32,
    pub branch_id: i32,
    pub service_ids: Vec<i32>,
    pub client_name: String,
    pub client_phone: String,
}

impl OrderRequest {
    /// Trims client fields and checks the service set is non-empty and
    /// duplicate-free.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        if self.service_ids.is_empty() {
            return Err(DomainError::InvalidInput(
                "at least one service is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.service_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(DomainError::InvalidInput(format!(
                "service {dup} is listed twice"
            )));
        }
        self.client_name = self.client_name.trim().to_string();
        self.client_phone = self.client_phone.trim().to_string();
        if self.client_name.is_empty() {
            return Err(DomainError::InvalidInput("client_name must not be blank".into()));
        }
        if self.client_phone.is_empty() {
            return Err(DomainError::InvalidInput("client_phone must not be blank".into()));
        }
        Ok(self)
    }
}

/// A validated order ready to persist, with its lines already priced.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub employee_id: i32,
    pub branch_id: i32,
    pub client_name: String,
    pub client_phone: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

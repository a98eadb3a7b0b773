use async_trait::async_trait;

use super::error::ClientResult;
use crate::domain::model::Identity;
use crate::domain::order::PaymentType;
use crate::wire::{
    DailyReportResponse, EmployeeDayResponse, InProgressOrder, ServiceResponse,
    ShiftSummaryResponse, StartOrderRequest,
};

/// Every call the screens make against the POS server.
#[async_trait]
pub trait PosApi: Send + Sync {
    async fn login(&self, pin: &str) -> ClientResult<Identity>;

    async fn services(&self) -> ClientResult<Vec<ServiceResponse>>;

    async fn start_order(&self, request: &StartOrderRequest) -> ClientResult<i32>;

    async fn in_progress(&self, employee_id: i32) -> ClientResult<Vec<InProgressOrder>>;

    async fn complete_order(&self, order_id: i32, payment: PaymentType) -> ClientResult<()>;

    async fn fail_order(&self, order_id: i32, reason: &str) -> ClientResult<()>;

    async fn end_shift(&self, employee_id: i32) -> ClientResult<ShiftSummaryResponse>;

    async fn report_today(&self, admin_id: i32) -> ClientResult<DailyReportResponse>;

    async fn employee_today(&self, admin_id: i32, target_id: i32)
        -> ClientResult<EmployeeDayResponse>;

    async fn send_report(&self, admin_id: i32) -> ClientResult<()>;
}

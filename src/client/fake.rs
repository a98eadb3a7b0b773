//! Scripted `PosApi`, prompter and toaster for the screen tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

use super::api::PosApi;
use super::error::{ClientError, ClientResult};
use super::prompt::{Prompter, Toaster};
use crate::domain::model::{Identity, Role};
use crate::domain::order::PaymentType;
use crate::wire::{
    DailyReportResponse, EmployeeDayResponse, InProgressOrder, ServiceResponse,
    ShiftSummaryResponse, StartOrderRequest,
};

pub fn anna() -> Identity {
    Identity {
        employee_id: 5,
        name: "Anna".into(),
        role: Role::Employee,
    }
}

pub fn admin() -> Identity {
    Identity {
        employee_id: 9,
        name: "Admin".into(),
        role: Role::Admin,
    }
}

pub fn catalog() -> Vec<ServiceResponse> {
    vec![
        ServiceResponse {
            id: 1,
            name: "Haircut".into(),
            price: 2000,
        },
        ServiceResponse {
            id: 2,
            name: "Wash".into(),
            price: 500,
        },
    ]
}

pub fn rejected(status: u16, message: &str) -> ClientError {
    ClientError::Status {
        status,
        message: message.into(),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub login: Option<Identity>,
    pub services: Vec<ServiceResponse>,
    pub board: Mutex<Vec<InProgressOrder>>,
    pub report: Option<DailyReportResponse>,
    pub employee_day: Option<EmployeeDayResponse>,
    /// Error returned by the next mutating call.
    pub reject_next: Mutex<Option<ClientError>>,
    /// When set, `start_order` waits for `release` after signalling `entered`.
    pub hold_start: AtomicBool,
    /// Same for `send_report`.
    pub hold_send: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
    pub next_order_id: AtomicI32,
}

impl FakeApi {
    pub fn with_login(identity: Identity) -> Self {
        Self {
            login: Some(identity),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reject_next(&self, err: ClientError) {
        *self.reject_next.lock().unwrap() = Some(err);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_rejection(&self) -> ClientResult<()> {
        match self.reject_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PosApi for FakeApi {
    async fn login(&self, pin: &str) -> ClientResult<Identity> {
        self.record(format!("login {pin}"));
        self.login.clone().ok_or_else(|| rejected(401, "Invalid PIN"))
    }

    async fn services(&self) -> ClientResult<Vec<ServiceResponse>> {
        self.record("services".into());
        Ok(self.services.clone())
    }

    async fn start_order(&self, request: &StartOrderRequest) -> ClientResult<i32> {
        self.record(format!(
            "start {:?} {} {}",
            request.service_ids, request.client_name, request.client_phone
        ));
        if self.hold_start.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.take_rejection()?;
        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst) + 100;
        self.board.lock().unwrap().push(InProgressOrder {
            order_id,
            services: vec!["Haircut".into()],
            service: "Haircut".into(),
            client_name: request.client_name.clone(),
            client_phone: request.client_phone.clone(),
            total: 2000,
            minutes_in_progress: 0,
        });
        Ok(order_id)
    }

    async fn in_progress(&self, employee_id: i32) -> ClientResult<Vec<InProgressOrder>> {
        self.record(format!("in_progress {employee_id}"));
        Ok(self.board.lock().unwrap().clone())
    }

    async fn complete_order(&self, order_id: i32, payment: PaymentType) -> ClientResult<()> {
        self.record(format!("complete {order_id} {payment}"));
        self.take_rejection()?;
        self.board.lock().unwrap().retain(|o| o.order_id != order_id);
        Ok(())
    }

    async fn fail_order(&self, order_id: i32, reason: &str) -> ClientResult<()> {
        self.record(format!("fail {order_id} {reason}"));
        self.take_rejection()?;
        self.board.lock().unwrap().retain(|o| o.order_id != order_id);
        Ok(())
    }

    async fn end_shift(&self, employee_id: i32) -> ClientResult<ShiftSummaryResponse> {
        self.record(format!("end_shift {employee_id}"));
        self.take_rejection()?;
        Ok(ShiftSummaryResponse {
            employee: "Anna".into(),
            shift_id: 1,
            total_orders: 0,
            total_amount: 0,
            cash: 0,
            qr: 0,
            not_provided: 0,
        })
    }

    async fn report_today(&self, admin_id: i32) -> ClientResult<DailyReportResponse> {
        self.record(format!("report {admin_id}"));
        self.report.clone().ok_or_else(|| rejected(403, "Access denied"))
    }

    async fn employee_today(
        &self,
        admin_id: i32,
        target_id: i32,
    ) -> ClientResult<EmployeeDayResponse> {
        self.record(format!("employee {admin_id} {target_id}"));
        self.employee_day
            .clone()
            .ok_or_else(|| rejected(404, "Employee not found"))
    }

    async fn send_report(&self, admin_id: i32) -> ClientResult<()> {
        self.record(format!("send {admin_id}"));
        if self.hold_send.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.take_rejection()
    }
}

/// Answers every question the same way and counts how often it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub confirm: bool,
    pub reason: Option<String>,
    pub asked: Mutex<Vec<String>>,
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, question: &str) -> bool {
        self.asked.lock().unwrap().push(question.to_string());
        self.confirm
    }

    async fn ask_reason(&self, order_id: i32) -> Option<String> {
        self.asked.lock().unwrap().push(format!("reason for {order_id}"));
        self.reason.clone()
    }
}

#[derive(Default)]
pub struct RecordingToaster {
    pub messages: Mutex<Vec<String>>,
}

impl Toaster for RecordingToaster {
    fn success(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("ok: {message}"));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("error: {message}"));
    }
}

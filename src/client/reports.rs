//! Admin screen: today's report, employee drill-down and report delivery.

use std::fmt::Write as _;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

use super::api::PosApi;
use super::error::DeskError;
use super::in_flight::InFlight;
use super::prompt::Toaster;
use super::session::SessionManager;
use crate::domain::model::{Identity, Role};
use crate::wire::{DailyReportResponse, EmployeeDayResponse, ReportRow};

/// What the report screen shows: one table row per employee plus the
/// totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub date: String,
    pub rows: Vec<ReportRow>,
    pub total: i64,
    pub cash: i64,
    pub qr: i64,
}

impl From<DailyReportResponse> for ReportView {
    fn from(r: DailyReportResponse) -> Self {
        Self {
            date: r.date,
            rows: r.employees,
            total: r.total_all,
            cash: r.cash_all,
            qr: r.qr_all,
        }
    }
}

impl ReportView {
    /// Plain-text table, one line per employee and a totals line.
    pub fn render(&self) -> String {
        let mut out = format!("Report for {}\n", self.date);
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{} | {} | {} ₸ | {} ₸ | {} ₸",
                row.employee, row.orders, row.total, row.cash, row.qr
            );
        }
        let _ = write!(
            out,
            "Total: {} ₸ (cash {} ₸, QR {} ₸)",
            self.total, self.cash, self.qr
        );
        out
    }
}

pub struct ReportDesk {
    api: Arc<dyn PosApi>,
    session: Arc<SessionManager>,
    toaster: Arc<dyn Toaster>,
    view: Mutex<Option<ReportView>>,
    detail: Mutex<Option<EmployeeDayResponse>>,
    sending: AtomicBool,
}

impl ReportDesk {
    pub fn new(
        api: Arc<dyn PosApi>,
        session: Arc<SessionManager>,
        toaster: Arc<dyn Toaster>,
    ) -> Self {
        Self {
            api,
            session,
            toaster,
            view: Mutex::new(None),
            detail: Mutex::new(None),
            sending: AtomicBool::new(false),
        }
    }

    fn admin(&self) -> Result<Identity, DeskError> {
        self.session
            .current()
            .filter(|identity| identity.role == Role::Admin)
            .ok_or(DeskError::NoSession)
    }

    /// Fetches today's report and replaces whatever was shown before.
    pub async fn load_report(&self) -> Result<ReportView, DeskError> {
        let admin = self.admin()?;
        let view = ReportView::from(self.api.report_today(admin.employee_id).await?);
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = Some(view.clone());
        Ok(view)
    }

    pub fn view(&self) -> Option<ReportView> {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn open_employee(&self, target_id: i32) -> Result<EmployeeDayResponse, DeskError> {
        let admin = self.admin()?;
        let day = self.api.employee_today(admin.employee_id, target_id).await?;
        *self.detail.lock().unwrap_or_else(PoisonError::into_inner) = Some(day.clone());
        Ok(day)
    }

    pub fn detail(&self) -> Option<EmployeeDayResponse> {
        self.detail
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Asks the server to deliver today's report. The outcome is toasted as
    /// well as returned.
    pub async fn send_report(&self) -> Result<(), DeskError> {
        let admin = self.admin()?;
        let result = {
            let _guard = InFlight::acquire(&self.sending)?;
            self.api.send_report(admin.employee_id).await
        };

        match result {
            Ok(()) => {
                self.toaster.success("Report sent");
                Ok(())
            }
            Err(e) => {
                self.toaster.error(&format!("Report was not sent: {e}"));
                Err(e.into())
            }
        }
    }

    pub fn logout(&self) {
        self.session.end();
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.detail.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

//! Employee screen: service picker, client form and the in-progress board.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::api::PosApi;
use super::error::DeskError;
use super::in_flight::InFlight;
use super::prompt::Prompter;
use super::session::SessionManager;
use crate::domain::model::Identity;
use crate::domain::order::PaymentType;
use crate::wire::{InProgressOrder, ServiceResponse, ShiftSummaryResponse, StartOrderRequest};

#[derive(Default)]
struct Form {
    catalog: Vec<ServiceResponse>,
    selected: Vec<i32>,
    client_name: String,
    client_phone: String,
    board: Vec<InProgressOrder>,
}

pub struct OrderDesk {
    api: Arc<dyn PosApi>,
    session: Arc<SessionManager>,
    prompter: Arc<dyn Prompter>,
    branch_id: i32,
    form: Mutex<Form>,
    starting: AtomicBool,
}

impl OrderDesk {
    pub fn new(
        api: Arc<dyn PosApi>,
        session: Arc<SessionManager>,
        prompter: Arc<dyn Prompter>,
        branch_id: i32,
    ) -> Self {
        Self {
            api,
            session,
            prompter,
            branch_id,
            form: Mutex::new(Form::default()),
            starting: AtomicBool::new(false),
        }
    }

    fn form(&self) -> MutexGuard<'_, Form> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn identity(&self) -> Result<Identity, DeskError> {
        self.session.current().ok_or(DeskError::NoSession)
    }

    /// Fetches the service catalog for this session.
    pub async fn load_catalog(&self) -> Result<(), DeskError> {
        let catalog = self.api.services().await?;
        self.form().catalog = catalog;
        Ok(())
    }

    pub fn catalog(&self) -> Vec<ServiceResponse> {
        self.form().catalog.clone()
    }

    pub fn add_service(&self, service_id: i32) -> Result<(), DeskError> {
        let mut form = self.form();
        if !form.catalog.iter().any(|s| s.id == service_id) {
            return Err(DeskError::UnknownService(service_id));
        }
        if form.selected.contains(&service_id) {
            return Err(DeskError::AlreadyAdded);
        }
        form.selected.push(service_id);
        Ok(())
    }

    pub fn remove_service(&self, service_id: i32) {
        self.form().selected.retain(|id| *id != service_id);
    }

    /// Selected services in the order they were picked.
    pub fn selected(&self) -> Vec<ServiceResponse> {
        let form = self.form();
        form.selected
            .iter()
            .filter_map(|id| form.catalog.iter().find(|s| s.id == *id).cloned())
            .collect()
    }

    /// Sum of the selected services' catalog prices.
    pub fn selected_total(&self) -> i64 {
        self.selected().iter().map(|s| i64::from(s.price)).sum()
    }

    pub fn set_client(&self, name: &str, phone: &str) {
        let mut form = self.form();
        form.client_name = name.to_string();
        form.client_phone = phone.to_string();
    }

    pub fn client(&self) -> (String, String) {
        let form = self.form();
        (form.client_name.clone(), form.client_phone.clone())
    }

    pub fn is_starting(&self) -> bool {
        self.starting.load(Ordering::Acquire)
    }

    /// Re-fetches the board; the previous contents are replaced, never merged.
    pub async fn refresh(&self) -> Result<usize, DeskError> {
        let identity = self.identity()?;
        let board = self.api.in_progress(identity.employee_id).await?;
        let count = board.len();
        self.form().board = board;
        Ok(count)
    }

    pub fn board(&self) -> Vec<InProgressOrder> {
        self.form().board.clone()
    }

    /// Sends the current form as a new order. Only one start may be in
    /// flight; a second call meanwhile gets [`DeskError::Busy`].
    pub async fn start_order(&self) -> Result<i32, DeskError> {
        let identity = self.identity()?;
        let request = {
            let form = self.form();
            if form.selected.is_empty() {
                return Err(DeskError::Validation("Select at least one service"));
            }
            if form.client_name.trim().is_empty() {
                return Err(DeskError::Validation("Enter the client's name"));
            }
            if form.client_phone.trim().is_empty() {
                return Err(DeskError::Validation("Enter the client's phone"));
            }
            StartOrderRequest {
                service_ids: form.selected.clone(),
                branch_id: self.branch_id,
                employee_id: identity.employee_id,
                client_name: form.client_name.trim().to_string(),
                client_phone: form.client_phone.trim().to_string(),
            }
        };

        let _guard = InFlight::acquire(&self.starting)?;
        let order_id = self.api.start_order(&request).await?;
        log::info!("Order {order_id} started for {}", request.client_name);

        {
            let mut form = self.form();
            form.selected.clear();
            form.client_name.clear();
            form.client_phone.clear();
        }
        if let Err(e) = self.refresh().await {
            log::warn!("Board refresh after start failed: {e}");
        }
        Ok(order_id)
    }

    /// Completes an order after confirmation. Returns `false` if the user
    /// declined and nothing was sent.
    pub async fn complete_order(
        &self,
        order_id: i32,
        payment: PaymentType,
    ) -> Result<bool, DeskError> {
        let question = format!("Complete order #{order_id} paid by {payment}?");
        if !self.prompter.confirm(&question).await {
            return Ok(false);
        }
        self.api.complete_order(order_id, payment).await?;
        log::info!("Order {order_id} completed ({payment})");
        if let Err(e) = self.refresh().await {
            log::warn!("Board refresh after completion failed: {e}");
        }
        Ok(true)
    }

    /// Marks an order as not provided. Returns `false` when no reason was
    /// given and nothing was sent.
    pub async fn fail_order(&self, order_id: i32) -> Result<bool, DeskError> {
        let reason = match self.prompter.ask_reason(order_id).await {
            Some(reason) if !reason.trim().is_empty() => reason.trim().to_string(),
            _ => return Ok(false),
        };
        self.api.fail_order(order_id, &reason).await?;
        log::info!("Order {order_id} marked as not provided: {reason}");
        if let Err(e) = self.refresh().await {
            log::warn!("Board refresh after failure failed: {e}");
        }
        Ok(true)
    }

    /// Closes the shift and signs out. `None` when the user declined.
    pub async fn end_shift(&self) -> Result<Option<ShiftSummaryResponse>, DeskError> {
        let identity = self.identity()?;
        if !self.prompter.confirm("End your shift?").await {
            return Ok(None);
        }
        let summary = self.api.end_shift(identity.employee_id).await?;
        self.session.end();
        *self.form() = Form::default();
        Ok(Some(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{anna, catalog, rejected, FakeApi, ScriptedPrompter};
    use crate::client::session::MemorySessionStore;

    fn desk_with(api: Arc<FakeApi>, prompter: ScriptedPrompter) -> OrderDesk {
        let session = Arc::new(SessionManager::new(Arc::new(MemorySessionStore::new())));
        session.begin(anna()).unwrap();
        OrderDesk::new(api, session, Arc::new(prompter), 1)
    }

    fn catalog_api() -> Arc<FakeApi> {
        Arc::new(FakeApi {
            services: catalog(),
            ..FakeApi::default()
        })
    }

    #[tokio::test]
    async fn adding_the_same_service_twice_is_rejected() {
        let api = catalog_api();
        let desk = desk_with(api, ScriptedPrompter::default());
        desk.load_catalog().await.unwrap();

        desk.add_service(1).unwrap();
        assert!(matches!(desk.add_service(1), Err(DeskError::AlreadyAdded)));

        let selected = desk.selected();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Haircut");
        assert!(matches!(desk.add_service(42), Err(DeskError::UnknownService(42))));
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_without_a_call() {
        let api = catalog_api();
        let desk = desk_with(api.clone(), ScriptedPrompter::default());
        desk.load_catalog().await.unwrap();

        desk.set_client("Dana", "+77001234567");
        assert!(matches!(desk.start_order().await, Err(DeskError::Validation(_))));

        desk.add_service(1).unwrap();
        desk.set_client("  ", "+77001234567");
        assert!(matches!(desk.start_order().await, Err(DeskError::Validation(_))));

        desk.set_client("Dana", "");
        assert!(matches!(desk.start_order().await, Err(DeskError::Validation(_))));

        assert_eq!(api.calls(), vec!["services"]);
    }

    #[tokio::test]
    async fn successful_start_resets_form_and_refreshes_board() {
        let api = catalog_api();
        let desk = desk_with(api.clone(), ScriptedPrompter::default());
        desk.load_catalog().await.unwrap();
        desk.add_service(1).unwrap();
        desk.add_service(2).unwrap();
        assert_eq!(desk.selected_total(), 2500);
        desk.set_client(" Dana ", "+77001234567");

        let order_id = desk.start_order().await.unwrap();

        assert!(desk.selected().is_empty());
        assert_eq!(desk.client(), (String::new(), String::new()));
        let board = desk.board();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].order_id, order_id);
        assert_eq!(
            api.calls(),
            vec!["services", "start [1, 2] Dana +77001234567", "in_progress 5"]
        );
    }

    #[tokio::test]
    async fn server_error_text_is_surfaced_and_form_kept() {
        let api = catalog_api();
        api.reject_next(rejected(409, "No active shift"));
        let desk = desk_with(api, ScriptedPrompter::default());
        desk.load_catalog().await.unwrap();
        desk.add_service(1).unwrap();
        desk.set_client("Dana", "+77001234567");

        let err = desk.start_order().await.unwrap_err();

        assert_eq!(err.to_string(), "No active shift");
        assert_eq!(desk.selected().len(), 1);
        assert!(!desk.is_starting());
    }

    #[tokio::test]
    async fn second_start_while_in_flight_is_busy() {
        let api = catalog_api();
        api.hold_start.store(true, Ordering::SeqCst);
        let desk = desk_with(api.clone(), ScriptedPrompter::default());
        desk.load_catalog().await.unwrap();
        desk.add_service(1).unwrap();
        desk.set_client("Dana", "+77001234567");

        let (first, second) = tokio::join!(desk.start_order(), async {
            api.entered.notified().await;
            let second = desk.start_order().await;
            api.release.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(DeskError::Busy)));
        let starts = api.calls().iter().filter(|c| c.starts_with("start")).count();
        assert_eq!(starts, 1);
    }

    #[tokio::test]
    async fn completion_needs_confirmation() {
        let api = catalog_api();
        let desk = desk_with(api.clone(), ScriptedPrompter::default());

        assert!(!desk.complete_order(100, PaymentType::Cash).await.unwrap());
        assert!(api.calls().is_empty());

        let desk = desk_with(
            api.clone(),
            ScriptedPrompter {
                confirm: true,
                ..ScriptedPrompter::default()
            },
        );
        assert!(desk.complete_order(100, PaymentType::Qr).await.unwrap());
        assert_eq!(api.calls(), vec!["complete 100 QR", "in_progress 5"]);
    }

    #[tokio::test]
    async fn failure_needs_a_reason() {
        let api = catalog_api();
        let blank = ScriptedPrompter {
            reason: Some("   ".into()),
            ..ScriptedPrompter::default()
        };
        let desk = desk_with(api.clone(), blank);
        assert!(!desk.fail_order(100).await.unwrap());
        assert!(api.calls().is_empty());

        let given = ScriptedPrompter {
            reason: Some(" client left ".into()),
            ..ScriptedPrompter::default()
        };
        let desk = desk_with(api.clone(), given);
        assert!(desk.fail_order(100).await.unwrap());
        assert_eq!(api.calls()[0], "fail 100 client left");
    }

    #[tokio::test]
    async fn end_shift_tears_down_session() {
        let api = catalog_api();
        let desk = desk_with(
            api.clone(),
            ScriptedPrompter {
                confirm: true,
                ..ScriptedPrompter::default()
            },
        );

        let summary = desk.end_shift().await.unwrap().unwrap();

        assert_eq!(summary.shift_id, 1);
        assert_eq!(api.calls(), vec!["end_shift 5"]);
        assert!(matches!(desk.refresh().await, Err(DeskError::NoSession)));
    }
}

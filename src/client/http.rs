//! reqwest implementation of [`PosApi`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::api::PosApi;
use super::error::{ClientError, ClientResult};
use crate::domain::model::Identity;
use crate::domain::order::PaymentType;
use crate::wire::{
    CompleteOrderRequest, DailyReportResponse, EmployeeDayResponse, ErrorResponse,
    InProgressOrder, NotProvidedRequest, PinAuthRequest, ServiceResponse, ShiftSummaryResponse,
    StartOrderRequest,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// POST whose only contract is a 2xx; the body, if any, is ignored.
    async fn post_ack<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(Into::into)
    }

    /// Any non-2xx becomes `ClientError::Status`, carrying the server's
    /// `error` text when the body has one.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            log::warn!("POS API returned {status}: {message}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

/// `/orders/start` answers with either the new id or an `error` text, even
/// on a 2xx.
#[derive(Debug, Deserialize)]
struct StartOrderReply {
    #[serde(default)]
    order_id: Option<i32>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl PosApi for HttpApi {
    async fn login(&self, pin: &str) -> ClientResult<Identity> {
        self.post(
            "/auth/pin",
            &PinAuthRequest {
                pin: pin.to_string(),
            },
        )
        .await
    }

    async fn services(&self) -> ClientResult<Vec<ServiceResponse>> {
        self.get("/services").await
    }

    async fn start_order(&self, request: &StartOrderRequest) -> ClientResult<i32> {
        let response = self
            .client
            .post(self.url("/orders/start"))
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let reply: StartOrderReply = Self::handle_response(response).await?;
        match reply {
            StartOrderReply {
                error: Some(message),
                ..
            } => Err(ClientError::Status { status, message }),
            StartOrderReply {
                order_id: Some(order_id),
                ..
            } => Ok(order_id),
            StartOrderReply { .. } => Err(ClientError::Status {
                status,
                message: "Order was not created".into(),
            }),
        }
    }

    async fn in_progress(&self, employee_id: i32) -> ClientResult<Vec<InProgressOrder>> {
        self.get(&format!("/orders/in-progress?employee_id={employee_id}"))
            .await
    }

    async fn complete_order(&self, order_id: i32, payment: PaymentType) -> ClientResult<()> {
        let body = CompleteOrderRequest {
            payment_type: payment.as_str().to_string(),
        };
        self.post_ack(&format!("/orders/{order_id}/complete"), Some(&body))
            .await
    }

    async fn fail_order(&self, order_id: i32, reason: &str) -> ClientResult<()> {
        let body = NotProvidedRequest {
            reason: reason.to_string(),
        };
        self.post_ack(&format!("/orders/{order_id}/not-provided"), Some(&body))
            .await
    }

    async fn end_shift(&self, employee_id: i32) -> ClientResult<ShiftSummaryResponse> {
        let response = self
            .client
            .post(self.url(&format!("/shifts/end?employee_id={employee_id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn report_today(&self, admin_id: i32) -> ClientResult<DailyReportResponse> {
        self.get(&format!("/admin/report/today?employee_id={admin_id}"))
            .await
    }

    async fn employee_today(
        &self,
        admin_id: i32,
        target_id: i32,
    ) -> ClientResult<EmployeeDayResponse> {
        self.get(&format!(
            "/admin/employee/today?employee_id={admin_id}&target_employee_id={target_id}"
        ))
        .await
    }

    async fn send_report(&self, admin_id: i32) -> ClientResult<()> {
        let path = format!("/admin/report/today/send?employee_id={admin_id}");
        self.post_ack::<()>(&path, None).await
    }
}

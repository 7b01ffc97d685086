use crate::dto::booking_dto::{
    ApiErrorBody, BookAppointmentRequest, CancelAppointmentRequest, RescheduleAppointmentRequest,
};
use crate::error::{ApiErrorCode, Error, Result};
use crate::models::appointment::Appointment;
use crate::models::blocked_interval::BlockedInterval;
use crate::utils::validation::validate_payload;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Client for the guidance backend's appointment endpoints. The server is
/// the authority on every rule; this client only ferries requests and decodes
/// structured rejections.
#[derive(Clone)]
pub struct AppointmentService {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl AppointmentService {
    pub fn new(client: Client, base_url: String, auth_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            auth_token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn list_appointments(&self, student_id: Uuid) -> Result<Vec<Appointment>> {
        let response = self
            .request(Method::GET, "/api/appointments")
            .query(&[("studentId", student_id.to_string())])
            .send()
            .await?;
        self.decode(response).await
    }

    pub async fn list_blocked_intervals(&self, counselor_id: Uuid) -> Result<Vec<BlockedInterval>> {
        let response = self
            .request(
                Method::GET,
                &format!("/api/guidance-staff/{}/blocked-dates", counselor_id),
            )
            .send()
            .await?;
        self.decode(response).await
    }

    pub async fn book(&self, req: &BookAppointmentRequest) -> Result<Appointment> {
        validate_payload(req)?;
        tracing::info!(
            counselor = %req.guidance_staff_id,
            start = %req.scheduled_date,
            "Submitting booking"
        );
        let response = self
            .request(Method::POST, "/api/appointments")
            .json(req)
            .send()
            .await?;
        self.decode(response).await
    }

    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        req: &RescheduleAppointmentRequest,
    ) -> Result<Appointment> {
        validate_payload(req)?;
        tracing::info!(%appointment_id, start = %req.scheduled_date, "Submitting reschedule");
        let response = self
            .request(
                Method::PUT,
                &format!("/api/appointments/{}/reschedule", appointment_id),
            )
            .json(req)
            .send()
            .await?;
        self.decode(response).await
    }

    pub async fn cancel(&self, appointment_id: Uuid, req: &CancelAppointmentRequest) -> Result<()> {
        validate_payload(req)?;
        tracing::info!(%appointment_id, "Cancelling appointment");
        let response = self
            .request(
                Method::POST,
                &format!("/api/appointments/{}/cancel", appointment_id),
            )
            .json(req)
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.decode_failure(response).await)
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(self.decode_failure(response).await)
    }

    async fn decode_failure(&self, response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Error::Api {
                code: err.code,
                message: err.message,
            },
            Err(_) => {
                tracing::warn!(%status, "Backend returned an unstructured error body");
                Error::Api {
                    code: ApiErrorCode::Unknown,
                    message: format!("Request failed with status {}", status),
                }
            }
        }
    }
}

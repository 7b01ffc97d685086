use crate::error::ApiErrorCode;
use crate::models::slot::ProposedSlot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub student_id: Uuid,
    pub guidance_staff_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 64))]
    pub appointment_type: String,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl BookAppointmentRequest {
    pub fn from_slot(
        slot: &ProposedSlot,
        student_id: Uuid,
        appointment_type: String,
        notes: Option<String>,
    ) -> Self {
        Self {
            student_id,
            guidance_staff_id: slot.counselor_id,
            scheduled_date: slot.start_utc(),
            end_date: slot.end_utc(),
            appointment_type,
            notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleAppointmentRequest {
    pub scheduled_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

impl RescheduleAppointmentRequest {
    pub fn from_slot(slot: &ProposedSlot, reason: Option<String>) -> Self {
        Self {
            scheduled_date: slot.start_utc(),
            end_date: slot.end_utc(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

/// Shape of every non-2xx body the backend returns. The code carries the
/// semantics; the message is display-only and never inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: ApiErrorCode,
    pub message: String,
}

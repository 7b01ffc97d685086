use crate::utils::time;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
    Expired,
}

/// An appointment as the backend reports it. Owned by the server; the client
/// never mutates one locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub appointment_id: Uuid,
    pub student_id: Uuid,
    pub guidance_staff_id: Uuid,
    /// Display name of the counselor, when the listing endpoint joins it in.
    #[serde(default)]
    pub guidance_staff_name: Option<String>,
    /// Start of the meeting, UTC. Invariant (server-enforced): `end_date > scheduled_date`.
    pub scheduled_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Appointments that still occupy a slot on the student's calendar.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Pending | AppointmentStatus::Scheduled
        )
    }

    /// Calendar date of the meeting in the business timezone.
    pub fn local_date(&self) -> NaiveDate {
        time::local_date(self.scheduled_date)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// The slot a student is currently composing in the booking or reschedule
/// form. Built fresh on every date/time change and discarded after submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub counselor_id: Uuid,
    /// When rescheduling, the appointment being replaced. It must not
    /// conflict with itself.
    pub exclude_appointment_id: Option<Uuid>,
}

impl ProposedSlot {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>, counselor_id: Uuid) -> Self {
        Self {
            start,
            end,
            counselor_id,
            exclude_appointment_id: None,
        }
    }

    pub fn for_reschedule(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        counselor_id: Uuid,
        exclude_appointment_id: Uuid,
    ) -> Self {
        Self {
            start,
            end,
            counselor_id,
            exclude_appointment_id: Some(exclude_appointment_id),
        }
    }

    pub fn local_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }
}

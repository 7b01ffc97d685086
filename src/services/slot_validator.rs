use crate::models::appointment::Appointment;
use crate::models::slot::ProposedSlot;
use crate::utils::time;
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Business constraints for the guidance office. Injected so tests can vary
/// the window without touching the clock.
#[derive(Debug, Clone)]
pub struct BookingRules {
    /// Earliest hour (inclusive, local) an appointment may start.
    pub open_hour: u32,
    /// Hour (local) by which an appointment must have ended.
    pub close_hour: u32,
    /// Longest duration a reschedule may request, in minutes.
    pub max_reschedule_minutes: i64,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 17,
            max_reschedule_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlow {
    New,
    /// Rescheduling an existing appointment. The current slot is carried so
    /// an unchanged proposal can be refused client-side; the once-only
    /// reschedule cap stays server-enforced.
    Reschedule {
        original_start: DateTime<Utc>,
        original_end: DateTime<Utc>,
    },
}

/// Form fields the UI highlights for a given rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    BlockedDate,
    PastDate,
    PastTime,
    InvalidDuration { identical: bool },
    DurationTooLong,
    OutsideBusinessHoursStart,
    OutsideBusinessHoursEnd,
    Weekend,
    UnchangedSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub message: String,
    pub fields: &'static [Field],
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleCheck {
    Passed,
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotConflict {
    /// One appointment per counselor per day, regardless of time.
    SameCounselorSameDay {
        appointment_id: Uuid,
        date: NaiveDate,
    },
    /// Half-open interval overlap with any of the student's appointments.
    TimeOverlap {
        appointment_id: Uuid,
        counselor_name: Option<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl SlotConflict {
    pub fn message(&self) -> String {
        match self {
            SlotConflict::SameCounselorSameDay { date, .. } => format!(
                "You already have an appointment with this counselor on {}. Please choose a different date.",
                date.format("%B %-d, %Y")
            ),
            SlotConflict::TimeOverlap {
                counselor_name,
                start,
                end,
                ..
            } => {
                let who = counselor_name.as_deref().unwrap_or("another counselor");
                format!(
                    "This overlaps your {} - {} appointment with {}. Please choose a different time.",
                    time::to_local(*start).format("%-I:%M %p"),
                    time::to_local(*end).format("%-I:%M %p"),
                    who
                )
            }
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            SlotConflict::SameCounselorSameDay { .. } => &[Field::Date],
            SlotConflict::TimeOverlap { .. } => {
                &[Field::Date, Field::StartTime, Field::EndTime]
            }
        }
    }
}

/// Outcome of one validation pass: the ordered hard rules on one side and
/// the conflict scan on the other. The two halves are computed independently
/// so a rule failure never masks a brewing double-booking.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAssessment {
    pub rules: RuleCheck,
    pub conflicts: Vec<SlotConflict>,
}

impl SlotAssessment {
    pub fn is_bookable(&self) -> bool {
        matches!(self.rules, RuleCheck::Passed) && self.conflicts.is_empty()
    }

    /// The single message the form shows. Hard-rule rejections win over
    /// conflicts; among conflicts the first reported wins.
    pub fn primary_message(&self) -> Option<String> {
        match &self.rules {
            RuleCheck::Rejected(rejection) => Some(rejection.message.clone()),
            RuleCheck::Passed => self.conflicts.first().map(|c| c.message()),
        }
    }

    pub fn highlighted_fields(&self) -> HashSet<Field> {
        let fields: &[Field] = match &self.rules {
            RuleCheck::Rejected(rejection) => rejection.fields,
            RuleCheck::Passed => match self.conflicts.first() {
                Some(conflict) => conflict.fields(),
                None => &[],
            },
        };
        fields.iter().copied().collect()
    }
}

/// Classify a proposed slot against the counselor's blocked dates and the
/// student's own calendar. Pure: identical inputs always produce the same
/// assessment, and no input is mutated.
pub fn assess_slot(
    slot: &ProposedSlot,
    blocked_dates: &HashSet<NaiveDate>,
    appointments: &[Appointment],
    now: DateTime<Utc>,
    flow: &BookingFlow,
    rules: &BookingRules,
) -> SlotAssessment {
    SlotAssessment {
        rules: check_rules(slot, blocked_dates, now, flow, rules),
        conflicts: find_conflicts(slot, appointments),
    }
}

fn reject(reason: RejectionReason, message: String, fields: &'static [Field]) -> RuleCheck {
    RuleCheck::Rejected(Rejection {
        reason,
        message,
        fields,
    })
}

fn check_rules(
    slot: &ProposedSlot,
    blocked_dates: &HashSet<NaiveDate>,
    now: DateTime<Utc>,
    flow: &BookingFlow,
    rules: &BookingRules,
) -> RuleCheck {
    let slot_date = slot.local_date();
    let today = time::local_date(now);

    if blocked_dates.contains(&slot_date) {
        return reject(
            RejectionReason::BlockedDate,
            format!(
                "{} has been blocked off by the counselor. Please choose a different date.",
                slot_date.format("%B %-d, %Y")
            ),
            &[Field::Date],
        );
    }

    if slot_date < today {
        return reject(
            RejectionReason::PastDate,
            "The selected date has already passed. Please choose a future date.".to_string(),
            &[Field::Date],
        );
    }

    if slot_date == today && slot.start_utc() <= now {
        return reject(
            RejectionReason::PastTime,
            "That time has already passed. Please choose a later time.".to_string(),
            &[Field::StartTime],
        );
    }

    if slot.end <= slot.start {
        let identical = slot.end == slot.start;
        let message = if identical {
            "Start and end time cannot be identical.".to_string()
        } else {
            "End time must be after the start time.".to_string()
        };
        return reject(
            RejectionReason::InvalidDuration { identical },
            message,
            &[Field::StartTime, Field::EndTime],
        );
    }

    if let BookingFlow::Reschedule { .. } = flow {
        if slot.end - slot.start > Duration::minutes(rules.max_reschedule_minutes) {
            return reject(
                RejectionReason::DurationTooLong,
                format!(
                    "Appointment duration cannot exceed {} minutes.",
                    rules.max_reschedule_minutes
                ),
                &[Field::StartTime, Field::EndTime],
            );
        }
    }

    if let BookingFlow::Reschedule {
        original_start,
        original_end,
    } = flow
    {
        if slot.start_utc() == *original_start && slot.end_utc() == *original_end {
            return reject(
                RejectionReason::UnchangedSlot,
                "This is the current schedule. Please pick a different date or time.".to_string(),
                &[Field::Date, Field::StartTime, Field::EndTime],
            );
        }
    }

    if slot.start.hour() < rules.open_hour || slot.start.hour() >= rules.close_hour {
        return reject(
            RejectionReason::OutsideBusinessHoursStart,
            format!(
                "Appointments can only start between {} and {}.",
                hour_label(rules.open_hour),
                hour_label(rules.close_hour)
            ),
            &[Field::StartTime],
        );
    }

    // The end must land on the same local day, at or before closing.
    let end_past_close = slot.end.hour() > rules.close_hour
        || (slot.end.hour() == rules.close_hour
            && (slot.end.minute() > 0 || slot.end.second() > 0));
    if slot.end.date_naive() != slot_date || end_past_close {
        return reject(
            RejectionReason::OutsideBusinessHoursEnd,
            format!(
                "Appointments must end by {}.",
                hour_label(rules.close_hour)
            ),
            &[Field::EndTime],
        );
    }

    // Checked even though blocked dates normally cover weekends already; the
    // two lists come from different sources and must each hold on their own.
    if time::is_weekend(slot_date) {
        return reject(
            RejectionReason::Weekend,
            "Appointments cannot be scheduled on weekends.".to_string(),
            &[Field::Date],
        );
    }

    RuleCheck::Passed
}

fn find_conflicts(slot: &ProposedSlot, appointments: &[Appointment]) -> Vec<SlotConflict> {
    let slot_date = slot.local_date();
    let start = slot.start_utc();
    let end = slot.end_utc();

    appointments
        .iter()
        .filter(|a| a.is_active())
        .filter(|a| Some(a.appointment_id) != slot.exclude_appointment_id)
        .filter_map(|a| {
            if a.guidance_staff_id == slot.counselor_id && a.local_date() == slot_date {
                Some(SlotConflict::SameCounselorSameDay {
                    appointment_id: a.appointment_id,
                    date: slot_date,
                })
            } else if start < a.end_date && end > a.scheduled_date {
                Some(SlotConflict::TimeOverlap {
                    appointment_id: a.appointment_id,
                    counselor_name: a.guidance_staff_name.clone(),
                    start: a.scheduled_date,
                    end: a.end_date,
                })
            } else {
                None
            }
        })
        .collect()
}

fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{}:00 AM", hour),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}

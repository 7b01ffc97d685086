use crate::models::appointment::Appointment;
use crate::models::blocked_interval::{blocked_date_set, BlockedInterval};
use crate::models::slot::ProposedSlot;
use crate::services::slot_validator::{assess_slot, BookingFlow, BookingRules, SlotAssessment};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// Handed out when a fetch starts; the matching apply call is ignored unless
/// it carries the latest token. This is the "ignore late-arriving responses"
/// discipline for a closed or re-driven form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Clone)]
enum CacheState<T> {
    Empty,
    Loading,
    Ready(T),
}

#[derive(Debug, Clone)]
struct Cache<T> {
    generation: u64,
    state: CacheState<T>,
}

impl<T> Cache<T> {
    fn new() -> Self {
        Self {
            generation: 0,
            state: CacheState::Empty,
        }
    }

    fn begin_fetch(&mut self) -> FetchToken {
        self.generation += 1;
        // Stale data must not validate a slot while a refresh is in flight.
        self.state = CacheState::Loading;
        FetchToken(self.generation)
    }

    fn fulfill(&mut self, token: FetchToken, value: T) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.state = CacheState::Ready(value);
        true
    }

    fn value(&self) -> Option<&T> {
        match &self.state {
            CacheState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// What the form may do right now.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// No slot composed yet.
    Incomplete,
    /// A fetch is outstanding; the slot is provisionally unvalidated and
    /// submission stays disabled.
    AwaitingData,
    Assessed(SlotAssessment),
}

/// One booking or reschedule form. Holds the proposed slot plus immutable
/// snapshots of the two fetched inputs, and derives a fresh assessment on
/// demand instead of hand-synchronizing result flags.
#[derive(Debug, Clone)]
pub struct BookingSession {
    flow: BookingFlow,
    rules: BookingRules,
    slot: Option<ProposedSlot>,
    blocked_dates: Cache<HashSet<NaiveDate>>,
    appointments: Cache<Vec<Appointment>>,
}

impl BookingSession {
    pub fn new(flow: BookingFlow) -> Self {
        Self::with_rules(flow, BookingRules::default())
    }

    pub fn with_rules(flow: BookingFlow, rules: BookingRules) -> Self {
        Self {
            flow,
            rules,
            slot: None,
            blocked_dates: Cache::new(),
            appointments: Cache::new(),
        }
    }

    pub fn set_slot(&mut self, slot: ProposedSlot) {
        self.slot = Some(slot);
    }

    pub fn clear_slot(&mut self) {
        self.slot = None;
    }

    pub fn begin_blocked_dates_fetch(&mut self) -> FetchToken {
        self.blocked_dates.begin_fetch()
    }

    /// Returns false when the response arrived for a superseded fetch and
    /// was discarded.
    pub fn apply_blocked_intervals(
        &mut self,
        token: FetchToken,
        intervals: &[BlockedInterval],
    ) -> bool {
        let applied = self.blocked_dates.fulfill(token, blocked_date_set(intervals));
        if !applied {
            tracing::debug!("Dropping stale blocked-dates response");
        }
        applied
    }

    pub fn begin_appointments_fetch(&mut self) -> FetchToken {
        self.appointments.begin_fetch()
    }

    pub fn apply_appointments(&mut self, token: FetchToken, appointments: Vec<Appointment>) -> bool {
        let applied = self.appointments.fulfill(token, appointments);
        if !applied {
            tracing::debug!("Dropping stale appointment-list response");
        }
        applied
    }

    /// Recompute the assessment from current inputs. Call after every slot
    /// edit and every cache update; nothing here is cached between calls.
    pub fn evaluate(&self, now: DateTime<Utc>) -> SessionStatus {
        let Some(slot) = &self.slot else {
            return SessionStatus::Incomplete;
        };
        let (Some(blocked), Some(appointments)) =
            (self.blocked_dates.value(), self.appointments.value())
        else {
            return SessionStatus::AwaitingData;
        };
        SessionStatus::Assessed(assess_slot(
            slot,
            blocked,
            appointments,
            now,
            &self.flow,
            &self.rules,
        ))
    }

    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        matches!(self.evaluate(now), SessionStatus::Assessed(a) if a.is_bookable())
    }
}

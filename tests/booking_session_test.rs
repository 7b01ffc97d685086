use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use guidance_client::models::appointment::{Appointment, AppointmentStatus};
use guidance_client::models::blocked_interval::BlockedInterval;
use guidance_client::models::slot::ProposedSlot;
use guidance_client::services::booking_session::{BookingSession, SessionStatus};
use guidance_client::services::slot_validator::BookingFlow;
use guidance_client::utils::time;
use uuid::Uuid;

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
    time::local_datetime(
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap(),
    )
    .unwrap()
}

// Monday 2025-06-02, noon Manila.
fn fixed_now() -> DateTime<Utc> {
    local(2025, 6, 2, 12, 0).with_timezone(&Utc)
}

fn weekday_slot(counselor: Uuid) -> ProposedSlot {
    ProposedSlot::new(local(2025, 6, 9, 9, 0), local(2025, 6, 9, 10, 0), counselor)
}

fn full_day_block(y: i32, mo: u32, d: u32) -> BlockedInterval {
    BlockedInterval {
        scheduled_date: local(y, mo, d, 0, 0).with_timezone(&Utc),
        end_date: None,
    }
}

#[test]
fn no_slot_means_incomplete() {
    let mut session = BookingSession::new(BookingFlow::New);
    assert_eq!(session.evaluate(fixed_now()), SessionStatus::Incomplete);

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    session.apply_blocked_intervals(blocked, &[]);
    session.apply_appointments(appts, vec![]);
    assert_eq!(session.evaluate(fixed_now()), SessionStatus::Incomplete);
}

#[test]
fn submission_disabled_while_fetch_outstanding() {
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(Uuid::new_v4()));

    let blocked = session.begin_blocked_dates_fetch();
    let _appts = session.begin_appointments_fetch();
    session.apply_blocked_intervals(blocked, &[]);

    // Appointment list still in flight.
    assert_eq!(session.evaluate(fixed_now()), SessionStatus::AwaitingData);
    assert!(!session.can_submit(fixed_now()));
}

#[test]
fn ready_caches_enable_submission_for_a_clean_slot() {
    let counselor = Uuid::new_v4();
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(counselor));

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    assert!(session.apply_blocked_intervals(blocked, &[full_day_block(2025, 6, 10)]));
    assert!(session.apply_appointments(appts, vec![]));

    assert!(session.can_submit(fixed_now()));
}

#[test]
fn blocked_cache_rejects_the_chosen_date() {
    let counselor = Uuid::new_v4();
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(counselor));

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    session.apply_blocked_intervals(blocked, &[full_day_block(2025, 6, 9)]);
    session.apply_appointments(appts, vec![]);

    assert!(!session.can_submit(fixed_now()));
    match session.evaluate(fixed_now()) {
        SessionStatus::Assessed(assessment) => {
            assert!(assessment.primary_message().is_some());
        }
        other => panic!("expected an assessment, got {:?}", other),
    }
}

#[test]
fn sub_day_blocks_do_not_close_the_date() {
    let counselor = Uuid::new_v4();
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(counselor));

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    let partial = BlockedInterval {
        scheduled_date: local(2025, 6, 9, 13, 0).with_timezone(&Utc),
        end_date: Some(local(2025, 6, 9, 15, 0).with_timezone(&Utc)),
    };
    session.apply_blocked_intervals(blocked, &[partial]);
    session.apply_appointments(appts, vec![]);

    assert!(session.can_submit(fixed_now()));
}

#[test]
fn stale_fetch_response_is_discarded() {
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(Uuid::new_v4()));

    let first = session.begin_appointments_fetch();
    let second = session.begin_appointments_fetch();

    assert!(!session.apply_appointments(first, vec![]));
    assert_eq!(session.evaluate(fixed_now()), SessionStatus::AwaitingData);

    assert!(session.apply_appointments(second, vec![]));
    let blocked = session.begin_blocked_dates_fetch();
    session.apply_blocked_intervals(blocked, &[]);
    assert!(session.can_submit(fixed_now()));
}

#[test]
fn refetch_reverts_to_provisionally_unvalidated() {
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(Uuid::new_v4()));

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    session.apply_blocked_intervals(blocked, &[]);
    session.apply_appointments(appts, vec![]);
    assert!(session.can_submit(fixed_now()));

    // A refresh kicks off; the old snapshot no longer validates anything.
    let _refresh = session.begin_appointments_fetch();
    assert_eq!(session.evaluate(fixed_now()), SessionStatus::AwaitingData);
    assert!(!session.can_submit(fixed_now()));
}

#[test]
fn cache_update_surfaces_a_new_conflict() {
    let counselor = Uuid::new_v4();
    let mut session = BookingSession::new(BookingFlow::New);
    session.set_slot(weekday_slot(counselor));

    let blocked = session.begin_blocked_dates_fetch();
    let appts = session.begin_appointments_fetch();
    session.apply_blocked_intervals(blocked, &[]);
    session.apply_appointments(appts, vec![]);
    assert!(session.can_submit(fixed_now()));

    let existing = Appointment {
        appointment_id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        guidance_staff_id: counselor,
        guidance_staff_name: None,
        scheduled_date: local(2025, 6, 9, 13, 0).with_timezone(&Utc),
        end_date: local(2025, 6, 9, 14, 0).with_timezone(&Utc),
        status: AppointmentStatus::Scheduled,
        appointment_type: None,
        notes: None,
        created_at: None,
        updated_at: None,
    };
    let refresh = session.begin_appointments_fetch();
    session.apply_appointments(refresh, vec![existing]);

    assert!(!session.can_submit(fixed_now()));
}

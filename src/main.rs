use chrono::Duration;
use guidance_client::config::{get_config, init_config};
use guidance_client::error::Error;
use guidance_client::models::slot::ProposedSlot;
use guidance_client::services::booking_session::{BookingSession, SessionStatus};
use guidance_client::services::slot_validator::BookingFlow;
use guidance_client::utils::time;
use tracing::info;

/// Smoke tool for the booking core: fetches the configured student's
/// appointments and counselor's blocked dates, then runs one validation pass
/// over the next free-looking weekday slot.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let student_id = config
        .student_id
        .ok_or_else(|| Error::Config("STUDENT_ID is required".to_string()))?;
    let counselor_id = config
        .counselor_id
        .ok_or_else(|| Error::Config("COUNSELOR_ID is required".to_string()))?;

    let state = guidance_client::ClientState::new();

    let mut session = BookingSession::new(BookingFlow::New);
    let blocked_token = session.begin_blocked_dates_fetch();
    let appointments_token = session.begin_appointments_fetch();

    let blocked = state
        .appointment_service
        .list_blocked_intervals(counselor_id)
        .await?;
    info!(count = blocked.len(), "Fetched blocked intervals");
    session.apply_blocked_intervals(blocked_token, &blocked);

    let appointments = state.appointment_service.list_appointments(student_id).await?;
    info!(count = appointments.len(), "Fetched appointments");
    session.apply_appointments(appointments_token, appointments);

    let now = time::now();
    let mut date = time::local_date(now) + Duration::days(1);
    while time::is_weekend(date) {
        date = date + Duration::days(1);
    }
    let start = time::local_datetime(date.and_hms_opt(9, 0, 0).expect("valid wall-clock time"))?;
    let end = start + Duration::hours(1);
    session.set_slot(ProposedSlot::new(start, end, counselor_id));

    match session.evaluate(now) {
        SessionStatus::Assessed(assessment) if assessment.is_bookable() => {
            info!(%start, %end, "Slot is bookable");
        }
        SessionStatus::Assessed(assessment) => {
            info!(
                reason = %assessment.primary_message().unwrap_or_default(),
                "Slot rejected"
            );
        }
        other => info!(?other, "Session not ready"),
    }

    Ok(())
}

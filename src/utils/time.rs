use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// All business rules are evaluated in Philippine time, regardless of the
/// device timezone. The region has no daylight saving transitions.
pub const BUSINESS_TZ: Tz = chrono_tz::Asia::Manila;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_local(dt: DateTime<Utc>) -> DateTime<Tz> {
    dt.with_timezone(&BUSINESS_TZ)
}

/// Calendar date of a UTC instant in the business timezone.
pub fn local_date(dt: DateTime<Utc>) -> NaiveDate {
    to_local(dt).date_naive()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Interpret a wall-clock date/time as a business-timezone instant.
pub fn local_datetime(naive: NaiveDateTime) -> anyhow::Result<DateTime<Tz>> {
    BUSINESS_TZ
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time: {}", naive))
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

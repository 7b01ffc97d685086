use crate::utils::time;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A counselor availability block. A missing `end_date` marks the whole
/// calendar day (business timezone) as unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedInterval {
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl BlockedInterval {
    pub fn is_full_day(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Collapse a counselor's blocks into the set of fully blocked local dates.
/// Sub-day blocks do not close the whole date and are skipped here; the
/// overlap check against the counselor's own calendar is server-side.
pub fn blocked_date_set(intervals: &[BlockedInterval]) -> HashSet<NaiveDate> {
    intervals
        .iter()
        .filter(|b| b.is_full_day())
        .map(|b| time::local_date(b.scheduled_date))
        .collect()
}

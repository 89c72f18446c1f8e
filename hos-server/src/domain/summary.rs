//! Route summary entries.

use super::time::format_clock;

/// A human-readable line in the trip's route summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummaryEntry {
    /// 1-based log day.
    pub day: u32,
    /// Clock time the entry was emitted at, `HH:MM`.
    pub time: String,
    pub activity: String,
    pub location: String,
}

impl RouteSummaryEntry {
    /// Create an entry stamped at the given hour offset.
    pub fn new(
        day: u32,
        hour: f64,
        activity: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            day,
            time: format_clock(hour),
            activity: activity.into(),
            location: location.into(),
        }
    }
}

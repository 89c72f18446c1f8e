//! Log clock handling.
//!
//! The simulator keeps time as fractional hours since midnight of the current
//! log day. This module renders those offsets as clock strings.

/// Format an hour offset as a zero-padded `HH:MM` clock string.
///
/// Rounds to the nearest minute. Offsets past 24 hours keep counting
/// (`25:30`) since rest segments may run over midnight.
///
/// # Examples
///
/// ```
/// use hos_server::domain::format_clock;
///
/// assert_eq!(format_clock(0.0), "00:00");
/// assert_eq!(format_clock(10.5), "10:30");
/// assert_eq!(format_clock(5.0 + 40.0 / 60.0), "05:40");
/// ```
pub fn format_clock(hours: f64) -> String {
    let total_mins = (hours.max(0.0) * 60.0).round() as u64;
    format!("{:02}:{:02}", total_mins / 60, total_mins % 60)
}

//! Per-day log sheets.
//!
//! Groups a simulated trip into the daily sheets a driver would file: the
//! day's segments, the remarks section, and hours per duty status.

use chrono::{Days, NaiveDate};

use crate::domain::{DutySegment, DutyStatus, format_clock};

use super::simulate::SimulationResult;

/// Hours per duty status on one sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DutyTotals {
    pub off: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl DutyTotals {
    fn add(&mut self, status: DutyStatus, hours: f64) {
        match status {
            DutyStatus::Off => self.off += hours,
            DutyStatus::SleeperBerth => self.sleeper_berth += hours,
            DutyStatus::Driving => self.driving += hours,
            DutyStatus::OnDuty => self.on_duty += hours,
        }
    }

    /// Hours logged in `status`.
    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::Off => self.off,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    /// Hours across all statuses.
    pub fn total(&self) -> f64 {
        self.off + self.sleeper_berth + self.driving + self.on_duty
    }
}

/// A line in the remarks section of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remark {
    /// Start time, `HH:MM`.
    pub time: String,
    pub location: String,
    pub remarks: String,
}

/// One day's log sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    /// 1-based log day.
    pub day: u32,

    /// Calendar date, when the trip start date is known.
    pub date: Option<NaiveDate>,

    /// Segments attributed to this day, in log order.
    pub segments: Vec<DutySegment>,

    /// Work, breaks, restarts and the end of the trip.
    pub remarks: Vec<Remark>,

    /// Hours per status, clipped to the 24-hour chart.
    pub totals: DutyTotals,
}

/// Split a simulation result into daily sheets.
///
/// Rest running past midnight is charted on the day it started and clipped
/// at hour 24 in the totals.
pub fn daily_logs(result: &SimulationResult, start_date: Option<NaiveDate>) -> Vec<DailyLog> {
    (1..=result.total_days)
        .map(|day| {
            let segments: Vec<DutySegment> = result.segments_for_day(day).cloned().collect();

            let remarks = segments
                .iter()
                .filter(|s| s.category.is_remark())
                .map(|s| Remark {
                    time: format_clock(s.start_hour),
                    location: s.location.clone(),
                    remarks: s.remarks.clone(),
                })
                .collect();

            let mut totals = DutyTotals::default();
            for segment in &segments {
                totals.add(segment.status, segment.charted_duration());
            }

            let date =
                start_date.and_then(|d| d.checked_add_days(Days::new(u64::from(day - 1))));

            DailyLog {
                day,
                date,
                segments,
                remarks,
                totals,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::simulate;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn one_sheet_per_day() {
        let result = simulate(1500.0, 30.0).unwrap();
        let sheets = daily_logs(&result, None);

        assert_eq!(sheets.len(), 3);
        let days: Vec<u32> = sheets.iter().map(|s| s.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert!(sheets.iter().all(|s| s.date.is_none()));

        let total_segments: usize = sheets.iter().map(|s| s.segments.len()).sum();
        assert_eq!(total_segments, result.segments.len());
    }

    #[test]
    fn every_sheet_covers_the_day() {
        let result = simulate(1500.0, 30.0).unwrap();
        for sheet in daily_logs(&result, None) {
            assert!((sheet.totals.total() - 24.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn first_day_totals() {
        let result = simulate(1500.0, 30.0).unwrap();
        let sheet = &daily_logs(&result, None)[0];

        assert!((sheet.totals.on_duty - 2.0).abs() < TOLERANCE);
        assert!((sheet.totals.driving - 11.0).abs() < TOLERANCE);
        assert!((sheet.totals.off - 0.5).abs() < TOLERANCE);
        assert!((sheet.totals.sleeper_berth - 10.5).abs() < TOLERANCE);
        assert_eq!(sheet.totals.get(DutyStatus::Driving), sheet.totals.driving);
    }

    #[test]
    fn remarks_skip_driving_and_rest() {
        let result = simulate(1500.0, 30.0).unwrap();
        let sheet = &daily_logs(&result, None)[0];

        let remarks: Vec<&str> = sheet.remarks.iter().map(|r| r.remarks.as_str()).collect();
        assert_eq!(
            remarks,
            vec![
                "Pre-Trip Inspection / Initial Hookup",
                "Loading/Pickup",
                "30-Minute Rest Break",
            ]
        );
        assert_eq!(sheet.remarks[0].time, "00:00");
        assert_eq!(sheet.remarks[2].time, "10:00");
        assert_eq!(sheet.remarks[2].location, "Roadside Rest");
    }

    #[test]
    fn dates_follow_start_date() {
        let result = simulate(1500.0, 30.0).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let sheets = daily_logs(&result, Some(start));

        assert_eq!(sheets[0].date, Some(start));
        assert_eq!(sheets[1].date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(sheets[2].date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn restart_clipped_on_chart() {
        let result = simulate(50.0, 69.0).unwrap();
        let sheet = &daily_logs(&result, None)[0];

        assert!((sheet.totals.on_duty - 2.0).abs() < TOLERANCE);
        assert!((sheet.totals.sleeper_berth - 22.0).abs() < TOLERANCE);
        assert_eq!(sheet.remarks.last().unwrap().remarks, "34-Hour Restart");
    }
}

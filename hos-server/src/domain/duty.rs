//! Duty statuses and the segments of a driver's log.

use std::fmt;

/// One of the four duty statuses recorded on a driver's daily log.
///
/// # Examples
///
/// ```
/// use hos_server::domain::DutyStatus;
///
/// assert_eq!(DutyStatus::Driving.duty_line(), 3);
/// assert_eq!(DutyStatus::SleeperBerth.code(), "SB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyStatus {
    /// Off duty (line 1).
    Off,
    /// Sleeper berth (line 2).
    SleeperBerth,
    /// Driving (line 3).
    Driving,
    /// On duty, not driving (line 4).
    OnDuty,
}

impl DutyStatus {
    /// All statuses in chart order, top row first.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::Off,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// The chart row this status is drawn on (1-4).
    pub fn duty_line(self) -> u8 {
        match self {
            DutyStatus::Off => 1,
            DutyStatus::SleeperBerth => 2,
            DutyStatus::Driving => 3,
            DutyStatus::OnDuty => 4,
        }
    }

    /// Short log code, as used on paper logs and on the wire.
    pub fn code(self) -> &'static str {
        match self {
            DutyStatus::Off => "OFF",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::Driving => "D",
            DutyStatus::OnDuty => "ON",
        }
    }

    /// Whether time in this status counts toward on-duty limits.
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What kind of event a segment records.
///
/// Used to decide which segments show up as remarks on the log sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentCategory {
    Drive,
    Work,
    Break,
    Rest,
    Restart,
    End,
}

impl SegmentCategory {
    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentCategory::Drive => "DRIVE",
            SegmentCategory::Work => "WORK",
            SegmentCategory::Break => "BREAK",
            SegmentCategory::Rest => "REST",
            SegmentCategory::Restart => "RESTART",
            SegmentCategory::End => "END",
        }
    }

    /// Whether segments of this category are listed in the log sheet remarks.
    pub fn is_remark(self) -> bool {
        matches!(
            self,
            SegmentCategory::Work
                | SegmentCategory::Break
                | SegmentCategory::Restart
                | SegmentCategory::End
        )
    }
}

impl fmt::Display for SegmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed stretch of time in a single duty status.
///
/// Hours are offsets from midnight of `day`. A rest segment may run past
/// hour 24; it is still attributed to the day it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct DutySegment {
    /// 1-based log day.
    pub day: u32,
    pub start_hour: f64,
    pub end_hour: f64,
    pub status: DutyStatus,
    pub category: SegmentCategory,
    pub location: String,
    pub remarks: String,
}

impl DutySegment {
    /// Length of the segment in hours.
    pub fn duration(&self) -> f64 {
        self.end_hour - self.start_hour
    }

    /// The chart row for this segment's status.
    pub fn duty_line(&self) -> u8 {
        self.status.duty_line()
    }

    /// Portion of the segment that falls on the 0-24 chart axis.
    pub fn charted_duration(&self) -> f64 {
        (self.end_hour.min(24.0) - self.start_hour.min(24.0)).max(0.0)
    }
}

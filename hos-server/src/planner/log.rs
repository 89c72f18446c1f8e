//! Log emitter and day advancer.
//!
//! Appends duty segments and route summary entries and is the only code
//! that writes to [`SimulationState`].

use tracing::trace;

use crate::domain::{DutySegment, DutyStatus, RouteSummaryEntry, SegmentCategory};

use super::config::HosConfig;
use super::simulate::SimulationResult;
use super::state::SimulationState;

/// Render an hour count as whole minutes ("30").
fn minutes_label(hours: f64) -> String {
    format!("{}", (hours * 60.0).round() as i64)
}

/// Reason text for a day advance caused by a driving or window limit.
pub(crate) fn limit_reason(limit: f64, name: &str) -> String {
    format!("Reached {limit}-Hour {name}")
}

/// Records the trip as it is simulated.
pub(crate) struct LogEmitter<'a> {
    config: &'a HosConfig,
    state: SimulationState,
    segments: Vec<DutySegment>,
    summary: Vec<RouteSummaryEntry>,
}

impl<'a> LogEmitter<'a> {
    pub(crate) fn new(config: &'a HosConfig, trip_hours: f64, initial_cycle_hours: f64) -> Self {
        Self {
            config,
            state: SimulationState::new(trip_hours, initial_cycle_hours),
            segments: Vec::new(),
            summary: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Append a segment at the current clock time and account for it.
    ///
    /// Zero-length segments are dropped.
    fn commit(
        &mut self,
        status: DutyStatus,
        category: SegmentCategory,
        hours: f64,
        location: &str,
        remarks: &str,
    ) {
        if hours <= 0.0 {
            return;
        }
        let start = self.state.time_of_day();
        trace!(
            day = self.state.current_day(),
            start,
            hours,
            status = %status,
            category = %category,
            "committing segment"
        );
        self.segments.push(DutySegment {
            day: self.state.current_day(),
            start_hour: start,
            end_hour: start + hours,
            status,
            category,
            location: location.to_string(),
            remarks: remarks.to_string(),
        });
        self.state.accrue(status, hours);
    }

    /// Add a route summary line stamped at the current clock time.
    fn note(&mut self, activity: impl Into<String>, location: &str) {
        self.summary.push(RouteSummaryEntry::new(
            self.state.current_day(),
            self.state.time_of_day(),
            activity,
            location,
        ));
    }

    /// On-duty work, noted in the summary once it is done.
    fn work(&mut self, hours: f64, location: &str, remarks: &str, activity: &str, at: &str) {
        if hours <= 0.0 {
            return;
        }
        self.commit(
            DutyStatus::OnDuty,
            SegmentCategory::Work,
            hours,
            location,
            remarks,
        );
        self.note(activity, at);
    }

    pub(crate) fn pre_trip(&mut self) {
        self.work(
            self.config.pre_trip_hours,
            "Current Location",
            "Pre-Trip Inspection / Initial Hookup",
            "Pre-Trip & Hookup",
            "Start Location",
        );
    }

    pub(crate) fn pickup(&mut self) {
        self.work(
            self.config.pickup_hours,
            "Pickup Location",
            "Loading/Pickup",
            "Loading/Pickup",
            "Pickup Location",
        );
    }

    pub(crate) fn dropoff(&mut self) {
        self.work(
            self.config.dropoff_hours,
            "Dropoff Location",
            "Unloading/Dropoff",
            "Unloading/Dropoff",
            "Dropoff Location",
        );
    }

    pub(crate) fn fuel(&mut self) {
        let activity = format!(
            "Fueling Stop ({} mins)",
            minutes_label(self.config.fuel_duration_hours)
        );
        self.work(
            self.config.fuel_duration_hours,
            "Fuel Station",
            "Fueling",
            &activity,
            "Fuel Station",
        );
    }

    /// Drive for `hours`, covering `miles`.
    pub(crate) fn drive(&mut self, hours: f64, miles: f64, remarks: &str) {
        self.commit(
            DutyStatus::Driving,
            SegmentCategory::Drive,
            hours,
            "On Route",
            remarks,
        );
        self.state.add_miles(miles);
        self.note(format!("Driving {} miles", miles.round() as i64), "On Route");
    }

    /// Off-duty break that clears the driving-since-break counter.
    pub(crate) fn take_break(&mut self) {
        let minutes = minutes_label(self.config.break_duration_hours);
        self.commit(
            DutyStatus::Off,
            SegmentCategory::Break,
            self.config.break_duration_hours,
            "Roadside Rest",
            &format!("{minutes}-Minute Rest Break"),
        );
        self.state.reset_break();
        self.note(format!("{minutes}-Minute Break"), "Roadside Rest");
    }

    /// Rest out the current day and start the next one.
    ///
    /// The rest runs to midnight but is never shorter than the daily rest
    /// requirement. If the clock is already past midnight (after a restart)
    /// no extra rest is logged.
    pub(crate) fn advance_day(&mut self, reason: &str) {
        let now = self.state.time_of_day();
        if now < 24.0 {
            let rest = self.config.daily_rest_hours.max(24.0 - now);
            self.commit(
                DutyStatus::SleeperBerth,
                SegmentCategory::Rest,
                rest,
                "Rest Location",
                reason,
            );
        }
        self.state.roll_day();
    }

    /// Take a cycle restart, then start the next day.
    ///
    /// The restart finishes the current log day and then covers the full
    /// restart period.
    pub(crate) fn restart(&mut self) {
        let restart_hours = self.config.restart_hours;
        self.note(
            format!("{}-Hour Cycle Limit Reached", self.config.max_cycle_hours),
            "Terminal/Home",
        );
        let rest = self.config.restart_hours + (24.0 - self.state.time_of_day()).max(0.0);
        self.commit(
            DutyStatus::SleeperBerth,
            SegmentCategory::Restart,
            rest,
            "Terminal/Home",
            &format!("{restart_hours}-Hour Restart"),
        );
        self.state.reset_cycle();
        self.advance_day(&format!("{restart_hours}-Hour Restart Completed"));
    }

    /// Post-trip rest closing out the final day.
    pub(crate) fn end_trip(&mut self) {
        let rest =
            self.config.post_trip_rest_hours + (24.0 - self.state.time_of_day()).max(0.0);
        self.commit(
            DutyStatus::SleeperBerth,
            SegmentCategory::End,
            rest,
            "Home/Terminal",
            "Final Post-Trip Inspection and Rest",
        );
    }

    pub(crate) fn finish(self) -> SimulationResult {
        SimulationResult {
            total_days: self.state.current_day(),
            final_cycle_hours_used: self.state.cycle_hours_used(),
            segments: self.segments,
            route_summary: self.summary,
        }
    }
}

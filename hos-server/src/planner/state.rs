//! Simulation clock and duty accumulators.

use crate::domain::DutyStatus;

/// Tolerance for comparing accumulated hours against limits.
pub(crate) const EPSILON: f64 = 1e-9;

/// Whether an accumulated value has reached a limit, within tolerance.
pub(crate) fn reached(value: f64, limit: f64) -> bool {
    value >= limit - EPSILON
}

/// Mutable state of a single simulation run.
///
/// Other planner components read this through the accessors. Only the log
/// emitter mutates it, and only while committing a segment or rolling the
/// day over, so every change is paired with a logged entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    remaining_trip_hours: f64,
    miles_driven: f64,
    cycle_hours_used: f64,
    current_day: u32,
    time_of_day: f64,
    driving_since_rest: f64,
    driving_since_break: f64,
    daily_driving: f64,
    daily_on_duty: f64,
}

impl SimulationState {
    /// State at the start of day 1, before any work is logged.
    pub(crate) fn new(trip_hours: f64, initial_cycle_hours: f64) -> Self {
        Self {
            remaining_trip_hours: trip_hours,
            miles_driven: 0.0,
            cycle_hours_used: initial_cycle_hours,
            current_day: 1,
            time_of_day: 0.0,
            driving_since_rest: 0.0,
            driving_since_break: 0.0,
            daily_driving: 0.0,
            daily_on_duty: 0.0,
        }
    }

    pub fn remaining_trip_hours(&self) -> f64 {
        self.remaining_trip_hours
    }

    pub fn miles_driven(&self) -> f64 {
        self.miles_driven
    }

    pub fn cycle_hours_used(&self) -> f64 {
        self.cycle_hours_used
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn time_of_day(&self) -> f64 {
        self.time_of_day
    }

    /// Driving since the last 10-hour rest.
    pub fn driving_since_rest(&self) -> f64 {
        self.driving_since_rest
    }

    pub fn driving_since_break(&self) -> f64 {
        self.driving_since_break
    }

    pub fn daily_driving(&self) -> f64 {
        self.daily_driving
    }

    pub fn daily_on_duty(&self) -> f64 {
        self.daily_on_duty
    }

    /// Whether any trip driving is left.
    pub fn trip_remaining(&self) -> bool {
        self.remaining_trip_hours > EPSILON
    }

    /// Account for `hours` spent in `status` and move the clock forward.
    pub(super) fn accrue(&mut self, status: DutyStatus, hours: f64) {
        match status {
            DutyStatus::Driving => {
                self.remaining_trip_hours -= hours;
                self.driving_since_rest += hours;
                self.driving_since_break += hours;
                self.daily_driving += hours;
                self.daily_on_duty += hours;
                self.cycle_hours_used += hours;
            }
            DutyStatus::OnDuty => {
                self.daily_on_duty += hours;
                self.cycle_hours_used += hours;
            }
            DutyStatus::Off | DutyStatus::SleeperBerth => {}
        }
        self.time_of_day += hours;
    }

    pub(super) fn add_miles(&mut self, miles: f64) {
        self.miles_driven += miles;
    }

    pub(super) fn reset_break(&mut self) {
        self.driving_since_break = 0.0;
    }

    pub(super) fn reset_cycle(&mut self) {
        self.cycle_hours_used = 0.0;
    }

    /// Start the next log day after a qualifying rest.
    pub(super) fn roll_day(&mut self) {
        self.current_day += 1;
        self.time_of_day = 0.0;
        self.driving_since_rest = 0.0;
        self.driving_since_break = 0.0;
        self.daily_driving = 0.0;
        self.daily_on_duty = 0.0;
    }
}

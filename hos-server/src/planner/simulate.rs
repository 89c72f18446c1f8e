//! Hours-of-service trip simulation.
//!
//! Runs the trip forward in time: opening work, then alternately driving as
//! far as every limit allows and resolving whatever blocks further driving,
//! then the dropoff and a closing rest.

use tracing::{debug, trace};

use crate::domain::{DutySegment, DutyStatus, RouteSummaryEntry};

use super::config::HosConfig;
use super::fuel::{self, FuelPlan};
use super::limits;
use super::log::LogEmitter;
use super::resolver::Blocker;
use super::state::EPSILON;

/// Error from a simulation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Rejected before simulating; no partial result exists.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The main loop stopped making progress.
    #[error("simulation did not terminate after {iterations} iterations: {detail}")]
    NonTerminating { iterations: usize, detail: String },
}

/// A trip to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Trip length in miles.
    pub trip_distance_miles: f64,

    /// Cycle hours already used before the trip starts.
    pub initial_cycle_hours: f64,
}

impl TripRequest {
    /// Create a new trip request.
    pub fn new(trip_distance_miles: f64, initial_cycle_hours: f64) -> Self {
        Self {
            trip_distance_miles,
            initial_cycle_hours,
        }
    }

    /// Validate the trip request.
    ///
    /// Cycle hours at or above the cycle budget are accepted; the run then
    /// starts with a restart.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.trip_distance_miles.is_finite() || self.trip_distance_miles <= 0.0 {
            return Err(SimulationError::InvalidInput(
                "trip distance must be a positive number of miles".to_string(),
            ));
        }

        if !self.initial_cycle_hours.is_finite() || self.initial_cycle_hours < 0.0 {
            return Err(SimulationError::InvalidInput(
                "cycle hours used must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Duty segments in the order they were logged.
    pub segments: Vec<DutySegment>,

    /// Route summary lines in the order they were emitted.
    pub route_summary: Vec<RouteSummaryEntry>,

    /// Number of log days the trip spans.
    pub total_days: u32,

    /// Cycle hours used once the trip is over.
    pub final_cycle_hours_used: f64,
}

impl SimulationResult {
    /// Segments attributed to `day`, in log order.
    pub fn segments_for_day(&self, day: u32) -> impl Iterator<Item = &DutySegment> {
        self.segments.iter().filter(move |s| s.day == day)
    }

    /// Total hours logged in `status`, including rest past midnight.
    pub fn total_hours(&self, status: DutyStatus) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.status == status)
            .map(DutySegment::duration)
            .sum()
    }
}

/// Trip simulator.
pub struct Simulator<'a> {
    config: &'a HosConfig,
}

impl<'a> Simulator<'a> {
    /// Create a new simulator.
    pub fn new(config: &'a HosConfig) -> Self {
        Self { config }
    }

    /// Simulate a trip.
    pub fn run(&self, request: &TripRequest) -> Result<SimulationResult, SimulationError> {
        self.config
            .validate()
            .map_err(SimulationError::InvalidInput)?;
        request.validate()?;

        let config = self.config;
        let trip_hours = config.hours_for_miles(request.trip_distance_miles);
        let mut log = LogEmitter::new(config, trip_hours, request.initial_cycle_hours);

        log.pre_trip();
        log.pickup();

        let mut iterations = 0;
        while log.state().trip_remaining() {
            iterations += 1;
            if iterations > config.max_iterations {
                return Err(SimulationError::NonTerminating {
                    iterations,
                    detail: format!(
                        "{:.3} driving hours left on day {}",
                        log.state().remaining_trip_hours(),
                        log.state().current_day()
                    ),
                });
            }

            let drivable = limits::drivable(log.state(), config);
            if drivable.is_blocked() {
                let blocker = Blocker::classify(log.state(), config);
                debug!(
                    day = log.state().current_day(),
                    time = log.state().time_of_day(),
                    binding = %drivable.binding,
                    blocker = %blocker,
                    "driving blocked"
                );

                let before = log.state().clone();
                blocker.resolve(&mut log, config);
                if *log.state() == before {
                    return Err(SimulationError::NonTerminating {
                        iterations,
                        detail: format!("resolving {blocker} left the state unchanged"),
                    });
                }
                continue;
            }

            trace!(hours = drivable.hours, binding = %drivable.binding, "drivable");
            match fuel::plan(drivable.hours, log.state(), config) {
                FuelPlan::Straight { hours, miles } => log.drive(hours, miles, "Driving"),
                FuelPlan::StopAt { hours, miles } => {
                    log.drive(hours, miles, "Driving to Fuel Stop");
                    log.fuel();
                }
            }
        }

        // The dropoff is on-duty work; rest first if it would not fit. The cycle carries over.
        let cycle_after = log.state().cycle_hours_used() + config.dropoff_hours;
        let clock_after = log.state().time_of_day() + config.dropoff_hours;
        let on_duty_after = log.state().daily_on_duty() + config.dropoff_hours;
        if cycle_after > config.max_cycle_hours + EPSILON
            || clock_after > config.max_window_hours + EPSILON
            || on_duty_after > config.max_window_hours + EPSILON
        {
            log.advance_day("Required Rest before Final Dropoff");
        }
        log.dropoff();
        log.end_trip();

        let result = log.finish();
        debug!(
            days = result.total_days,
            segments = result.segments.len(),
            iterations,
            final_cycle = result.final_cycle_hours_used,
            "simulation finished"
        );
        Ok(result)
    }
}

/// Simulate a trip under the default rule set.
///
/// # Examples
///
/// ```
/// use hos_server::planner::simulate;
///
/// let result = simulate(500.0, 0.0).unwrap();
/// assert_eq!(result.total_days, 1);
/// assert!(simulate(0.0, 0.0).is_err());
/// ```
pub fn simulate(
    trip_distance_miles: f64,
    initial_cycle_hours: f64,
) -> Result<SimulationResult, SimulationError> {
    let config = HosConfig::default();
    Simulator::new(&config).run(&TripRequest::new(trip_distance_miles, initial_cycle_hours))
}

#[cfg(test)]
#[path = "simulate_tests.rs"]
mod simulate_tests;

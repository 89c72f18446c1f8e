//! Fuel stop placement.
//!
//! Fuel stops fall on fixed mileage thresholds (every 1000 miles by
//! default). A drive that would carry the truck past a threshold is cut
//! short at the threshold so the stop can be logged there.

use super::config::HosConfig;
use super::state::{EPSILON, SimulationState};

/// How to carry out a proposed drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelPlan {
    /// Drive the whole segment without stopping.
    Straight { hours: f64, miles: f64 },

    /// Drive to the next threshold and refuel there.
    StopAt { hours: f64, miles: f64 },
}

/// Decide whether a drive of `hours` must be split for a fuel stop.
///
/// A threshold that coincides with the end of the trip does not get a stop.
pub fn plan(hours: f64, state: &SimulationState, config: &HosConfig) -> FuelPlan {
    let interval = config.fuel_interval_miles;
    let driven = state.miles_driven();
    let segment_miles = hours * config.avg_speed_mph;

    let crosses =
        ((driven + segment_miles + EPSILON) / interval).floor() > (driven / interval).floor();
    if !crosses {
        return FuelPlan::Straight {
            hours,
            miles: segment_miles,
        };
    }

    let miles_to_fuel = interval - driven.rem_euclid(interval);
    let trip_miles_left = state.remaining_trip_hours() * config.avg_speed_mph;
    if miles_to_fuel > segment_miles + EPSILON || miles_to_fuel >= trip_miles_left - EPSILON {
        return FuelPlan::Straight {
            hours,
            miles: segment_miles,
        };
    }

    FuelPlan::StopAt {
        hours: config.hours_for_miles(miles_to_fuel),
        miles: miles_to_fuel,
    }
}

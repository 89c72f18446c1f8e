//! Regulatory and trip parameters for the simulator.

/// Configuration parameters for a simulation run.
///
/// All durations are in hours. The default is the FMCSA rule set for a
/// property-carrying driver on the 70-hour/8-day cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HosConfig {
    /// Maximum driving hours between 10-hour rests.
    pub max_driving_hours: f64,

    /// Length of the on-duty window after coming on duty.
    /// No driving is allowed once the window has elapsed.
    pub max_window_hours: f64,

    /// On-duty budget of the rolling cycle.
    pub max_cycle_hours: f64,

    /// Minimum consecutive off-duty hours between duty days.
    pub daily_rest_hours: f64,

    /// Cumulative driving after which a break is due.
    pub break_after_driving_hours: f64,

    /// Length of the mandatory break.
    pub break_duration_hours: f64,

    /// Consecutive off-duty hours that reset the cycle.
    pub restart_hours: f64,

    /// Assumed average speed used to convert distance into driving time.
    pub avg_speed_mph: f64,

    /// Distance between fuel stops.
    pub fuel_interval_miles: f64,

    /// Length of a fuel stop (on duty).
    pub fuel_duration_hours: f64,

    /// Pre-trip inspection at the start of the trip (on duty).
    pub pre_trip_hours: f64,

    /// Loading at the pickup location (on duty).
    pub pickup_hours: f64,

    /// Unloading at the dropoff location (on duty).
    pub dropoff_hours: f64,

    /// Rest logged after the dropoff, on top of the rest of the final day.
    pub post_trip_rest_hours: f64,

    /// Hard cap on main loop iterations.
    pub max_iterations: usize,
}

impl HosConfig {
    /// Set the average speed.
    pub fn with_avg_speed(mut self, mph: f64) -> Self {
        self.avg_speed_mph = mph;
        self
    }

    /// Set the fuel interval.
    pub fn with_fuel_interval(mut self, miles: f64) -> Self {
        self.fuel_interval_miles = miles;
        self
    }

    /// Set the cycle budget.
    pub fn with_max_cycle(mut self, hours: f64) -> Self {
        self.max_cycle_hours = hours;
        self
    }

    /// Driving time needed to cover `miles` at the average speed.
    pub fn hours_for_miles(&self, miles: f64) -> f64 {
        miles / self.avg_speed_mph
    }

    /// Planning assumptions behind these parameters, for display.
    pub fn assumptions(&self) -> Vec<String> {
        vec![
            format!(
                "Driver Type: Property-Carrying, {}hrs/8-day cycle.",
                self.max_cycle_hours
            ),
            format!(
                "Speed: Average {} MPH for distance-to-time conversion.",
                self.avg_speed_mph
            ),
            format!(
                "Pickup/Dropoff: {} hour(s) On-Duty (Line 4) at pickup and {} at dropoff.",
                self.pickup_hours, self.dropoff_hours
            ),
            format!(
                "Fueling: {} minutes On-Duty every {} cumulative miles driven.",
                (self.fuel_duration_hours * 60.0).round(),
                self.fuel_interval_miles
            ),
            format!(
                "Breaks: {}-minute break is mandatory after {} cumulative driving hours, taken as Off-Duty (Line 1).",
                (self.break_duration_hours * 60.0).round(),
                self.break_after_driving_hours
            ),
            format!(
                "Rest: {} consecutive hours Sleeper Berth is enforced at the end of the {}-hour window or {} hours of driving.",
                self.daily_rest_hours, self.max_window_hours, self.max_driving_hours
            ),
            format!(
                "Pre-trip: {} hour(s) On-Duty for inspection and hookup before the first drive.",
                self.pre_trip_hours
            ),
            format!(
                "Cycle restart: {}-hour restart applied when the {}-hour cycle is exhausted.",
                self.restart_hours, self.max_cycle_hours
            ),
            "Fueling and break locations are approximated where mileage thresholds are crossed; real routes may vary.".to_string(),
            "This tool is a planner/simulator only and does not replace legal guidance or official ELD systems.".to_string(),
        ]
    }

    /// Check that every parameter is usable by the simulator.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("max_driving_hours", self.max_driving_hours),
            ("max_window_hours", self.max_window_hours),
            ("max_cycle_hours", self.max_cycle_hours),
            ("daily_rest_hours", self.daily_rest_hours),
            ("break_after_driving_hours", self.break_after_driving_hours),
            ("break_duration_hours", self.break_duration_hours),
            ("restart_hours", self.restart_hours),
            ("avg_speed_mph", self.avg_speed_mph),
            ("fuel_interval_miles", self.fuel_interval_miles),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number"));
            }
        }

        let non_negative = [
            ("fuel_duration_hours", self.fuel_duration_hours),
            ("pre_trip_hours", self.pre_trip_hours),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("post_trip_rest_hours", self.post_trip_rest_hours),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must not be negative"));
            }
        }

        if self.max_window_hours > 24.0 {
            return Err("max_window_hours must fit inside one log day".to_string());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for HosConfig {
    fn default() -> Self {
        Self {
            max_driving_hours: 11.0,
            max_window_hours: 14.0,
            max_cycle_hours: 70.0,
            daily_rest_hours: 10.0,
            break_after_driving_hours: 8.0,
            break_duration_hours: 0.5,
            restart_hours: 34.0,
            avg_speed_mph: 60.0,
            fuel_interval_miles: 1000.0,
            fuel_duration_hours: 0.5,
            pre_trip_hours: 1.0,
            pickup_hours: 1.0,
            dropoff_hours: 1.0,
            post_trip_rest_hours: 8.0,
            max_iterations: 10_000,
        }
    }
}

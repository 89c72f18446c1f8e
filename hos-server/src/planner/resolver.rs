//! Resolution of states in which no driving is possible.

use std::fmt;

use super::config::HosConfig;
use super::log::{LogEmitter, limit_reason};
use super::state::{SimulationState, reached};

/// Why the driver cannot drive right now.
///
/// Classification follows a fixed priority; the first matching variant
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blocker {
    /// Daily driving limit used up: rest until the next day.
    DrivingLimit,
    /// On-duty hours of the window used up: rest until the next day.
    WindowLimit,
    /// A break is due and driving hours remain today.
    BreakDue,
    /// Cycle budget used up: take a restart.
    CycleExhausted,
    /// The window closed for any other reason.
    WindowClosed,
}

impl Blocker {
    /// Classify a blocked state.
    pub fn classify(state: &SimulationState, config: &HosConfig) -> Self {
        let driving_done = reached(state.daily_driving(), config.max_driving_hours);

        if driving_done {
            Blocker::DrivingLimit
        } else if reached(state.daily_on_duty(), config.max_window_hours) {
            Blocker::WindowLimit
        } else if reached(
            state.driving_since_break(),
            config.break_after_driving_hours,
        ) {
            Blocker::BreakDue
        } else if reached(state.cycle_hours_used(), config.max_cycle_hours) {
            Blocker::CycleExhausted
        } else {
            Blocker::WindowClosed
        }
    }

    /// Log whatever the blocker requires.
    pub(crate) fn resolve(self, log: &mut LogEmitter<'_>, config: &HosConfig) {
        match self {
            Blocker::DrivingLimit => {
                log.advance_day(&limit_reason(config.max_driving_hours, "Driving Limit"))
            }
            Blocker::WindowLimit => {
                log.advance_day(&limit_reason(config.max_window_hours, "Window Limit"))
            }
            Blocker::BreakDue => log.take_break(),
            Blocker::CycleExhausted => log.restart(),
            Blocker::WindowClosed => log.advance_day("End of Daily Driving Window"),
        }
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Blocker::DrivingLimit => "driving limit reached",
            Blocker::WindowLimit => "window limit reached",
            Blocker::BreakDue => "break due",
            Blocker::CycleExhausted => "cycle exhausted",
            Blocker::WindowClosed => "end of daily driving window",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DutyStatus, SegmentCategory};

    fn state_after(cycle: f64, steps: &[(DutyStatus, f64)]) -> SimulationState {
        let mut state = SimulationState::new(40.0, cycle);
        for &(status, hours) in steps {
            state.accrue(status, hours);
        }
        state
    }

    #[test]
    fn driving_limit_first() {
        let config = HosConfig::default();
        // Driving, break and cycle are all exhausted.
        let state = state_after(
            60.0,
            &[(DutyStatus::OnDuty, 2.0), (DutyStatus::Driving, 11.0)],
        );
        assert_eq!(Blocker::classify(&state, &config), Blocker::DrivingLimit);
    }

    #[test]
    fn window_limit_before_break() {
        let config = HosConfig::default();
        let state = state_after(
            0.0,
            &[(DutyStatus::OnDuty, 6.0), (DutyStatus::Driving, 8.0)],
        );
        assert_eq!(Blocker::classify(&state, &config), Blocker::WindowLimit);
    }

    #[test]
    fn break_due() {
        let config = HosConfig::default();
        let state = state_after(
            0.0,
            &[(DutyStatus::OnDuty, 2.0), (DutyStatus::Driving, 8.0)],
        );
        assert_eq!(Blocker::classify(&state, &config), Blocker::BreakDue);
    }

    #[test]
    fn cycle_exhausted() {
        let config = HosConfig::default();
        let state = state_after(69.0, &[(DutyStatus::OnDuty, 2.0)]);
        assert_eq!(Blocker::classify(&state, &config), Blocker::CycleExhausted);
    }

    #[test]
    fn window_closed_otherwise() {
        let config = HosConfig::default();
        let state = state_after(
            0.0,
            &[
                (DutyStatus::OnDuty, 2.0),
                (DutyStatus::Driving, 3.0),
                (DutyStatus::Off, 9.0),
            ],
        );
        assert_eq!(Blocker::classify(&state, &config), Blocker::WindowClosed);
    }

    #[test]
    fn break_resolution_stays_on_same_day() {
        let config = HosConfig::default();
        let mut log = LogEmitter::new(&config, 20.0, 0.0);
        log.pre_trip();
        log.pickup();
        log.drive(8.0, 480.0, "Driving");

        let blocker = Blocker::classify(log.state(), &config);
        assert_eq!(blocker, Blocker::BreakDue);
        blocker.resolve(&mut log, &config);

        assert_eq!(log.state().current_day(), 1);
        assert_eq!(log.state().driving_since_break(), 0.0);
        assert_eq!(log.state().time_of_day(), 10.5);
    }

    #[test]
    fn driving_limit_resolution_rests_to_next_day() {
        let config = HosConfig::default();
        let mut log = LogEmitter::new(&config, 20.0, 0.0);
        log.pre_trip();
        log.pickup();
        log.drive(8.0, 480.0, "Driving");
        log.take_break();
        log.drive(3.0, 180.0, "Driving");

        let blocker = Blocker::classify(log.state(), &config);
        assert_eq!(blocker, Blocker::DrivingLimit);
        blocker.resolve(&mut log, &config);

        assert_eq!(log.state().current_day(), 2);
        let result = log.finish();
        let rest = result.segments.last().unwrap();
        assert_eq!(rest.category, SegmentCategory::Rest);
        assert_eq!(rest.start_hour, 13.5);
        assert_eq!(rest.end_hour, 24.0);
        assert_eq!(rest.remarks, "Reached 11-Hour Driving Limit");
    }

    #[test]
    fn display() {
        assert_eq!(Blocker::BreakDue.to_string(), "break due");
        assert_eq!(Blocker::CycleExhausted.to_string(), "cycle exhausted");
    }
}

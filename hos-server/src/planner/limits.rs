//! Constraint evaluation for the next drive segment.
//!
//! Every limit is an independent necessary condition for driving, so the
//! longest legal drive is the smallest remainder across all of them.

use std::fmt;

use super::config::HosConfig;
use super::state::{EPSILON, SimulationState};

/// A limit that can cap the length of a drive segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    /// Daily driving limit (11 hours).
    Driving,
    /// On-duty hours inside the window (14 hours).
    OnDutyWindow,
    /// Rolling cycle budget (70 hours).
    Cycle,
    /// Driving allowed before a break is due (8 hours).
    Break,
    /// Wall-clock end of the window. Differs from `OnDutyWindow` once an
    /// off-duty break has been taken inside the window.
    WindowClock,
    /// Driving left in the trip.
    Trip,
}

impl LimitKind {
    /// All limits, in tie-break order.
    pub const ALL: [LimitKind; 6] = [
        LimitKind::Driving,
        LimitKind::OnDutyWindow,
        LimitKind::Cycle,
        LimitKind::Break,
        LimitKind::WindowClock,
        LimitKind::Trip,
    ];

    /// Hours of driving this limit still allows, never negative.
    pub fn remaining(self, state: &SimulationState, config: &HosConfig) -> f64 {
        let remaining = match self {
            LimitKind::Driving => config.max_driving_hours - state.daily_driving(),
            LimitKind::OnDutyWindow => config.max_window_hours - state.daily_on_duty(),
            LimitKind::Cycle => config.max_cycle_hours - state.cycle_hours_used(),
            LimitKind::Break => config.break_after_driving_hours - state.driving_since_break(),
            LimitKind::WindowClock => config.max_window_hours - state.time_of_day(),
            LimitKind::Trip => state.remaining_trip_hours(),
        };
        remaining.max(0.0)
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LimitKind::Driving => "driving limit",
            LimitKind::OnDutyWindow => "on-duty window",
            LimitKind::Cycle => "cycle",
            LimitKind::Break => "break",
            LimitKind::WindowClock => "window clock",
            LimitKind::Trip => "trip",
        };
        f.write_str(name)
    }
}

/// The longest legal drive from the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drivable {
    /// Hours that may be driven now.
    pub hours: f64,

    /// The limit with the smallest remainder.
    pub binding: LimitKind,
}

impl Drivable {
    /// Whether no driving is possible without a rest, break or restart first.
    pub fn is_blocked(&self) -> bool {
        self.hours <= EPSILON
    }
}

/// Evaluate every limit and return the binding one.
///
/// Ties go to the limit listed first in [`LimitKind::ALL`].
pub fn drivable(state: &SimulationState, config: &HosConfig) -> Drivable {
    LimitKind::ALL
        .iter()
        .map(|&kind| Drivable {
            hours: kind.remaining(state, config),
            binding: kind,
        })
        .fold(
            Drivable {
                hours: f64::INFINITY,
                binding: LimitKind::Trip,
            },
            |best, candidate| {
                if candidate.hours < best.hours {
                    candidate
                } else {
                    best
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DutyStatus;

    fn state_after(trip: f64, cycle: f64, steps: &[(DutyStatus, f64)]) -> SimulationState {
        let mut state = SimulationState::new(trip, cycle);
        for &(status, hours) in steps {
            state.accrue(status, hours);
        }
        state
    }

    #[test]
    fn fresh_day_bound_by_break() {
        let config = HosConfig::default();
        let state = state_after(25.0, 30.0, &[(DutyStatus::OnDuty, 2.0)]);

        let d = drivable(&state, &config);
        assert_eq!(d.hours, 8.0);
        assert_eq!(d.binding, LimitKind::Break);
        assert!(!d.is_blocked());
    }

    #[test]
    fn short_trip_bound_by_trip() {
        let config = HosConfig::default();
        let state = state_after(0.75, 0.0, &[(DutyStatus::OnDuty, 2.0)]);

        let d = drivable(&state, &config);
        assert_eq!(d.hours, 0.75);
        assert_eq!(d.binding, LimitKind::Trip);
    }

    #[test]
    fn after_break_bound_by_driving_limit() {
        let config = HosConfig::default();
        let state = state_after(
            25.0,
            30.0,
            &[
                (DutyStatus::OnDuty, 2.0),
                (DutyStatus::Driving, 8.0),
                (DutyStatus::Off, 0.5),
            ],
        );
        let mut state = state;
        state.reset_break();

        let d = drivable(&state, &config);
        // Driving: 3, on-duty window: 4, window clock: 3.5.
        assert_eq!(d.hours, 3.0);
        assert_eq!(d.binding, LimitKind::Driving);
    }

    #[test]
    fn window_clock_diverges_from_on_duty() {
        let config = HosConfig::default();
        let mut state = state_after(
            25.0,
            0.0,
            &[
                (DutyStatus::OnDuty, 2.0),
                (DutyStatus::Driving, 2.0),
                (DutyStatus::Off, 9.0),
            ],
        );
        state.reset_break();

        let d = drivable(&state, &config);
        assert_eq!(d.hours, 1.0);
        assert_eq!(d.binding, LimitKind::WindowClock);
        assert_eq!(LimitKind::OnDutyWindow.remaining(&state, &config), 10.0);
    }

    #[test]
    fn cycle_exhausted_blocks() {
        let config = HosConfig::default();
        let state = state_after(25.0, 69.0, &[(DutyStatus::OnDuty, 2.0)]);

        let d = drivable(&state, &config);
        assert_eq!(d.hours, 0.0);
        assert_eq!(d.binding, LimitKind::Cycle);
        assert!(d.is_blocked());
    }

    #[test]
    fn remainders_never_negative() {
        let config = HosConfig::default();
        let state = state_after(25.0, 75.0, &[(DutyStatus::Driving, 9.0)]);

        for kind in LimitKind::ALL {
            assert!(kind.remaining(&state, &config) >= 0.0, "{kind}");
        }
    }

    #[test]
    fn ties_go_to_first_listed() {
        let config = HosConfig::default();
        let state = state_after(25.0, 0.0, &[(DutyStatus::Driving, 11.0)]);

        // Driving and break are both exhausted.
        let d = drivable(&state, &config);
        assert_eq!(d.binding, LimitKind::Driving);
    }
}

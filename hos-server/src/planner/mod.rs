//! Hours-of-service trip simulation.
//!
//! This module implements the duty-status simulator that answers:
//! "How does this trip fit into the driver's logs?"
//!
//! The simulator runs forward in time, driving as far as the binding limit
//! allows, inserting fuel stops at mileage thresholds, and resolving
//! blocked states with breaks, daily rests and cycle restarts.

mod config;
mod fuel;
mod limits;
mod log;
mod logsheet;
mod resolver;
mod simulate;
mod state;

pub use config::HosConfig;
pub use limits::{Drivable, LimitKind, drivable};
pub use logsheet::{DailyLog, DutyTotals, Remark, daily_logs};
pub use resolver::Blocker;
pub use simulate::{SimulationError, SimulationResult, Simulator, TripRequest, simulate};
pub use state::SimulationState;

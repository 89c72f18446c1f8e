//! Domain types for the hours-of-service trip planner.
//!
//! These are the values the simulator produces and every outer layer
//! consumes: duty segments, route summary lines and log clock formatting.

mod duty;
mod summary;
mod time;

pub use duty::{DutySegment, DutyStatus, SegmentCategory};
pub use summary::RouteSummaryEntry;
pub use time::format_clock;

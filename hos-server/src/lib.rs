//! Hours-of-service trip planner server.
//!
//! Simulates a property-carrying truck trip under FMCSA hours-of-service
//! rules and produces the duty-status log, route summary and daily log
//! sheets a driver would file.

pub mod domain;
pub mod geocode;
pub mod planner;
pub mod web;

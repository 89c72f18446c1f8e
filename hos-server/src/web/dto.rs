//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DutySegment, RouteSummaryEntry};
use crate::geocode::Place;
use crate::planner::{DailyLog, DutyTotals, Remark, SimulationResult, TripRequest};

/// Date format accepted for `startDate`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request to simulate a trip.
///
/// Numbers may arrive as JSON numbers or numeric strings; form posts send
/// strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// Trip length in miles
    pub trip_distance: Option<Value>,

    /// Cycle hours already used
    pub cycle_used: Option<Value>,

    /// Calendar date of day 1, `YYYY-MM-DD`
    pub start_date: Option<String>,
}

impl ProcessRequest {
    /// Convert to a trip request, checking presence and sign of the inputs.
    pub fn trip_request(&self) -> Result<TripRequest, String> {
        let (Some(distance), Some(cycle)) = (&self.trip_distance, &self.cycle_used) else {
            return Err("Both 'tripDistance' and 'cycleUsed' are required.".to_string());
        };

        let (Some(distance), Some(cycle)) = (as_number(distance), as_number(cycle)) else {
            return Err("'tripDistance' and 'cycleUsed' must be numbers.".to_string());
        };

        if distance < 0.0 || cycle < 0.0 {
            return Err("Values must be non-negative.".to_string());
        }

        Ok(TripRequest::new(distance, cycle))
    }

    /// Parse the optional start date. A blank string counts as absent.
    pub fn start_date(&self) -> Result<Option<NaiveDate>, String> {
        match self.start_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(|_| format!("Invalid startDate: {s} (expected YYYY-MM-DD)")),
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Request to plan a trip between named locations.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanRequest {
    #[serde(flatten)]
    pub trip: ProcessRequest,

    pub current_location: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
}

/// Query for a single address lookup.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// A duty segment on the log.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub day: u32,
    pub start: f64,
    pub end: f64,

    /// Status code (`OFF`, `SB`, `D`, `ON`)
    pub status: &'static str,
    pub location: String,
    pub remarks: String,

    /// Chart row, 1 (Off) to 4 (On Duty)
    pub duty_line: u8,

    /// Segment category (`DRIVE`, `WORK`, ...)
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<&DutySegment> for SegmentResult {
    fn from(segment: &DutySegment) -> Self {
        Self {
            day: segment.day,
            start: segment.start_hour,
            end: segment.end_hour,
            status: segment.status.code(),
            location: segment.location.clone(),
            remarks: segment.remarks.clone(),
            duty_line: segment.duty_line(),
            kind: segment.category.as_str(),
        }
    }
}

/// A route summary line.
#[derive(Debug, Serialize)]
pub struct RouteSummaryResult {
    pub day: u32,
    pub time: String,
    pub activity: String,
    pub location: String,
}

impl From<&RouteSummaryEntry> for RouteSummaryResult {
    fn from(entry: &RouteSummaryEntry) -> Self {
        Self {
            day: entry.day,
            time: entry.time.clone(),
            activity: entry.activity.clone(),
            location: entry.location.clone(),
        }
    }
}

/// Hours per status on a daily sheet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResult {
    pub off: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl From<&DutyTotals> for TotalsResult {
    fn from(totals: &DutyTotals) -> Self {
        Self {
            off: totals.off,
            sleeper_berth: totals.sleeper_berth,
            driving: totals.driving,
            on_duty: totals.on_duty,
        }
    }
}

/// A remarks row on a daily sheet.
#[derive(Debug, Serialize)]
pub struct RemarkResult {
    pub time: String,
    pub location: String,
    pub remarks: String,
}

impl From<&Remark> for RemarkResult {
    fn from(remark: &Remark) -> Self {
        Self {
            time: remark.time.clone(),
            location: remark.location.clone(),
            remarks: remark.remarks.clone(),
        }
    }
}

/// One day's log sheet. Segments are not repeated here; see `logs`.
#[derive(Debug, Serialize)]
pub struct DailyLogResult {
    pub day: u32,

    /// `YYYY-MM-DD`, when a start date was given
    pub date: Option<String>,
    pub remarks: Vec<RemarkResult>,
    pub totals: TotalsResult,
}

impl From<&DailyLog> for DailyLogResult {
    fn from(sheet: &DailyLog) -> Self {
        Self {
            day: sheet.day,
            date: sheet.date.map(|d| d.format(DATE_FORMAT).to_string()),
            remarks: sheet.remarks.iter().map(RemarkResult::from).collect(),
            totals: TotalsResult::from(&sheet.totals),
        }
    }
}

/// Response for a simulated trip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub logs: Vec<SegmentResult>,
    pub route_summary: Vec<RouteSummaryResult>,
    pub total_days: u32,
    pub final_cycle_used: f64,
    pub daily_logs: Vec<DailyLogResult>,
}

impl PlanResponse {
    /// Create from a simulation result and its daily sheets.
    pub fn from_result(result: &SimulationResult, sheets: &[DailyLog]) -> Self {
        Self {
            logs: result.segments.iter().map(SegmentResult::from).collect(),
            route_summary: result
                .route_summary
                .iter()
                .map(RouteSummaryResult::from)
                .collect(),
            total_days: result.total_days,
            final_cycle_used: result.final_cycle_hours_used,
            daily_logs: sheets.iter().map(DailyLogResult::from).collect(),
        }
    }
}

/// A resolved location.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    pub display_name: String,
}

impl From<&Place> for PlaceResult {
    fn from(place: &Place) -> Self {
        Self {
            coordinates: place.coordinates,
            display_name: place.display_name.clone(),
        }
    }
}

/// Resolved trip locations. A field is absent when its lookup failed or
/// found nothing.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResult {
    pub current: Option<PlaceResult>,
    pub pickup: Option<PlaceResult>,
    pub dropoff: Option<PlaceResult>,
}

/// Response for trip planning with locations.
#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub plan: PlanResponse,
    pub locations: LocationsResult,

    /// Problems that did not prevent planning
    pub warnings: Vec<String>,
}

/// Response for a single lookup.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub place: PlaceResult,
}

/// Planning assumptions.
#[derive(Debug, Serialize)]
pub struct AssumptionsResponse {
    pub assumptions: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

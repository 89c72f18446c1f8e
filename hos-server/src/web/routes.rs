//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::geocode::GeocodeError;
use crate::planner::{HosConfig, SimulationError, Simulator, daily_logs};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assumptions", get(assumptions))
        .route("/api/process", post(process))
        .route("/api/trip", post(plan_trip))
        .route("/api/geocode", get(geocode))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Planning assumptions for the configured rule set.
async fn assumptions(State(state): State<AppState>) -> Json<AssumptionsResponse> {
    Json(AssumptionsResponse {
        assumptions: state.config.assumptions(),
    })
}

/// Simulate a trip from distance and cycle hours alone.
async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, AppError> {
    let req: ProcessRequest = parse_body(&body)?;
    Ok(Json(run_plan(&state.config, &req)?))
}

/// Simulate a trip and resolve its named locations.
///
/// Lookups run concurrently. A failed lookup becomes a warning; the plan is
/// returned regardless.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TripPlanResponse>, AppError> {
    let req: TripPlanRequest = parse_body(&body)?;
    let plan = run_plan(&state.config, &req.trip)?;

    let fields = [
        ("currentLocation", req.current_location.as_deref()),
        ("pickupLocation", req.pickup_location.as_deref()),
        ("dropoffLocation", req.dropoff_location.as_deref()),
    ];
    let geocoder = &state.geocoder;
    let lookups = fields.into_iter().map(|(field, query)| async move {
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return (None, None);
        };
        match geocoder.lookup(query).await {
            Ok(Some(place)) => (Some(PlaceResult::from(&place)), None),
            Ok(None) => (None, Some(format!("{field}: no match for '{query}'"))),
            Err(e) => {
                warn!(field, query, error = %e, "geocoding failed");
                (None, Some(format!("{field}: {e}")))
            }
        }
    });

    let mut warnings = Vec::new();
    let mut places = Vec::with_capacity(fields.len());
    for (place, warning) in join_all(lookups).await {
        places.push(place);
        warnings.extend(warning);
    }

    let mut places = places.into_iter();
    let locations = LocationsResult {
        current: places.next().flatten(),
        pickup: places.next().flatten(),
        dropoff: places.next().flatten(),
    };

    Ok(Json(TripPlanResponse {
        plan,
        locations,
        warnings,
    }))
}

/// Resolve one address.
async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest {
            message: "Query must not be empty".to_string(),
        });
    }

    let place = state
        .geocoder
        .lookup(q)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("No match for '{q}'"),
        })?;

    Ok(Json(GeocodeResponse {
        place: PlaceResult::from(&place),
    }))
}

/// Parse a JSON body manually so the body can be logged on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid request body");
        AppError::BadRequest {
            message: "Invalid request body.".to_string(),
        }
    })
}

fn run_plan(config: &HosConfig, req: &ProcessRequest) -> Result<PlanResponse, AppError> {
    let trip = req
        .trip_request()
        .map_err(|message| AppError::BadRequest { message })?;
    let start_date = req
        .start_date()
        .map_err(|message| AppError::BadRequest { message })?;

    let result = Simulator::new(config).run(&trip)?;
    let sheets = daily_logs(&result, start_date);

    info!(
        distance = trip.trip_distance_miles,
        cycle_used = trip.initial_cycle_hours,
        days = result.total_days,
        "trip simulated"
    );
    Ok(PlanResponse::from_result(&result, &sheets))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<SimulationError> for AppError {
    fn from(e: SimulationError) -> Self {
        match e {
            SimulationError::InvalidInput(msg) => AppError::BadRequest { message: msg },
            SimulationError::NonTerminating { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{CacheConfig, CachedGeocoder, GeocoderConfig, NominatimClient};

    fn test_state(config: HosConfig) -> AppState {
        // Nothing listens here; tests below never reach the geocoder.
        let client =
            NominatimClient::new(GeocoderConfig::default().with_base_url("http://127.0.0.1:9"))
                .unwrap();
        AppState::new(CachedGeocoder::new(client, &CacheConfig::default()), config)
    }

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_status_codes() {
        let msg = || "x".to_string();
        assert_eq!(
            status_of(AppError::BadRequest { message: msg() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound { message: msg() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadGateway { message: msg() }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Internal { message: msg() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn simulation_errors_map_to_status() {
        let invalid = AppError::from(SimulationError::InvalidInput("bad".into()));
        assert!(matches!(invalid, AppError::BadRequest { ref message } if message == "bad"));

        let stuck = AppError::from(SimulationError::NonTerminating {
            iterations: 3,
            detail: "stuck".into(),
        });
        assert!(matches!(stuck, AppError::Internal { .. }));
    }

    #[test]
    fn geocode_errors_are_bad_gateway() {
        let err = AppError::from(GeocodeError::Api {
            status: 503,
            message: "down".into(),
        });
        assert!(matches!(err, AppError::BadGateway { ref message } if message.contains("503")));
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn process_returns_plan() {
        let state = test_state(HosConfig::default());
        let body = Bytes::from(r#"{"tripDistance": "1500", "cycleUsed": 30}"#);

        let Json(plan) = process(State(state), body).await.unwrap();
        assert_eq!(plan.total_days, 3);
        assert_eq!(plan.daily_logs.len(), 3);
        assert!((plan.final_cycle_used - 58.5).abs() < 1e-6);
    }

    #[tokio::test]
    async fn process_rejects_bad_input() {
        let state = test_state(HosConfig::default());

        let cases = [
            "not json",
            r#"{"tripDistance": 100}"#,
            r#"{"tripDistance": -5, "cycleUsed": 0}"#,
            r#"{"tripDistance": 0, "cycleUsed": 0}"#,
            r#"{"tripDistance": 100, "cycleUsed": 0, "startDate": "tomorrow"}"#,
        ];
        for body in cases {
            let err = process(State(state.clone()), Bytes::from(body))
                .await
                .unwrap_err();
            assert!(
                matches!(err, AppError::BadRequest { .. }),
                "{body} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn trip_without_locations_has_no_warnings() {
        let state = test_state(HosConfig::default());
        let body = Bytes::from(r#"{"tripDistance": 500, "cycleUsed": 0, "pickupLocation": "  "}"#);

        let Json(response) = plan_trip(State(state), body).await.unwrap();
        assert_eq!(response.plan.total_days, 1);
        assert!(response.locations.current.is_none());
        assert!(response.locations.pickup.is_none());
        assert!(response.warnings.is_empty());
    }

    #[tokio::test]
    async fn trip_validates_before_geocoding() {
        let state = test_state(HosConfig::default());
        let body = Bytes::from(r#"{"cycleUsed": 0, "currentLocation": "Chicago, IL"}"#);

        let err = plan_trip(State(state), body).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn geocode_rejects_blank_query() {
        let state = test_state(HosConfig::default());
        let query = GeocodeQuery { q: "  ".into() };

        let err = geocode(State(state), Query(query)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn assumptions_follow_config() {
        let state = test_state(HosConfig::default().with_avg_speed(55.0));

        let Json(response) = assumptions(State(state)).await;
        assert!(response.assumptions.iter().any(|a| a.contains("55 MPH")));
    }
}

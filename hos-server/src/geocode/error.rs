//! Geocoding error types.

/// Errors that can occur when looking up an address.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoding service returned an error status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response carried coordinates that are not numbers
    #[error("invalid coordinate: {value}")]
    InvalidCoordinate { value: String },
}

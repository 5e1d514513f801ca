use serde::{Deserialize, Serialize};

/// One lookup request: coordinates from the location resolver, or a city
/// name typed by the user. Exactly one variant per request; built right
/// before the fetch and discarded after.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

impl WeatherQuery {
    /// Query pairs for the weather endpoint: `lat`/`lon` or `q`.
    ///
    /// City names are passed through as typed, empty string included; the
    /// transport layer percent-encodes them and the API rejects nonsense.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            WeatherQuery::Coordinates {
                latitude,
                longitude,
            } => vec![
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ],
            WeatherQuery::City(name) => vec![("q", name.clone())],
        }
    }
}

/// Normalized current-weather result. Each successful fetch replaces the
/// previous report wholesale; there is no identity or history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    /// 0–100.
    pub humidity_pct: u8,
    /// Lower-case free-text description from the API, e.g. "clear sky".
    pub condition: String,
    /// Full image URL for the API's icon code.
    pub icon_url: String,
}

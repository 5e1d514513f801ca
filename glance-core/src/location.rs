//! Host location via IP geolocation (ip-api.com, free and keyless).
//!
//! One attempt at startup, no retry: on failure the caller falls back to
//! manual city entry.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::LocationError;

const IP_API_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Current position of the host, in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Look up the host's current position.
pub async fn current_position() -> Result<Position, LocationError> {
    current_position_at(IP_API_URL).await
}

async fn current_position_at(url: &str) -> Result<Position, LocationError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| LocationError::Unavailable(e.to_string()))?;

    let res = client
        .get(url)
        .send()
        .await
        .map_err(|e| LocationError::Unavailable(e.to_string()))?;

    if !res.status().is_success() {
        return Err(LocationError::Unavailable(format!(
            "status {}",
            res.status()
        )));
    }

    let body: IpApiResponse = res
        .json()
        .await
        .map_err(|e| LocationError::Unavailable(e.to_string()))?;

    if body.status != "success" {
        let reason = body.message.unwrap_or_else(|| "lookup refused".to_string());
        warn!(%reason, "ip geolocation refused");
        return Err(LocationError::Refused(reason));
    }

    match (body.lat, body.lon) {
        (Some(latitude), Some(longitude)) => {
            debug!(latitude, longitude, "resolved host position");
            Ok(Position {
                latitude,
                longitude,
            })
        }
        _ => Err(LocationError::Refused(
            "response missing coordinates".to_string(),
        )),
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{WeatherQuery, WeatherReport},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Image host for the API's icon codes.
fn icon_url(code: &str) -> String {
    format!("http://openweathermap.org/img/wn/{code}@2x.png")
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at a different host. Tests use this to target a
    /// mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let mut params = query.to_pairs();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        debug!(?query, "requesting current weather");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        if parsed.main.humidity > 100 {
            return Err(FetchError::MalformedResponse(format!(
                "humidity {} is out of range 0-100",
                parsed.main.humidity
            )));
        }

        let entry = parsed.weather.first().ok_or_else(|| {
            FetchError::MalformedResponse("response contained no weather entries".to_string())
        })?;

        let condition = entry.description.clone();
        let icon_url = icon_url(&entry.icon);

        Ok(WeatherReport {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            condition,
            icon_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError> {
        self.fetch_current(query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Cut on a char boundary; byte MAX may land inside a multi-byte char.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paris_body() -> serde_json::Value {
        serde_json::json!({
            "main": { "temp": 18.2, "humidity": 60 },
            "weather": [{ "description": "clear sky", "icon": "01d" }],
            "name": "Paris"
        })
    }

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), server.uri())
    }

    #[tokio::test]
    async fn successful_city_fetch_maps_fields_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let report = provider
            .fetch_weather(&WeatherQuery::City("Paris".to_string()))
            .await
            .expect("fetch succeeds");

        assert_eq!(report.location_name, "Paris");
        assert_eq!(report.temperature_c, 18.2);
        assert_eq!(report.humidity_pct, 60);
        assert_eq!(report.condition, "clear sky");
        assert_eq!(report.icon_url, "http://openweathermap.org/img/wn/01d@2x.png");
    }

    #[tokio::test]
    async fn coordinate_fetch_sends_lat_lon() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "48.8566"))
            .and(query_param("lon", "2.3522"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris_body()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let report = provider
            .fetch_weather(&WeatherQuery::Coordinates {
                latitude: 48.8566,
                longitude: 2.3522,
            })
            .await
            .expect("fetch succeeds");

        assert_eq!(report.location_name, "Paris");
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .fetch_weather(&WeatherQuery::City("Nowhere".to_string()))
            .await
            .expect_err("fetch fails");

        assert!(matches!(err, FetchError::Status { .. }));
        assert_eq!(err.user_message(), "Failed to fetch weather data");
    }

    #[tokio::test]
    async fn long_non_ascii_error_body_still_maps_to_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("ville non trouvée : à ".repeat(30)),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .fetch_weather(&WeatherQuery::City("Trouville".to_string()))
            .await
            .expect_err("fetch fails");

        assert!(matches!(err, FetchError::Status { .. }));
        assert_eq!(err.user_message(), "Failed to fetch weather data");
    }

    #[tokio::test]
    async fn unparseable_body_is_a_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .fetch_weather(&WeatherQuery::City("Paris".to_string()))
            .await
            .expect_err("fetch fails");

        assert!(matches!(err, FetchError::MalformedResponse(_)));
        assert_ne!(err.user_message(), "Failed to fetch weather data");
    }

    #[tokio::test]
    async fn humidity_above_100_is_a_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 18.2, "humidity": 150 },
                "weather": [{ "description": "clear sky", "icon": "01d" }],
                "name": "Paris"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .fetch_weather(&WeatherQuery::City("Paris".to_string()))
            .await
            .expect_err("fetch fails");

        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_weather_array_is_a_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 18.2, "humidity": 60 },
                "weather": [],
                "name": "Paris"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .fetch_weather(&WeatherQuery::City("Paris".to_string()))
            .await
            .expect_err("fetch fails");

        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // Byte 200 falls inside a two-byte char here.
        let long = format!("a{}", "é".repeat(150));
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}

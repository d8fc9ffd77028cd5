use crate::config::BackendConfig;
use crate::error::{AgroWatchError, Result};
use crate::models::{
    SensorReading, SensorSource, WeatherCondition, WeatherSnapshot, WeatherSource,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Client for the farm backend's `/weather` endpoint.
pub struct BackendClient {
    client: reqwest::Client,
    config: BackendConfig,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    city: String,
    #[allow(dead_code)]
    #[serde(default)]
    country: Option<String>,
    temperature_c: f64,
    humidity: f64,
    #[serde(default)]
    rainfall_mm: f64,
    condition: String,
}

/// Row from the backend's `sensor_live` table.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    moisture: f64,
    ph: f64,
    temperature: f64,
    humidity: f64,
    #[serde(rename = "N")]
    nitrogen: f64,
    #[serde(rename = "P")]
    phosphorus: f64,
    #[serde(rename = "K")]
    potassium: f64,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeatherBody {
    Error(ErrorResponse),
    Weather(WeatherResponse),
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.config.token.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.config.token))
        }
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = reqwest::Url::parse_with_params(&self.endpoint("/weather"), &[("city", city)])
            .map_err(|e| AgroWatchError::Config(format!("Invalid backend URL: {}", e)))?;

        tracing::debug!(%url, "Fetching weather from backend");

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| AgroWatchError::DataSourceUnavailable(format!("Farm backend: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AgroWatchError::DataSourceUnavailable(format!("Failed to read backend response: {}", e))
        })?;

        if !status.is_success() {
            return Err(AgroWatchError::DataSourceUnavailable(format!(
                "Farm backend returned {}: {}",
                status,
                error_detail(&body)
            )));
        }

        parse_weather(&body)
    }

    /// Latest soil sensor reading. `Ok(None)` when the backend has no data yet.
    pub async fn fetch_latest_sensors(&self) -> Result<Option<SensorReading>> {
        let url = self.endpoint("/latest");
        tracing::debug!(%url, "Fetching latest sensor reading from backend");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AgroWatchError::DataSourceUnavailable(format!("Farm backend: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!("Farm backend has no sensor data yet");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| {
            AgroWatchError::DataSourceUnavailable(format!("Failed to read backend response: {}", e))
        })?;

        if !status.is_success() {
            return Err(AgroWatchError::DataSourceUnavailable(format!(
                "Farm backend returned {}: {}",
                status,
                error_detail(&body)
            )));
        }

        parse_latest(&body).map(Some)
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .authorize(self.client.get(self.endpoint("/weather")))
            .send()
            .await
            .map_err(|e| AgroWatchError::DataSourceUnavailable(format!("Farm backend: {}", e)))?;

        // A 4xx still proves the server is up; only transport and 5xx count as down.
        Ok(!response.status().is_server_error())
    }
}

/// `/weather` errors carry `error`, `/latest` errors carry `message`.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct Detail {
        error: Option<String>,
        message: Option<String>,
    }

    serde_json::from_str::<Detail>(body)
        .ok()
        .and_then(|d| d.error.or(d.message))
        .unwrap_or_else(|| body.to_string())
}

fn parse_latest(body: &str) -> Result<SensorReading> {
    let row: LatestResponse = serde_json::from_str(body).map_err(|e| {
        AgroWatchError::DataSourceUnavailable(format!("Failed to parse backend sensor data: {}", e))
    })?;

    let mut reading = SensorReading::new(
        row.nitrogen,
        row.phosphorus,
        row.potassium,
        row.moisture,
        row.temperature,
        row.humidity,
        row.ph,
    )
    .with_source(SensorSource::Backend);

    if let Some(ts) = row.timestamp.as_deref().and_then(parse_timestamp) {
        reading.timestamp = ts;
    }

    Ok(reading)
}

// Flask serializes datetimes as RFC 2822 ("Tue, 14 Oct 2025 10:00:00 GMT").
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn parse_weather(body: &str) -> Result<WeatherSnapshot> {
    let parsed: WeatherBody = serde_json::from_str(body).map_err(|e| {
        AgroWatchError::DataSourceUnavailable(format!("Failed to parse backend weather: {}", e))
    })?;

    match parsed {
        WeatherBody::Error(e) => Err(AgroWatchError::DataSourceUnavailable(format!(
            "Farm backend: {}",
            e.error
        ))),
        WeatherBody::Weather(w) => {
            let condition = WeatherCondition::from_description(&w.condition);
            let mut snapshot =
                WeatherSnapshot::new(w.temperature_c, w.humidity, w.rainfall_mm, condition)
                    .with_forecast(w.condition);
            snapshot.city = Some(w.city);
            snapshot.source = WeatherSource::Backend;
            Ok(snapshot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_weather_payload() {
        let body = r#"{
            "city": "Pune",
            "country": "IN",
            "temperature_c": 29.4,
            "humidity": 72,
            "pressure": 1008,
            "rainfall_mm": 3.2,
            "condition": "light rain"
        }"#;

        let w = parse_weather(body).unwrap();
        assert_eq!(w.city.as_deref(), Some("Pune"));
        assert_eq!(w.temperature, 29.4);
        assert_eq!(w.humidity, 72.0);
        assert_eq!(w.rainfall_mm, 3.2);
        assert_eq!(w.condition, WeatherCondition::Rainy);
        assert_eq!(w.forecast, "light rain");
        assert_eq!(w.source, WeatherSource::Backend);
    }

    #[test]
    fn missing_rainfall_defaults_to_zero() {
        let body = r#"{"city":"Nagpur","temperature_c":41,"humidity":20,"condition":"clear sky"}"#;
        let w = parse_weather(body).unwrap();
        assert_eq!(w.rainfall_mm, 0.0);
        assert_eq!(w.condition, WeatherCondition::Sunny);
    }

    #[test]
    fn error_payload_is_unavailable() {
        let err = parse_weather(r#"{"error":"OpenWeather API key not set"}"#).unwrap_err();
        match err {
            AgroWatchError::DataSourceUnavailable(msg) => assert!(msg.contains("API key")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn malformed_payload_is_unavailable() {
        assert!(matches!(
            parse_weather("<html>"),
            Err(AgroWatchError::DataSourceUnavailable(_))
        ));
    }

    #[test]
    fn parses_latest_sensor_row() {
        let body = r#"{
            "id": 42,
            "moisture": 37.5,
            "ph": 6.8,
            "temperature": 31,
            "humidity": 58,
            "N": 44,
            "P": 21,
            "K": 60,
            "timestamp": "Tue, 14 Oct 2025 10:30:00 GMT"
        }"#;

        let r = parse_latest(body).unwrap();
        assert_eq!(r.moisture, 37.5);
        assert_eq!(r.ph, 6.8);
        assert_eq!(r.temperature, 31.0);
        assert_eq!(r.nitrogen, 44.0);
        assert_eq!(r.phosphorus, 21.0);
        assert_eq!(r.potassium, 60.0);
        assert_eq!(r.source, SensorSource::Backend);
        assert_eq!(r.timestamp.to_rfc3339(), "2025-10-14T10:30:00+00:00");
    }

    #[test]
    fn latest_without_timestamp_uses_now() {
        let body = r#"{"moisture":50,"ph":7,"temperature":25,"humidity":60,"N":55,"P":30,"K":70}"#;
        let before = Utc::now();
        let r = parse_latest(body).unwrap();
        assert!(r.timestamp >= before);
    }

    #[test]
    fn latest_with_missing_field_is_unavailable() {
        let body = r#"{"moisture":50,"ph":7,"temperature":25,"humidity":60}"#;
        assert!(matches!(
            parse_latest(body),
            Err(AgroWatchError::DataSourceUnavailable(_))
        ));
    }

    #[test]
    fn error_detail_reads_either_key() {
        assert_eq!(error_detail(r#"{"status":"error","message":"db down"}"#), "db down");
        assert_eq!(error_detail(r#"{"error":"bad city"}"#), "bad city");
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = BackendClient::new(BackendConfig {
            url: "http://localhost:5000/".into(),
            token: String::new(),
            enabled: true,
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.endpoint("/weather"), "http://localhost:5000/weather");
    }
}

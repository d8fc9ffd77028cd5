use crate::config::Config;
use crate::datasources::{mock, BackendClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{
    FieldConditions, SensorOverrides, SensorReading, SensorSource, WeatherSnapshot, WeatherSource,
};

/// Gathers the inputs for one advisory generation.
pub struct ConditionsService {
    config: Config,
    db: Database,
    backend_client: Option<BackendClient>,
}

impl ConditionsService {
    pub fn new(config: Config, db: Database) -> Self {
        let backend_client = if config.backend.is_usable() {
            match BackendClient::new(config.backend.clone()) {
                Ok(client) => {
                    tracing::info!(url = %config.backend.url, "Farm backend configured");
                    Some(client)
                }
                Err(e) => {
                    tracing::warn!("Failed to build backend client: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("Farm backend not configured - using simulated weather");
            None
        };

        Self {
            config,
            db,
            backend_client,
        }
    }

    pub async fn refresh(&self, overrides: &SensorOverrides) -> Result<FieldConditions> {
        let sensors = overrides.apply(self.fetch_sensors().await);

        let mut weather = self.fetch_weather().await;
        if overrides.touches_weather() {
            if let Some(rain) = overrides.rainfall_mm {
                weather.rainfall_mm = rain;
            }
            if let Some(condition) = overrides.condition {
                weather.condition = condition;
            }
            weather.source = WeatherSource::Manual;
        }

        let crop = self.db.get_selected_crop()?;

        // Unchanged baseline readings are not recorded.
        if sensors.source != SensorSource::Mock {
            self.db.record_reading(&sensors)?;
        }

        Ok(FieldConditions {
            sensors,
            weather,
            crop,
        })
    }

    /// Live sensor reading from the backend, or the configured baseline.
    async fn fetch_sensors(&self) -> SensorReading {
        let Some(ref client) = self.backend_client else {
            return self.config.sensors.to_reading();
        };

        match client.fetch_latest_sensors().await {
            Ok(Some(reading)) => reading,
            Ok(None) => self.config.sensors.to_reading(),
            Err(e) => {
                tracing::warn!("Failed to fetch sensor data, using baseline: {}", e);
                self.config.sensors.to_reading()
            }
        }
    }

    /// Weather from the backend, or the simulated snapshot when that fails.
    async fn fetch_weather(&self) -> WeatherSnapshot {
        let Some(ref client) = self.backend_client else {
            return mock::mock_weather();
        };

        match client.fetch_weather(&self.config.farm.city).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Failed to fetch weather, using simulated data: {}", e);
                mock::mock_weather()
            }
        }
    }

    pub async fn check_connection(&self) -> Option<bool> {
        match self.backend_client {
            Some(ref client) => Some(client.test_connection().await.unwrap_or(false)),
            None => None,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorSource {
    Backend,
    Mock,
    Manual,
    Cached,
}

impl SensorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorSource::Backend => "Farm Backend",
            SensorSource::Mock => "Simulated Feed",
            SensorSource::Manual => "Manual",
            SensorSource::Cached => "Cached",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "backend" | "farm backend" => Some(SensorSource::Backend),
            "mock" | "simulated feed" => Some(SensorSource::Mock),
            "manual" => Some(SensorSource::Manual),
            "cached" => Some(SensorSource::Cached),
            _ => None,
        }
    }
}

impl std::fmt::Display for SensorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the soil sensor. NPK in mg/kg, moisture and humidity in percent,
/// temperature in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub timestamp: DateTime<Utc>,
    pub source: SensorSource,
}

impl SensorReading {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        moisture: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
    ) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            moisture,
            temperature,
            humidity,
            ph,
            timestamp: Utc::now(),
            source: SensorSource::Mock,
        }
    }

    pub fn with_source(mut self, source: SensorSource) -> Self {
        self.source = source;
        self
    }
}

/// Per-field overrides applied on top of the baseline reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorOverrides {
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub condition: Option<super::WeatherCondition>,
}

impl SensorOverrides {
    pub fn touches_sensors(&self) -> bool {
        self.nitrogen.is_some()
            || self.phosphorus.is_some()
            || self.potassium.is_some()
            || self.moisture.is_some()
            || self.temperature.is_some()
            || self.humidity.is_some()
            || self.ph.is_some()
    }

    pub fn touches_weather(&self) -> bool {
        self.rainfall_mm.is_some() || self.condition.is_some()
    }

    /// Apply sensor overrides, marking the reading as manual when anything changed.
    pub fn apply(&self, mut reading: SensorReading) -> SensorReading {
        if !self.touches_sensors() {
            return reading;
        }

        if let Some(v) = self.nitrogen {
            reading.nitrogen = v;
        }
        if let Some(v) = self.phosphorus {
            reading.phosphorus = v;
        }
        if let Some(v) = self.potassium {
            reading.potassium = v;
        }
        if let Some(v) = self.moisture {
            reading.moisture = v;
        }
        if let Some(v) = self.temperature {
            reading.temperature = v;
        }
        if let Some(v) = self.humidity {
            reading.humidity = v;
        }
        if let Some(v) = self.ph {
            reading.ph = v;
        }

        reading.source = SensorSource::Manual;
        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_only_given_fields() {
        let base = SensorReading::new(65.0, 45.0, 80.0, 55.0, 28.0, 65.0, 6.5);
        let overrides = SensorOverrides {
            moisture: Some(32.0),
            ph: Some(8.1),
            ..Default::default()
        };

        let reading = overrides.apply(base.clone());
        assert_eq!(reading.moisture, 32.0);
        assert_eq!(reading.ph, 8.1);
        assert_eq!(reading.nitrogen, base.nitrogen);
        assert_eq!(reading.temperature, base.temperature);
        assert_eq!(reading.source, SensorSource::Manual);
    }

    #[test]
    fn empty_overrides_keep_source() {
        let base = SensorReading::new(65.0, 45.0, 80.0, 55.0, 28.0, 65.0, 6.5);
        let reading = SensorOverrides::default().apply(base);
        assert_eq!(reading.source, SensorSource::Mock);
    }

    #[test]
    fn weather_overrides_do_not_touch_sensors() {
        let overrides = SensorOverrides {
            rainfall_mm: Some(30.0),
            ..Default::default()
        };
        assert!(!overrides.touches_sensors());
        assert!(overrides.touches_weather());
    }

    #[test]
    fn sensor_source_from_str() {
        assert_eq!(SensorSource::from_str("Mock"), Some(SensorSource::Mock));
        assert_eq!(SensorSource::from_str("Backend"), Some(SensorSource::Backend));
        assert_eq!(SensorSource::from_str("manual"), Some(SensorSource::Manual));
        assert_eq!(SensorSource::from_str("CACHED"), Some(SensorSource::Cached));
        assert_eq!(SensorSource::from_str("satellite"), None);
    }
}

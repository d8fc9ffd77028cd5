use crate::models::SensorReading;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Average,
    Bad,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Average => "Average",
            HealthStatus::Bad => "Bad",
        }
    }

    fn from_percent(percent: f64) -> Self {
        if percent >= 75.0 {
            HealthStatus::Good
        } else if percent >= 50.0 {
            HealthStatus::Average
        } else {
            HealthStatus::Bad
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub label: &'static str,
    pub value: f64,
    pub optimal: String,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub checks: Vec<HealthCheck>,
    pub percent: f64,
    pub status: HealthStatus,
}

impl HealthReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

fn range_check(label: &'static str, value: f64, min: f64, max: f64) -> HealthCheck {
    HealthCheck {
        label,
        value,
        optimal: format!("{}-{}", min, max),
        passed: (min..=max).contains(&value),
    }
}

fn floor_check(label: &'static str, value: f64, min: f64) -> HealthCheck {
    HealthCheck {
        label,
        value,
        optimal: format!(">= {}", min),
        passed: value >= min,
    }
}

/// Score a reading against seven agronomic bands and bucket the share that pass.
pub fn assess(sensors: &SensorReading) -> HealthReport {
    let checks = vec![
        range_check("Moisture", sensors.moisture, 40.0, 60.0),
        range_check("pH", sensors.ph, 6.0, 7.5),
        floor_check("Nitrogen", sensors.nitrogen, 30.0),
        floor_check("Phosphorus", sensors.phosphorus, 20.0),
        floor_check("Potassium", sensors.potassium, 25.0),
        range_check("Temperature", sensors.temperature, 20.0, 30.0),
        range_check("Humidity", sensors.humidity, 50.0, 80.0),
    ];

    let passed = checks.iter().filter(|c| c.passed).count();
    let percent = passed as f64 / checks.len() as f64 * 100.0;

    HealthReport {
        checks,
        percent,
        status: HealthStatus::from_percent(percent),
    }
}

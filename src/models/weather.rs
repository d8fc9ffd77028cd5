use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Stormy => "Stormy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sunny" | "clear" => Some(WeatherCondition::Sunny),
            "cloudy" => Some(WeatherCondition::Cloudy),
            "rainy" | "rain" => Some(WeatherCondition::Rainy),
            "stormy" | "storm" => Some(WeatherCondition::Stormy),
            _ => None,
        }
    }

    /// Map a free-text weather description (e.g. "light rain", "overcast clouds")
    /// onto a condition. Unrecognized descriptions are treated as sunny.
    pub fn from_description(description: &str) -> Self {
        let d = description.to_lowercase();
        if d.contains("storm") || d.contains("thunder") {
            WeatherCondition::Stormy
        } else if d.contains("rain") || d.contains("drizzle") || d.contains("shower") {
            WeatherCondition::Rainy
        } else if d.contains("cloud")
            || d.contains("overcast")
            || d.contains("mist")
            || d.contains("fog")
            || d.contains("haze")
        {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::Sunny
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    Backend,
    Mock,
    Manual,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::Backend => "Farm Backend",
            WeatherSource::Mock => "Simulated Feed",
            WeatherSource::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall_mm: f64,
    pub condition: WeatherCondition,
    pub forecast: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub source: WeatherSource,
}

impl WeatherSnapshot {
    pub fn new(
        temperature: f64,
        humidity: f64,
        rainfall_mm: f64,
        condition: WeatherCondition,
    ) -> Self {
        Self {
            temperature,
            humidity,
            rainfall_mm,
            condition,
            forecast: String::new(),
            city: None,
            source: WeatherSource::Mock,
        }
    }

    pub fn with_forecast(mut self, forecast: impl Into<String>) -> Self {
        self.forecast = forecast.into();
        self
    }
}

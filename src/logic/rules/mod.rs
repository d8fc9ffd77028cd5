pub mod crop_nitrogen;
pub mod crop_water;
pub mod engine;
pub mod heavy_rain;
pub mod moisture;
pub mod optimal_conditions;
pub mod soil_ph;
pub mod temperature;

pub use engine::RulesEngine;

use crate::models::{Advisory, CropProfile, SensorReading, WeatherSnapshot};

/// Trait for field advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an advisory if conditions are met.
    /// The returned advisory has id 0; the engine numbers the batch.
    fn evaluate(
        &self,
        sensors: &SensorReading,
        weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Option<Advisory>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{
        CropProfile, SensorReading, WaterNeeds, WeatherCondition, WeatherSnapshot,
    };

    /// Healthy baseline reading with the given moisture, temperature and pH.
    pub fn sensors(moisture: f64, temperature: f64, ph: f64) -> SensorReading {
        SensorReading::new(65.0, 45.0, 80.0, moisture, temperature, 65.0, ph)
    }

    pub fn dry_weather() -> WeatherSnapshot {
        WeatherSnapshot::new(30.0, 60.0, 0.0, WeatherCondition::Sunny)
    }

    pub fn crop(name: &str, water_needs: WaterNeeds) -> CropProfile {
        CropProfile::new(1, name, water_needs)
    }
}

use super::{
    crop_nitrogen::CropNitrogenRule,
    crop_water::{CropWaterHighRule, CropWaterLowRule},
    heavy_rain::HeavyRainRule,
    moisture::MoistureRule,
    optimal_conditions::OptimalConditionsRule,
    soil_ph::SoilPhRule,
    temperature::TemperatureRule,
    Rule,
};
use crate::models::{Advisory, CropProfile, SensorReading, WeatherSnapshot};

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        // Order is output order.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(MoistureRule),
            Box::new(TemperatureRule),
            Box::new(HeavyRainRule),
            Box::new(SoilPhRule),
            Box::new(CropWaterHighRule),
            Box::new(CropWaterLowRule),
            Box::new(CropNitrogenRule),
            Box::new(OptimalConditionsRule),
        ];

        Self { rules }
    }

    /// Run every rule in order and number the resulting advisories from 1.
    pub fn generate(
        &self,
        sensors: &SensorReading,
        weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Vec<Advisory> {
        let advisories: Vec<Advisory> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(sensors, weather, crop))
            .zip(1u32..)
            .map(|(mut advisory, id)| {
                advisory.id = id;
                advisory
            })
            .collect();

        tracing::debug!(
            count = advisories.len(),
            crop = crop.map(|c| c.name.as_str()),
            "Generated advisories"
        );

        advisories
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        sensors: &SensorReading,
        weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(sensors, weather, crop))
            .map(|mut advisory| {
                advisory.id = 1;
                advisory
            })
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

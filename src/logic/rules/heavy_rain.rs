use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherCondition, WeatherSnapshot,
};

/// Heavy rainfall rule
///
/// Fires when the sky is rainy or more than 20 mm of rain is expected,
/// either condition alone is enough.
pub struct HeavyRainRule;

const RAINFALL_THRESHOLD_MM: f64 = 20.0;

impl Rule for HeavyRainRule {
    fn id(&self) -> &'static str {
        "heavy_rain"
    }

    fn name(&self) -> &'static str {
        "Heavy Rainfall"
    }

    fn evaluate(
        &self,
        _sensors: &SensorReading,
        weather: &WeatherSnapshot,
        _crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        if weather.condition != WeatherCondition::Rainy
            && weather.rainfall_mm <= RAINFALL_THRESHOLD_MM
        {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Warning,
                Severity::Medium,
                AdvisoryCategory::Rain,
                "Heavy Rainfall Expected",
                format!(
                    "{}mm rainfall expected. Risk of waterlogging in low-lying areas.",
                    weather.rainfall_mm
                ),
            )
            .with_action("Ensure proper drainage. Avoid sowing today."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::sensors;

    fn eval(rainfall: f64, condition: WeatherCondition) -> Option<Advisory> {
        let weather = WeatherSnapshot::new(30.0, 70.0, rainfall, condition);
        HeavyRainRule.evaluate(&sensors(55.0, 28.0, 6.5), &weather, None)
    }

    #[test]
    fn rainfall_alone_is_enough() {
        let a = eval(25.0, WeatherCondition::Cloudy).unwrap();
        assert_eq!(a.category, AdvisoryCategory::Rain);
        assert!(a.message.starts_with("25mm"));
        assert!(a.suggested_action.contains("Avoid sowing today"));
    }

    #[test]
    fn rainy_condition_alone_is_enough() {
        assert!(eval(0.0, WeatherCondition::Rainy).is_some());
    }

    #[test]
    fn twenty_millimetres_is_not_heavy() {
        assert!(eval(20.0, WeatherCondition::Cloudy).is_none());
        assert!(eval(15.0, WeatherCondition::Sunny).is_none());
    }

    #[test]
    fn storms_need_rainfall() {
        assert!(eval(5.0, WeatherCondition::Stormy).is_none());
        assert!(eval(30.0, WeatherCondition::Stormy).is_some());
    }
}

use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherSnapshot,
};

/// Heat stress rule based on the measured temperature.
///
/// Conditions:
/// - Danger: above 40°C
/// - Warning: above 35°C up to and including 40°C
pub struct TemperatureRule;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature_high"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        _crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let temp = sensors.temperature;

        if temp > 40.0 {
            Some(
                Advisory::new(
                    self.id(),
                    AdvisoryKind::Danger,
                    Severity::High,
                    AdvisoryCategory::Temperature,
                    "Extreme Heat Warning",
                    format!(
                        "Temperature is extremely high at {}°C. Heat stress risk for all crops.",
                        temp
                    ),
                )
                .with_action("Provide shade, increase irrigation, apply mulching immediately."),
            )
        } else if temp > 35.0 {
            Some(
                Advisory::new(
                    self.id(),
                    AdvisoryKind::Warning,
                    Severity::Medium,
                    AdvisoryCategory::Temperature,
                    "High Temperature Alert",
                    format!(
                        "Temperature is {}°C. Some crops may experience heat stress.",
                        temp
                    ),
                )
                .with_action("Apply mulching and increase irrigation frequency."),
            )
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{dry_weather, sensors};

    fn eval(temp: f64) -> Option<Advisory> {
        TemperatureRule.evaluate(&sensors(55.0, temp, 6.5), &dry_weather(), None)
    }

    #[test]
    fn danger_above_forty() {
        let a = eval(40.1).unwrap();
        assert_eq!(a.kind, AdvisoryKind::Danger);
        assert_eq!(a.title, "Extreme Heat Warning");
        assert!(a.message.contains("40.1°C"));
    }

    #[test]
    fn forty_is_a_warning() {
        let a = eval(40.0).unwrap();
        assert_eq!(a.kind, AdvisoryKind::Warning);
        assert_eq!(a.severity, Severity::Medium);
        assert_eq!(a.title, "High Temperature Alert");
    }

    #[test]
    fn thirty_five_is_silent() {
        assert!(eval(35.0).is_none());
        assert!(eval(20.0).is_none());
        assert!(eval(-10.0).is_none());
    }
}

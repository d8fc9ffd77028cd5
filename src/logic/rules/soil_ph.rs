use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherSnapshot,
};

/// Soil pH imbalance rule
///
/// Acceptable band is 5.5-7.5 inclusive. Acidic soil gets lime,
/// alkaline soil gets sulfur or organic matter.
pub struct SoilPhRule;

const PH_MIN: f64 = 5.5;
const PH_MAX: f64 = 7.5;

impl Rule for SoilPhRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH Balance"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        _crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let ph = sensors.ph;
        if (PH_MIN..=PH_MAX).contains(&ph) {
            return None;
        }

        let acidic = ph < PH_MIN;
        let (direction, action) = if acidic {
            ("too acidic", "Apply lime to increase pH.")
        } else {
            ("too alkaline", "Apply sulfur or organic matter to decrease pH.")
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Warning,
                Severity::Medium,
                AdvisoryCategory::General,
                "Soil pH Imbalance",
                format!(
                    "Soil pH is {}, which is {} for optimal growth.",
                    ph, direction
                ),
            )
            .with_action(action),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{dry_weather, sensors};

    fn eval(ph: f64) -> Option<Advisory> {
        SoilPhRule.evaluate(&sensors(55.0, 28.0, ph), &dry_weather(), None)
    }

    #[test]
    fn acidic_soil_gets_lime() {
        let a = eval(5.0).unwrap();
        assert!(a.suggested_action.contains("lime"));
        assert!(a.message.contains("too acidic"));
        assert!(a.message.contains("5"));
    }

    #[test]
    fn alkaline_soil_gets_sulfur() {
        let a = eval(8.0).unwrap();
        assert!(a.suggested_action.contains("sulfur"));
        assert!(a.message.contains("too alkaline"));
    }

    #[test]
    fn neutral_soil_is_silent() {
        assert!(eval(6.5).is_none());
        assert!(eval(5.5).is_none());
        assert!(eval(7.5).is_none());
    }
}

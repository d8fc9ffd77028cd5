use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherSnapshot,
};

/// All-clear rule
///
/// Reports optimal conditions when moisture is 50-70%, temperature is
/// 20-35°C and pH is 6-7 (all inclusive). Evaluated on the raw readings only,
/// so it can appear next to rain, crop water or nitrogen advisories.
pub struct OptimalConditionsRule;

impl Rule for OptimalConditionsRule {
    fn id(&self) -> &'static str {
        "optimal_conditions"
    }

    fn name(&self) -> &'static str {
        "Optimal Growing Conditions"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        _crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let optimal = (50.0..=70.0).contains(&sensors.moisture)
            && (20.0..=35.0).contains(&sensors.temperature)
            && (6.0..=7.0).contains(&sensors.ph);

        if !optimal {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Success,
                Severity::Low,
                AdvisoryCategory::General,
                "Optimal Growing Conditions",
                "All soil parameters are within optimal range for crop growth.",
            )
            .with_action("Continue current farming practices."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{dry_weather, sensors};

    fn eval(moisture: f64, temperature: f64, ph: f64) -> Option<Advisory> {
        OptimalConditionsRule.evaluate(&sensors(moisture, temperature, ph), &dry_weather(), None)
    }

    #[test]
    fn fires_inside_band() {
        let a = eval(55.0, 28.0, 6.5).unwrap();
        assert_eq!(a.kind, AdvisoryKind::Success);
        assert_eq!(a.severity, Severity::Low);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert!(eval(50.0, 20.0, 6.0).is_some());
        assert!(eval(70.0, 35.0, 7.0).is_some());
    }

    #[test]
    fn any_value_outside_band_suppresses() {
        assert!(eval(49.0, 28.0, 6.5).is_none());
        assert!(eval(71.0, 28.0, 6.5).is_none());
        assert!(eval(55.0, 19.9, 6.5).is_none());
        assert!(eval(55.0, 35.1, 6.5).is_none());
        assert!(eval(55.0, 28.0, 7.2).is_none());
    }
}

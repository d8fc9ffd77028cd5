use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherSnapshot,
};

/// Soil moisture rule
///
/// Below 40% crops are in severe water stress; 40-50% calls for
/// scheduled irrigation. The danger branch suppresses the warning.
pub struct MoistureRule;

const DANGER_BELOW: f64 = 40.0;
const WARNING_BELOW: f64 = 50.0;

impl Rule for MoistureRule {
    fn id(&self) -> &'static str {
        "moisture_low"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        _crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let moisture = sensors.moisture;

        if moisture < DANGER_BELOW {
            Some(
                Advisory::new(
                    self.id(),
                    AdvisoryKind::Danger,
                    Severity::High,
                    AdvisoryCategory::Moisture,
                    "Low Soil Moisture Alert",
                    format!(
                        "Soil moisture is critically low at {}%. Crops may experience severe water stress.",
                        moisture
                    ),
                )
                .with_action("Irrigate immediately to prevent crop damage."),
            )
        } else if moisture < WARNING_BELOW {
            Some(
                Advisory::new(
                    self.id(),
                    AdvisoryKind::Warning,
                    Severity::Medium,
                    AdvisoryCategory::Moisture,
                    "Irrigation Required",
                    format!(
                        "Soil moisture has dropped to {}%. Crops may experience water stress.",
                        moisture
                    ),
                )
                .with_action("Schedule irrigation within next 12 hours."),
            )
        } else {
            None
        }
    }
}

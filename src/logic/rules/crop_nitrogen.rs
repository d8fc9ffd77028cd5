use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity,
    WeatherSnapshot,
};

/// Low nitrogen for the selected crop (below 50 mg/kg).
pub struct CropNitrogenRule;

impl Rule for CropNitrogenRule {
    fn id(&self) -> &'static str {
        "crop_nitrogen"
    }

    fn name(&self) -> &'static str {
        "Crop Nitrogen"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let crop = crop?;
        if sensors.nitrogen >= 50.0 {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Warning,
                Severity::Medium,
                AdvisoryCategory::Crop,
                format!("Low Nitrogen for {}", crop.name),
                format!(
                    "Nitrogen level ({} mg/kg) is low for optimal {} growth.",
                    sensors.nitrogen, crop.name
                ),
            )
            .with_action("Apply urea or nitrogen-rich fertilizer."),
        )
    }
}

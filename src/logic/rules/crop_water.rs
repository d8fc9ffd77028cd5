use super::Rule;
use crate::models::{
    Advisory, AdvisoryCategory, AdvisoryKind, CropProfile, SensorReading, Severity, WaterNeeds,
    WeatherSnapshot,
};

/// Thirsty crop rule
///
/// High water-needs crops want moisture above 60%; warn once it falls
/// below 55%. Requires a selected crop.
pub struct CropWaterHighRule;

impl Rule for CropWaterHighRule {
    fn id(&self) -> &'static str {
        "crop_water_high"
    }

    fn name(&self) -> &'static str {
        "Crop Water Demand"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let crop = crop?;
        if crop.water_needs != WaterNeeds::High || sensors.moisture >= 55.0 {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Warning,
                Severity::High,
                AdvisoryCategory::Crop,
                format!("{} Needs Water", crop.name),
                format!(
                    "{} requires high water levels. Current moisture ({}%) is below optimal.",
                    crop.name, sensors.moisture
                ),
            )
            .with_action(format!(
                "Irrigate immediately. {} needs moisture above 60%.",
                crop.name
            )),
        )
    }
}

/// Drought-tolerant crop rule
///
/// Low water-needs crops risk root rot when moisture stays above 70%.
pub struct CropWaterLowRule;

impl Rule for CropWaterLowRule {
    fn id(&self) -> &'static str {
        "crop_water_low"
    }

    fn name(&self) -> &'static str {
        "Crop Overwatering"
    }

    fn evaluate(
        &self,
        sensors: &SensorReading,
        _weather: &WeatherSnapshot,
        crop: Option<&CropProfile>,
    ) -> Option<Advisory> {
        let crop = crop?;
        if crop.water_needs != WaterNeeds::Low || sensors.moisture <= 70.0 {
            return None;
        }

        Some(
            Advisory::new(
                self.id(),
                AdvisoryKind::Info,
                Severity::Low,
                AdvisoryCategory::Crop,
                format!("{} - Reduce Watering", crop.name),
                format!(
                    "{} is drought-tolerant. Current moisture ({}%) may cause root rot.",
                    crop.name, sensors.moisture
                ),
            )
            .with_action("Reduce irrigation frequency. Let soil dry between waterings."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{crop, dry_weather, sensors};

    #[test]
    fn high_needs_crop_below_fifty_five() {
        let rice = crop("Rice (Paddy)", WaterNeeds::High);
        let a = CropWaterHighRule
            .evaluate(&sensors(50.0, 28.0, 6.5), &dry_weather(), Some(&rice))
            .unwrap();
        assert_eq!(a.severity, Severity::High);
        assert_eq!(a.kind, AdvisoryKind::Warning);
        assert_eq!(a.title, "Rice (Paddy) Needs Water");
        assert!(a.suggested_action.contains("above 60%"));
    }

    #[test]
    fn high_needs_crop_well_watered() {
        let rice = crop("Rice (Paddy)", WaterNeeds::High);
        assert!(CropWaterHighRule
            .evaluate(&sensors(65.0, 28.0, 6.5), &dry_weather(), Some(&rice))
            .is_none());
        assert!(CropWaterHighRule
            .evaluate(&sensors(55.0, 28.0, 6.5), &dry_weather(), Some(&rice))
            .is_none());
    }

    #[test]
    fn needs_a_selected_crop() {
        assert!(CropWaterHighRule
            .evaluate(&sensors(30.0, 28.0, 6.5), &dry_weather(), None)
            .is_none());
        assert!(CropWaterLowRule
            .evaluate(&sensors(90.0, 28.0, 6.5), &dry_weather(), None)
            .is_none());
    }

    #[test]
    fn medium_needs_never_fire() {
        let wheat = crop("Wheat", WaterNeeds::Medium);
        for m in [10.0, 50.0, 95.0] {
            let s = sensors(m, 28.0, 6.5);
            assert!(CropWaterHighRule.evaluate(&s, &dry_weather(), Some(&wheat)).is_none());
            assert!(CropWaterLowRule.evaluate(&s, &dry_weather(), Some(&wheat)).is_none());
        }
    }

    #[test]
    fn low_needs_crop_overwatered() {
        let groundnut = crop("Groundnut", WaterNeeds::Low);
        let a = CropWaterLowRule
            .evaluate(&sensors(75.0, 28.0, 6.5), &dry_weather(), Some(&groundnut))
            .unwrap();
        assert_eq!(a.kind, AdvisoryKind::Info);
        assert_eq!(a.severity, Severity::Low);
        assert!(a.message.contains("root rot"));

        assert!(CropWaterLowRule
            .evaluate(&sensors(70.0, 28.0, 6.5), &dry_weather(), Some(&groundnut))
            .is_none());
    }
}

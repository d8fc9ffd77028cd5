use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterNeeds {
    Low,
    Medium,
    High,
}

impl WaterNeeds {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterNeeds::Low => "Low",
            WaterNeeds::Medium => "Medium",
            WaterNeeds::High => "High",
        }
    }

    pub fn watering_guidance(&self, crop_name: &str) -> String {
        match self {
            WaterNeeds::High => format!(
                "{} requires frequent watering. Irrigate every 2-3 days.",
                crop_name
            ),
            WaterNeeds::Medium => format!(
                "{} needs moderate watering. Irrigate every 4-5 days.",
                crop_name
            ),
            WaterNeeds::Low => format!(
                "{} is drought-tolerant. Irrigate weekly or when moisture drops below 35%.",
                crop_name
            ),
        }
    }
}

impl std::fmt::Display for WaterNeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Black,
    Red,
    Alluvial,
    Clay,
    Sandy,
    Loamy,
    Laterite,
}

impl SoilType {
    pub const ALL: [SoilType; 7] = [
        SoilType::Black,
        SoilType::Red,
        SoilType::Alluvial,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Laterite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Black => "Black Soil",
            SoilType::Red => "Red Soil",
            SoilType::Alluvial => "Alluvial Soil",
            SoilType::Clay => "Clay Soil",
            SoilType::Sandy => "Sandy Soil",
            SoilType::Loamy => "Loamy Soil",
            SoilType::Laterite => "Laterite Soil",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let key = lower.strip_suffix(" soil").unwrap_or(&lower);
        match key {
            "black" | "regur" => Some(SoilType::Black),
            "red" => Some(SoilType::Red),
            "alluvial" => Some(SoilType::Alluvial),
            "clay" => Some(SoilType::Clay),
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loamy" | "loam" => Some(SoilType::Loamy),
            "laterite" => Some(SoilType::Laterite),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: u32,
    pub name: String,
    pub match_score: u8,
    pub yield_range: String,
    pub sowing_time: String,
    pub harvest_time: String,
    pub water_needs: WaterNeeds,
    pub fertilizer_tips: String,
    pub image_emoji: String,
}

impl CropProfile {
    pub fn new(id: u32, name: impl Into<String>, water_needs: WaterNeeds) -> Self {
        Self {
            id,
            name: name.into(),
            match_score: 0,
            yield_range: String::new(),
            sowing_time: String::new(),
            harvest_time: String::new(),
            water_needs,
            fertilizer_tips: String::new(),
            image_emoji: String::new(),
        }
    }

    pub fn watering_guidance(&self) -> String {
        self.water_needs.watering_guidance(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_type_from_str_valid() {
        assert_eq!(SoilType::from_str("black"), Some(SoilType::Black));
        assert_eq!(SoilType::from_str("Black Soil"), Some(SoilType::Black));
        assert_eq!(SoilType::from_str("LOAM"), Some(SoilType::Loamy));
        assert_eq!(SoilType::from_str(" laterite "), Some(SoilType::Laterite));
    }

    #[test]
    fn soil_type_from_str_invalid() {
        assert_eq!(SoilType::from_str("peat"), None);
        assert_eq!(SoilType::from_str(""), None);
    }

    #[test]
    fn soil_type_display_round_trip() {
        for soil in SoilType::ALL {
            assert_eq!(SoilType::from_str(soil.as_str()), Some(soil));
        }
    }

    #[test]
    fn watering_guidance_names_crop() {
        let crop = CropProfile::new(1, "Groundnut", WaterNeeds::Low);
        let text = crop.watering_guidance();
        assert!(text.starts_with("Groundnut"));
        assert!(text.contains("35%"));

        assert!(WaterNeeds::High.watering_guidance("Rice").contains("2-3 days"));
        assert!(WaterNeeds::Medium.watering_guidance("Wheat").contains("4-5 days"));
    }

    #[test]
    fn crop_profile_json_round_trip_preserves_fields() {
        let mut crop = CropProfile::new(3, "Sugarcane", WaterNeeds::High);
        crop.match_score = 88;
        crop.fertilizer_tips = "Heavy nitrogen feeder. Apply in splits.".into();

        let json = serde_json::to_string(&crop).unwrap();
        let back: CropProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, crop);
    }
}

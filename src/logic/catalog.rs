use crate::models::{CropProfile, SoilType, WaterNeeds};

struct CatalogEntry {
    name: &'static str,
    match_score: u8,
    yield_range: &'static str,
    sowing_time: &'static str,
    harvest_time: &'static str,
    water_needs: WaterNeeds,
    fertilizer_tips: &'static str,
    emoji: &'static str,
}

impl CatalogEntry {
    fn to_profile(&self, id: u32) -> CropProfile {
        CropProfile {
            match_score: self.match_score,
            yield_range: self.yield_range.to_string(),
            sowing_time: self.sowing_time.to_string(),
            harvest_time: self.harvest_time.to_string(),
            fertilizer_tips: self.fertilizer_tips.to_string(),
            image_emoji: self.emoji.to_string(),
            ..CropProfile::new(id, self.name, self.water_needs)
        }
    }
}

const BLACK: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Cotton",
        match_score: 96,
        yield_range: "2-3 tons/hectare",
        sowing_time: "April-May",
        harvest_time: "October-December",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply NPK 60:30:30 kg/ha. Black soil retains moisture well.",
        emoji: "☁️",
    },
    CatalogEntry {
        name: "Soybean",
        match_score: 92,
        yield_range: "1.5-2.5 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "October-November",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Nitrogen fixation reduces fertilizer needs. Apply phosphorus.",
        emoji: "🫘",
    },
    CatalogEntry {
        name: "Sugarcane",
        match_score: 88,
        yield_range: "70-100 tons/hectare",
        sowing_time: "February-March",
        harvest_time: "December-February",
        water_needs: WaterNeeds::High,
        fertilizer_tips: "Heavy nitrogen feeder. Apply in splits.",
        emoji: "🎋",
    },
    CatalogEntry {
        name: "Wheat",
        match_score: 85,
        yield_range: "3-5 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "March-April",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply urea in 3 splits during growth stages.",
        emoji: "🌾",
    },
];

const RED: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Groundnut",
        match_score: 95,
        yield_range: "1.5-2.5 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "October-November",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Apply gypsum at flowering. Red soil drains well.",
        emoji: "🥜",
    },
    CatalogEntry {
        name: "Millets (Ragi)",
        match_score: 92,
        yield_range: "2-3 tons/hectare",
        sowing_time: "July-August",
        harvest_time: "November-December",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Minimal fertilizer needed. Drought resistant.",
        emoji: "🌾",
    },
    CatalogEntry {
        name: "Tobacco",
        match_score: 87,
        yield_range: "1.5-2 tons/hectare",
        sowing_time: "August-September",
        harvest_time: "January-February",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Potassium-rich fertilizers improve quality.",
        emoji: "🍃",
    },
    CatalogEntry {
        name: "Pulses (Pigeon Pea)",
        match_score: 84,
        yield_range: "1-1.5 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "December-January",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Fixes nitrogen, needs minimal input.",
        emoji: "🫛",
    },
];

const ALLUVIAL: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Rice (Paddy)",
        match_score: 97,
        yield_range: "4-6 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "October-November",
        water_needs: WaterNeeds::High,
        fertilizer_tips: "Apply NPK 100:50:50 kg/ha. Alluvial soil is highly fertile.",
        emoji: "🌾",
    },
    CatalogEntry {
        name: "Wheat",
        match_score: 94,
        yield_range: "4-5 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "March-April",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply nitrogen in 3 splits for best results.",
        emoji: "🌾",
    },
    CatalogEntry {
        name: "Sugarcane",
        match_score: 90,
        yield_range: "80-120 tons/hectare",
        sowing_time: "February-March",
        harvest_time: "December-February",
        water_needs: WaterNeeds::High,
        fertilizer_tips: "Heavy feeder. Regular irrigation essential.",
        emoji: "🎋",
    },
    CatalogEntry {
        name: "Maize (Corn)",
        match_score: 87,
        yield_range: "6-8 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "September-October",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "High nitrogen at knee height stage.",
        emoji: "🌽",
    },
];

const CLAY: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Rice (Paddy)",
        match_score: 95,
        yield_range: "4-6 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "October-November",
        water_needs: WaterNeeds::High,
        fertilizer_tips: "Clay retains water well. Apply NPK 100:50:50.",
        emoji: "🌾",
    },
    CatalogEntry {
        name: "Wheat",
        match_score: 88,
        yield_range: "3-5 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "March-April",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply urea in 3 splits.",
        emoji: "🌾",
    },
    CatalogEntry {
        name: "Cabbage",
        match_score: 82,
        yield_range: "25-35 tons/hectare",
        sowing_time: "August-September",
        harvest_time: "December-January",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Add compost before planting.",
        emoji: "🥬",
    },
    CatalogEntry {
        name: "Broccoli",
        match_score: 78,
        yield_range: "8-12 tons/hectare",
        sowing_time: "July-August",
        harvest_time: "October-November",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "High nitrogen requirement.",
        emoji: "🥦",
    },
];

const SANDY: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Groundnut",
        match_score: 94,
        yield_range: "1.5-2.5 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "October-November",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Apply gypsum at flowering.",
        emoji: "🥜",
    },
    CatalogEntry {
        name: "Carrot",
        match_score: 90,
        yield_range: "20-30 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "January-February",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Avoid fresh manure.",
        emoji: "🥕",
    },
    CatalogEntry {
        name: "Watermelon",
        match_score: 85,
        yield_range: "30-50 tons/hectare",
        sowing_time: "February-March",
        harvest_time: "May-June",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Increase potassium for sweetness.",
        emoji: "🍉",
    },
    CatalogEntry {
        name: "Pearl Millet",
        match_score: 80,
        yield_range: "2-3 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "September-October",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Minimal fertilizer needed.",
        emoji: "🌾",
    },
];

const LOAMY: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Tomato",
        match_score: 96,
        yield_range: "40-60 tons/hectare",
        sowing_time: "September-October",
        harvest_time: "January-March",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply calcium to prevent blossom end rot.",
        emoji: "🍅",
    },
    CatalogEntry {
        name: "Maize (Corn)",
        match_score: 92,
        yield_range: "5-8 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "September-October",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "High nitrogen at knee height.",
        emoji: "🌽",
    },
    CatalogEntry {
        name: "Potato",
        match_score: 89,
        yield_range: "20-30 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "February-March",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Apply potassium for tuber growth.",
        emoji: "🥔",
    },
    CatalogEntry {
        name: "Onion",
        match_score: 85,
        yield_range: "25-35 tons/hectare",
        sowing_time: "October-November",
        harvest_time: "April-May",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Sulfur improves flavor and storage.",
        emoji: "🧅",
    },
];

const LATERITE: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Cashew",
        match_score: 93,
        yield_range: "1-2 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "March-May",
        water_needs: WaterNeeds::Low,
        fertilizer_tips: "Tolerates acidic laterite soil well.",
        emoji: "🥜",
    },
    CatalogEntry {
        name: "Tea",
        match_score: 89,
        yield_range: "2-3 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "Year-round",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Prefers acidic soil. Apply nitrogen regularly.",
        emoji: "🍵",
    },
    CatalogEntry {
        name: "Coffee",
        match_score: 86,
        yield_range: "1-2 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "November-February",
        water_needs: WaterNeeds::Medium,
        fertilizer_tips: "Shade-grown. Apply organic compost.",
        emoji: "☕",
    },
    CatalogEntry {
        name: "Rubber",
        match_score: 82,
        yield_range: "1.5-2 tons/hectare",
        sowing_time: "June-July",
        harvest_time: "Year-round (after 7 years)",
        water_needs: WaterNeeds::High,
        fertilizer_tips: "Potassium-rich fertilizers for latex production.",
        emoji: "🌳",
    },
];

/// Suggested crops for a soil type, best match first. Ids are list positions from 1.
pub fn recommendations_for(soil: SoilType) -> Vec<CropProfile> {
    let table = match soil {
        SoilType::Black => BLACK,
        SoilType::Red => RED,
        SoilType::Alluvial => ALLUVIAL,
        SoilType::Clay => CLAY,
        SoilType::Sandy => SANDY,
        SoilType::Loamy => LOAMY,
        SoilType::Laterite => LATERITE,
    };

    table
        .iter()
        .zip(1u32..)
        .map(|(entry, id)| entry.to_profile(id))
        .collect()
}

/// Look up a crop for a soil type by name or catalog id, ignoring case.
pub fn find_crop(soil: SoilType, name_or_id: &str) -> Option<CropProfile> {
    let needle = name_or_id.trim().to_lowercase();
    let by_id = needle.parse::<u32>().ok();

    recommendations_for(soil).into_iter().find(|c| {
        let name = c.name.to_lowercase();
        Some(c.id) == by_id || name == needle || name.split(" (").next() == Some(needle.as_str())
    })
}

/// Resolve a soil name, falling back to loamy soil when unrecognized.
pub fn soil_or_default(soil: &str) -> SoilType {
    SoilType::from_str(soil).unwrap_or_else(|| {
        tracing::warn!(soil_type = %soil, "Unknown soil type, defaulting to loamy");
        SoilType::Loamy
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_soil_has_four_crops_best_first() {
        for soil in SoilType::ALL {
            let crops = recommendations_for(soil);
            assert_eq!(crops.len(), 4, "{}", soil);
            assert!(crops.windows(2).all(|w| w[0].match_score > w[1].match_score));
            let ids: Vec<u32> = crops.iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn alluvial_leads_with_rice() {
        let crops = recommendations_for(SoilType::Alluvial);
        assert_eq!(crops[0].name, "Rice (Paddy)");
        assert_eq!(crops[0].water_needs, WaterNeeds::High);
        assert_eq!(crops[0].match_score, 97);
    }

    #[test]
    fn find_crop_by_name_or_id() {
        let rice = find_crop(SoilType::Clay, "rice").unwrap();
        assert_eq!(rice.name, "Rice (Paddy)");

        let same = find_crop(SoilType::Clay, "Rice (Paddy)").unwrap();
        assert_eq!(same, rice);

        let broccoli = find_crop(SoilType::Clay, "4").unwrap();
        assert_eq!(broccoli.name, "Broccoli");

        assert!(find_crop(SoilType::Clay, "cashew").is_none());
    }

    #[test]
    fn unknown_soil_falls_back_to_loamy() {
        assert_eq!(soil_or_default("volcanic"), SoilType::Loamy);
        assert_eq!(soil_or_default("red"), SoilType::Red);
        assert_eq!(recommendations_for(soil_or_default(""))[0].name, "Tomato");
    }
}

use crate::logic::health::HealthReport;
use crate::logic::{AdvisoryBoard, AdvisoryFilter};
use crate::models::{CropProfile, FieldConditions, SensorReading, SoilType};
use std::fmt::Write;

pub fn conditions(c: &FieldConditions) -> String {
    let mut out = String::new();
    let s = &c.sensors;
    let w = &c.weather;

    let _ = writeln!(out, "Current Sensor Readings ({})", s.source);
    let _ = writeln!(
        out,
        "  N {} mg/kg | P {} mg/kg | K {} mg/kg",
        s.nitrogen, s.phosphorus, s.potassium
    );
    let _ = writeln!(
        out,
        "  Moisture {}% | Temp {}°C | Humidity {}% | pH {}",
        s.moisture, s.temperature, s.humidity, s.ph
    );

    let place = w.city.as_deref().unwrap_or("farm");
    let _ = writeln!(out, "Weather at {} ({})", place, w.source);
    let _ = writeln!(
        out,
        "  {} | {}°C | Humidity {}% | Rain {}mm",
        w.condition, w.temperature, w.humidity, w.rainfall_mm
    );
    if !w.forecast.is_empty() {
        let _ = writeln!(out, "  {}", w.forecast);
    }

    match c.crop {
        Some(ref crop) => {
            let _ = writeln!(out, "Selected crop: {} {}", crop.image_emoji, crop.name);
        }
        None => {
            let _ = writeln!(out, "Selected crop: none");
        }
    }

    out
}

pub fn advisories(board: &AdvisoryBoard, filter: AdvisoryFilter) -> String {
    let mut out = String::new();
    let shown = board.filtered(filter);

    let _ = writeln!(
        out,
        "Alerts - {} ({} shown, {} unread)",
        filter,
        shown.len(),
        board.unread_count()
    );

    if shown.is_empty() {
        let _ = writeln!(out, "  All clear. No active alerts.");
        return out;
    }

    for a in shown {
        let marker = if a.read { "" } else { " [New]" };
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} #{} {} [{} Priority | {}]{}",
            a.kind.symbol(),
            a.id,
            a.title,
            a.severity,
            a.category,
            marker
        );
        let _ = writeln!(out, "    {}", a.message);
        let _ = writeln!(out, "    -> {}", a.suggested_action);
    }

    out
}

pub fn health(report: &HealthReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Crop Health: {} ({:.0}%, {}/{} checks)",
        report.status,
        report.percent,
        report.passed(),
        report.checks.len()
    );
    for check in &report.checks {
        let mark = if check.passed { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "  {} {:<12} {:>8} (optimal {})",
            mark, check.label, check.value, check.optimal
        );
    }
    out
}

pub fn crops(soil: SoilType, list: &[CropProfile], selected: Option<&CropProfile>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recommended crops for {}", soil);

    for crop in list {
        let chosen = selected.map_or(false, |s| s.name == crop.name);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. {} {} - {}% match{}",
            crop.id,
            crop.image_emoji,
            crop.name,
            crop.match_score,
            if chosen { " (selected)" } else { "" }
        );
        let _ = writeln!(out, "    Yield: {}", crop.yield_range);
        let _ = writeln!(
            out,
            "    Sow: {} | Harvest: {}",
            crop.sowing_time, crop.harvest_time
        );
        let _ = writeln!(out, "    Water needs: {}", crop.water_needs);
        let _ = writeln!(out, "    Fertilizer: {}", crop.fertilizer_tips);
    }

    out
}

pub fn selected_crop(crop: &CropProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Selected {} {}", crop.image_emoji, crop.name);
    let _ = writeln!(out, "  {}", crop.watering_guidance());
    let _ = writeln!(out, "  Fertilizer: {}", crop.fertilizer_tips);
    out
}

pub fn history(readings: &[SensorReading]) -> String {
    let mut out = String::new();
    if readings.is_empty() {
        let _ = writeln!(out, "No readings recorded yet.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<17} {:>5} {:>5} {:>5} {:>7} {:>6} {:>6} {:>5}  Source",
        "Time", "N", "P", "K", "Moist%", "Temp", "Hum%", "pH"
    );
    for r in readings {
        let _ = writeln!(
            out,
            "{:<17} {:>5} {:>5} {:>5} {:>7} {:>6} {:>6} {:>5}  {}",
            r.timestamp.format("%Y-%m-%d %H:%M"),
            r.nitrogen,
            r.phosphorus,
            r.potassium,
            r.moisture,
            r.temperature,
            r.humidity,
            r.ph,
            r.source
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{crop, dry_weather, sensors};
    use crate::logic::{catalog, health, RulesEngine};
    use crate::models::WaterNeeds;
    use chrono::Utc;

    #[test]
    fn advisory_listing_marks_unread() {
        let rice = crop("Rice (Paddy)", WaterNeeds::High);
        let batch =
            RulesEngine::new().generate(&sensors(35.0, 28.0, 6.5), &dry_weather(), Some(&rice));
        let mut board = AdvisoryBoard::new();
        board.replace(batch, Utc::now());
        board.mark_read(1);

        let text = advisories(&board, AdvisoryFilter::All);
        assert!(text.contains("2 shown, 1 unread"));
        assert!(text.contains("Low Soil Moisture Alert [High Priority | Moisture]\n"));
        assert!(text.contains("Rice (Paddy) Needs Water [High Priority | Crop] [New]"));

        let unread = advisories(&board, AdvisoryFilter::Unread);
        assert!(!unread.contains("Low Soil Moisture Alert"));
    }

    #[test]
    fn empty_listing_is_all_clear() {
        let text = advisories(&AdvisoryBoard::new(), AdvisoryFilter::High);
        assert!(text.contains("All clear"));
    }

    #[test]
    fn health_lists_every_check() {
        let report = health::assess(&sensors(55.0, 28.0, 6.5));
        let text = health(&report);
        assert!(text.starts_with("Crop Health: Good (100%, 7/7 checks)"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn crop_listing_flags_selection() {
        let list = catalog::recommendations_for(SoilType::Red);
        let text = crops(SoilType::Red, &list, Some(&list[1]));
        assert!(text.contains("Millets (Ragi) - 92% match (selected)"));
        assert!(!text.contains("Groundnut - 95% match (selected)"));
    }

    #[test]
    fn history_handles_empty() {
        assert!(history(&[]).contains("No readings"));
        let text = history(&[sensors(55.0, 28.0, 6.5)]);
        assert_eq!(text.lines().count(), 2);
    }
}

use crate::db::Database;
use crate::error::Result;
use crate::models::Advisory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const BOARD_KEY: &str = "advisory-board";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvisoryFilter {
    #[default]
    All,
    Unread,
    High,
}

impl AdvisoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryFilter::All => "All Alerts",
            AdvisoryFilter::Unread => "Unread",
            AdvisoryFilter::High => "High Priority",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(AdvisoryFilter::All),
            "unread" | "new" => Some(AdvisoryFilter::Unread),
            "high" | "high-priority" | "high priority" => Some(AdvisoryFilter::High),
            _ => None,
        }
    }

    pub fn matches(&self, advisory: &Advisory) -> bool {
        match self {
            AdvisoryFilter::All => true,
            AdvisoryFilter::Unread => !advisory.read,
            AdvisoryFilter::High => advisory.is_high_priority(),
        }
    }
}

impl std::fmt::Display for AdvisoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session-owned advisory list with read and dismiss state.
///
/// Ids are only unique within one batch, so state that must survive a
/// regeneration is keyed by rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryBoard {
    advisories: Vec<Advisory>,
    dismissed_rules: HashSet<String>,
    generated_at: Option<DateTime<Utc>>,
}

impl AdvisoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board saved by the previous run. Unreadable state starts a fresh board.
    pub fn load(db: &Database) -> Result<Self> {
        let Some(json) = db.get_setting(BOARD_KEY)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str(&json) {
            Ok(board) => Ok(board),
            Err(e) => {
                tracing::warn!(error = %e, "Stored advisory board is unreadable, starting fresh");
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, db: &Database) -> Result<()> {
        let json = serde_json::to_string(self)?;
        db.set_setting(BOARD_KEY, &json)
    }

    /// Install a fresh batch, carrying read flags over by rule and hiding
    /// dismissed rules.
    pub fn replace(&mut self, batch: Vec<Advisory>, generated_at: DateTime<Utc>) {
        let previously_read: HashMap<String, bool> = self
            .advisories
            .drain(..)
            .map(|a| (a.rule, a.read))
            .collect();

        let next: Vec<Advisory> = batch
            .into_iter()
            .filter(|a| !self.dismissed_rules.contains(&a.rule))
            .map(|mut a| {
                if previously_read.get(&a.rule).copied().unwrap_or(false) {
                    a.read = true;
                }
                a
            })
            .collect();

        self.advisories = next;
        self.generated_at = Some(generated_at);
    }

    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.advisories.iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for a in &mut self.advisories {
            a.read = true;
        }
    }

    pub fn dismiss(&mut self, id: u32) -> Option<Advisory> {
        let pos = self.advisories.iter().position(|a| a.id == id)?;
        let removed = self.advisories.remove(pos);
        self.dismissed_rules.insert(removed.rule.clone());
        Some(removed)
    }

    pub fn clear_dismissed(&mut self) {
        self.dismissed_rules.clear();
    }

    pub fn filtered(&self, filter: AdvisoryFilter) -> Vec<&Advisory> {
        self.advisories.iter().filter(|a| filter.matches(a)).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.advisories.iter().filter(|a| !a.read).count()
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{crop, dry_weather, sensors};
    use crate::logic::RulesEngine;
    use crate::models::{WaterNeeds, WeatherCondition, WeatherSnapshot};

    fn stressed_batch() -> Vec<Advisory> {
        let rice = crop("Rice (Paddy)", WaterNeeds::High);
        let weather = WeatherSnapshot::new(36.0, 50.0, 30.0, WeatherCondition::Rainy);
        RulesEngine::new().generate(&sensors(30.0, 41.0, 6.5), &weather, Some(&rice))
    }

    fn board() -> AdvisoryBoard {
        let mut b = AdvisoryBoard::new();
        b.replace(stressed_batch(), Utc::now());
        b
    }

    #[test]
    fn filters() {
        let b = board();
        // moisture danger, heat danger, rain, crop water
        assert_eq!(b.len(), 4);
        assert_eq!(b.filtered(AdvisoryFilter::All).len(), 4);
        assert_eq!(b.filtered(AdvisoryFilter::Unread).len(), 4);
        assert_eq!(b.filtered(AdvisoryFilter::High).len(), 3);
    }

    #[test]
    fn mark_read_and_unread_count() {
        let mut b = board();
        assert_eq!(b.unread_count(), 4);
        assert!(b.mark_read(2));
        assert!(!b.mark_read(99));
        assert_eq!(b.unread_count(), 3);
        assert_eq!(b.filtered(AdvisoryFilter::Unread).len(), 3);

        b.mark_all_read();
        assert_eq!(b.unread_count(), 0);
        assert!(b.filtered(AdvisoryFilter::Unread).is_empty());
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut b = board();
        let removed = b.dismiss(1).unwrap();
        assert_eq!(removed.rule, "moisture_low");
        assert_eq!(b.len(), 3);
        assert!(b.dismiss(1).is_none());
    }

    #[test]
    fn regeneration_keeps_read_and_dismissed_state() {
        let mut b = board();
        b.mark_read(3); // heavy_rain
        b.dismiss(1); // moisture_low

        b.replace(stressed_batch(), Utc::now());
        assert_eq!(b.len(), 3);
        assert!(b.advisories().iter().all(|a| a.rule != "moisture_low"));
        let rain = b.advisories().iter().find(|a| a.rule == "heavy_rain").unwrap();
        assert!(rain.read);
        assert_eq!(b.unread_count(), 2);

        b.clear_dismissed();
        b.replace(stressed_batch(), Utc::now());
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn empty_batch_clears_board() {
        let mut b = board();
        b.replace(Vec::new(), Utc::now());
        assert!(b.is_empty());
        assert!(b.generated_at().is_some());

        let calm = RulesEngine::new().generate(&sensors(45.0, 28.0, 6.5), &dry_weather(), None);
        b.replace(calm, Utc::now());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn state_survives_save_and_load() {
        let db = Database::open_in_memory().unwrap();
        assert!(AdvisoryBoard::load(&db).unwrap().is_empty());

        let mut b = AdvisoryBoard::load(&db).unwrap();
        b.replace(stressed_batch(), Utc::now());
        b.save(&db).unwrap();

        let mut b = AdvisoryBoard::load(&db).unwrap();
        assert_eq!(b.len(), 4);
        assert!(b.mark_read(3));
        assert!(b.dismiss(1).is_some());
        b.save(&db).unwrap();

        let mut b = AdvisoryBoard::load(&db).unwrap();
        b.replace(stressed_batch(), Utc::now());
        assert_eq!(b.len(), 3);
        assert_eq!(b.unread_count(), 2);
        assert_eq!(b.filtered(AdvisoryFilter::Unread).len(), 2);
        b.save(&db).unwrap();

        let mut b = AdvisoryBoard::load(&db).unwrap();
        b.clear_dismissed();
        b.replace(stressed_batch(), Utc::now());
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn corrupt_board_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(BOARD_KEY, "[1, 2").unwrap();
        assert!(AdvisoryBoard::load(&db).unwrap().is_empty());
    }

    #[test]
    fn filter_from_str() {
        assert_eq!(AdvisoryFilter::from_str("ALL"), Some(AdvisoryFilter::All));
        assert_eq!(AdvisoryFilter::from_str("unread"), Some(AdvisoryFilter::Unread));
        assert_eq!(AdvisoryFilter::from_str("high"), Some(AdvisoryFilter::High));
        assert_eq!(AdvisoryFilter::from_str("critical"), None);
    }
}

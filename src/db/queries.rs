use crate::db::Database;
use crate::error::Result;
use crate::models::{CropProfile, SensorReading, SensorSource};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::warn;

pub const SELECTED_CROP_KEY: &str = "selected-crop";

// Settings Queries

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

// Crop Selection Queries

impl Database {
    /// Currently selected crop. A value that no longer parses is ignored.
    pub fn get_selected_crop(&self) -> Result<Option<CropProfile>> {
        let Some(json) = self.get_setting(SELECTED_CROP_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(crop) => Ok(Some(crop)),
            Err(e) => {
                warn!(error = %e, "Stored crop selection is unreadable, ignoring");
                Ok(None)
            }
        }
    }

    /// Persist the selection; `None` clears it.
    pub fn set_selected_crop(&self, crop: Option<&CropProfile>) -> Result<()> {
        match crop {
            Some(c) => {
                let json = serde_json::to_string(c)?;
                self.set_setting(SELECTED_CROP_KEY, &json)
            }
            None => self.delete_setting(SELECTED_CROP_KEY),
        }
    }
}

// Sensor History Queries

impl Database {
    pub fn record_reading(&self, reading: &SensorReading) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO sensor_readings
                    (timestamp, source, nitrogen, phosphorus, potassium,
                     moisture, temperature, humidity, ph, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    reading.timestamp.to_rfc3339(),
                    format!("{:?}", reading.source),
                    reading.nitrogen,
                    reading.phosphorus,
                    reading.potassium,
                    reading.moisture,
                    reading.temperature,
                    reading.humidity,
                    reading.ph,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Most recent readings, newest first.
    pub fn recent_readings(&self, limit: usize) -> Result<Vec<SensorReading>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM sensor_readings ORDER BY timestamp DESC, id DESC LIMIT ?1",
            )?;
            let readings = stmt
                .query_map([i64::try_from(limit).unwrap_or(i64::MAX)], row_to_reading)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(readings)
        })
    }
}

fn row_to_reading(row: &Row) -> rusqlite::Result<SensorReading> {
    let source_str: String = row.get("source")?;
    let timestamp_str: String = row.get("timestamp")?;

    let source = SensorSource::from_str(&source_str).unwrap_or_else(|| {
        warn!(source = %source_str, "Unknown sensor source in database, defaulting to Cached");
        SensorSource::Cached
    });

    Ok(SensorReading {
        nitrogen: row.get("nitrogen")?,
        phosphorus: row.get("phosphorus")?,
        potassium: row.get("potassium")?,
        moisture: row.get("moisture")?,
        temperature: row.get("temperature")?,
        humidity: row.get("humidity")?,
        ph: row.get("ph")?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        source,
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::catalog;
    use crate::models::SoilType;
    use chrono::Duration;

    #[test]
    fn selected_crop_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_selected_crop().unwrap().is_none());

        let cotton = catalog::find_crop(SoilType::Black, "cotton").unwrap();
        db.set_selected_crop(Some(&cotton)).unwrap();
        assert_eq!(db.get_selected_crop().unwrap(), Some(cotton));

        let wheat = catalog::find_crop(SoilType::Black, "wheat").unwrap();
        db.set_selected_crop(Some(&wheat)).unwrap();
        assert_eq!(db.get_selected_crop().unwrap().unwrap().name, "Wheat");

        db.set_selected_crop(None).unwrap();
        assert!(db.get_selected_crop().unwrap().is_none());
        assert!(db.get_setting(SELECTED_CROP_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_selection_reads_as_none() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(SELECTED_CROP_KEY, "{not json").unwrap();
        assert!(db.get_selected_crop().unwrap().is_none());
    }

    #[test]
    fn readings_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        for (i, moisture) in [41.0, 47.5, 52.0].into_iter().enumerate() {
            let mut r = SensorReading::new(65.0, 45.0, 80.0, moisture, 28.0, 65.0, 6.5);
            r.timestamp = now - Duration::hours(2 - i as i64);
            db.record_reading(&r).unwrap();
        }

        let recent = db.recent_readings(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].moisture, 52.0);
        assert_eq!(recent[1].moisture, 47.5);
        assert_eq!(recent[0].source, SensorSource::Mock);

        assert_eq!(db.recent_readings(usize::MAX).unwrap().len(), 3);
    }
}

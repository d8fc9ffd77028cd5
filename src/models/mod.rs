pub mod advisory;
pub mod crop;
pub mod sensor;
pub mod weather;

pub use advisory::*;
pub use crop::*;
pub use sensor::*;
pub use weather::*;

/// Inputs to one advisory generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FieldConditions {
    pub sensors: SensorReading,
    pub weather: WeatherSnapshot,
    pub crop: Option<CropProfile>,
}

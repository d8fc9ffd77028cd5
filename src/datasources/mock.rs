use crate::models::{WeatherCondition, WeatherSnapshot, WeatherSource};

/// Simulated weather used when no backend is configured or it is unreachable.
pub fn mock_weather() -> WeatherSnapshot {
    let mut weather = WeatherSnapshot::new(32.0, 68.0, 15.0, WeatherCondition::Cloudy)
        .with_forecast("Partly cloudy with chance of rain");
    weather.source = WeatherSource::Mock;
    weather
}

use crate::logic::AdvisoryFilter;
use crate::models::{SensorOverrides, WeatherCondition};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agrowatch", version, about = "Farm monitoring and crop advisories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test the backend connection
    Check,
    /// Show current conditions and generated alerts
    Advise {
        /// Which alerts to show: all, unread, high
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: AdvisoryFilter,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        readings: ReadingArgs,
    },
    /// Mark an alert from the last `advise` run as read
    Read {
        /// Alert number
        #[arg(required_unless_present = "all")]
        id: Option<u32>,

        /// Mark every alert as read
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
    /// Hide an alert's rule until `restore`
    Dismiss {
        /// Alert number
        id: u32,
    },
    /// Show dismissed alerts again
    Restore,
    /// Score soil health from the current readings
    Health {
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        readings: ReadingArgs,
    },
    /// List recommended crops for a soil type
    Crops {
        /// Soil type (defaults to the configured one)
        #[arg(short, long)]
        soil: Option<String>,
    },
    /// Select a crop by name or list number
    Select {
        /// Crop name or number from `agrowatch crops`
        crop: String,

        #[arg(short, long)]
        soil: Option<String>,
    },
    /// Clear the selected crop
    Deselect,
    /// Show recorded sensor readings
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// List the advisory rules in evaluation order, or run one of them
    Rules {
        /// Rule key to evaluate against current conditions
        rule: Option<String>,

        #[command(flatten)]
        readings: ReadingArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReadingArgs {
    /// Nitrogen (mg/kg)
    #[arg(long)]
    pub nitrogen: Option<f64>,
    /// Phosphorus (mg/kg)
    #[arg(long)]
    pub phosphorus: Option<f64>,
    /// Potassium (mg/kg)
    #[arg(long)]
    pub potassium: Option<f64>,
    /// Soil moisture (%)
    #[arg(long)]
    pub moisture: Option<f64>,
    /// Temperature (°C)
    #[arg(long)]
    pub temperature: Option<f64>,
    /// Relative humidity (%)
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Soil pH
    #[arg(long)]
    pub ph: Option<f64>,
    /// Expected rainfall (mm)
    #[arg(long)]
    pub rainfall: Option<f64>,
    /// Sky condition: sunny, cloudy, rainy, stormy
    #[arg(long, value_parser = parse_condition)]
    pub condition: Option<WeatherCondition>,
}

impl ReadingArgs {
    pub fn overrides(&self) -> SensorOverrides {
        SensorOverrides {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            moisture: self.moisture,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
            rainfall_mm: self.rainfall,
            condition: self.condition,
        }
    }
}

fn parse_filter(s: &str) -> Result<AdvisoryFilter, String> {
    AdvisoryFilter::from_str(s).ok_or_else(|| format!("unknown filter '{}' (all, unread, high)", s))
}

fn parse_condition(s: &str) -> Result<WeatherCondition, String> {
    WeatherCondition::from_str(s)
        .ok_or_else(|| format!("unknown condition '{}' (sunny, cloudy, rainy, stormy)", s))
}

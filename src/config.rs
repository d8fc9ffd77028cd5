use crate::error::{AgroWatchError, Result};
use crate::models::{SensorReading, SensorSource, SoilType};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub sensors: SensorBaseline,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub city: String,
    pub soil_type: Option<String>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

impl BackendConfig {
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.url.trim().is_empty()
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Baseline sensor values used when the backend has no live reading.
/// Defaults are the dashboard's simulated readings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorBaseline {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
}

impl Default for SensorBaseline {
    fn default() -> Self {
        Self {
            nitrogen: 65.0,
            phosphorus: 45.0,
            potassium: 80.0,
            moisture: 55.0,
            temperature: 28.0,
            humidity: 65.0,
            ph: 6.5,
        }
    }
}

impl SensorBaseline {
    pub fn to_reading(&self) -> SensorReading {
        SensorReading::new(
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.moisture,
            self.temperature,
            self.humidity,
            self.ph,
        )
        .with_source(SensorSource::Mock)
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AgroWatchError::Config(format!(
                "Config file not found at {:?}. Run `agrowatch init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgroWatchError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str)?;

        Self::from_yaml(&config_str)
    }

    /// Load the config if one exists, otherwise fall back to defaults.
    /// An explicit path must exist.
    pub fn load_or_default(config_override: Option<&PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists(None) {
            Self::load(config_override)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AgroWatchError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/agrowatch/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgroWatchError::Config("Cannot determine config directory".into()))?
            .join("agrowatch");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive(target: Option<&PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up AgroWatch!");
        println!();

        println!("Farm");
        let name: String = prompt_text("  Farm name", "Home Farm")?;
        let city: String = prompt_text("  City for weather", "Pune")?;
        let soil_names: Vec<&str> = SoilType::ALL
            .iter()
            .map(|s| s.as_str().trim_end_matches(" Soil"))
            .collect();
        let soil: String = prompt_text(
            &format!("  Soil type ({})", soil_names.join(", ").to_lowercase()),
            "loamy",
        )?;
        let soil_type = match SoilType::from_str(&soil) {
            Some(s) => Some(format!("{:?}", s).to_lowercase()),
            None => {
                println!("  Unknown soil type '{}', leaving it unset", soil);
                None
            }
        };

        println!();
        println!("Farm backend (leave URL blank to use simulated weather)");
        let url: String = Input::new()
            .with_prompt("  URL")
            .default("http://localhost:5000".into())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AgroWatchError::Config(format!("Input error: {}", e)))?;

        let token: String = if url.is_empty() {
            String::new()
        } else {
            Password::new()
                .with_prompt("  Bearer token")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| AgroWatchError::Config(format!("Input error: {}", e)))?
        };

        println!();

        let config = Config {
            farm: FarmConfig {
                name,
                city,
                soil_type,
            },
            backend: BackendConfig {
                enabled: !url.is_empty(),
                url,
                token,
                timeout_secs: default_timeout_secs(),
            },
            sensors: SensorBaseline::default(),
        };

        let config_path = match target {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn save(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AgroWatchError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgroWatch Configuration\n# Generated by `agrowatch init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AgroWatchError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                Err(_) => tracing::debug!(var = var_name, "Environment variable not set"),
            }
        }

        Ok(result)
    }

    pub fn soil_type(&self) -> Option<SoilType> {
        self.farm.soil_type.as_deref().and_then(SoilType::from_str)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("AGROWATCH_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| AgroWatchError::Config("Cannot determine data directory".into()))?
            .join("agrowatch");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("agrowatch.db"))
    }
}

fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(|e| AgroWatchError::Config(format!("Input error: {}", e)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "Home Farm".into(),
                city: "Pune".into(),
                soil_type: Some("loamy".into()),
            },
            backend: BackendConfig {
                url: String::new(),
                token: String::new(),
                enabled: false,
                timeout_secs: default_timeout_secs(),
            },
            sensors: SensorBaseline::default(),
        }
    }
}

//! Service configuration.
//!
//! Loaded once from a TOML file at startup and never mutated afterwards.
//! Every field has a default so an absent or partial file still yields a
//! runnable service. Secrets are not stored in the file: the OpenWeather
//! key is read from the environment variable named by `weather.api_key_env`
//! (a `.env` file is honored via `dotenv`).

use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::analysis::synthetic::DEFAULT_SAMPLE_COUNT;
use crate::recommend::PipelineSettings;

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pipeline: PipelineConfig,
    pub weather: WeatherConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub sample_count: usize,
    pub include_species: bool,
    /// Fixed seed for reproducible responses. Unset in production.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            include_species: true,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            sample_count: self.sample_count,
            include_species: self.include_species,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub api_key_env: String,
    /// Temperature substituted whenever the fetch fails, °C.
    pub fallback_temperature_c: f64,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/3.0/onecall".to_string(),
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            fallback_temperature_c: 28.0,
            timeout_secs: 10,
        }
    }
}

impl WeatherConfig {
    /// The API key from the environment, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub ocean_csv: String,
    pub historical_migration_csv: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ocean_csv: "goa_daily_salinity.csv".to_string(),
            historical_migration_csv: "historical_migration_data.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads the file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?)
    }
}

/// Installs the process-wide configuration. Only the first call has any
/// effect; later calls return the already-installed value.
pub fn init(config: Config) -> &'static Config {
    CONFIG.get_or_init(|| config)
}

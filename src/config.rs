use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub geoapify: GeoapifySettings,
    #[serde(default)]
    pub openweather: OpenWeatherSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8001
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifySettings {
    #[serde(default = "default_geoapify_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for GeoapifySettings {
    fn default() -> Self {
        Self {
            base_url: default_geoapify_url(),
            api_key: String::new(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_geoapify_url() -> String {
    "https://api.geoapify.com".to_string()
}
fn default_cache_size() -> u64 {
    1000
}
fn default_cache_ttl() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherSettings {
    #[serde(default = "default_openweather_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for OpenWeatherSettings {
    fn default() -> Self {
        Self {
            base_url: default_openweather_url(),
            api_key: String::new(),
        }
    }
}

fn default_openweather_url() -> String {
    "https://api.openweathermap.org".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            limit: default_search_limit(),
        }
    }
}

fn default_radius_m() -> u32 {
    5000
}
fn default_search_limit() -> u32 {
    15
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_feedback_path")]
    pub feedback_path: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            feedback_path: default_feedback_path(),
        }
    }
}

fn default_model_path() -> String {
    "model.json".to_string()
}
fn default_feedback_path() -> String {
    "feedback.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "data.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    6
}

/// Scoring weights as configuration.
///
/// The defaults are the empirical constants the ranking behavior was tuned
/// against; they are exposed here so deployments can adjust them without a
/// rebuild, not because other values are known to work well.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_predictor_match")]
    pub predictor_match: i32,
    #[serde(default = "default_rain_outdoor_penalty")]
    pub rain_outdoor_penalty: i32,
    #[serde(default = "default_rain_indoor_bonus")]
    pub rain_indoor_bonus: i32,
    #[serde(default = "default_sun_outdoor_bonus")]
    pub sun_outdoor_bonus: i32,
    #[serde(default = "default_free_bonus")]
    pub free_bonus: i32,
    #[serde(default = "default_premium_bonus")]
    pub premium_bonus: i32,
    #[serde(default = "default_far_penalty")]
    pub far_penalty: i32,
    #[serde(default = "default_short_time_min")]
    pub short_time_min: u32,
    #[serde(default = "default_far_distance_m")]
    pub far_distance_m: f64,
    #[serde(default = "default_min_score")]
    pub min_score: i32,
    #[serde(default = "default_max_score")]
    pub max_score: i32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            predictor_match: default_predictor_match(),
            rain_outdoor_penalty: default_rain_outdoor_penalty(),
            rain_indoor_bonus: default_rain_indoor_bonus(),
            sun_outdoor_bonus: default_sun_outdoor_bonus(),
            free_bonus: default_free_bonus(),
            premium_bonus: default_premium_bonus(),
            far_penalty: default_far_penalty(),
            short_time_min: default_short_time_min(),
            far_distance_m: default_far_distance_m(),
            min_score: default_min_score(),
            max_score: default_max_score(),
        }
    }
}

fn default_base() -> i32 {
    70
}
fn default_predictor_match() -> i32 {
    5
}
fn default_rain_outdoor_penalty() -> i32 {
    30
}
fn default_rain_indoor_bonus() -> i32 {
    20
}
fn default_sun_outdoor_bonus() -> i32 {
    25
}
fn default_free_bonus() -> i32 {
    20
}
fn default_premium_bonus() -> i32 {
    15
}
fn default_far_penalty() -> i32 {
    15
}
fn default_short_time_min() -> u32 {
    45
}
fn default_far_distance_m() -> f64 {
    3000.0
}
fn default_min_score() -> i32 {
    40
}
fn default_max_score() -> i32 {
    99
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Layers, later overrides earlier:
    /// 1. Defaults baked into the structs
    /// 2. config/default.toml
    /// 3. config/local.toml (development overrides)
    /// 4. Environment variables prefixed with POCKETPLAN_
    ///    (e.g. POCKETPLAN_SERVER__PORT -> server.port)
    /// 5. Well-known key variables: GEOAPIFY_KEY, OPENWEATHER_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("POCKETPLAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("POCKETPLAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the well-known API key environment variables, which deployments
/// set without the config prefix
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let geoapify_key = env::var("GEOAPIFY_KEY").ok();
    let openweather_key = env::var("OPENWEATHER_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = geoapify_key {
        builder = builder.set_override("geoapify.api_key", key)?;
    }
    if let Some(key) = openweather_key {
        builder = builder.set_override("openweather.api_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_preserve_empirical_constants() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.base, 70);
        assert_eq!(weights.predictor_match, 5);
        assert_eq!(weights.rain_outdoor_penalty, 30);
        assert_eq!(weights.rain_indoor_bonus, 20);
        assert_eq!(weights.sun_outdoor_bonus, 25);
        assert_eq!(weights.free_bonus, 20);
        assert_eq!(weights.premium_bonus, 15);
        assert_eq!(weights.far_penalty, 15);
        assert_eq!(weights.short_time_min, 45);
        assert_eq!(weights.far_distance_m, 3000.0);
        assert_eq!(weights.min_score, 40);
        assert_eq!(weights.max_score, 99);
    }

    #[test]
    fn test_default_scoring_retains_six_picks() {
        let scoring = ScoringSettings::default();
        assert_eq!(scoring.top_k, 6);
    }

    #[test]
    fn test_default_search_bounds() {
        let search = SearchSettings::default();
        assert_eq!(search.radius_m, 5000);
        assert_eq!(search.limit, 15);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "pretty");
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    pub profiles: ProfileSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Gemini AI tier configuration.
///
/// An empty key is valid: the AI tier then skips itself and the
/// deterministic fallback carries every request.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_gemini_endpoint(),
            api_key: String::new(),
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_endpoint() -> String {
    crate::services::gemini::DEFAULT_ENDPOINT.to_string()
}

fn default_gemini_model() -> String {
    crate::services::gemini::DEFAULT_MODEL.to_string()
}

/// Profile store (proficiency mappings) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_cap: default_candidate_cap(),
            default_radius_km: default_radius_km(),
        }
    }
}

fn default_candidate_cap() -> usize {
    crate::core::recommender::DEFAULT_CANDIDATE_CAP
}

fn default_radius_km() -> f64 {
    crate::core::proximity::DEFAULT_RADIUS_KM
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
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with HACKMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g. HACKMATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HACKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HACKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional bare environment variables on top of the layered
/// config. `GEMINI_API_KEY`/`GEMINI_MODEL` are what deployments historically
/// set, so they win over file values.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(key) = env::var("GEMINI_API_KEY") {
        builder = builder.set_override("gemini.api_key", key)?;
    }
    if let Ok(model) = env::var("GEMINI_MODEL") {
        builder = builder.set_override("gemini.model", model)?;
    }
    if let Ok(endpoint) = env::var("PROFILE_STORE_URL") {
        builder = builder.set_override("profiles.endpoint", endpoint)?;
    }
    if let Ok(key) = env::var("PROFILE_STORE_API_KEY") {
        builder = builder.set_override("profiles.api_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_defaults() {
        let gemini = GeminiSettings::default();
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert!(gemini.api_key.is_empty());
        assert!(gemini.endpoint.contains("generativelanguage"));
    }

    #[test]
    fn test_matching_defaults() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.candidate_cap, 200);
        assert_eq!(matching.default_radius_km, 100.0);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}

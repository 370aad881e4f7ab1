use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable consulted for the OpenAI key when the config has none
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Which backend generates the recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Local Ollama server, no credential required
    #[default]
    Local,
    /// OpenAI cloud API, requires an API key
    #[value(name = "openai")]
    OpenAI,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Local => "local",
            Mode::OpenAI => "openai",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Mode::Local),
            "openai" => Ok(Mode::OpenAI),
            other => Err(format!(
                "Unknown mode '{}', expected 'local' or 'openai'",
                other
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Mode used when a request does not name one
    #[serde(default)]
    pub default_mode: Mode,
    /// Backend request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Per-backend settings
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mode: Mode::default(),
            timeout: default_timeout(),
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

/// HTTP service settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

/// Settings for both backends
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub local: ProviderConfig,
    #[serde(default)]
    pub openai: ProviderConfig,
}

impl ProvidersConfig {
    pub fn for_mode(&self, mode: Mode) -> &ProviderConfig {
        match mode {
            Mode::Local => &self.local,
            Mode::OpenAI => &self.openai,
        }
    }

    pub fn for_mode_mut(&mut self, mode: Mode) -> &mut ProviderConfig {
        match mode {
            Mode::Local => &mut self.local,
            Mode::OpenAI => &mut self.openai,
        }
    }
}

/// Configuration for a specific backend
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this backend may be used
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "llama3.1", "gpt-4o"); backend default when unset
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl ProviderConfig {
    /// The configured key, else the value of `env_var`. Blank values count as absent.
    pub fn resolve_api_key(&self, env_var: &str) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(env_var).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

// Default value functions
fn default_timeout() -> u64 {
    120
}

fn default_addr() -> String {
    "127.0.0.1:8001".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__PROVIDERS__OPENAI__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Backend request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from `config.toml` (optional) and `RECIPE__` environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from("config")
}

/// Load configuration from the given file (optional, extension may be omitted)
/// layered under `RECIPE__` environment variables
pub fn load_config_from(path: &str) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(path).required(false))
        // Use double underscore for nested: RECIPE__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.default_mode, Mode::Local);
        assert_eq!(config.timeout, 120);
        assert_eq!(config.server.addr, "127.0.0.1:8001");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));

        let provider = ProviderConfig::default();
        assert!(provider.enabled);
        assert_eq!(provider.temperature, 0.7);
        assert_eq!(provider.max_tokens, 2000);
        assert!(provider.model.is_none());
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("local".parse::<Mode>().unwrap(), Mode::Local);
        assert_eq!(" OpenAI ".parse::<Mode>().unwrap(), Mode::OpenAI);
        assert!("anthropic".parse::<Mode>().is_err());
        assert_eq!(Mode::OpenAI.to_string(), "openai");
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: Mode = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(mode, Mode::OpenAI);
        assert_eq!(serde_json::to_string(&Mode::Local).unwrap(), "\"local\"");
        assert!(serde_json::from_str::<Mode>("\"OpenAI\"").is_err());
    }

    #[test]
    fn test_configured_api_key_wins() {
        let config = ProviderConfig {
            api_key: Some("  sk-configured  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_key("RECIPE_TEST_UNSET_KEY_VAR").as_deref(),
            Some("sk-configured")
        );
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config
            .resolve_api_key("RECIPE_TEST_UNSET_KEY_VAR")
            .is_none());
        assert!(ProviderConfig::default()
            .resolve_api_key("RECIPE_TEST_UNSET_KEY_VAR")
            .is_none());
    }

    #[test]
    fn test_providers_for_mode() {
        let mut providers = ProvidersConfig::default();
        providers.for_mode_mut(Mode::OpenAI).model = Some("gpt-4o-mini".to_string());

        assert_eq!(
            providers.for_mode(Mode::OpenAI).model.as_deref(),
            Some("gpt-4o-mini")
        );
        assert!(providers.for_mode(Mode::Local).model.is_none());
    }

    #[test]
    fn test_load_config_without_file() {
        // No config.toml in the test working directory; defaults must fill in
        let result = load_config_from("recipe-intelligence-missing-config");
        assert!(result.is_ok());
    }
}

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub locale: LocaleConfig,
    pub content_store: ContentStoreConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Supported site locales; feeds [`crate::locale::LocaleRegistry`] at
/// startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub supported: Vec<String>,
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentStoreConfig {
    pub notion_token: String,
    pub products_database_id: String,
    pub projects_database_id: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Content cache TTL in seconds.
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::load_from(None)
    }

    /// Same as [`Config::load`] with an explicit file path (`--config`).
    pub fn load_from(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => Self::from_toml(&config_path)?,
            None => {
                tracing::warn!("Configuration file not found, using defaults");
                Config::default()
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_NOTION_TOKEN: Content store integration token
    /// - APP_PRODUCTS_DATABASE_ID: Products database id
    /// - APP_PROJECTS_DATABASE_ID: Projects database id
    /// - APP_DEFAULT_LOCALE: Default site locale (must be in locale.supported)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,atelier_server=debug")
    /// - APP_CACHE_ENABLED: Enable/disable the content cache (true/false)
    /// - APP_CACHE_TTL_SECS: Content cache TTL (accepts "300", "5m", "1h")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(token) = std::env::var("APP_NOTION_TOKEN") {
            self.content_store.notion_token = token;
            tracing::info!("Override content_store.notion_token from env");
        }

        if let Ok(id) = std::env::var("APP_PRODUCTS_DATABASE_ID") {
            self.content_store.products_database_id = id;
            tracing::info!("Override content_store.products_database_id from env");
        }

        if let Ok(id) = std::env::var("APP_PROJECTS_DATABASE_ID") {
            self.content_store.projects_database_id = id;
            tracing::info!("Override content_store.projects_database_id from env");
        }

        if let Ok(locale) = std::env::var("APP_DEFAULT_LOCALE") {
            self.locale.default = locale;
            tracing::info!("Override locale.default from env: {}", self.locale.default);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(enabled) = std::env::var("APP_CACHE_ENABLED")
            && let Ok(enabled) = enabled.parse()
        {
            self.cache.enabled = enabled;
            tracing::info!("Override cache.enabled from env: {}", self.cache.enabled);
        }

        if let Ok(ttl) = std::env::var("APP_CACHE_TTL_SECS") {
            match parse_duration_to_secs(&ttl) {
                Ok(val) => {
                    self.cache.ttl_secs = val;
                    tracing::info!("Override cache.ttl_secs from env: {}", self.cache.ttl_secs);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_CACHE_TTL_SECS '{}': {} (keep {})",
                    ttl,
                    e,
                    self.cache.ttl_secs
                ),
            }
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.locale.supported.is_empty() {
            anyhow::bail!("locale.supported cannot be empty");
        }
        if !self.locale.supported.contains(&self.locale.default) {
            anyhow::bail!(
                "locale.default '{}' is not in locale.supported",
                self.locale.default
            );
        }

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            anyhow::bail!("cache.ttl_secs must be > 0 when the cache is enabled");
        }

        if self.content_store.notion_token.is_empty() {
            tracing::warn!("⚠️  content_store.notion_token is empty!");
            tracing::warn!("⚠️  Catalog requests will fail until APP_NOTION_TOKEN is set");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { supported: vec!["fr".to_string(), "en".to_string()], default: "fr".to_string() }
    }
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            notion_token: String::new(),
            products_database_id: String::new(),
            projects_database_id: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true, ttl_secs: 300 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,atelier_server=debug".to_string(),
            file: Some("logs/atelier-server.log".to_string()),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

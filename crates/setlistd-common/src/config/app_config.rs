//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub supabase: SupabaseConfig,
    pub seatgeek: SeatGeekConfig,
    pub http_client: HttpClientConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// Supabase project: auth API and storage buckets
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
    /// Public key used for signup/login; falls back to the service key
    pub anon_key: Option<String>,
    #[serde(default = "default_profile_bucket")]
    pub profile_bucket: String,
    #[serde(default = "default_banner_bucket")]
    pub banner_bucket: String,
    #[serde(default = "default_media_bucket")]
    pub media_bucket: String,
}

impl SupabaseConfig {
    /// Key sent as `apikey` on user-facing auth calls
    #[must_use]
    pub fn public_key(&self) -> &str {
        self.anon_key.as_deref().unwrap_or(&self.service_role_key)
    }
}

/// SeatGeek events API credentials
#[derive(Debug, Clone, Deserialize)]
pub struct SeatGeekConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    #[serde(default = "default_seatgeek_base_url")]
    pub base_url: String,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpClientConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "setlistd".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_profile_bucket() -> String {
    "profile-images".to_string()
}

fn default_banner_bucket() -> String {
    "banner-images".to_string()
}

fn default_media_bucket() -> String {
    "post-media".to_string()
}

fn default_seatgeek_base_url() -> String {
    "https://api.seatgeek.com/2".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| var(key).filter(|v| !v.trim().is_empty());
        let number = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            parsed(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, v))
                })
                .transpose()
        };

        let port = match number("API_PORT")?.or(number("PORT")?) {
            Some(p) => u16::try_from(p).map_err(|_| ConfigError::InvalidValue("API_PORT", p.to_string()))?,
            None => default_port(),
        };

        Ok(Self {
            app: AppSettings {
                name: parsed("APP_NAME").unwrap_or_else(default_app_name),
                env: parsed("APP_ENV")
                    .map(|s| s.parse())
                    .transpose()?
                    .unwrap_or_else(default_env),
            },
            api: ServerConfig {
                host: parsed("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: parsed("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: number("DATABASE_MAX_CONNECTIONS")?
                    .map_or_else(default_max_connections, |n| n as u32),
                min_connections: number("DATABASE_MIN_CONNECTIONS")?
                    .map_or_else(default_min_connections, |n| n as u32),
                run_migrations: parsed("DATABASE_RUN_MIGRATIONS")
                    .map_or_else(default_run_migrations, |v| v != "false" && v != "0"),
            },
            supabase: SupabaseConfig {
                url: parsed("SUPABASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .ok_or(ConfigError::MissingVar("SUPABASE_URL"))?,
                service_role_key: parsed("SUPABASE_SERVICE_ROLE_KEY")
                    .or(parsed("SUPABASE_SERVICE_KEY"))
                    .ok_or(ConfigError::MissingVar("SUPABASE_SERVICE_ROLE_KEY"))?,
                anon_key: parsed("SUPABASE_ANON_KEY"),
                profile_bucket: parsed("SUPABASE_PROFILE_BUCKET")
                    .unwrap_or_else(default_profile_bucket),
                banner_bucket: parsed("SUPABASE_BANNER_BUCKET")
                    .unwrap_or_else(default_banner_bucket),
                media_bucket: parsed("SUPABASE_MEDIA_BUCKET")
                    .unwrap_or_else(default_media_bucket),
            },
            seatgeek: SeatGeekConfig {
                client_id: parsed("SEATGEEK_CLIENT_ID").unwrap_or_default(),
                client_secret: parsed("SEATGEEK_CLIENT_SECRET"),
                base_url: parsed("SEATGEEK_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_seatgeek_base_url),
            },
            http_client: HttpClientConfig {
                timeout_secs: number("HTTP_CLIENT_TIMEOUT_SECS")?
                    .unwrap_or_else(default_http_timeout_secs),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: number("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .map_or_else(default_requests_per_second, |n| n as u32),
                burst: number("RATE_LIMIT_BURST")?.map_or_else(default_burst, |n| n as u32),
            },
            cors: CorsConfig {
                allowed_origins: parsed("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

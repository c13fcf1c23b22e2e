use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Settings for the marketplace service, assembled from `APP_*` variables and an optional `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = optional("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or_default();

        let server = ServerConfig {
            host: optional("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match optional("APP_PORT") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
                None => DEFAULT_PORT,
            },
        };

        let telemetry = TelemetryConfig {
            log_level: optional("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: match optional("APP_LOG_FORMAT") {
                Some(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
                None => LogFormat::default(),
            },
        };

        let marketplace = MarketplaceConfig {
            seed_demo_data: match optional("APP_SEED_DEMO_DATA") {
                Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                    name: "APP_SEED_DEMO_DATA",
                    value: raw,
                })?,
                None => true,
            },
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            marketplace,
        })
    }
}

/// Unset and non-unicode variables are treated alike.
fn optional(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Output style of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Start with the demo members and reports instead of an empty store.
    pub seed_demo_data: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),
    #[error("APP_HOST '{host}' must be 'localhost' or an IPv4/IPv6 address")]
    InvalidHost {
        host: String,
        #[source]
        source: AddrParseError,
    },
    #[error("APP_LOG_FORMAT must be 'compact' or 'json', got '{0}'")]
    InvalidLogFormat(String),
    #[error("{name} must be a boolean flag, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

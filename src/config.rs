use std::env;
use std::fmt;
use std::time::Duration;

use crate::utils::timeout::parse_duration;

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct WebAddress {
    pub host: String,
    pub port: String,
}

impl WebAddress {
    /// `host:port`; a leading `:` on the port (`:1111`) is dropped.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port.trim_start_matches(':'))
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub host: String,
    pub port: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user,
            self.password,
            self.host,
            self.port.trim_start_matches(':'),
            self.name,
            self.ssl_mode
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Kept as written; the gateway parses it per request.
    pub timeout: String,
}

impl ContextConfig {
    pub fn duration(&self) -> Result<Duration, String> {
        parse_duration(&self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app: String,
    pub environment: String,
    pub log_level: String,
    pub context: ContextConfig,
    pub server: WebAddress,
    pub db: DbConfig,
    pub client_service: WebAddress,
    pub job_service: WebAddress,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_connections = get("POSTGRES_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .map_err(|err| ConfigError(format!("POSTGRES_MAX_CONNECTIONS: {}", err)))?;

        Ok(Config {
            app: get("APP", "app"),
            environment: get("ENVIRONMENT", "develop"),
            log_level: get("LOG_LEVEL", "debug"),
            context: ContextConfig {
                timeout: get("CONTEXT_TIMEOUT", "30s"),
            },
            server: WebAddress {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: get("SERVER_PORT", "5555"),
            },
            db: DbConfig {
                host: get("POSTGRES_HOST", "localhost"),
                port: get("POSTGRES_PORT", "5432"),
                name: get("POSTGRES_DATABASE", "client_job_services_db"),
                user: get("POSTGRES_USER", "postgres"),
                password: get("POSTGRES_PASSWORD", "root"),
                ssl_mode: get("POSTGRES_SSLMODE", "disable"),
                max_connections,
            },
            client_service: WebAddress {
                host: get("CLIENT_SERVICE_GRPC_HOST", "localhost"),
                port: get("CLIENT_SERVICE_GRPC_PORT", "1111"),
            },
            job_service: WebAddress {
                host: get("JOB_SERVICE_GRPC_HOST", "localhost"),
                port: get("JOB_SERVICE_GRPC_PORT", "2222"),
            },
        })
    }

    /// Deadline for service-side use cases, resolved once at start-up.
    pub fn service_timeout(&self) -> Result<Duration, ConfigError> {
        self.context
            .duration()
            .map_err(|err| ConfigError(format!("CONTEXT_TIMEOUT: {}", err)))
    }
}

//! Gateway configuration
//!
//! Configuration is read once at startup from environment variables. Every
//! setting except `SCIM_API_KEY` has a default; a value that is present but
//! cannot be parsed is a [`BuildError::InvalidConfiguration`], never silently
//! replaced by the default.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` | `8080` |
//! | `SERVER_READ_TIMEOUT` | `15s` |
//! | `SERVER_WRITE_TIMEOUT` | `15s` |
//! | `SERVER_IDLE_TIMEOUT` | `30s` |
//! | `SERVER_SHUTDOWN_TIMEOUT` | `30s` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_OUTPUT_PATHS` | `stderr` (comma list of `stderr`, `stdout` or file paths) |
//! | `SERVICE` | `scim-gateway` |
//! | `APPLICATION_VERSION` | crate version |
//! | `ENVIRONMENT` | `development` |
//! | `SCIM_API_KEY` | required |
//! | `SCIM_BASE_URL` | `http://localhost:8080/scim/v2` |
//! | `SCIM_DOCUMENTATION_URI` | `https://www.rfc-editor.org/info/rfc7644` |
//! | `SCIM_FILTER_MAX_RESULTS` | `50` |
//! | `SCIM_SCHEMA_DIR` | unset |
//!
//! Durations use `humantime` syntax such as `15s`, `500ms` or `1m`.

use crate::auth::AuthConfig;
use crate::error::{BuildError, BuildResult};
use crate::schema::{DEFAULT_BASE_URL, SchemaRegistry};
use crate::schema_discovery::{
    AuthenticationScheme, DEFAULT_DOCUMENTATION_URI, DEFAULT_FILTER_MAX_RESULTS, SchemaDiscovery,
    ServiceProviderConfig,
};

use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub application: ApplicationConfig,
    pub auth: AuthConfig,
    pub discovery: DiscoveryConfig,
}

impl GatewayConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> BuildResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through a lookup function.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> BuildResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let api_key = env.get("SCIM_API_KEY").ok_or_else(|| {
            BuildError::invalid_configuration("SCIM_API_KEY must be set")
        })?;

        Ok(Self {
            server: ServerConfig {
                host: env.get_or("SERVER_HOST", "0.0.0.0"),
                port: env.parse("SERVER_PORT", 8080)?,
                read_timeout: env.duration("SERVER_READ_TIMEOUT", DEFAULT_READ_TIMEOUT)?,
                write_timeout: env.duration("SERVER_WRITE_TIMEOUT", DEFAULT_WRITE_TIMEOUT)?,
                idle_timeout: env.duration("SERVER_IDLE_TIMEOUT", DEFAULT_IDLE_TIMEOUT)?,
                shutdown_timeout: env
                    .duration("SERVER_SHUTDOWN_TIMEOUT", DEFAULT_SHUTDOWN_TIMEOUT)?,
            },
            logging: LoggingConfig {
                level: env.parse("LOG_LEVEL", LevelFilter::Info)?,
                outputs: env
                    .get("LOG_OUTPUT_PATHS")
                    .map(|raw| LogOutput::parse_list(&raw))
                    .unwrap_or_else(|| vec![LogOutput::Stderr]),
            },
            application: ApplicationConfig {
                service: env.get_or("SERVICE", "scim-gateway"),
                version: env.get_or("APPLICATION_VERSION", env!("CARGO_PKG_VERSION")),
                environment: env
                    .get("ENVIRONMENT")
                    .map(|raw| Environment::from_name(&raw))
                    .unwrap_or_default(),
            },
            auth: AuthConfig::new(api_key)?,
            discovery: DiscoveryConfig {
                base_url: env.get_or("SCIM_BASE_URL", DEFAULT_BASE_URL),
                documentation_uri: env.get_or("SCIM_DOCUMENTATION_URI", DEFAULT_DOCUMENTATION_URI),
                filter_max_results: env
                    .parse("SCIM_FILTER_MAX_RESULTS", DEFAULT_FILTER_MAX_RESULTS)?,
                schema_dir: env.get("SCIM_SCHEMA_DIR").map(PathBuf::from),
            },
        })
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, key: &str, default: T) -> BuildResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse().map_err(|e| {
                BuildError::invalid_configuration(format!("{}='{}': {}", key, raw, e))
            }),
            None => Ok(default),
        }
    }

    fn duration(&self, key: &str, default: Duration) -> BuildResult<Duration> {
        match self.get(key) {
            Some(raw) => humantime::parse_duration(&raw).map_err(|e| {
                BuildError::invalid_configuration(format!("{}='{}': {}", key, raw, e))
            }),
            None => Ok(default),
        }
    }
}

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port to listen on; 0 picks a free port
    pub port: u16,
    /// Time a client has to send the request headers
    pub read_timeout: Duration,
    /// Time the gateway has to produce a response once the request is in
    pub write_timeout: Duration,
    /// How long a keep-alive connection may wait for its next request
    pub idle_timeout: Duration,
    /// Grace period for draining in-flight requests on shutdown
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound on the time the handler stack spends on one request.
    pub fn request_timeout(&self) -> Duration {
        self.write_timeout
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

impl LogOutput {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "stderr" => LogOutput::Stderr,
            "stdout" => LogOutput::Stdout,
            _ => LogOutput::File(PathBuf::from(name)),
        }
    }

    /// Parse a comma separated list of sinks, skipping blank entries.
    ///
    /// An empty list falls back to stderr.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let outputs: Vec<Self> = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Self::from_name)
            .collect();
        if outputs.is_empty() {
            vec![LogOutput::Stderr]
        } else {
            outputs
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    /// Every sink receives every line
    pub outputs: Vec<LogOutput>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            outputs: vec![LogOutput::Stderr],
        }
    }
}

/// Deployment environment; selects the log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `prod` and `production` (any case) select production, anything else
    /// development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the running service, attached to every log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfig {
    pub service: String,
    pub version: String,
    pub environment: Environment,
}

/// Inputs to the schema registry and the service provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Public base URL, used for `meta.location`
    pub base_url: String,
    pub documentation_uri: String,
    pub filter_max_results: u32,
    /// Directory of extra `*.json` schema definitions
    pub schema_dir: Option<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            documentation_uri: DEFAULT_DOCUMENTATION_URI.to_string(),
            filter_max_results: DEFAULT_FILTER_MAX_RESULTS,
            schema_dir: None,
        }
    }
}

impl DiscoveryConfig {
    /// Service provider configuration advertised with these settings.
    pub fn service_provider_config(&self) -> ServiceProviderConfig {
        let mut config = ServiceProviderConfig {
            documentation_uri: Some(self.documentation_uri.clone()),
            authentication_schemes: vec![AuthenticationScheme::api_key(Some(
                self.documentation_uri.clone(),
            ))],
            ..ServiceProviderConfig::default()
        };
        config.filter.max_results = self.filter_max_results;
        config
    }

    /// Populate the registry and build the discovery component.
    pub fn build(&self) -> BuildResult<SchemaDiscovery> {
        let mut builder = SchemaRegistry::builder()
            .base_url(self.base_url.as_str())
            .with_embedded_definitions();
        if let Some(dir) = &self.schema_dir {
            builder = builder.schema_dir(dir);
        }
        SchemaDiscovery::with_config(builder.build()?, self.service_provider_config())
    }
}

use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long = "database-url", env = "MESSAGE_STORE_DATABASE_URL")]
    pub url: String,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "MESSAGE_STORE_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "MESSAGE_STORE_DB_MIN_CONNECTIONS", default_value_t = 0)]
    pub min_connections: u32,

    /// How long a request waits for a free connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "MESSAGE_STORE_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Idle connections are closed after this many seconds
    #[arg(long = "db-idle-timeout-secs", env = "MESSAGE_STORE_DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Connections are recycled after this many seconds
    #[arg(long = "db-max-lifetime-secs", env = "MESSAGE_STORE_DB_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,

    /// Apply the embedded schema migrations before accepting traffic.
    /// Disable when deployment tooling owns the schema.
    #[arg(
        long = "run-migrations",
        env = "MESSAGE_STORE_RUN_MIGRATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub run_migrations: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "MESSAGE_STORE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the message API
    #[arg(long, env = "MESSAGE_STORE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for liveness and readiness probes
    #[arg(long, env = "MESSAGE_STORE_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work after a shutdown signal
    #[arg(long, env = "MESSAGE_STORE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness database check in milliseconds
    #[arg(long = "health-db-timeout-ms", env = "MESSAGE_STORE_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint. Export is disabled when unset.
    #[arg(long, env = "MESSAGE_STORE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "MESSAGE_STORE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_with_only_database_url() {
        let config = Config::try_parse_from(["message-store", "--database-url", "postgres://localhost/messages"])
            .expect("config should parse");

        assert_eq!(config.database.url, "postgres://localhost/messages");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.run_migrations);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.mgmt_port, 9090);
        assert_eq!(config.health.db_timeout_ms, 2000);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_migrations_can_be_disabled() {
        let config = Config::try_parse_from([
            "message-store",
            "--database-url",
            "postgres://localhost/messages",
            "--run-migrations",
            "false",
            "--log-format",
            "json",
        ])
        .expect("config should parse");

        assert!(!config.database.run_migrations);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn test_database_url_is_required() {
        // Guard against a stray env var in the test environment.
        if std::env::var_os("MESSAGE_STORE_DATABASE_URL").is_some() {
            return;
        }
        assert!(Config::try_parse_from(["message-store"]).is_err());
    }
}

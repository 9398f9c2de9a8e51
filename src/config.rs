use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 80;
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Name of the environment variable holding the Postgres connection string.
pub const DATABASE_URL_VAR: &str = "DB";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddr { name: &'static str, value: String },

    #[error("{name} must be a positive whole number of milliseconds, got {value}")]
    InvalidMillis { name: &'static str, value: String },
}

/// Where the connection string comes from.
///
/// The service reads it on every request so a changed environment is
/// picked up without a restart.
#[derive(Debug, Clone)]
pub enum DatabaseUrl {
    Env(&'static str),
    /// pinned value so tests never touch the process environment
    #[cfg(test)]
    Fixed(Option<String>),
}

impl DatabaseUrl {

    /// Returns the connection string, treating empty as unset.
    pub fn resolve(&self) -> Option<String> {

        let value = match self {
            DatabaseUrl::Env(name) => std::env::var(name).ok(),
            #[cfg(test)]
            DatabaseUrl::Fixed(value) => value.clone(),
        };

        value.filter(|url| !url.trim().is_empty())

    }

}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: DatabaseUrl,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
    pub log_path: Option<PathBuf>,
}

impl Config {

    pub fn from_env() -> Result<Self, ConfigError> {

        Self::from_lookup(|key| std::env::var(key).ok())

    }

    /// Builds the config from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidAddr {
                name: "LISTEN_ADDR",
                value,
            })?,
            None => ([0, 0, 0, 0], DEFAULT_PORT).into(),
        };

        let connect_timeout = millis(&lookup, "DB_CONNECT_TIMEOUT_MS")?;
        let query_timeout = millis(&lookup, "DB_QUERY_TIMEOUT_MS")?;

        let log_path = lookup("LOG_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            listen_addr,
            database_url: DatabaseUrl::Env(DATABASE_URL_VAR),
            connect_timeout,
            query_timeout,
            log_path,
        })

    }

}

fn millis<F>(lookup: &F, name: &'static str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{

    match lookup(name) {
        Some(value) => match value.trim().parse::<u64>() {
            // a zero bound would time out every request
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(ConfigError::InvalidMillis { name, value }),
        },
        None => Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
    }

}

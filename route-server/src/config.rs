//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cities::CitySource;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default directory for static assets.
const DEFAULT_STATIC_DIR: &str = "static";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used
    #[error("invalid {var}={value:?}: {message}")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },

    /// Two variables that exclude each other are both set
    #[error("{0} and {1} are mutually exclusive")]
    Conflict(&'static str, &'static str),
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on (`ROUTE_SERVER_ADDR`).
    pub addr: SocketAddr,

    /// City dataset (`CITIES_PATH` or `CITIES_URL`, else embedded).
    pub cities: CitySource,

    /// Reload the dataset this often (`CITIES_REFRESH_SECS`).
    /// `None` keeps the startup graph for the life of the process.
    pub refresh_interval: Option<Duration>,

    /// Directory served under `/static` (`STATIC_DIR`).
    pub static_dir: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_text = get("ROUTE_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "ROUTE_SERVER_ADDR",
                value: addr_text.clone(),
                message: e.to_string(),
            })?;

        let cities = match (get("CITIES_PATH"), get("CITIES_URL")) {
            (Some(_), Some(_)) => return Err(ConfigError::Conflict("CITIES_PATH", "CITIES_URL")),
            (Some(path), None) => CitySource::File(PathBuf::from(path)),
            (None, Some(url)) => CitySource::Url(url),
            (None, None) => CitySource::Embedded,
        };

        let refresh_interval = get("CITIES_REFRESH_SECS")
            .map(|text| match text.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::Invalid {
                    var: "CITIES_REFRESH_SECS",
                    value: text,
                    message: "must be a positive number of seconds".to_string(),
                }),
            })
            .transpose()?;

        let static_dir = get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            addr,
            cities,
            refresh_interval,
            static_dir,
        })
    }
}

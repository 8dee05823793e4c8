//! Process configuration from environment variables

use crate::agent::RasaConfig;
use std::time::Duration;
use thiserror::Error;

/// Error reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Everything the binary needs to start both servers
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway_port: u16,
    pub actions_port: u16,
    pub rasa: RasaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_port: 5000,
            actions_port: 5055,
            rasa: RasaConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let gateway_port = parse_var(&lookup, "ASSISTANT_GATEWAY_PORT", "a port number")?
            .unwrap_or(defaults.gateway_port);
        let actions_port = parse_var(&lookup, "ASSISTANT_ACTIONS_PORT", "a port number")?
            .unwrap_or(defaults.actions_port);
        let timeout = parse_var::<u64>(&lookup, "RASA_TIMEOUT_SECS", "a number of seconds")?
            .map_or(defaults.rasa.timeout, Duration::from_secs);

        Ok(Self {
            gateway_port,
            actions_port,
            rasa: RasaConfig {
                server_url: lookup("RASA_SERVER_URL").unwrap_or(defaults.rasa.server_url),
                model_path: lookup("RASA_MODEL_PATH").unwrap_or(defaults.rasa.model_path),
                action_endpoint: lookup("RASA_ACTION_ENDPOINT")
                    .unwrap_or(defaults.rasa.action_endpoint),
                timeout,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::Invalid {
            name,
            value,
            expected,
        }),
    }
}

//! Server configuration, read from the environment once at startup.

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SERVICE_NAME: &str = "galley-server";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{set} is set but {missing} is not")]
    Incomplete {
        set: &'static str,
        missing: &'static str,
    },
}

/// Credentials for the customer service account ensured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub csr_account: Option<CsrAccount>,
    /// OTLP collector endpoint, if traces and logs should be exported
    pub otel_endpoint: Option<String>,
    pub service_name: String,
}

impl Config {
    /// Environment variables:
    /// - DATABASE_URL (required)
    /// - BIND_ADDR (default 0.0.0.0:3000)
    /// - CSR_USERNAME / CSR_PASSWORD (both or neither)
    /// - OTEL_EXPORTER_OTLP_ENDPOINT, OTEL_SERVICE_NAME
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let csr_account = match (lookup("CSR_USERNAME"), lookup("CSR_PASSWORD")) {
            (Some(username), Some(password)) => Some(CsrAccount { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    set: "CSR_USERNAME",
                    missing: "CSR_PASSWORD",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    set: "CSR_PASSWORD",
                    missing: "CSR_USERNAME",
                })
            }
        };

        Ok(Config {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            csr_account,
            otel_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty()),
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/galley")]))
            .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/galley");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.service_name, "galley-server");
        assert!(config.csr_account.is_none());
        assert!(config.otel_endpoint.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_csr_account_needs_both_halves() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/galley"),
            ("CSR_USERNAME", "csr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete { .. }));

        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/galley"),
            ("CSR_USERNAME", "csr"),
            ("CSR_PASSWORD", "secret"),
        ]))
        .unwrap();
        assert_eq!(
            config.csr_account,
            Some(CsrAccount {
                username: "csr".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_otel_endpoint_is_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/galley"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", ""),
        ]))
        .unwrap();
        assert!(config.otel_endpoint.is_none());
    }
}

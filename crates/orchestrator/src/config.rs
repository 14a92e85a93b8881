//! Orchestrator defaults, loaded from a TOML file and `SIMPILOT_*` environment overrides.
//!
//! Per-command settings always win over these defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_TIMEOUT_MS: &str = "SIMPILOT_TIMEOUT_MS";
pub const ENV_RETRIES: &str = "SIMPILOT_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "SIMPILOT_RETRY_DELAY_MS";
pub const ENV_SESSION_ID: &str = "SIMPILOT_SESSION_ID";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorConfig {
    /// Hard bound on one leaf dispatch, retries included. `None` means unbounded.
    pub default_timeout_ms: Option<u64>,
    /// Extra attempts after a transient backend failure.
    pub default_retries: u32,
    /// Pause between attempts.
    pub retry_delay_ms: u64,
    /// Session used when neither the command nor the context names one.
    pub default_session_id: Option<String>,
}

impl OrchestratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File (when given) then process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies `SIMPILOT_*` overrides read through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = parse_env(ENV_TIMEOUT_MS, lookup(ENV_TIMEOUT_MS).as_deref())? {
            self.default_timeout_ms = Some(value);
        }
        if let Some(value) = parse_env(ENV_RETRIES, lookup(ENV_RETRIES).as_deref())? {
            self.default_retries = value;
        }
        if let Some(value) = parse_env(ENV_RETRY_DELAY_MS, lookup(ENV_RETRY_DELAY_MS).as_deref())? {
            self.retry_delay_ms = value;
        }
        if let Some(session) = lookup(ENV_SESSION_ID)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
        {
            self.default_session_id = Some(session);
        }
        Ok(self)
    }

    #[must_use]
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_timeout_ms = 5000\ndefault_retries = 2\ndefault_session_id = \"sim-1\""
        )
        .unwrap();

        let config = OrchestratorConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            OrchestratorConfig {
                default_timeout_ms: Some(5000),
                default_retries: 2,
                retry_delay_ms: 0,
                default_session_id: Some("sim-1".into()),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retries = 2").unwrap();
        let err = OrchestratorConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = OrchestratorConfig::load(Path::new("/nonexistent/simpilot.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/simpilot.toml"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = OrchestratorConfig {
            default_retries: 1,
            ..OrchestratorConfig::default()
        }
        .with_overrides(env(&[
            (ENV_RETRIES, " 3 "),
            (ENV_TIMEOUT_MS, "250"),
            (ENV_SESSION_ID, "  "),
        ]))
        .unwrap();
        assert_eq!(config.default_retries, 3);
        assert_eq!(config.default_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.default_session_id, None);
    }

    #[test]
    fn malformed_environment_value_is_an_error() {
        let err = OrchestratorConfig::default()
            .with_overrides(env(&[(ENV_RETRY_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: ENV_RETRY_DELAY_MS, .. }
        ));
    }
}

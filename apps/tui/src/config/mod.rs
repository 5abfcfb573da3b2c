use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use energy_dashboard::catalog::DEFAULT_API_BASE;

pub const DEFAULT_THEME_FILE: &str = ".dashboard-theme";
pub const DEFAULT_LOG_FILE: &str = "energy-dashboard.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub theme_file: PathBuf,
    pub log_file: PathBuf,
    pub timeout: Duration,
    pub debug: bool,
}

impl Settings {
    /// Loads `.env`, then reads the process environment.
    pub fn init() -> color_eyre::eyre::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::eyre::Result<Self> {
        let api_base = lookup("DASHBOARD_API_BASE")
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = match lookup("DASHBOARD_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| eyre!("Invalid DASHBOARD_TIMEOUT_SECS {raw:?}: {e}"))?;
                Duration::from_secs(secs.max(1))
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base,
            theme_file: lookup("DASHBOARD_THEME_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_THEME_FILE), PathBuf::from),
            log_file: lookup("DASHBOARD_LOG")
                .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
            timeout,
            debug: lookup("DEBUG").is_some_and(|value| value != "0"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> color_eyre::eyre::Result<Settings> {
        let vars = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() -> color_eyre::eyre::Result<()> {
        let settings = settings(&[])?;
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.theme_file, PathBuf::from(DEFAULT_THEME_FILE));
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!settings.debug);
        Ok(())
    }

    #[test]
    fn environment_overrides() -> color_eyre::eyre::Result<()> {
        let settings = settings(&[
            ("DASHBOARD_API_BASE", "http://grid.local:8080/api/"),
            ("DASHBOARD_TIMEOUT_SECS", "2"),
            ("DASHBOARD_LOG", "/tmp/dash.log"),
            ("DEBUG", "1"),
        ])?;
        assert_eq!(settings.api_base, "http://grid.local:8080/api");
        assert_eq!(settings.timeout, Duration::from_secs(2));
        assert_eq!(settings.log_file, PathBuf::from("/tmp/dash.log"));
        assert!(settings.debug);
        Ok(())
    }

    #[test]
    fn bad_timeout_is_an_error() {
        assert!(settings(&[("DASHBOARD_TIMEOUT_SECS", "soon")]).is_err());
    }
}
